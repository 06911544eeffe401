//! Color value helpers over the CSS color parser.
//!
//! Accepts any string the parser understands (hex, `rgb()`, `hsl()`, named
//! colors) and renders the two output forms the theme needs: bare HSL
//! components for CSS variable values and an opaque hex fallback.

use csscolorparser::Color;

use crate::error::{ThemeError, ThemeResult};

/// Parse a raw color value, attributing failures to the flattened key.
pub fn parse(key: &str, value: &str) -> ThemeResult<Color> {
    csscolorparser::parse(value).map_err(|source| ThemeError::value_parse(key, value, source))
}

/// Render a color as bare HSL components at full opacity.
///
/// The result carries no `hsl()` wrapper and no commas, e.g. `"0 100% 50%"`,
/// so it can be spliced into `hsl(var(...))` expressions.
pub fn hsl_components(color: &Color) -> String {
    let (h, s, l, _) = color.to_hsla();
    let h = h.round().rem_euclid(360.0) as i64;
    let s = (s * 100.0).round() as i64;
    let l = (l * 100.0).round() as i64;
    format!("{h} {s}% {l}%")
}

/// Render a color as a `#rrggbb` hex string at full opacity.
pub fn hex_opaque(color: &Color) -> String {
    Color::new(color.r, color.g, color.b, 1.0).to_hex_string()
}
