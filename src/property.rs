//! # Property Value Formatting
//!
//! This module turns a flattened token configuration into the two parallel
//! outputs a theme needs:
//!
//! - **[CssVariables]**: generated variable names to normalized values
//! - **[ThemeSettings]**: original keys to framework-consumable property
//!   values referencing those variables with a literal fallback
//!
//! Formatting is polymorphic over a [ValueFilter] strategy. [Passthrough]
//! leaves values untouched and emits plain `var(...)` references;
//! [ColorFilter] normalizes values to bare HSL components and emits
//! `hsl(var(...))` expressions with a hex fallback and an alpha placeholder
//! the host framework later splices opacity modifiers into.

use std::fmt;

use indexmap::IndexMap;

use crate::color;
use crate::error::{ThemeError, ThemeResult};
use crate::tokens::FlatTokens;

/// Mapping of generated CSS variable names to their values.
///
/// ```text
/// {
///   "--color-primary": "0 100% 50%"
/// }
/// ```
pub type CssVariables = IndexMap<String, String>;

/// Mapping of flattened token keys to framework-facing property values.
pub type ThemeSettings = IndexMap<String, String>;

/// The placeholder the host framework replaces with an opacity modifier.
pub const ALPHA_PLACEHOLDER: &str = "<alpha-value>";

/// A validated CSS custom-property prefix of the form `--<name>-`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VarPrefix(String);

impl VarPrefix {
    /// Create a prefix, validating the `--<name>-` pattern.
    pub fn new(prefix: impl Into<String>) -> ThemeResult<Self> {
        let prefix = prefix.into();
        let name = prefix
            .strip_prefix("--")
            .and_then(|rest| rest.strip_suffix('-'))
            .unwrap_or("");
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(ThemeError::invalid_prefix(prefix));
        }
        Ok(Self(prefix))
    }

    /// Compose a prefix from a bare base name and a namespace segment.
    ///
    /// The segment is kebab-cased, so `("tw", "backgroundColor")` yields
    /// `--tw-background-color-`. An empty segment yields `--<base>-`.
    pub fn namespaced(base: &str, segment: &str) -> ThemeResult<Self> {
        let segment = camel_to_kebab(segment);
        if segment.is_empty() {
            Self::new(format!("--{base}-"))
        } else if base.is_empty() {
            Self::new(format!("--{segment}-"))
        } else {
            Self::new(format!("--{base}-{segment}-"))
        }
    }

    /// The prefix as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive the full variable name for a flattened key.
    pub fn variable_name(&self, key: &str) -> String {
        format!("{}{key}", self.0)
    }
}

impl Default for VarPrefix {
    fn default() -> Self {
        Self("--color-".to_string())
    }
}

impl fmt::Display for VarPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Convert a camelCase string to kebab-case.
pub fn camel_to_kebab(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 4);
    for ch in value.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Strategy for transforming token values into variable and property values.
///
/// Property-type implementations may also inject a fixed namespace segment
/// into generated prefixes, the way [ColorFilter] injects `color`.
pub trait ValueFilter {
    /// Fixed segment injected between a base prefix and the key, if any.
    fn namespace(&self) -> &'static str {
        ""
    }

    /// Compute the value assigned to the generated CSS variable.
    fn variable_value(&self, key: &str, value: &str) -> ThemeResult<String>;

    /// Compute the framework-facing value for a key, given its variable name.
    fn property_value(&self, key: &str, value: &str, variable: &str) -> ThemeResult<String>;
}

/// Identity filter for non-color properties.
///
/// Values pass through untouched and properties reference their variable
/// with no fallback.
#[derive(Clone, Copy, Debug, Default)]
pub struct Passthrough;

impl ValueFilter for Passthrough {
    fn variable_value(&self, _key: &str, value: &str) -> ThemeResult<String> {
        Ok(value.to_string())
    }

    fn property_value(&self, _key: &str, _value: &str, variable: &str) -> ThemeResult<String> {
        Ok(format!("var({variable})"))
    }
}

/// Color filter producing HSL variable values and hex-fallback properties.
///
/// The hex fallback is what lets framework tooling preview colors without
/// resolving the variable.
#[derive(Clone, Copy, Debug, Default)]
pub struct ColorFilter;

impl ValueFilter for ColorFilter {
    fn namespace(&self) -> &'static str {
        "color"
    }

    fn variable_value(&self, key: &str, value: &str) -> ThemeResult<String> {
        let color = color::parse(key, value)?;
        Ok(color::hsl_components(&color))
    }

    fn property_value(&self, key: &str, value: &str, variable: &str) -> ThemeResult<String> {
        let color = color::parse(key, value)?;
        let hex = color::hex_opaque(&color);
        Ok(format!("hsl(var({variable}, {hex}) / {ALPHA_PLACEHOLDER})"))
    }
}

/// Formats a flattened token configuration through a [ValueFilter].
#[derive(Clone, Debug)]
pub struct PropertyFormatter<F> {
    prefix: VarPrefix,
    filter: F,
}

impl<F: ValueFilter> PropertyFormatter<F> {
    /// Create a formatter with an explicit prefix.
    pub fn new(prefix: VarPrefix, filter: F) -> Self {
        Self { prefix, filter }
    }

    /// Create a formatter whose prefix is composed from a bare base name and
    /// the filter's namespace segment.
    pub fn namespaced(base: &str, filter: F) -> ThemeResult<Self> {
        let prefix = VarPrefix::namespaced(base, filter.namespace())?;
        Ok(Self { prefix, filter })
    }

    /// The prefix this formatter derives variable names from.
    pub fn prefix(&self) -> &VarPrefix {
        &self.prefix
    }

    /// Derive the full variable name for a flattened key.
    pub fn variable_name(&self, key: &str) -> String {
        self.prefix.variable_name(key)
    }

    /// Produce the CSS variable mapping for a flattened configuration.
    ///
    /// Fails atomically: a value the filter rejects aborts the whole call
    /// and no partial mapping is returned.
    pub fn variables(&self, tokens: &FlatTokens) -> ThemeResult<CssVariables> {
        let mut variables = CssVariables::new();
        for (key, value) in tokens {
            if value.is_empty() {
                continue;
            }
            let name = self.variable_name(key);
            variables.insert(name, self.filter.variable_value(key, value)?);
        }
        Ok(variables)
    }

    /// Produce the theme settings mapping for a flattened configuration.
    ///
    /// Fails atomically, like [PropertyFormatter::variables].
    pub fn properties(&self, tokens: &FlatTokens) -> ThemeResult<ThemeSettings> {
        let mut settings = ThemeSettings::new();
        for (key, value) in tokens {
            if value.is_empty() {
                continue;
            }
            let variable = self.variable_name(key);
            settings.insert(
                key.clone(),
                self.filter.property_value(key, value, &variable)?,
            );
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::TokenConfig;

    fn flat(pairs: &[(&str, &str)]) -> FlatTokens {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_prefix_accepts_custom_name() {
        let prefix = VarPrefix::new("--brand-").unwrap();
        assert_eq!(prefix.variable_name("primary"), "--brand-primary");
    }

    #[test]
    fn test_prefix_rejects_malformed() {
        for bad in ["color-", "--color", "--", "---", "--sp ace-"] {
            assert!(
                matches!(VarPrefix::new(bad), Err(ThemeError::InvalidPrefix { .. })),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_prefix_default() {
        assert_eq!(VarPrefix::default().as_str(), "--color-");
    }

    #[test]
    fn test_camel_to_kebab() {
        assert_eq!(camel_to_kebab("backgroundColor"), "background-color");
        assert_eq!(camel_to_kebab("color"), "color");
        assert_eq!(camel_to_kebab("ringOffsetColor"), "ring-offset-color");
    }

    #[test]
    fn test_namespaced_prefix_composition() {
        let formatter = PropertyFormatter::namespaced("tw", ColorFilter).unwrap();
        assert_eq!(formatter.variable_name("primary"), "--tw-color-primary");

        let plain = PropertyFormatter::namespaced("tw", Passthrough).unwrap();
        assert_eq!(plain.variable_name("radius"), "--tw-radius");
    }

    #[test]
    fn test_color_variables_are_bare_components() {
        let formatter = PropertyFormatter::new(VarPrefix::default(), ColorFilter);
        let variables = formatter
            .variables(&flat(&[("primary", "#ff0000"), ("accent", "hsl(120, 50%, 50%)")]))
            .unwrap();

        assert_eq!(
            variables.get("--color-primary").map(String::as_str),
            Some("0 100% 50%")
        );
        for value in variables.values() {
            assert!(!value.contains("hsl("));
            assert!(!value.contains(')'));
            assert!(!value.contains(','));
        }
    }

    #[test]
    fn test_color_properties_reference_variable_with_hex_fallback() {
        let formatter = PropertyFormatter::new(VarPrefix::default(), ColorFilter);
        let settings = formatter
            .properties(&flat(&[("primary", "#ff0000")]))
            .unwrap();

        assert_eq!(
            settings.get("primary").map(String::as_str),
            Some("hsl(var(--color-primary, #ff0000) / <alpha-value>)")
        );
    }

    #[test]
    fn test_passthrough_is_identity() {
        let formatter =
            PropertyFormatter::new(VarPrefix::new("--spacing-").unwrap(), Passthrough);
        let tokens = flat(&[("lg", "2rem")]);

        let variables = formatter.variables(&tokens).unwrap();
        assert_eq!(variables.get("--spacing-lg").map(String::as_str), Some("2rem"));

        let settings = formatter.properties(&tokens).unwrap();
        assert_eq!(
            settings.get("lg").map(String::as_str),
            Some("var(--spacing-lg)")
        );
    }

    #[test]
    fn test_unparseable_color_aborts_whole_call() {
        let formatter = PropertyFormatter::new(VarPrefix::default(), ColorFilter);
        let tokens = flat(&[("good", "#ff0000"), ("bad", "definitely-not-a-color")]);

        assert!(matches!(
            formatter.variables(&tokens),
            Err(ThemeError::ValueParse { .. })
        ));
        assert!(matches!(
            formatter.properties(&tokens),
            Err(ThemeError::ValueParse { .. })
        ));
    }

    #[test]
    fn test_formatter_skips_empty_values() {
        // Flattening already drops empty values, this covers hand-built maps.
        let formatter = PropertyFormatter::new(VarPrefix::default(), ColorFilter);
        let mut tokens = TokenConfig::new().with("primary", "#ff0000").flatten();
        tokens.insert("ghost".to_string(), String::new());

        let variables = formatter.variables(&tokens).unwrap();
        assert_eq!(variables.len(), 1);
        assert!(!variables.contains_key("--color-ghost"));
    }
}
