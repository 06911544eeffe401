//! # Theme Accumulator
//!
//! This module provides the [Theme] accumulator that ties the flattener and
//! the property formatter together.
//!
//! ## Overview
//!
//! - **[Theme]**: holds the accumulated rule sets and theme settings
//! - **[ThemeOptions] / [VariantOptions]**: construction and variant options
//! - **[ColorTarget]**: the framework theme color targets settings fan out to
//! - **[ThemeRegistration]**: the serializable artifact handed to the host
//!   framework's plugin registration
//!
//! ## Quick Start
//!
//! ```rust
//! use cssvar_theme::theme::{Theme, ThemeOptions, VariantOptions};
//! use cssvar_theme::tokens::TokenConfig;
//!
//! let palette = TokenConfig::new().with("primary", "#ff0000");
//! let mut theme = Theme::new(&palette, ThemeOptions::default()).unwrap();
//!
//! let dark = TokenConfig::new().with("primary", "#0000ff");
//! theme
//!     .variant(
//!         &dark,
//!         VariantOptions::default()
//!             .with_media_query("@media (prefers-color-scheme: dark)"),
//!     )
//!     .unwrap();
//!
//! let registration = theme.create();
//! assert!(registration.base_rules.contains_key(":root"));
//! ```
//!
//! Variants change which values the generated variables resolve to at
//! runtime; they never change the theme settings fixed at construction.

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::ThemeResult;
use crate::property::{ColorFilter, CssVariables, PropertyFormatter, ThemeSettings, VarPrefix};
use crate::tokens::{flatten_tokens, TokenConfig};

/// A framework theme target that color settings can be applied to.
///
/// `Colors` covers every color-driven utility; the narrower targets limit
/// the theme to a single utility family (e.g. only `bg-*` classes via
/// `BackgroundColor`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorTarget {
    /// The `colors` target, covering all color utilities.
    Colors,
    /// The `backgroundColor` target.
    BackgroundColor,
    /// The `textColor` target.
    TextColor,
    /// The `borderColor` target.
    BorderColor,
    /// The `accentColor` target.
    AccentColor,
    /// The `ringColor` target.
    RingColor,
    /// The `caretColor` target.
    CaretColor,
    /// The `divideColor` target.
    DivideColor,
    /// The `outlineColor` target.
    OutlineColor,
    /// The `boxShadowColor` target.
    BoxShadowColor,
    /// The `ringOffsetColor` target.
    RingOffsetColor,
    /// The `placeholderColor` target.
    PlaceholderColor,
    /// The `textDecorationColor` target.
    TextDecorationColor,
}

impl ColorTarget {
    /// Every recognized color target.
    pub const ALL: [ColorTarget; 13] = [
        ColorTarget::Colors,
        ColorTarget::BackgroundColor,
        ColorTarget::TextColor,
        ColorTarget::BorderColor,
        ColorTarget::AccentColor,
        ColorTarget::RingColor,
        ColorTarget::CaretColor,
        ColorTarget::DivideColor,
        ColorTarget::OutlineColor,
        ColorTarget::BoxShadowColor,
        ColorTarget::RingOffsetColor,
        ColorTarget::PlaceholderColor,
        ColorTarget::TextDecorationColor,
    ];

    /// The target's key in the framework theme configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorTarget::Colors => "colors",
            ColorTarget::BackgroundColor => "backgroundColor",
            ColorTarget::TextColor => "textColor",
            ColorTarget::BorderColor => "borderColor",
            ColorTarget::AccentColor => "accentColor",
            ColorTarget::RingColor => "ringColor",
            ColorTarget::CaretColor => "caretColor",
            ColorTarget::DivideColor => "divideColor",
            ColorTarget::OutlineColor => "outlineColor",
            ColorTarget::BoxShadowColor => "boxShadowColor",
            ColorTarget::RingOffsetColor => "ringOffsetColor",
            ColorTarget::PlaceholderColor => "placeholderColor",
            ColorTarget::TextDecorationColor => "textDecorationColor",
        }
    }
}

impl std::fmt::Display for ColorTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for constructing a [Theme].
#[derive(Clone, Debug)]
pub struct ThemeOptions {
    /// The prefix added to the key of a color. Defaults to `--color-`.
    pub prefix: VarPrefix,
    /// The selector the CSS variables are added to. Defaults to `:root`.
    pub selector: String,
    /// The framework theme targets the settings are applied to.
    /// Defaults to [ColorTarget::Colors], i.e. all color utilities.
    pub color_property: Vec<ColorTarget>,
}

impl Default for ThemeOptions {
    fn default() -> Self {
        Self {
            prefix: VarPrefix::default(),
            selector: ":root".to_string(),
            color_property: vec![ColorTarget::Colors],
        }
    }
}

impl ThemeOptions {
    /// Set the CSS variable prefix.
    pub fn with_prefix(mut self, prefix: VarPrefix) -> Self {
        self.prefix = prefix;
        self
    }

    /// Set the selector the variables are registered under.
    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = selector.into();
        self
    }

    /// Apply the settings to a single framework theme target.
    pub fn with_color_target(mut self, target: ColorTarget) -> Self {
        self.color_property = vec![target];
        self
    }

    /// Apply the settings to several framework theme targets.
    pub fn with_color_targets(mut self, targets: impl IntoIterator<Item = ColorTarget>) -> Self {
        self.color_property = targets.into_iter().collect();
        self
    }
}

/// Options for registering a theme variant.
#[derive(Clone, Debug, Default)]
pub struct VariantOptions {
    /// The selector to add the CSS variables to. If not specified the main
    /// theme's selector is used for media-query nesting.
    pub selector: Option<String>,
    /// A media query to nest the variables under, e.g.
    /// `@media (prefers-color-scheme: dark)`.
    pub media_query: Option<String>,
}

impl VariantOptions {
    /// Set the variant's selector.
    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    /// Set the variant's media query.
    pub fn with_media_query(mut self, media_query: impl Into<String>) -> Self {
        self.media_query = Some(media_query.into());
        self
    }
}

/// One accumulated CSS rule: flat declarations for a selector, or a nested
/// block of selectors for a media query.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CssRule {
    /// Declarations applied directly to the rule's selector.
    Declarations(CssVariables),
    /// Selector blocks nested inside a media query.
    Nested(IndexMap<String, CssVariables>),
}

impl CssRule {
    /// The rule's declarations, if it is a flat rule.
    pub fn as_declarations(&self) -> Option<&CssVariables> {
        match self {
            CssRule::Declarations(declarations) => Some(declarations),
            CssRule::Nested(_) => None,
        }
    }

    /// The rule's nested selector blocks, if it is a media-query rule.
    pub fn as_nested(&self) -> Option<&IndexMap<String, CssVariables>> {
        match self {
            CssRule::Declarations(_) => None,
            CssRule::Nested(nested) => Some(nested),
        }
    }
}

/// Accumulated CSS rule sets keyed by selector or media query.
pub type CssRuleObject = IndexMap<String, CssRule>;

/// The artifact handed to the host framework's plugin registration.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeRegistration {
    /// Selector/media-query keyed rules to inject as base styles.
    pub base_rules: CssRuleObject,
    /// Framework theme target to settings mapping, to merge into the
    /// resolved theme.
    pub theme_extension: IndexMap<String, ThemeSettings>,
}

/// Accumulates CSS variable rule sets for a palette and its variants.
///
/// Construction flattens and formats the primary palette and registers it
/// under the main selector. [Theme::variant] registers alternate rule sets;
/// [Theme::create] bundles everything into a [ThemeRegistration].
#[derive(Clone, Debug)]
pub struct Theme {
    prefix: VarPrefix,
    selector: String,
    color_property: Vec<ColorTarget>,
    theme_settings: ThemeSettings,
    css_rules: CssRuleObject,
}

impl Theme {
    /// Flatten and format `palette` and register it under the main selector.
    pub fn new(palette: &TokenConfig, options: ThemeOptions) -> ThemeResult<Self> {
        let ThemeOptions {
            prefix,
            selector,
            color_property,
        } = options;

        let flat = flatten_tokens(palette, "");
        let formatter = PropertyFormatter::new(prefix.clone(), ColorFilter);
        let theme_settings = formatter.properties(&flat)?;
        let variables = formatter.variables(&flat)?;
        log::debug!(
            "theme initialized with {} variables under '{selector}'",
            variables.len()
        );

        let mut css_rules = CssRuleObject::new();
        css_rules.insert(selector.clone(), CssRule::Declarations(variables));

        Ok(Self {
            prefix,
            selector,
            color_property,
            theme_settings,
            css_rules,
        })
    }

    /// Register a variant palette under an alternate selector or media query.
    ///
    /// The variant's variables are computed with the theme's prefix, so they
    /// override the primary values wherever the variant's selector or media
    /// query applies. Theme settings are fixed at construction and are not
    /// updated. Supplying both a selector and a media query registers two
    /// rule sets, one nested under the media query and one flat under the
    /// selector.
    ///
    /// Returns the computed variable mapping so it can also be registered
    /// manually under a custom grouping.
    pub fn variant(
        &mut self,
        palette: &TokenConfig,
        options: VariantOptions,
    ) -> ThemeResult<CssVariables> {
        let flat = flatten_tokens(palette, "");
        let formatter = PropertyFormatter::new(self.prefix.clone(), ColorFilter);
        let variables = formatter.variables(&flat)?;

        if let Some(media_query) = &options.media_query {
            let selector = options
                .selector
                .clone()
                .unwrap_or_else(|| self.selector.clone());
            log::debug!("variant registered under media query '{media_query}'");
            let mut nested = IndexMap::new();
            nested.insert(selector, variables.clone());
            self.css_rules
                .insert(media_query.clone(), CssRule::Nested(nested));
        }

        if let Some(selector) = &options.selector {
            log::debug!("variant registered under selector '{selector}'");
            self.css_rules
                .insert(selector.clone(), CssRule::Declarations(variables.clone()));
        }

        Ok(variables)
    }

    /// Bundle the accumulated rule sets and theme settings into the host
    /// framework's registration shape.
    pub fn create(&self) -> ThemeRegistration {
        self.create_with(CssRuleObject::new())
    }

    /// Like [Theme::create], merging `extra_base_rules` into the base rules.
    ///
    /// Extra rules take precedence on selector collision. The accumulator
    /// itself is not mutated, so this can be called repeatedly with
    /// different extra rules.
    pub fn create_with(&self, extra_base_rules: CssRuleObject) -> ThemeRegistration {
        let mut base_rules = self.css_rules.clone();
        for (selector, rule) in extra_base_rules {
            base_rules.insert(selector, rule);
        }

        let mut theme_extension = IndexMap::new();
        for target in &self.color_property {
            theme_extension.insert(target.as_str().to_string(), self.theme_settings.clone());
        }

        ThemeRegistration {
            base_rules,
            theme_extension,
        }
    }

    /// The main selector the primary palette is registered under.
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// The CSS variable prefix.
    pub fn prefix(&self) -> &VarPrefix {
        &self.prefix
    }

    /// The theme settings fixed at construction.
    pub fn theme_settings(&self) -> &ThemeSettings {
        &self.theme_settings
    }

    /// The accumulated rule sets.
    pub fn css_rules(&self) -> &CssRuleObject {
        &self.css_rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red_theme() -> Theme {
        let palette = TokenConfig::new().with("primary", "#ff0000");
        Theme::new(&palette, ThemeOptions::default()).unwrap()
    }

    #[test]
    fn test_round_trip_default_options() {
        let theme = red_theme();

        let root = theme.css_rules().get(":root").unwrap();
        let declarations = root.as_declarations().unwrap();
        assert_eq!(
            declarations.get("--color-primary").map(String::as_str),
            Some("0 100% 50%")
        );

        assert_eq!(
            theme.theme_settings().get("primary").map(String::as_str),
            Some("hsl(var(--color-primary, #ff0000) / <alpha-value>)")
        );
    }

    #[test]
    fn test_custom_prefix_and_selector() {
        let palette = TokenConfig::new().with("primary", "#ff0000");
        let options = ThemeOptions::default()
            .with_prefix(VarPrefix::new("--brand-").unwrap())
            .with_selector("[data-theme='base']");
        let theme = Theme::new(&palette, options).unwrap();

        let rule = theme.css_rules().get("[data-theme='base']").unwrap();
        assert!(rule.as_declarations().unwrap().contains_key("--brand-primary"));
        assert_eq!(
            theme.theme_settings().get("primary").map(String::as_str),
            Some("hsl(var(--brand-primary, #ff0000) / <alpha-value>)")
        );
    }

    #[test]
    fn test_construction_fails_on_bad_color() {
        let palette = TokenConfig::new().with("primary", "nope");
        assert!(Theme::new(&palette, ThemeOptions::default()).is_err());
    }

    #[test]
    fn test_variant_media_query_nests_under_base_selector() {
        let mut theme = red_theme();
        let dark = TokenConfig::new().with("primary", "#0000ff");
        theme
            .variant(
                &dark,
                VariantOptions::default()
                    .with_media_query("@media (prefers-color-scheme: dark)"),
            )
            .unwrap();

        let rule = theme
            .css_rules()
            .get("@media (prefers-color-scheme: dark)")
            .unwrap();
        let nested = rule.as_nested().unwrap();
        assert_eq!(
            nested[":root"].get("--color-primary").map(String::as_str),
            Some("240 100% 50%")
        );
    }

    #[test]
    fn test_variant_selector_registers_flat_entry() {
        let mut theme = red_theme();
        let cool = TokenConfig::new().with("primary", "#00ff00");
        theme
            .variant(
                &cool,
                VariantOptions::default().with_selector("[data-theme='cool']"),
            )
            .unwrap();

        let rule = theme.css_rules().get("[data-theme='cool']").unwrap();
        assert_eq!(
            rule.as_declarations()
                .unwrap()
                .get("--color-primary")
                .map(String::as_str),
            Some("120 100% 50%")
        );
    }

    #[test]
    fn test_variant_with_selector_and_media_query() {
        // Supplying both options produces two independent registry entries.
        let mut theme = red_theme();
        let dark = TokenConfig::new().with("primary", "#0000ff");
        theme
            .variant(
                &dark,
                VariantOptions::default()
                    .with_selector("[data-theme='dark']")
                    .with_media_query("@media (prefers-color-scheme: dark)"),
            )
            .unwrap();

        assert_eq!(theme.css_rules().len(), 3);
        let nested = theme.css_rules()["@media (prefers-color-scheme: dark)"]
            .as_nested()
            .unwrap();
        assert!(nested.contains_key("[data-theme='dark']"));
        assert!(theme.css_rules()["[data-theme='dark']"].as_declarations().is_some());
    }

    #[test]
    fn test_variant_returns_mapping_and_keeps_settings() {
        let mut theme = red_theme();
        let settings_before = theme.theme_settings().clone();

        let variant_palette = TokenConfig::new()
            .with("primary", "#0000ff")
            .with("extra", "#123456");
        let variables = theme
            .variant(
                &variant_palette,
                VariantOptions::default().with_selector(".brand"),
            )
            .unwrap();

        assert_eq!(variables.len(), 2);
        assert!(variables.contains_key("--color-extra"));
        // Settings stay fixed at construction, variant keys never join them.
        assert_eq!(theme.theme_settings(), &settings_before);
    }

    #[test]
    fn test_variant_failure_leaves_registry_unchanged() {
        let mut theme = red_theme();
        let bad = TokenConfig::new().with("primary", "nope");
        assert!(theme
            .variant(&bad, VariantOptions::default().with_selector(".x"))
            .is_err());
        assert_eq!(theme.css_rules().len(), 1);
    }

    #[test]
    fn test_create_is_idempotent() {
        let mut theme = red_theme();
        let dark = TokenConfig::new().with("primary", "#0000ff");
        theme
            .variant(&dark, VariantOptions::default().with_selector(".dark"))
            .unwrap();
        let rules_before = theme.css_rules().clone();

        let mut extra = CssRuleObject::new();
        extra.insert(
            "body".to_string(),
            CssRule::Declarations(CssVariables::from_iter([(
                "--color-extra".to_string(),
                "0 0% 0%".to_string(),
            )])),
        );

        let first = theme.create_with(extra);
        let second = theme.create();

        assert!(first.base_rules.contains_key("body"));
        assert!(!second.base_rules.contains_key("body"));
        assert_eq!(theme.css_rules(), &rules_before);
    }

    #[test]
    fn test_create_extra_rules_take_precedence() {
        let theme = red_theme();
        let mut extra = CssRuleObject::new();
        extra.insert(
            ":root".to_string(),
            CssRule::Declarations(CssVariables::from_iter([(
                "--color-primary".to_string(),
                "overridden".to_string(),
            )])),
        );

        let registration = theme.create_with(extra);
        assert_eq!(
            registration.base_rules[":root"]
                .as_declarations()
                .unwrap()
                .get("--color-primary")
                .map(String::as_str),
            Some("overridden")
        );
    }

    #[test]
    fn test_create_fans_out_to_all_named_targets() {
        let palette = TokenConfig::new().with("primary", "#ff0000");
        let options = ThemeOptions::default().with_color_targets([
            ColorTarget::BackgroundColor,
            ColorTarget::TextColor,
        ]);
        let theme = Theme::new(&palette, options).unwrap();

        let registration = theme.create();
        assert_eq!(registration.theme_extension.len(), 2);
        assert_eq!(
            registration.theme_extension["backgroundColor"],
            registration.theme_extension["textColor"]
        );
    }

    #[test]
    fn test_color_target_names() {
        assert_eq!(ColorTarget::Colors.as_str(), "colors");
        assert_eq!(ColorTarget::RingOffsetColor.as_str(), "ringOffsetColor");
        assert_eq!(ColorTarget::ALL.len(), 13);
    }
}
