//! Builds a theme with a dark-mode media query and a named brand variant,
//! then prints the registration object a framework config would consume.

use cssvar_theme::theme::{CssRule, CssRuleObject, Theme, ThemeOptions, VariantOptions};
use cssvar_theme::tokens::TokenConfig;

fn main() {
    let palette = TokenConfig::new()
        .with("primary", "#ff0000")
        .with_group(
            "gray",
            TokenConfig::new()
                .with("DEFAULT", "#808080")
                .with("100", "#f5f5f5")
                .with("900", "#171717"),
        );
    let mut theme = Theme::new(&palette, ThemeOptions::default()).expect("valid palette");

    let dark = TokenConfig::new().with("primary", "#0000ff");
    let dark_variables = theme
        .variant(
            &dark,
            VariantOptions::default().with_media_query("@media (prefers-color-scheme: dark)"),
        )
        .expect("valid dark palette");

    let cool = TokenConfig::new().with("primary", "#00ff00");
    theme
        .variant(
            &cool,
            VariantOptions::default().with_selector("[data-theme=\"cool-theme\"]"),
        )
        .expect("valid cool palette");

    // Also expose the dark values under an explicit opt-in selector.
    let mut extra = CssRuleObject::new();
    extra.insert(
        "[data-theme=\"dark\"]".to_string(),
        CssRule::Declarations(dark_variables),
    );

    let registration = theme.create_with(extra);
    println!(
        "{}",
        serde_json::to_string_pretty(&registration).expect("registration serializes")
    );
}
