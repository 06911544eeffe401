#![warn(missing_docs)]

//! # cssvar-theme
//!
//! Build-time CSS custom-property theming for utility CSS frameworks.
//!
//! A palette of named colors is flattened into dash-joined keys, rendered as
//! CSS variables, and wired into the host framework's theme configuration.
//! Variants (media queries, alternate selectors) swap the variables' runtime
//! values without touching the theme configuration.
//!
//! ## Overview
//!
//! - **[tokens::TokenConfig]**: nested palette input and the flattener
//! - **[property::PropertyFormatter]**: CSS variable and property value
//!   generation, polymorphic over a [property::ValueFilter] strategy
//! - **[theme::Theme]**: accumulates rule sets per selector/media query and
//!   emits the framework registration artifact
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
//! // Dark mode swaps the variable values under a media query.
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
//! let json = serde_json::to_string_pretty(&registration).unwrap();
//! # assert!(json.contains("--color-primary"));
//! ```
//!
//! ## Palettes from data
//!
//! Palettes can also be ingested from JSON values or TOML text:
//!
//! ```rust
//! use cssvar_theme::tokens::TokenConfig;
//!
//! let palette = TokenConfig::from_toml(
//!     r##"
//!     accent = "#00ff00"
//!
//!     [primary]
//!     DEFAULT = "#ffcccc"
//!     400 = "#ff3333"
//!     "##,
//! )
//! .unwrap();
//! assert_eq!(palette.flatten().len(), 3);
//! ```

/// Contains color parsing and output formatting helpers.
pub mod color;
/// Contains the [error::ThemeError] type and result alias.
pub mod error;
/// Contains variable prefixes, value filters and the property formatter.
pub mod property;
/// Contains the [theme::Theme] accumulator and registration artifact.
pub mod theme;
/// Contains the palette input model and the flattener.
pub mod tokens;
