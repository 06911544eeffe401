//! # Theme Error Types
//!
//! This module provides the error types for palette flattening, value
//! formatting and theme accumulation, replacing generic error types with
//! specific, context-rich error messages.

use csscolorparser::ParseColorError;
use thiserror::Error;

/// Errors that can occur while building a theme.
#[derive(Error, Debug)]
pub enum ThemeError {
    /// A declared color value could not be parsed by the color parser.
    #[error("value '{value}' for key '{key}' is not a valid color: {source}")]
    ValueParse {
        /// The flattened key path carrying the value.
        key: String,
        /// The raw value that failed to parse.
        value: String,
        /// The underlying parser error.
        #[source]
        source: ParseColorError,
    },

    /// A token configuration entry is neither a scalar nor a nested group.
    #[error("palette entry '{key}' must be a color string or a nested group, found {found}")]
    ConfigShape {
        /// The key path of the malformed entry.
        key: String,
        /// A short description of the value that was found instead.
        found: &'static str,
    },

    /// A palette document could not be parsed at all.
    #[error("failed to parse palette: {details}")]
    PaletteParse {
        /// Details about the parse error.
        details: String,
    },

    /// A CSS variable prefix does not match the `--<name>-` pattern.
    #[error("invalid CSS variable prefix '{prefix}', expected the form '--<name>-'")]
    InvalidPrefix {
        /// The rejected prefix.
        prefix: String,
    },
}

/// Result type alias for theme operations.
pub type ThemeResult<T> = Result<T, ThemeError>;

impl ThemeError {
    /// Create a value parse error for a key/value pair.
    pub fn value_parse(
        key: impl Into<String>,
        value: impl Into<String>,
        source: ParseColorError,
    ) -> Self {
        Self::ValueParse {
            key: key.into(),
            value: value.into(),
            source,
        }
    }

    /// Create a configuration shape error for a key path.
    pub fn config_shape(key: impl Into<String>, found: &'static str) -> Self {
        Self::ConfigShape {
            key: key.into(),
            found,
        }
    }

    /// Create a palette parse error from any error type.
    pub fn palette_parse(source: impl std::fmt::Display) -> Self {
        Self::PaletteParse {
            details: source.to_string(),
        }
    }

    /// Create an invalid prefix error.
    pub fn invalid_prefix(prefix: impl Into<String>) -> Self {
        Self::InvalidPrefix {
            prefix: prefix.into(),
        }
    }
}
