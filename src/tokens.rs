//! # Token Configuration
//!
//! This module provides the palette input model and the flattener that turns
//! nested token groups into a flat, dash-joined key mapping.
//!
//! ## Overview
//!
//! - **[TokenConfig]**: ordered, possibly nested mapping of token names to
//!   color values
//! - **[TokenValue]**: a scalar color string or a nested group
//! - **[flatten_tokens]**: depth-first flattening into [FlatTokens]
//! - **Ingestion**: conversion from `serde_json::Value` and TOML text
//!
//! A group may carry a value of its own under the reserved [DEFAULT_KEY]
//! sub-key:
//!
//! ```rust
//! use cssvar_theme::tokens::{flatten_tokens, TokenConfig};
//!
//! let palette = TokenConfig::new().with_group(
//!     "primary",
//!     TokenConfig::new()
//!         .with("DEFAULT", "#ffcccc")
//!         .with("400", "#ff3333"),
//! );
//!
//! let flat = flatten_tokens(&palette, "");
//! assert_eq!(flat.get("primary").map(String::as_str), Some("#ffcccc"));
//! assert_eq!(flat.get("primary-400").map(String::as_str), Some("#ff3333"));
//! ```

use indexmap::IndexMap;

use crate::error::{ThemeError, ThemeResult};

/// The reserved sub-key that assigns a group's own value.
///
/// A user token literally named `DEFAULT` collides with this key and is
/// promoted onto its parent path. There is no escaping mechanism.
pub const DEFAULT_KEY: &str = "DEFAULT";

/// Flattened configuration: dash-joined key paths to scalar color values,
/// in depth-first source order.
pub type FlatTokens = IndexMap<String, String>;

/// A single palette entry, either a scalar color value or a nested group.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenValue {
    /// A scalar color value such as `"#ff0000"` or `"hsl(0, 100%, 50%)"`.
    Value(String),
    /// A nested group of sub-tokens.
    Group(TokenConfig),
}

/// An ordered mapping of token names to [TokenValue]s.
///
/// Iteration order is insertion order; the flattener and every downstream
/// mapping preserve it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TokenConfig {
    entries: IndexMap<String, TokenValue>,
}

impl TokenConfig {
    /// Create a new empty token configuration.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Insert a scalar value and return the configuration.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries
            .insert(name.into(), TokenValue::Value(value.into()));
        self
    }

    /// Insert a nested group and return the configuration.
    pub fn with_group(mut self, name: impl Into<String>, group: TokenConfig) -> Self {
        self.entries.insert(name.into(), TokenValue::Group(group));
        self
    }

    /// Set a token value by name.
    pub fn set(&mut self, name: impl Into<String>, value: TokenValue) {
        self.entries.insert(name.into(), value);
    }

    /// Get a token value by name. Returns [None] if the name does not exist.
    pub fn get(&self, name: &str) -> Option<&TokenValue> {
        self.entries.get(name)
    }

    /// The number of entries at this level.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether this level has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate the entries at this level in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &TokenValue)> {
        self.entries.iter()
    }

    /// Flatten this configuration into dash-joined key paths.
    ///
    /// Shorthand for [flatten_tokens] with an empty path prefix.
    pub fn flatten(&self) -> FlatTokens {
        flatten_tokens(self, "")
    }

    /// Convert a JSON value into a token configuration.
    ///
    /// The value must be an object whose entries are color strings or nested
    /// objects. `null` entries are dropped. Any other entry type fails with
    /// [ThemeError::ConfigShape] naming the offending key path.
    pub fn from_json(value: &serde_json::Value) -> ThemeResult<Self> {
        let map = value.as_object().ok_or_else(|| {
            ThemeError::palette_parse("expected a table of color tokens at the palette root")
        })?;
        Self::from_json_object(map, "")
    }

    /// Parse a TOML document into a token configuration.
    ///
    /// Entries must be color strings or nested tables. Any other entry type
    /// fails with [ThemeError::ConfigShape] naming the offending key path.
    pub fn from_toml(content: &str) -> ThemeResult<Self> {
        let table: toml::Table = content.parse().map_err(ThemeError::palette_parse)?;
        Self::from_toml_table(&table, "")
    }

    fn from_json_object(
        map: &serde_json::Map<String, serde_json::Value>,
        path: &str,
    ) -> ThemeResult<Self> {
        let mut config = Self::new();
        for (name, value) in map {
            let key = join_key(path, name);
            match value {
                serde_json::Value::String(s) => {
                    config.set(name, TokenValue::Value(s.clone()));
                }
                serde_json::Value::Object(nested) => {
                    let group = Self::from_json_object(nested, &key)?;
                    config.set(name, TokenValue::Group(group));
                }
                serde_json::Value::Null => continue,
                serde_json::Value::Number(_) => {
                    return Err(ThemeError::config_shape(key, "a number"));
                }
                serde_json::Value::Bool(_) => {
                    return Err(ThemeError::config_shape(key, "a boolean"));
                }
                serde_json::Value::Array(_) => {
                    return Err(ThemeError::config_shape(key, "an array"));
                }
            }
        }
        Ok(config)
    }

    fn from_toml_table(table: &toml::Table, path: &str) -> ThemeResult<Self> {
        let mut config = Self::new();
        for (name, value) in table {
            let key = join_key(path, name);
            match value {
                toml::Value::String(s) => {
                    config.set(name, TokenValue::Value(s.clone()));
                }
                toml::Value::Table(nested) => {
                    let group = Self::from_toml_table(nested, &key)?;
                    config.set(name, TokenValue::Group(group));
                }
                toml::Value::Integer(_) | toml::Value::Float(_) => {
                    return Err(ThemeError::config_shape(key, "a number"));
                }
                toml::Value::Boolean(_) => {
                    return Err(ThemeError::config_shape(key, "a boolean"));
                }
                toml::Value::Array(_) => {
                    return Err(ThemeError::config_shape(key, "an array"));
                }
                toml::Value::Datetime(_) => {
                    return Err(ThemeError::config_shape(key, "a datetime"));
                }
            }
        }
        Ok(config)
    }
}

impl FromIterator<(String, TokenValue)> for TokenConfig {
    fn from_iter<I: IntoIterator<Item = (String, TokenValue)>>(iter: I) -> Self {
        Self {
            entries: IndexMap::from_iter(iter),
        }
    }
}

/// Flatten a token configuration into dash-joined key paths.
///
/// Traversal is depth-first in insertion order. Empty scalar values are
/// skipped entirely. A group's [DEFAULT_KEY] entry is promoted onto the
/// group's own path before its remaining children are descended into. Key
/// collisions keep the first position and the last value.
pub fn flatten_tokens(config: &TokenConfig, path_prefix: &str) -> FlatTokens {
    let mut flat = FlatTokens::new();
    flatten_into(config, path_prefix, false, &mut flat);
    flat
}

fn flatten_into(config: &TokenConfig, path_prefix: &str, skip_default: bool, flat: &mut FlatTokens) {
    for (name, value) in config.iter() {
        // The reserved key is promoted by the enclosing group, not revisited.
        if skip_default && name == DEFAULT_KEY {
            continue;
        }
        let key = join_key(path_prefix, name);
        match value {
            TokenValue::Value(value) => {
                if value.is_empty() {
                    continue;
                }
                insert_flat(flat, key, value.clone());
            }
            TokenValue::Group(group) => {
                if let Some(TokenValue::Value(default)) = group.get(DEFAULT_KEY) {
                    if !default.is_empty() {
                        insert_flat(flat, key.clone(), default.clone());
                    }
                }
                flatten_into(group, &key, true, flat);
            }
        }
    }
}

fn insert_flat(flat: &mut FlatTokens, key: String, value: String) {
    if let Some(previous) = flat.insert(key.clone(), value) {
        log::warn!("flattened key '{key}' overwrites earlier value '{previous}'");
    }
}

fn join_key(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}-{name}")
    }
}
