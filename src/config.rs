//! TOML loading for configuration and render data
//!
//! Config files are flat TOML tables merged into the configuration store.
//! Data files use the same format; their top-level keys become template
//! variables.
//!
//! ```toml
//! views_path = "templates"
//! self_alias = "view"
//! ```

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::store::Bindings;

/// Config key holding the base directory for relative view paths
pub const VIEWS_PATH: &str = "views_path";

/// Config key naming the variable under which a view exposes itself to templates
pub const SELF_ALIAS: &str = "self_alias";

/// Errors that can occur when loading TOML bindings
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Known config keys, checked for type. Other keys are ignored here.
#[derive(Deserialize)]
#[allow(dead_code)]
struct TomlConfig {
    views_path: Option<String>,
    self_alias: Option<String>,
}

/// Load config items from a TOML file
pub fn load_config(path: &Path) -> Result<Bindings, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse config items from a TOML string.
///
/// Like [`parse_bindings`], but `views_path` and `self_alias` must be strings.
pub fn parse_config(content: &str) -> Result<Bindings, ConfigError> {
    let table: toml::Table = toml::from_str(content)?;
    let _: TomlConfig = toml::Value::Table(table.clone()).try_into()?;
    Ok(table_to_bindings(table))
}

/// Load bindings from a TOML file
pub fn load_bindings(path: &Path) -> Result<Bindings, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_bindings(&content)
}

/// Parse bindings from a TOML string
pub fn parse_bindings(content: &str) -> Result<Bindings, ConfigError> {
    let table: toml::Table = toml::from_str(content)?;
    Ok(table_to_bindings(table))
}

fn table_to_bindings(table: toml::Table) -> Bindings {
    table
        .into_iter()
        .map(|(key, value)| (key, toml_to_value(value)))
        .collect()
}

/// Convert a TOML value. Datetimes become their TOML text; NaN and infinite
/// floats have no JSON form and become null.
fn toml_to_value(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_value).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_value(value)))
                .collect(),
        ),
    }
}
