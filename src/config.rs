//! # YAML Settings Files
//!
//! Generic loading of YAML settings files into an untyped mapping, for
//! callers that read tool settings without a fixed schema. Typed project
//! descriptions live in [`crate::project`].
//!
//! An empty or comment-only file is an empty mapping, not an error.

use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};

/// Untyped settings read from a YAML file.
pub type Settings = Mapping;

/// Reads and parses the YAML settings file at `path`.
pub fn read_config_path(path: impl AsRef<Path>) -> Result<Settings> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    let parse_error = |message: String| Error::ConfigParse {
        path: path.to_path_buf(),
        message,
    };

    match serde_yaml::from_str::<Value>(&content).map_err(|e| parse_error(e.to_string()))? {
        Value::Null => Ok(Settings::new()),
        Value::Mapping(settings) => Ok(settings),
        other => Err(parse_error(format!(
            "expected a mapping at the top level, found {}",
            value_kind(&other)
        ))),
    }
}

/// Reads `<dir>/<name>.yml`.
pub fn read_config(dir: impl AsRef<Path>, name: &str) -> Result<Settings> {
    read_config_path(dir.as_ref().join(format!("{}.yml", name)))
}

/// Renders settings back to YAML text.
pub fn settings_to_yaml(settings: &Settings) -> Result<String> {
    Ok(serde_yaml::to_string(settings)?)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
