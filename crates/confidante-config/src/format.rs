// SPDX-FileCopyrightText: 2026 Confidante Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! File formats a config document can be read from and written back to.
//!
//! Each format converts between its text representation and a generic
//! [`ConfigTree`]. Selection is by file extension via [`format_for_path`].

use std::io::ErrorKind;
use std::path::Path;

use confidante_core::{ConfidanteError, ConfigMap, ConfigTree, display_path};
use tracing::debug;

use crate::tidy::normalize;

/// A text format for config files.
pub trait ConfigFormat: Send + Sync + std::fmt::Debug {
    /// Short format name for logs.
    fn name(&self) -> &'static str;

    /// Parse source text into a tree. Errors are plain messages; [`load`]
    /// attaches the path.
    ///
    /// [`load`]: ConfigFormat::load
    fn parse(&self, source: &str) -> Result<ConfigTree, String>;

    /// Serialize a tree to source text.
    fn render(&self, tree: &ConfigTree) -> Result<String, String>;

    /// Read and parse `path`.
    ///
    /// An empty document loads as an empty mapping. Any other non-mapping
    /// root is rejected.
    fn load(&self, path: &Path) -> Result<ConfigTree, ConfidanteError> {
        let load_err = |message: String| ConfidanteError::Load {
            path: path.to_path_buf(),
            message,
        };
        let source = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => load_err("config file not found".to_string()),
            _ => load_err(e.to_string()),
        })?;
        let tree = match self.parse(&source).map_err(load_err)? {
            ConfigTree::Null => ConfigTree::Object(ConfigMap::new()),
            tree @ ConfigTree::Object(_) => tree,
            _ => return Err(load_err("top-level value must be a mapping".to_string())),
        };
        debug!(path = %path.display(), format = self.name(), "config loaded");
        Ok(tree)
    }

    /// Serialize `tree` and write it to `path`, replacing the file.
    fn dump(&self, tree: &ConfigTree, path: &Path) -> Result<(), ConfidanteError> {
        let persist_err = |message: String| ConfidanteError::Persist {
            path: path.to_path_buf(),
            message,
        };
        let text = self.render(tree).map_err(persist_err)?;
        std::fs::write(path, text).map_err(|e| persist_err(e.to_string()))?;
        debug!(path = %path.display(), format = self.name(), "config written");
        Ok(())
    }
}

/// JSON, pretty-printed with two-space indentation. Non-ASCII text is
/// written verbatim.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFormat;

impl ConfigFormat for JsonFormat {
    fn name(&self) -> &'static str {
        "json"
    }

    fn parse(&self, source: &str) -> Result<ConfigTree, String> {
        serde_json::from_str(source).map_err(|e| e.to_string())
    }

    fn render(&self, tree: &ConfigTree) -> Result<String, String> {
        let mut text = serde_json::to_string_pretty(tree).map_err(|e| e.to_string())?;
        text.push('\n');
        Ok(text)
    }
}

/// TOML. `null` has no TOML representation, so trees containing one
/// cannot be written. Datetimes load as a single-key marker mapping and are
/// written back as native TOML datetimes.
#[derive(Debug, Default, Clone, Copy)]
pub struct TomlFormat;

/// Key `toml` uses when a datetime is deserialized into a generic tree.
const TOML_DATETIME_KEY: &str = "$__toml_private_datetime";

impl ConfigFormat for TomlFormat {
    fn name(&self) -> &'static str {
        "toml"
    }

    fn parse(&self, source: &str) -> Result<ConfigTree, String> {
        toml::from_str(source).map_err(|e| e.to_string())
    }

    fn render(&self, tree: &ConfigTree) -> Result<String, String> {
        let mut trail = Vec::new();
        let value = to_toml(tree, &mut trail)?;
        toml::to_string(&value).map_err(|e| e.to_string())
    }
}

fn to_toml(tree: &ConfigTree, trail: &mut Vec<String>) -> Result<toml::Value, String> {
    let value = match tree {
        ConfigTree::Null => {
            return Err(format!(
                "TOML cannot represent null values (at `{}`)",
                display_path(trail.as_slice())
            ));
        }
        ConfigTree::Bool(b) => toml::Value::Boolean(*b),
        ConfigTree::String(s) => toml::Value::String(s.clone()),
        ConfigTree::Number(n) => match n.as_i64() {
            Some(i) => toml::Value::Integer(i),
            None if n.is_f64() => toml::Value::Float(n.as_f64().unwrap_or_default()),
            None => {
                return Err(format!(
                    "integer {n} at `{}` is out of range for TOML",
                    display_path(trail.as_slice())
                ));
            }
        },
        ConfigTree::Array(items) => toml::Value::Array(
            items
                .iter()
                .map(|item| to_toml(item, trail))
                .collect::<Result<_, _>>()?,
        ),
        ConfigTree::Object(map) => {
            if let Some(datetime) = toml_datetime(map) {
                return datetime
                    .parse::<toml::value::Datetime>()
                    .map(toml::Value::Datetime)
                    .map_err(|e| format!("{e} (at `{}`)", display_path(trail.as_slice())));
            }
            let mut table = toml::Table::new();
            for (key, value) in map {
                trail.push(key.clone());
                let converted = to_toml(value, trail);
                trail.pop();
                table.insert(key.clone(), converted?);
            }
            toml::Value::Table(table)
        }
    };
    Ok(value)
}

fn toml_datetime(map: &ConfigMap) -> Option<&str> {
    match map.iter().next() {
        Some((key, ConfigTree::String(text))) if map.len() == 1 && key == TOML_DATETIME_KEY => {
            Some(text.as_str())
        }
        _ => None,
    }
}

/// YAML. Mapping keys are written in sorted order. `.inf` and `.nan` have
/// no equivalent in the tree and are rejected on load.
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlFormat;

impl ConfigFormat for YamlFormat {
    fn name(&self) -> &'static str {
        "yaml"
    }

    fn parse(&self, source: &str) -> Result<ConfigTree, String> {
        let raw: serde_yaml::Value = serde_yaml::from_str(source).map_err(|e| e.to_string())?;
        let mut trail = Vec::new();
        if find_non_finite(&raw, &mut trail) {
            return Err(format!(
                "non-finite number at `{}` is not supported",
                display_path(trail.as_slice())
            ));
        }
        serde_yaml::from_value(raw).map_err(|e| e.to_string())
    }

    fn render(&self, tree: &ConfigTree) -> Result<String, String> {
        let value = to_yaml(&normalize(tree))?;
        serde_yaml::to_string(&value).map_err(|e| e.to_string())
    }
}

/// Leaves `trail` pointing at the first non-finite float when one is found.
fn find_non_finite(value: &serde_yaml::Value, trail: &mut Vec<String>) -> bool {
    match value {
        serde_yaml::Value::Number(n) => n.as_f64().is_some_and(|f| !f.is_finite()),
        serde_yaml::Value::Sequence(items) => items.iter().enumerate().any(|(i, item)| {
            trail.push(i.to_string());
            let found = find_non_finite(item, trail);
            if !found {
                trail.pop();
            }
            found
        }),
        serde_yaml::Value::Mapping(map) => map.iter().any(|(key, item)| {
            trail.push(key.as_str().map_or_else(|| format!("{key:?}"), str::to_string));
            let found = find_non_finite(item, trail);
            if !found {
                trail.pop();
            }
            found
        }),
        serde_yaml::Value::Tagged(tagged) => find_non_finite(&tagged.value, trail),
        _ => false,
    }
}

fn to_yaml(tree: &ConfigTree) -> Result<serde_yaml::Value, String> {
    let value = match tree {
        ConfigTree::Null => serde_yaml::Value::Null,
        ConfigTree::Bool(b) => serde_yaml::Value::Bool(*b),
        ConfigTree::String(s) => serde_yaml::Value::String(s.clone()),
        ConfigTree::Number(n) => {
            let number = if let Some(i) = n.as_i64() {
                serde_yaml::Number::from(i)
            } else if let Some(u) = n.as_u64() {
                serde_yaml::Number::from(u)
            } else if n.is_f64() {
                serde_yaml::Number::from(n.as_f64().unwrap_or_default())
            } else {
                return Err(format!("integer {n} is out of range for YAML"));
            };
            serde_yaml::Value::Number(number)
        }
        ConfigTree::Array(items) => {
            serde_yaml::Value::Sequence(items.iter().map(to_yaml).collect::<Result<_, _>>()?)
        }
        ConfigTree::Object(map) => {
            let mut mapping = serde_yaml::Mapping::new();
            for (key, value) in map {
                mapping.insert(serde_yaml::Value::String(key.clone()), to_yaml(value)?);
            }
            serde_yaml::Value::Mapping(mapping)
        }
    };
    Ok(value)
}

/// Pick a format from the file extension: `.json`, `.toml`, `.yml`, `.yaml`.
pub fn format_for_path(path: &Path) -> Result<Box<dyn ConfigFormat>, ConfidanteError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Box::new(JsonFormat)),
        Some("toml") => Ok(Box::new(TomlFormat)),
        Some("yml" | "yaml") => Ok(Box::new(YamlFormat)),
        _ => Err(ConfidanteError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}
