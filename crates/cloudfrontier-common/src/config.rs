//! Read-only access to the user's project configuration tree.
//!
//! All cloudfrontier options live under one fixed namespace in the project
//! document. Lookups use dotted paths and fall back to caller-supplied
//! defaults; shape-polymorphic options (string or list of strings) are
//! decided once here into [`ConfigValue`] so downstream stages match on a
//! tagged variant instead of re-inspecting raw YAML.

use serde_yaml::Value;

use crate::constants::CONFIG_NAMESPACE;
use crate::error::{CloudfrontierError, Result};

/// A configuration option that may be a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    /// A single scalar string.
    Scalar(String),
    /// An ordered list of strings.
    List(Vec<String>),
}

/// Resolver over the configuration subtree rooted at the cloudfrontier
/// namespace. Immutable, no I/O.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    root: Value,
}

impl ConfigResolver {
    /// Creates a resolver rooted directly at the given subtree.
    #[must_use]
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    /// Creates a resolver from a full project document, descending into the
    /// fixed `custom.cloudfrontier` namespace. An absent namespace behaves
    /// like an empty configuration.
    #[must_use]
    pub fn from_project(document: &Value) -> Self {
        let mut node = document;
        for segment in CONFIG_NAMESPACE.split('.') {
            match node.get(segment) {
                Some(child) => node = child,
                None => return Self { root: Value::Null },
            }
        }
        Self { root: node.clone() }
    }

    /// Looks up a dotted path relative to the namespace root.
    fn lookup(&self, path: &str) -> Option<&Value> {
        let mut node = &self.root;
        for segment in path.split('.') {
            node = node.get(segment)?;
        }
        Some(node)
    }

    /// Returns the string at `path`, if present and a string.
    #[must_use]
    pub fn get_str(&self, path: &str) -> Option<String> {
        match self.lookup(path) {
            Some(Value::String(s)) => Some(s.clone()),
            _ => None,
        }
    }

    /// Returns the string at `path`, rejecting any other present shape.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the value is present but not a
    /// string, so a typo like `certificate: 123` surfaces instead of being
    /// read as absent.
    pub fn try_get_str(&self, path: &str) -> Result<Option<String>> {
        match self.lookup(path) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(config_err(format!(
                "{path}: expected a string, found {other:?}"
            ))),
        }
    }

    /// Returns the string at `path`, or `default` when absent.
    #[must_use]
    pub fn get_str_or(&self, path: &str, default: &str) -> String {
        self.get_str(path)
            .unwrap_or_else(|| default.to_string())
    }

    /// Returns the boolean at `path`, if present and a boolean. Any other
    /// shape reads as absent, so `compress: "yes"` does not enable
    /// compression.
    #[must_use]
    pub fn get_bool(&self, path: &str) -> Option<bool> {
        match self.lookup(path) {
            Some(Value::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Returns the string-or-list option at `path` as a tagged variant.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the value is present but neither a
    /// string nor a list of strings.
    pub fn get_string_or_list(&self, path: &str) -> Result<Option<ConfigValue>> {
        match self.lookup(path) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(ConfigValue::Scalar(s.clone()))),
            Some(Value::Sequence(items)) => {
                let mut list = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(s) => list.push(s.clone()),
                        other => {
                            return Err(config_err(format!(
                                "{path}: expected a list of strings, found {other:?}"
                            )));
                        }
                    }
                }
                Ok(Some(ConfigValue::List(list)))
            }
            Some(other) => Err(config_err(format!(
                "{path}: expected a string or list of strings, found {other:?}"
            ))),
        }
    }

    /// Returns the TTL at `path` in seconds, accepting a YAML number or a
    /// numeric string. Absent values default to zero.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the value is present but not a
    /// non-negative integer.
    pub fn get_ttl(&self, path: &str) -> Result<u64> {
        match self.lookup(path) {
            None | Some(Value::Null) => Ok(0),
            Some(Value::Number(n)) => n
                .as_u64()
                .ok_or_else(|| config_err(format!("{path}: TTL must be a non-negative integer"))),
            Some(Value::String(s)) => s
                .parse::<u64>()
                .map_err(|_| config_err(format!("{path}: TTL must be a non-negative integer"))),
            Some(other) => Err(config_err(format!(
                "{path}: expected a number, found {other:?}"
            ))),
        }
    }
}

fn config_err(message: String) -> CloudfrontierError {
    CloudfrontierError::Config { message }
}
