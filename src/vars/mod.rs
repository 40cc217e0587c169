//! Variable record handling for sdaf-hosts.
//!
//! The generator consumes the same flat variable record Ansible hands to a
//! filter plugin: play-level settings such as `sap_sid`, the list of play
//! hosts, and a nested `hostvars` mapping. This module wraps that record and
//! provides the lenient, Ansible-flavoured coercions the rest of the crate
//! relies on:
//!
//! - `null` values are treated as absent
//! - booleans accept `yes`/`no`, `on`/`off`, `true`/`false` and numbers
//! - keys can be looked up through a [`VarRule`] carrying legacy aliases
//!
//! Records can be loaded from YAML or JSON files and extended with
//! `--extra-vars` style expressions (`key=value` or `@file.yml`).

use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::path::Path;

/// Lookup rule for a single variable: the canonical key followed by legacy
/// aliases, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarRule {
    /// Canonical key
    pub key: &'static str,
    /// Legacy keys consulted when the canonical key is absent
    pub aliases: &'static [&'static str],
}

impl VarRule {
    /// A rule without aliases.
    pub const fn key(key: &'static str) -> Self {
        Self { key, aliases: &[] }
    }

    /// A rule with legacy aliases.
    pub const fn with_aliases(key: &'static str, aliases: &'static [&'static str]) -> Self {
        Self { key, aliases }
    }

    /// All keys in precedence order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.key).chain(self.aliases.iter().copied())
    }
}

/// A variable record, as supplied by an inventory or a template context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vars {
    values: IndexMap<String, JsonValue>,
}

impl Vars {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from a JSON value, which must be an object.
    pub fn from_json(value: JsonValue) -> Result<Self> {
        match value {
            JsonValue::Object(map) => Ok(Self {
                values: map.into_iter().collect(),
            }),
            JsonValue::Null => Ok(Self::new()),
            other => Err(Error::VarsNotMapping(json_type_name(&other).to_string())),
        }
    }

    /// Parse a record from YAML text. JSON is valid YAML, so this also
    /// accepts JSON documents.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::new());
        }
        let value: JsonValue = serde_yaml::from_str(content)?;
        Self::from_json(value)
    }

    /// Load a record from a YAML or JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::vars_load(path, e.to_string()))?;

        let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
        let parsed = if is_json {
            serde_json::from_str::<JsonValue>(&content)
                .map_err(Error::from)
                .and_then(Self::from_json)
        } else {
            Self::from_yaml_str(&content)
        };

        parsed.map_err(|e| Error::vars_load(path, e.to_string()))
    }

    /// Apply an extra-vars expression: `key=value` (value parsed as YAML)
    /// or `@path` (a whole file merged on top).
    pub fn apply_extra_var(&mut self, expr: &str) -> Result<()> {
        if let Some(file_path) = expr.strip_prefix('@') {
            let file_vars = Self::from_file(file_path)?;
            self.extend(file_vars);
            return Ok(());
        }

        let (key, value) = expr
            .split_once('=')
            .filter(|(k, _)| !k.trim().is_empty())
            .ok_or_else(|| Error::InvalidExtraVar(expr.to_string()))?;

        let parsed: JsonValue = serde_yaml::from_str(value)
            .unwrap_or_else(|_| JsonValue::String(value.to_string()));
        self.insert(key.trim(), parsed);
        Ok(())
    }

    /// Insert or replace a variable.
    pub fn insert(&mut self, key: impl Into<String>, value: JsonValue) {
        self.values.insert(key.into(), value);
    }

    /// Merge another record on top of this one; its values win.
    pub fn extend(&mut self, other: Vars) {
        self.values.extend(other.values);
    }

    /// Get a variable. `null` counts as absent.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.values.get(key).filter(|v| !v.is_null())
    }

    /// Resolve a rule: the first present key wins.
    pub fn lookup(&self, rule: &VarRule) -> Option<&JsonValue> {
        rule.keys().find_map(|key| self.get(key))
    }

    /// Resolve a rule as a boolean, falling back to `default`.
    pub fn lookup_bool(&self, rule: &VarRule, default: bool) -> bool {
        self.lookup(rule).and_then(to_bool).unwrap_or(default)
    }

    /// Resolve a rule as a string, falling back to `default`.
    pub fn lookup_string(&self, rule: &VarRule, default: &str) -> String {
        self.lookup(rule)
            .map(to_string)
            .unwrap_or_else(|| default.to_string())
    }

    /// Resolve a rule as an optional string; blank strings are absent.
    pub fn lookup_optional(&self, rule: &VarRule) -> Option<String> {
        self.lookup(rule).and_then(non_empty_string)
    }

    /// Resolve a rule as a two-digit SAP instance number.
    pub fn lookup_instance_number(&self, rule: &VarRule, default: &str) -> String {
        self.lookup(rule)
            .and_then(to_instance_number)
            .unwrap_or_else(|| default.to_string())
    }

    /// Check if a variable is present.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of variables in the record.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the record is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over the variables in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &JsonValue)> {
        self.values.iter()
    }

    /// Convert back into a JSON object.
    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(
            self.values
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }
}

impl FromIterator<(String, JsonValue)> for Vars {
    fn from_iter<T: IntoIterator<Item = (String, JsonValue)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Convert a value to boolean using Ansible truthiness for strings.
pub fn to_bool(value: &JsonValue) -> Option<bool> {
    match value {
        JsonValue::Bool(b) => Some(*b),
        JsonValue::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" | "y" => Some(true),
            "false" | "no" | "off" | "0" | "n" | "" => Some(false),
            _ => None,
        },
        JsonValue::Number(n) => n.as_f64().map(|f| f != 0.0),
        _ => None,
    }
}

/// Convert a scalar value to string. `null` becomes the empty string.
pub fn to_string(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Convert a value to a string that is non-empty after trimming.
pub fn non_empty_string(value: &JsonValue) -> Option<String> {
    let s = to_string(value);
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Convert a value to a list of strings. A single scalar becomes a
/// one-element list.
pub fn to_string_list(value: &JsonValue) -> Vec<String> {
    match value {
        JsonValue::Array(items) => items
            .iter()
            .filter(|v| !v.is_null())
            .map(to_string)
            .collect(),
        JsonValue::Null => Vec::new(),
        scalar => vec![to_string(scalar)],
    }
}

/// Render an instance number. YAML reads `00` as the integer 0, so numbers
/// are zero-padded back to two digits.
pub fn to_instance_number(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::Number(n) => n.as_u64().map(|n| format!("{:02}", n)),
        other => non_empty_string(other).map(|s| s.trim().to_string()),
    }
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "list",
        JsonValue::Object(_) => "mapping",
    }
}
