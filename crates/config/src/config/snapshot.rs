//! Configuration introspection.
//!
//! Responsibilities:
//! - Produce a serializable debug map of every variable in the tree.
//! - Render a `.env`-style template of every variable for operators.
//!
//! Does NOT handle:
//! - Resolving values (snapshots only report what the tree already holds).
//!
//! Invariants:
//! - Entries are sorted by dotted key.
//! - Neither operation materializes anything or queries the source.

use serde::Serialize;

use super::Config;
use crate::namespace::ResolutionMode;
use crate::types::{Value, VarKind, Variable};

/// The state of one variable at snapshot time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableSnapshot {
    pub key: String,
    pub env_key: String,
    pub kind: VarKind,
    pub required: bool,
    pub defined: bool,
    pub overridden: bool,
    /// Effective value (override first), if defined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

impl From<&Variable> for VariableSnapshot {
    fn from(var: &Variable) -> Self {
        Self {
            key: var.key(),
            env_key: var.env_key(),
            kind: var.kind(),
            required: var.is_required(),
            defined: var.is_defined(),
            overridden: var.is_overridden(),
            value: var.value().ok().cloned(),
            default: var.default_value().cloned(),
            help: var.help().map(str::to_string),
        }
    }
}

/// A point-in-time map of the whole configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigSnapshot {
    pub entrypoint: String,
    pub mode: ResolutionMode,
    pub variables: Vec<VariableSnapshot>,
}

impl ConfigSnapshot {
    pub fn get(&self, key: &str) -> Option<&VariableSnapshot> {
        self.variables.iter().find(|v| v.key == key)
    }

    /// Keys of required variables that are still undefined.
    pub fn missing_required(&self) -> Vec<&str> {
        self.variables
            .iter()
            .filter(|v| v.required && !v.defined)
            .map(|v| v.key.as_str())
            .collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Quote a template value when `.env` parsers would otherwise misread it.
///
/// Values are single-quoted so `$` is never substituted. Quotes and
/// backslashes are written outside the quoted runs as `\'` and `\\`.
fn template_value(value: &Value) -> String {
    let raw = value.to_string();
    if !raw
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '#' | '"' | '\'' | '\\' | '$'))
    {
        return raw;
    }
    let mut quoted = String::from("'");
    for c in raw.chars() {
        match c {
            '\'' => quoted.push_str("'\\''"),
            '\\' => quoted.push_str("'\\\\'"),
            c => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}

impl Config {
    /// Snapshot every variable currently in the tree.
    pub fn snapshot(&self) -> ConfigSnapshot {
        let mut variables: Vec<VariableSnapshot> = self
            .root()
            .variables()
            .into_iter()
            .map(VariableSnapshot::from)
            .collect();
        variables.sort_by(|a, b| a.key.cmp(&b.key));
        ConfigSnapshot {
            entrypoint: self.entrypoint().to_string(),
            mode: self.mode(),
            variables,
        }
    }

    /// Render a `.env` template listing every variable with its default.
    ///
    /// Help text and the required marker are emitted as comments above each
    /// assignment.
    pub fn env_template(&self) -> String {
        let mut out = String::new();
        for var in self.snapshot().variables {
            for line in var.help.iter().flat_map(|help| help.lines()) {
                out.push_str(&format!("# {}\n", line));
            }
            if var.required {
                out.push_str("# required\n");
            }
            let value = var.default.as_ref().map(template_value).unwrap_or_default();
            out.push_str(&format!("{}={}\n", var.env_key, value));
        }
        out
    }
}
