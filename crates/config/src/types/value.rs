//! Configuration values and declared variable kinds.
//!
//! Responsibilities:
//! - Define the tagged `Value` a variable holds (integer, string, boolean).
//! - Define `VarKind` and the coercion function owned by each kind.
//!
//! Does NOT handle:
//! - Definition or override state (see `variable.rs`).
//!
//! Invariants:
//! - `Int(0)`, `Str("")` and `Bool(false)` are the only falsy values.
//! - Coercion never panics; unconvertible input yields `ConfigError::TypeMismatch`.
//! - Values serialize untagged, as plain JSON numbers, strings, and booleans.

use std::fmt;

use serde::Serialize;

use crate::error::ConfigError;

/// A configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Bool(bool),
    Str(String),
}

impl Value {
    /// Whether this value counts as "set" for declaration checks.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Int(i) => *i != 0,
            Self::Bool(b) => *b,
            Self::Str(s) => !s.is_empty(),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{}", i),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

/// The declared type of a variable.
///
/// Each kind owns its coercion function instead of each kind being a separate
/// variable type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VarKind {
    Integer,
    String,
    Boolean,
}

impl VarKind {
    /// Coerce `value` into this kind.
    pub fn coerce(self, value: Value) -> Result<Value, ConfigError> {
        match self {
            Self::Integer => coerce_int(value),
            Self::String => Ok(Value::Str(value.to_string())),
            Self::Boolean => coerce_bool(value),
        }
    }
}

impl fmt::Display for VarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Integer => "Int",
            Self::String => "String",
            Self::Boolean => "Boolean",
        };
        f.write_str(name)
    }
}

fn coerce_int(value: Value) -> Result<Value, ConfigError> {
    match value {
        Value::Int(i) => Ok(Value::Int(i)),
        Value::Bool(b) => Ok(Value::Int(i64::from(b))),
        Value::Str(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| ConfigError::TypeMismatch {
                value: s,
                expected: VarKind::Integer,
            }),
    }
}

fn coerce_bool(value: Value) -> Result<Value, ConfigError> {
    match value {
        Value::Bool(b) => Ok(Value::Bool(b)),
        Value::Int(i) => Ok(Value::Bool(i != 0)),
        Value::Str(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Value::Bool(true)),
            "false" | "0" | "no" | "off" | "" => Ok(Value::Bool(false)),
            _ => Err(ConfigError::TypeMismatch {
                value: s,
                expected: VarKind::Boolean,
            }),
        },
    }
}
