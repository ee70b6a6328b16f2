//! Error types for configuration access.
//!
//! Responsibilities:
//! - Define one error variant per failure kind of the namespace tree,
//!   variable lifecycle, registration, and `.env` loading.
//!
//! Does NOT handle:
//! - Deciding whether a lookup failure is fatal (left to the caller).
//!
//! Invariants:
//! - All error variants include context for debugging (key, namespace,
//!   current and attempted values).
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.

use std::io::ErrorKind;
use thiserror::Error;

use crate::types::{Value, VarKind};

/// Errors that can occur while declaring, resolving, or reading configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A variable was declared both required and with a truthy default.
    #[error("Variable '{key}' cannot be both required and have a default value")]
    NecessityConflict { key: String },

    #[error("Variable '{key}' is already defined with value '{value}'")]
    AlreadyDefined { key: String, value: Value },

    #[error(
        "Variable '{key}' is already overridden with value '{value}' (original value: {original})"
    )]
    AlreadyOverridden {
        key: String,
        value: Value,
        original: DisplayOption,
    },

    #[error("Variable '{key}' has no active override to clear")]
    NotOverridden { key: String },

    #[error("Variable '{key}' was read before being defined")]
    Undefined { key: String },

    #[error("Key '{key}' is not declared in namespace '{namespace}'")]
    Undeclared { key: String, namespace: String },

    #[error("The requested key '{key}' does not exist in the application configuration")]
    KeyNotFound { key: String },

    #[error("Value '{value}' cannot be converted to {expected}")]
    TypeMismatch { value: String, expected: VarKind },

    /// A value for a declared variable failed coercion to its kind.
    #[error("Variable '{key}' cannot take value '{value}': expected {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: VarKind,
    },

    /// A registration attempted to attach a name that is already present.
    #[error("Key '{key}' already exists in namespace '{namespace}'")]
    Conflict { key: String, namespace: String },

    #[error("Key '{key}' names a namespace, not a variable")]
    NotAVariable { key: String },

    #[error("Missing required configuration: {}", .keys.join(", "))]
    MissingRequired { keys: Vec<String> },

    /// Start-up resolution collected more than one kind of failure.
    ///
    /// Holds every `InvalidValue` in key order, followed by a single
    /// `MissingRequired` when required variables were also left undefined.
    #[error("Declared configuration failed to resolve: {}", join_errors(.errors))]
    Unresolved { errors: Vec<ConfigError> },

    #[error("Configuration keys and namespace paths must not contain empty segments")]
    EmptyKey,

    /// Failed to parse a `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read a `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    ///
    /// SAFETY: This error does not include any raw dotenv content.
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}

impl ConfigError {
    /// Attach `key` to a context-free coercion failure.
    pub(crate) fn for_key(self, key: impl Into<String>) -> Self {
        match self {
            Self::TypeMismatch { value, expected } => Self::InvalidValue {
                key: key.into(),
                value,
                expected,
            },
            other => other,
        }
    }
}

fn join_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<dotenvy::Error> for ConfigError {
    fn from(error: dotenvy::Error) -> Self {
        match error {
            dotenvy::Error::LineParse(_, idx) => ConfigError::DotenvParse { error_index: idx },
            dotenvy::Error::Io(io_err) => ConfigError::DotenvIo {
                kind: io_err.kind(),
            },
            _ => ConfigError::DotenvUnknown,
        }
    }
}

/// An optional value rendered as `<undefined>` when absent.
///
/// Used where an error reports a value that may legitimately be missing,
/// such as the base value of a variable overridden before it was defined.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayOption(pub Option<Value>);

impl std::fmt::Display for DisplayOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(value) => write!(f, "'{}'", value),
            None => f.write_str("<undefined>"),
        }
    }
}
