//! A single typed configuration cell.
//!
//! Responsibilities:
//! - Hold a variable's declaration (name, kind, help, required, default).
//! - Enforce the definition-once and override-with-restore lifecycle.
//!
//! Does NOT handle:
//! - Reading values from the environment (see `Config::resolve_declared`).
//! - Placement in the namespace tree (see `namespace.rs`).
//!
//! Invariants:
//! - `required` and a truthy default never hold together.
//! - The base value is set at most once; a second `set_value` fails.
//! - At most one override is active; clearing restores the base value.
//! - The namespace is recorded once, when the variable is attached to a tree.

use crate::env_key;
use crate::error::{ConfigError, DisplayOption};
use crate::types::value::{Value, VarKind};

/// A named, typed configuration variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    name: String,
    kind: VarKind,
    help: Option<String>,
    required: bool,
    default: Option<Value>,
    namespace: Option<String>,
    value: Option<Value>,
    override_value: Option<Value>,
}

impl Variable {
    /// Create an undefined, optional variable with no default.
    pub fn new(name: impl Into<String>, kind: VarKind) -> Self {
        Self {
            name: name.into(),
            kind,
            help: None,
            required: false,
            default: None,
            namespace: None,
            value: None,
            override_value: None,
        }
    }

    pub fn int(name: impl Into<String>) -> Self {
        Self::new(name, VarKind::Integer)
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, VarKind::String)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, VarKind::Boolean)
    }

    /// Declare a variable in one call.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NecessityConflict` if `required` is set together
    /// with a truthy default, and `ConfigError::InvalidValue` if the default
    /// does not coerce to `kind`.
    pub fn declare(
        name: impl Into<String>,
        kind: VarKind,
        help: Option<&str>,
        required: bool,
        default: Option<Value>,
    ) -> Result<Self, ConfigError> {
        let mut var = Self::new(name, kind);
        var.help = help.map(str::to_string);
        if let Some(default) = default {
            var = var.with_default(default)?;
        }
        if required {
            var = var.required()?;
        }
        Ok(var)
    }

    /// Attach a help text shown in snapshots and env templates.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Set the default used by `Config::resolve_declared` when the source has no value.
    ///
    /// The default is coerced to the variable's kind.
    pub fn with_default(mut self, default: impl Into<Value>) -> Result<Self, ConfigError> {
        let default = self
            .kind
            .coerce(default.into())
            .map_err(|e| e.for_key(self.name.as_str()))?;
        if self.required && default.is_truthy() {
            return Err(ConfigError::NecessityConflict { key: self.name });
        }
        self.default = Some(default);
        Ok(self)
    }

    /// Mark the variable as required.
    ///
    /// Only a truthy default conflicts with `required`. A falsy default such
    /// as `0`, `false` or `""` is kept and satisfies the requirement when the
    /// source has no value.
    pub fn required(mut self) -> Result<Self, ConfigError> {
        if self.default.as_ref().is_some_and(Value::is_truthy) {
            return Err(ConfigError::NecessityConflict { key: self.name });
        }
        self.required = true;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> VarKind {
        self.kind
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Dotted path of the namespace this variable is attached to, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Full dotted key (`namespace.name`), or just the name when unattached.
    pub fn key(&self) -> String {
        match &self.namespace {
            Some(ns) if !ns.is_empty() => format!("{}.{}", ns, self.name),
            _ => self.name.clone(),
        }
    }

    /// Environment variable name this variable is resolved from.
    pub fn env_key(&self) -> String {
        let key = self.key();
        env_key(key.split(crate::constants::NAMESPACE_SEPARATOR))
    }

    pub fn is_defined(&self) -> bool {
        self.value.is_some()
    }

    pub fn is_overridden(&self) -> bool {
        self.override_value.is_some()
    }

    /// Record the namespace this variable lives in. Only the first call has effect.
    pub(crate) fn attach(&mut self, namespace: &str) {
        if self.namespace.is_none() {
            self.namespace = Some(namespace.to_string());
        }
    }

    /// Define the base value, coercing it to the declared kind.
    ///
    /// # Errors
    ///
    /// - `ConfigError::AlreadyDefined` if a value was already set.
    /// - `ConfigError::InvalidValue` if `value` does not coerce to the kind.
    pub fn set_value(&mut self, value: impl Into<Value>) -> Result<(), ConfigError> {
        if let Some(current) = &self.value {
            return Err(ConfigError::AlreadyDefined {
                key: self.key(),
                value: current.clone(),
            });
        }
        let coerced = self
            .kind
            .coerce(value.into())
            .map_err(|e| e.for_key(self.key()))?;
        tracing::debug!(key = %self.key(), kind = %self.kind, "Variable defined");
        self.value = Some(coerced);
        Ok(())
    }

    /// The effective value: the active override, else the base value.
    pub fn value(&self) -> Result<&Value, ConfigError> {
        let base = self
            .value
            .as_ref()
            .ok_or_else(|| ConfigError::Undefined { key: self.key() })?;
        Ok(self.override_value.as_ref().unwrap_or(base))
    }

    /// The base value, ignoring any active override.
    pub fn base_value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Shadow the base value without discarding it.
    ///
    /// Overrides are stored as given, without coercion.
    pub fn set_override(&mut self, value: impl Into<Value>) -> Result<(), ConfigError> {
        if let Some(current) = &self.override_value {
            return Err(ConfigError::AlreadyOverridden {
                key: self.key(),
                value: current.clone(),
                original: DisplayOption(self.value.clone()),
            });
        }
        let value = value.into();
        tracing::debug!(key = %self.key(), "Variable overridden");
        self.override_value = Some(value);
        Ok(())
    }

    /// Drop the active override, returning it.
    pub fn clear_override(&mut self) -> Result<Value, ConfigError> {
        let cleared = self
            .override_value
            .take()
            .ok_or_else(|| ConfigError::NotOverridden { key: self.key() })?;
        tracing::debug!(key = %self.key(), "Variable override cleared");
        Ok(cleared)
    }
}
