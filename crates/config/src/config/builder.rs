//! Configuration builder.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigBuilder` that assembles the entry point
//!   name, resolution mode, and layered source stack of a `Config`.
//! - Load `.env` files as source layers.
//!
//! Does NOT handle:
//! - Key resolution or registration (see `config/mod.rs`).
//! - Parsing `.env` syntax (delegated to `DotenvSource`).
//!
//! Invariants / Assumptions:
//! - Layers added earlier take precedence over layers added later.
//! - With no layer configured, `build()` reads the process environment.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before any `.env` file is read.
//! - `.env` files never modify the process environment.

use std::path::Path;

use super::Config;
use crate::constants::{DEFAULT_ENTRYPOINT_NAMESPACE, DOTENV_DISABLED_VAR, DOTENV_FILE_NAME};
use crate::error::ConfigError;
use crate::namespace::ResolutionMode;
use crate::source::{DotenvSource, EnvSource, LayeredSource, ProcessEnv};

/// Builder for a `Config`.
#[derive(Debug)]
pub struct ConfigBuilder {
    entrypoint: String,
    mode: ResolutionMode,
    layers: LayeredSource,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigBuilder {
    /// Create a builder for a lazily-resolving config under the default entry point.
    pub fn new() -> Self {
        Self {
            entrypoint: DEFAULT_ENTRYPOINT_NAMESPACE.to_string(),
            mode: ResolutionMode::default(),
            layers: LayeredSource::new(),
        }
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var(DOTENV_DISABLED_VAR).ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Set the name of the root namespace.
    pub fn with_entrypoint(mut self, entrypoint: impl Into<String>) -> Self {
        self.entrypoint = entrypoint.into();
        self
    }

    pub fn with_mode(mut self, mode: ResolutionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Add a source layer below every layer added so far.
    pub fn with_source(mut self, source: impl EnvSource + 'static) -> Self {
        self.layers.push(Box::new(source));
        self
    }

    /// Add the process environment as a layer.
    pub fn with_process_env(self) -> Self {
        self.with_source(ProcessEnv)
    }

    /// Add the `.env` file at `path` as a layer.
    ///
    /// # Errors
    ///
    /// Unlike `load_dotenv`, a missing file is an error (`ConfigError::DotenvIo`).
    pub fn with_dotenv_file(self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = DotenvSource::from_path(path)?;
        Ok(self.with_source(source))
    }

    /// Add `.env` from the working directory as a layer, if present.
    ///
    /// If `DOTENV_DISABLED` environment variable is set to "true" or "1",
    /// the .env file will not be loaded (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `.env` file exists but has invalid syntax (`ConfigError::DotenvParse`)
    /// - The `.env` file exists but cannot be read due to I/O errors (`ConfigError::DotenvIo`)
    ///
    /// Missing `.env` files are silently ignored (returns `Ok(self)`).
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            tracing::debug!("Skipping .env loading: {} is set", DOTENV_DISABLED_VAR);
            return Ok(self);
        }

        match DotenvSource::from_path(DOTENV_FILE_NAME) {
            Ok(source) => Ok(self.with_source(source)),
            Err(ConfigError::DotenvIo {
                kind: std::io::ErrorKind::NotFound,
            }) => Ok(self),
            Err(e) => Err(e),
        }
    }

    /// Build the configuration.
    pub fn build(self) -> Config {
        let mut layers = self.layers;
        if layers.is_empty() {
            layers.push(Box::new(ProcessEnv));
        }
        tracing::debug!(
            entrypoint = %self.entrypoint,
            mode = ?self.mode,
            layers = layers.len(),
            "Built configuration"
        );
        Config::from_parts(self.entrypoint, self.mode, Box::new(layers))
    }
}
