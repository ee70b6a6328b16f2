//! `.env` file source.
//!
//! Responsibilities:
//! - Parse a `.env` file with `dotenvy` into an in-memory source.
//!
//! Does NOT handle:
//! - Deciding whether `.env` loading is enabled (see `ConfigBuilder::load_dotenv`).
//!
//! Invariants:
//! - The process environment is never modified.
//! - Parse errors carry only the byte index, never the offending line.

use std::io::Read;
use std::path::{Path, PathBuf};

use super::{EnvSource, MapSource};
use crate::error::ConfigError;

/// Values read from a `.env` file.
#[derive(Debug, Clone)]
pub struct DotenvSource {
    path: Option<PathBuf>,
    vars: MapSource,
}

impl DotenvSource {
    /// Parse the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::DotenvIo` if the file cannot be read (including
    /// when it does not exist) and `ConfigError::DotenvParse` on invalid syntax.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let vars = dotenvy::from_path_iter(path)?.collect::<Result<MapSource, _>>()?;
        tracing::debug!(path = %path.display(), count = vars.len(), "Loaded .env file");
        Ok(Self {
            path: Some(path.to_path_buf()),
            vars,
        })
    }

    /// Parse `.env` content from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
        let vars = dotenvy::from_read_iter(reader).collect::<Result<MapSource, _>>()?;
        Ok(Self { path: None, vars })
    }

    /// The file this source was read from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl EnvSource for DotenvSource {
    fn lookup(&self, key: &str) -> Option<String> {
        self.vars.lookup(key)
    }

    fn contains(&self, key: &str) -> bool {
        self.vars.contains(key)
    }
}
