//! Environment-like key-value sources.
//!
//! Responsibilities:
//! - Define the `EnvSource` trait the namespace tree resolves undeclared keys from.
//! - Provide the process environment, in-memory, and layered implementations.
//! - Derive environment key names from dotted key segments (`env_key`).
//!
//! Does NOT handle:
//! - Parsing `.env` files (see `dotenv.rs`).
//! - Caching results (the tree caches a hit by materializing a variable).
//!
//! Invariants:
//! - Sources are read-only; lookups never mutate process state.
//! - `env_key` joins segments with `_` and upper-cases the result. Deployed
//!   environments depend on this exact mapping.

mod dotenv;

use std::collections::HashMap;
use std::fmt;

pub use dotenv::DotenvSource;

use crate::constants::ENV_SEPARATOR;

/// Derive the environment variable name for a path of key segments.
///
/// `["web", "service", "port"]` becomes `WEB_SERVICE_PORT`.
pub fn env_key<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    segments
        .into_iter()
        .map(|segment| segment.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(ENV_SEPARATOR)
        .to_uppercase()
}

/// A read-only string-to-string lookup, in practice the process environment.
pub trait EnvSource: fmt::Debug + Send + Sync {
    /// Return the value stored under `key`, if any.
    fn lookup(&self, key: &str) -> Option<String>;

    fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }
}

/// The process environment.
///
/// A variable that is set, even to an empty string, is present. Values that
/// are not valid UTF-8 are treated as absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// An in-memory source, used for injection and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapSource {
    vars: HashMap<String, String>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value.
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for MapSource
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvSource for MapSource {
    fn lookup(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }
}

/// An ordered stack of sources. The first layer holding a key wins.
#[derive(Debug, Default)]
pub struct LayeredSource {
    layers: Vec<Box<dyn EnvSource>>,
}

impl LayeredSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layer with lower precedence than every existing layer.
    pub fn push(&mut self, source: Box<dyn EnvSource>) {
        self.layers.push(source);
    }

    pub fn with_layer(mut self, source: impl EnvSource + 'static) -> Self {
        self.push(Box::new(source));
        self
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl EnvSource for LayeredSource {
    fn lookup(&self, key: &str) -> Option<String> {
        self.layers.iter().find_map(|layer| layer.lookup(key))
    }
}
