//! Namespace tree nodes.
//!
//! Responsibilities:
//! - Map child names to nested namespaces or variables.
//! - Lazily populate missing children from an `EnvSource` (`Lazy` mode), or
//!   reject them (`Strict` mode).
//!
//! Does NOT handle:
//! - Splitting dotted keys or duplicate protection on registration (see `config`).
//!
//! Invariants:
//! - `full_namespace` is `parent.full_namespace + "." + name`, or just `name`
//!   for children of the root. It never changes after construction.
//! - The root namespace is named after the entry point but never contributes
//!   to a child's `full_namespace` or to derived environment keys.
//! - Children are never removed.
//!
//! In `Lazy` mode a missing child becomes a string variable when the source
//! holds its derived environment key, and an empty namespace otherwise, on the
//! assumption that a deeper key will resolve to a leaf. This lookup-based guess
//! is a legacy discovery heuristic; prefer registering variables and `Strict`
//! mode for anything that must be validated.

use std::collections::HashMap;
use std::collections::hash_map::Entry as MapEntry;
use std::iter;

use serde::Serialize;

use crate::error::ConfigError;
use crate::source::{EnvSource, env_key};
use crate::types::Variable;

/// How a namespace treats keys that were never declared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionMode {
    /// Discover undeclared keys from the environment source on first access.
    #[default]
    Lazy,
    /// Fail with `ConfigError::Undeclared` for any key not registered upfront.
    Strict,
}

/// A child of a namespace.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Variable(Variable),
    Namespace(Namespace),
}

impl Entry {
    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Self::Variable(var) => Some(var),
            Self::Namespace(_) => None,
        }
    }

    pub fn as_variable_mut(&mut self) -> Option<&mut Variable> {
        match self {
            Self::Variable(var) => Some(var),
            Self::Namespace(_) => None,
        }
    }

    pub fn as_namespace(&self) -> Option<&Namespace> {
        match self {
            Self::Namespace(ns) => Some(ns),
            Self::Variable(_) => None,
        }
    }
}

/// A node of the dotted-key tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Namespace {
    name: String,
    full_namespace: String,
    root: bool,
    entries: HashMap<String, Entry>,
}

impl Namespace {
    /// Create a namespace under `prefix` (the parent's `full_namespace`).
    pub fn new(name: impl Into<String>, prefix: Option<&str>) -> Self {
        let name = name.into();
        let full_namespace = match prefix {
            Some(prefix) if !prefix.is_empty() => format!("{}.{}", prefix, name),
            _ => name.clone(),
        };
        Self {
            name,
            full_namespace,
            root: false,
            entries: HashMap::new(),
        }
    }

    /// Create the root namespace for an entry point.
    pub(crate) fn root(entrypoint: impl Into<String>) -> Self {
        Self {
            root: true,
            ..Self::new(entrypoint, None)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn full_namespace(&self) -> &str {
        &self.full_namespace
    }

    /// The dotted path children of this namespace are placed under.
    ///
    /// Empty for the root.
    pub fn child_prefix(&self) -> &str {
        if self.root { "" } else { &self.full_namespace }
    }

    /// Insert or replace a child.
    pub fn set_entry(&mut self, name: impl Into<String>, entry: Entry) {
        self.entries.insert(name.into(), entry);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    pub fn entry_mut(&mut self, key: &str) -> Option<&mut Entry> {
        self.entries.get_mut(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Return the child `key`, materializing it when missing.
    ///
    /// `context` holds the names of the namespaces traversed from the root
    /// down to and including this one (empty for the root itself). The
    /// derived environment key is `context` plus `key`, joined with `_` and
    /// upper-cased.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Undeclared` in `Strict` mode when `key` is missing.
    pub fn get(
        &mut self,
        key: &str,
        context: &[String],
        source: &dyn EnvSource,
        mode: ResolutionMode,
    ) -> Result<&mut Entry, ConfigError> {
        let prefix: &str = if self.root { "" } else { &self.full_namespace };
        match self.entries.entry(key.to_string()) {
            MapEntry::Occupied(occupied) => Ok(occupied.into_mut()),
            MapEntry::Vacant(_) if mode == ResolutionMode::Strict => {
                Err(ConfigError::Undeclared {
                    key: key.to_string(),
                    namespace: self.full_namespace.clone(),
                })
            }
            MapEntry::Vacant(vacant) => {
                let env_name = env_key(context.iter().map(String::as_str).chain(iter::once(key)));
                let entry = match source.lookup(&env_name) {
                    Some(raw) => Entry::Variable(discovered(key, prefix, &env_name, raw)?),
                    None => Entry::Namespace(Namespace::new(key, Some(prefix))),
                };
                Ok(vacant.insert(entry))
            }
        }
    }

    /// Return the child `key`, inserting it as a variable holding `raw` when
    /// missing.
    ///
    /// Used when the caller already read `raw` from the source for this key,
    /// so the source is not queried again.
    pub(crate) fn discover(
        &mut self,
        key: &str,
        context: &[String],
        raw: String,
    ) -> Result<&mut Entry, ConfigError> {
        let prefix: &str = if self.root { "" } else { &self.full_namespace };
        match self.entries.entry(key.to_string()) {
            MapEntry::Occupied(occupied) => Ok(occupied.into_mut()),
            MapEntry::Vacant(vacant) => {
                let env_name = env_key(context.iter().map(String::as_str).chain(iter::once(key)));
                let var = discovered(key, prefix, &env_name, raw)?;
                Ok(vacant.insert(Entry::Variable(var)))
            }
        }
    }

    /// Return the child namespace `name`, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Conflict` if `name` is already taken by a variable.
    pub(crate) fn ensure_namespace(&mut self, name: &str) -> Result<&mut Namespace, ConfigError> {
        let prefix: &str = if self.root { "" } else { &self.full_namespace };
        let entry = self
            .entries
            .entry(name.to_string())
            .or_insert_with(|| Entry::Namespace(Namespace::new(name, Some(prefix))));
        match entry {
            Entry::Namespace(ns) => Ok(ns),
            Entry::Variable(_) => Err(ConfigError::Conflict {
                key: name.to_string(),
                namespace: self.full_namespace.clone(),
            }),
        }
    }

    /// Every variable below this namespace, depth first.
    pub fn variables(&self) -> Vec<&Variable> {
        let mut out = Vec::new();
        self.collect_variables(&mut out);
        out
    }

    fn collect_variables<'a>(&'a self, out: &mut Vec<&'a Variable>) {
        for entry in self.entries.values() {
            match entry {
                Entry::Variable(var) => out.push(var),
                Entry::Namespace(ns) => ns.collect_variables(out),
            }
        }
    }

    /// Every variable below this namespace, mutably, sorted by dotted key.
    pub(crate) fn variables_mut(&mut self) -> Vec<&mut Variable> {
        let mut out = Vec::new();
        self.collect_variables_mut(&mut out);
        out.sort_by_cached_key(|var| var.key());
        out
    }

    fn collect_variables_mut<'a>(&'a mut self, out: &mut Vec<&'a mut Variable>) {
        for entry in self.entries.values_mut() {
            match entry {
                Entry::Variable(var) => out.push(var),
                Entry::Namespace(ns) => ns.collect_variables_mut(out),
            }
        }
    }
}

/// A string variable discovered under `prefix`, defined from `raw`.
fn discovered(
    key: &str,
    prefix: &str,
    env_name: &str,
    raw: String,
) -> Result<Variable, ConfigError> {
    let mut var = Variable::string(key);
    var.attach(prefix);
    var.set_value(raw)?;
    tracing::debug!(
        key = %var.key(),
        env_key = %env_name,
        "Discovered variable from environment"
    );
    Ok(var)
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
