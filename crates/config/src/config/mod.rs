//! The configuration root.
//!
//! Responsibilities:
//! - Resolve dotted keys (`web.service.port`) through the namespace tree.
//! - Register variable declarations under a namespace path.
//! - Resolve declared variables from the source at start-up.
//!
//! Does NOT handle:
//! - Building the source stack (see `builder.rs`).
//! - Incremental traversal internals (see `traversal.rs`).
//! - Introspection output (see `snapshot.rs`).
//!
//! Invariants:
//! - One `Config` owns the whole tree; consumers receive it by reference.
//!   Shared use across threads needs external synchronization (e.g. a `Mutex`).
//! - Lookups that miss the tree query the source at most once per key;
//!   a hit is cached by materializing a variable.
//! - A caller-supplied default never materializes anything in the tree.

mod builder;
mod snapshot;
mod traversal;

pub use builder::ConfigBuilder;
pub use snapshot::{ConfigSnapshot, VariableSnapshot};
pub use traversal::{Resolved, Traversal};

use std::collections::HashSet;

use crate::constants::{DEFAULT_ENTRYPOINT_NAMESPACE, NAMESPACE_SEPARATOR};
use crate::error::ConfigError;
use crate::namespace::{Entry, Namespace, ResolutionMode};
use crate::source::{EnvSource, env_key};
use crate::types::{Value, VarKind, Variable};

/// Split a dotted key into its segments, rejecting empty segments.
pub(crate) fn split_key(key: &str) -> Result<Vec<&str>, ConfigError> {
    let segments: Vec<&str> = key.split(NAMESPACE_SEPARATOR).collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(ConfigError::EmptyKey);
    }
    Ok(segments)
}

/// Application configuration exposed under dotted keys.
#[derive(Debug)]
pub struct Config {
    entrypoint: String,
    mode: ResolutionMode,
    root: Namespace,
    source: Box<dyn EnvSource>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_ENTRYPOINT_NAMESPACE)
    }
}

impl Config {
    /// Create a lazily-resolving configuration backed by the process environment.
    pub fn new(entrypoint: impl Into<String>) -> Self {
        ConfigBuilder::new()
            .with_entrypoint(entrypoint)
            .with_process_env()
            .build()
    }

    /// Create a lazily-resolving configuration backed by `source`.
    pub fn with_source(entrypoint: impl Into<String>, source: impl EnvSource + 'static) -> Self {
        ConfigBuilder::new()
            .with_entrypoint(entrypoint)
            .with_source(source)
            .build()
    }

    pub(crate) fn from_parts(
        entrypoint: String,
        mode: ResolutionMode,
        source: Box<dyn EnvSource>,
    ) -> Self {
        Self {
            root: Namespace::root(entrypoint.as_str()),
            entrypoint,
            mode,
            source,
        }
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Name of the entry point (root) namespace.
    pub fn entrypoint(&self) -> &str {
        &self.entrypoint
    }

    pub fn mode(&self) -> ResolutionMode {
        self.mode
    }

    pub fn root(&self) -> &Namespace {
        &self.root
    }

    /// Start an incremental traversal at the root.
    ///
    /// `config.traverse().step("a")?` followed by further steps is the typed
    /// equivalent of `config.get("a.b.c")`.
    pub fn traverse(&mut self) -> Traversal<'_> {
        Traversal::new(&mut self.root, self.source.as_ref(), self.mode)
    }

    /// Resolve a dotted key.
    ///
    /// Keys already in the tree resolve directly. Otherwise, in `Lazy` mode
    /// the source is checked first for the derived environment key of the
    /// full path. On a hit the path is materialized with the value already
    /// read, so that key is queried only once. On a miss `default` is
    /// returned as-is and nothing is materialized.
    ///
    /// A registered variable that is still undefined also falls back to
    /// `default`.
    ///
    /// # Errors
    ///
    /// - `ConfigError::KeyNotFound` in `Lazy` mode when nothing resolves and
    ///   no default is given.
    /// - `ConfigError::Undeclared` in `Strict` mode for an unregistered key
    ///   with no default.
    /// - `ConfigError::Undefined` for an undefined variable with no default.
    pub fn get(&mut self, key: &str, default: Option<Value>) -> Result<Resolved<'_>, ConfigError> {
        let segments = split_key(key)?;

        let mut discovered = None;
        if self.lookup(&segments).is_none() {
            match self.mode {
                ResolutionMode::Lazy => match self.source.lookup(&env_key(&segments)) {
                    Some(raw) => discovered = Some(raw),
                    None => {
                        return default
                            .map(Resolved::Value)
                            .ok_or_else(|| ConfigError::KeyNotFound {
                                key: key.to_string(),
                            });
                    }
                },
                ResolutionMode::Strict => {
                    if let Some(default) = default {
                        return Ok(Resolved::Value(default));
                    }
                }
            }
        }

        let (last, parents) = segments.split_last().ok_or(ConfigError::EmptyKey)?;
        let mut traversal = self.traverse();
        for segment in parents {
            traversal = match traversal.step(segment) {
                Ok(Resolved::Namespace(next)) => next,
                Ok(Resolved::Value(_)) | Err(ConfigError::Undefined { .. }) => {
                    return Err(ConfigError::KeyNotFound {
                        key: key.to_string(),
                    });
                }
                Err(e) => return Err(e),
            };
        }
        let resolved = match discovered {
            Some(raw) => traversal.discover(last, raw),
            None => traversal.step(last),
        };
        match resolved {
            Err(e @ ConfigError::Undefined { .. }) => default.map(Resolved::Value).ok_or(e),
            resolved => resolved,
        }
    }

    /// Resolve a dotted key that must name a variable.
    pub fn value(&mut self, key: &str) -> Result<Value, ConfigError> {
        match self.get(key, None)? {
            Resolved::Value(value) => Ok(value),
            Resolved::Namespace(_) => Err(ConfigError::NotAVariable {
                key: key.to_string(),
            }),
        }
    }

    /// Resolve `key` as a string, rendering non-string values.
    pub fn get_str(&mut self, key: &str) -> Result<String, ConfigError> {
        Ok(self.value(key)?.to_string())
    }

    /// Resolve `key` as an integer, parsing discovered string values.
    pub fn get_int(&mut self, key: &str) -> Result<i64, ConfigError> {
        let value = VarKind::Integer
            .coerce(self.value(key)?)
            .map_err(|e| e.for_key(key))?;
        Ok(value.as_int().unwrap_or_default())
    }

    /// Resolve `key` as a boolean, parsing discovered string values.
    pub fn get_bool(&mut self, key: &str) -> Result<bool, ConfigError> {
        let value = VarKind::Boolean
            .coerce(self.value(key)?)
            .map_err(|e| e.for_key(key))?;
        Ok(value.as_bool().unwrap_or_default())
    }

    /// Look up an entry without materializing anything.
    fn lookup(&self, segments: &[&str]) -> Option<&Entry> {
        let (last, parents) = segments.split_last()?;
        let mut current = &self.root;
        for segment in parents {
            current = current.entry(segment)?.as_namespace()?;
        }
        current.entry(last)
    }

    /// The variable at `key`, if it is already in the tree.
    ///
    /// Returns the registered instance itself, never a copy.
    pub fn variable(&self, key: &str) -> Option<&Variable> {
        let segments = split_key(key).ok()?;
        self.lookup(&segments)?.as_variable()
    }

    pub fn variable_mut(&mut self, key: &str) -> Option<&mut Variable> {
        let segments = split_key(key).ok()?;
        let (last, parents) = segments.split_last()?;
        let mut current = &mut self.root;
        for segment in parents {
            current = match current.entry_mut(segment)? {
                Entry::Namespace(ns) => ns,
                Entry::Variable(_) => return None,
            };
        }
        current.entry_mut(last)?.as_variable_mut()
    }

    /// The namespace at the dotted `path`, if it is already in the tree.
    pub fn namespace(&self, path: &str) -> Option<&Namespace> {
        let segments = split_key(path).ok()?;
        self.lookup(&segments)?.as_namespace()
    }

    /// Shadow the value of the variable at `key`.
    pub fn set_override(&mut self, key: &str, value: impl Into<Value>) -> Result<(), ConfigError> {
        self.variable_mut(key)
            .ok_or_else(|| ConfigError::KeyNotFound {
                key: key.to_string(),
            })?
            .set_override(value)
    }

    /// Remove the override of the variable at `key`, returning it.
    pub fn clear_override(&mut self, key: &str) -> Result<Value, ConfigError> {
        self.variable_mut(key)
            .ok_or_else(|| ConfigError::KeyNotFound {
                key: key.to_string(),
            })?
            .clear_override()
    }

    /// Attach `variables` under the dotted `namespace` path.
    ///
    /// Namespaces along the path are created as needed. Nothing is attached
    /// unless every variable can be.
    ///
    /// # Errors
    ///
    /// - `ConfigError::Conflict` if a path segment is a variable, or a
    ///   variable name is already present in the target namespace (or
    ///   repeated within `variables`).
    /// - `ConfigError::EmptyKey` for an empty path segment.
    pub fn register_vars(
        &mut self,
        variables: impl IntoIterator<Item = Variable>,
        namespace: &str,
    ) -> Result<(), ConfigError> {
        let segments = split_key(namespace)?;
        let mut current = &mut self.root;
        for segment in segments {
            current = current.ensure_namespace(segment)?;
        }

        let variables: Vec<Variable> = variables.into_iter().collect();
        let mut seen = HashSet::new();
        for var in &variables {
            if current.contains(var.name()) || !seen.insert(var.name()) {
                tracing::warn!(
                    key = %var.name(),
                    namespace = %current.full_namespace(),
                    "Refusing to register duplicate configuration key"
                );
                return Err(ConfigError::Conflict {
                    key: var.name().to_string(),
                    namespace: current.full_namespace().to_string(),
                });
            }
        }

        let path = current.child_prefix().to_string();
        for mut var in variables {
            var.attach(&path);
            tracing::debug!(key = %var.key(), kind = %var.kind(), "Registered variable");
            current.set_entry(var.name().to_string(), Entry::Variable(var));
        }
        Ok(())
    }

    /// Define every registered, still-undefined variable from the source.
    ///
    /// Variables are visited in dotted-key order. Each one reads its derived
    /// environment key; when absent, its default applies. A falsy default on
    /// a required variable counts as a value. Every variable that can be
    /// defined is defined even when others fail. Run once after all
    /// registrations.
    ///
    /// # Errors
    ///
    /// - `ConfigError::MissingRequired` listing every required variable left
    ///   undefined, sorted by key, when that is the only failure.
    /// - `ConfigError::Unresolved` when any value failed coercion. It holds
    ///   one `ConfigError::InvalidValue` per failing variable, followed by the
    ///   `MissingRequired` error if required variables are also missing.
    pub fn resolve_declared(&mut self) -> Result<(), ConfigError> {
        let source = self.source.as_ref();
        let mut invalid = Vec::new();
        let mut missing = Vec::new();

        for var in self.root.variables_mut() {
            if var.is_defined() {
                continue;
            }
            let outcome = match source.lookup(&var.env_key()) {
                Some(raw) => var.set_value(raw),
                None => match var.default_value().cloned() {
                    Some(default) => var.set_value(default),
                    None => {
                        if var.is_required() {
                            missing.push(var.key());
                        }
                        Ok(())
                    }
                },
            };
            if let Err(e) = outcome {
                tracing::warn!(key = %var.key(), error = %e, "Declared variable has an invalid value");
                invalid.push(e);
            }
        }

        if !missing.is_empty() {
            tracing::warn!(keys = ?missing, "Required configuration is missing");
        }
        match (invalid.is_empty(), missing.is_empty()) {
            (true, true) => Ok(()),
            (true, false) => Err(ConfigError::MissingRequired { keys: missing }),
            (false, _) => {
                if !missing.is_empty() {
                    invalid.push(ConfigError::MissingRequired { keys: missing });
                }
                Err(ConfigError::Unresolved { errors: invalid })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::source::MapSource;

    /// Records every key looked up in the wrapped source.
    #[derive(Debug)]
    struct CountingSource {
        inner: MapSource,
        lookups: Arc<Mutex<Vec<String>>>,
    }

    impl CountingSource {
        fn new(inner: MapSource) -> Self {
            Self {
                inner,
                lookups: Arc::default(),
            }
        }

        fn lookups(&self) -> Arc<Mutex<Vec<String>>> {
            Arc::clone(&self.lookups)
        }
    }

    impl EnvSource for CountingSource {
        fn lookup(&self, key: &str) -> Option<String> {
            self.lookups.lock().unwrap().push(key.to_string());
            self.inner.lookup(key)
        }
    }

    fn web_source() -> MapSource {
        MapSource::new()
            .with_var("WEB_SERVICE_PORT", "5000")
            .with_var("WEB_SERVICE_HOSTNAME", "localhost")
    }

    #[test]
    fn test_split_key_rejects_empty_segments() {
        assert_eq!(split_key("a.b").unwrap(), vec!["a", "b"]);
        assert_eq!(split_key("").unwrap_err(), ConfigError::EmptyKey);
        assert_eq!(split_key("a..b").unwrap_err(), ConfigError::EmptyKey);
        assert_eq!(split_key(".a").unwrap_err(), ConfigError::EmptyKey);
    }

    #[test]
    fn test_get_discovers_from_source() {
        let mut config = Config::with_source("tortilla", web_source());
        let value = config.value("web.service.port").unwrap();
        assert_eq!(value, Value::from("5000"));

        let var = config.variable("web.service.port").unwrap();
        assert_eq!(var.kind(), VarKind::String);
        assert_eq!(var.namespace(), Some("web.service"));
        assert_eq!(config.get_int("web.service.port").unwrap(), 5000);
        assert!(matches!(
            config.get_bool("web.service.hostname"),
            Err(ConfigError::InvalidValue { key, .. }) if key == "web.service.hostname"
        ));
    }

    #[test]
    fn test_get_registered_integer_is_coerced() {
        let mut config = Config::with_source("tortilla", web_source());
        config
            .register_vars([Variable::int("port")], "web.service")
            .unwrap();
        config.resolve_declared().unwrap();
        assert_eq!(config.value("web.service.port").unwrap(), Value::Int(5000));
    }

    #[test]
    fn test_missing_key_without_default_fails() {
        let mut config = Config::with_source("tortilla", MapSource::new());
        let err = config.get("missing.key", None).unwrap_err();
        assert_eq!(
            err,
            ConfigError::KeyNotFound {
                key: "missing.key".to_string()
            }
        );
        assert!(config.root().is_empty());
    }

    #[test]
    fn test_missing_key_checks_source_before_default() {
        let source = CountingSource::new(MapSource::new());
        let lookups = source.lookups();
        let mut config = Config::with_source("tortilla", source);
        let resolved = config
            .get("missing.key", Some(Value::from("fallback")))
            .unwrap();
        assert_eq!(resolved.into_value(), Some(Value::from("fallback")));
        assert!(config.root().is_empty());
        assert_eq!(*lookups.lock().unwrap(), vec!["MISSING_KEY"]);
    }

    #[test]
    fn test_discovery_queries_each_env_key_once() {
        let source = CountingSource::new(web_source());
        let lookups = source.lookups();
        let mut config = Config::with_source("tortilla", source);

        assert_eq!(
            config.value("web.service.port").unwrap(),
            Value::from("5000")
        );
        let seen = lookups.lock().unwrap().clone();
        assert_eq!(
            seen.iter().filter(|k| *k == "WEB_SERVICE_PORT").count(),
            1,
            "lookups: {:?}",
            seen
        );

        assert_eq!(
            config.value("web.service.port").unwrap(),
            Value::from("5000")
        );
        assert_eq!(lookups.lock().unwrap().len(), seen.len());
    }

    #[test]
    fn test_source_wins_over_default() {
        let mut config = Config::with_source("tortilla", web_source());
        let resolved = config
            .get("web.service.port", Some(Value::from("1")))
            .unwrap();
        assert_eq!(resolved.into_value(), Some(Value::from("5000")));
    }

    #[test]
    fn test_get_namespace_returns_traversal() {
        let mut config = Config::with_source("tortilla", web_source());
        config
            .register_vars([Variable::string("hostname")], "web.service")
            .unwrap();

        let resolved = config.get("web", None).unwrap();
        let traversal = resolved.into_traversal().unwrap();
        assert_eq!(traversal.path(), "web");
        let port = traversal.step("service").unwrap().into_traversal().unwrap();
        assert_eq!(
            port.step("port").unwrap().into_value(),
            Some(Value::from("5000"))
        );
        assert!(matches!(
            config.value("web"),
            Err(ConfigError::NotAVariable { .. })
        ));
    }

    #[test]
    fn test_key_through_variable_is_not_found() {
        let mut config = Config::with_source(
            "tortilla",
            MapSource::new()
                .with_var("WEB", "leaf")
                .with_var("WEB_PORT", "1"),
        );
        assert_eq!(config.value("web").unwrap(), Value::from("leaf"));
        assert!(matches!(
            config.get("web.port", None),
            Err(ConfigError::KeyNotFound { .. })
        ));
    }

    #[test]
    fn test_undefined_registered_variable() {
        let mut config = Config::with_source("tortilla", MapSource::new());
        config.register_vars([Variable::int("port")], "web").unwrap();

        assert_eq!(
            config.get("web.port", None).unwrap_err(),
            ConfigError::Undefined {
                key: "web.port".to_string()
            }
        );
        let resolved = config.get("web.port", Some(Value::Int(80))).unwrap();
        assert_eq!(resolved.into_value(), Some(Value::Int(80)));
    }

    #[test]
    fn test_strict_mode_rejects_undeclared() {
        let mut config = Config::builder()
            .with_mode(ResolutionMode::Strict)
            .with_source(web_source())
            .build();

        assert_eq!(
            config.get("web.service.port", None).unwrap_err(),
            ConfigError::Undeclared {
                key: "web".to_string(),
                namespace: "tortilla".to_string(),
            }
        );
        let resolved = config
            .get("web.service.port", Some(Value::Int(1)))
            .unwrap();
        assert_eq!(resolved.into_value(), Some(Value::Int(1)));

        config
            .register_vars([Variable::int("port")], "web.service")
            .unwrap();
        config.resolve_declared().unwrap();
        assert_eq!(config.get_int("web.service.port").unwrap(), 5000);
        assert!(matches!(
            config.get("web.service.hostname", None),
            Err(ConfigError::Undeclared { namespace, .. }) if namespace == "web.service"
        ));
    }

    #[test]
    fn test_register_vars_preserves_identity() {
        let mut config = Config::with_source("tortilla", MapSource::new());
        config
            .register_vars([Variable::string("x").with_help("an x")], "a.b")
            .unwrap();

        let first: *const Variable = config.variable("a.b.x").unwrap();
        config
            .variable_mut("a.b.x")
            .unwrap()
            .set_value("hello")
            .unwrap();
        let second: *const Variable = config.variable("a.b.x").unwrap();
        assert_eq!(first, second);
        assert_eq!(config.value("a.b.x").unwrap(), Value::from("hello"));
        assert_eq!(config.variable("a.b.x").unwrap().help(), Some("an x"));
        assert_eq!(config.namespace("a.b").unwrap().full_namespace(), "a.b");
    }

    #[test]
    fn test_register_vars_reuses_namespaces() {
        let mut config = Config::with_source("tortilla", MapSource::new());
        config.register_vars([Variable::int("port")], "web").unwrap();
        config
            .register_vars([Variable::string("hostname")], "web")
            .unwrap();
        assert_eq!(config.namespace("web").unwrap().len(), 2);
    }

    #[test]
    fn test_register_vars_rejects_duplicates() {
        let mut config = Config::with_source("tortilla", MapSource::new());
        config.register_vars([Variable::int("port")], "web").unwrap();

        let err = config
            .register_vars([Variable::string("other"), Variable::int("port")], "web")
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Conflict {
                key: "port".to_string(),
                namespace: "web".to_string(),
            }
        );
        assert!(config.variable("web.other").is_none());

        let err = config
            .register_vars([Variable::int("a"), Variable::int("a")], "db")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Conflict { .. }));

        let err = config
            .register_vars([Variable::int("x")], "web.port")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Conflict { key, .. } if key == "port"));
    }

    #[test]
    fn test_resolve_declared_applies_source_and_defaults() {
        let source = MapSource::new()
            .with_var("WEB_PORT", "8080")
            .with_var("WEB_DEBUG", "yes");
        let mut config = Config::with_source("tortilla", source);
        config
            .register_vars(
                [
                    Variable::int("port"),
                    Variable::boolean("debug"),
                    Variable::string("hostname").with_default("0.0.0.0").unwrap(),
                    Variable::int("workers"),
                ],
                "web",
            )
            .unwrap();
        config.resolve_declared().unwrap();

        assert_eq!(config.value("web.port").unwrap(), Value::Int(8080));
        assert!(config.get_bool("web.debug").unwrap());
        assert_eq!(config.get_str("web.hostname").unwrap(), "0.0.0.0");
        assert!(!config.variable("web.workers").unwrap().is_defined());
    }

    #[test]
    fn test_resolve_declared_reports_every_missing_required() {
        let mut config = Config::with_source("tortilla", MapSource::new());
        config
            .register_vars([Variable::string("url").required().unwrap()], "db")
            .unwrap();
        config
            .register_vars([Variable::int("port").required().unwrap()], "web")
            .unwrap();

        assert_eq!(
            config.resolve_declared().unwrap_err(),
            ConfigError::MissingRequired {
                keys: vec!["db.url".to_string(), "web.port".to_string()],
            }
        );
    }

    #[test]
    fn test_resolve_declared_surfaces_type_errors() {
        let mut config =
            Config::with_source("tortilla", MapSource::new().with_var("WEB_PORT", "http"));
        config.register_vars([Variable::int("port")], "web").unwrap();
        assert_eq!(
            config.resolve_declared().unwrap_err(),
            ConfigError::Unresolved {
                errors: vec![ConfigError::InvalidValue {
                    key: "web.port".to_string(),
                    value: "http".to_string(),
                    expected: VarKind::Integer,
                }],
            }
        );
    }

    fn mixed_failure_config() -> Config {
        let source = MapSource::new()
            .with_var("WEB_PORT", "http")
            .with_var("WEB_WORKERS", "four")
            .with_var("WEB_HOST", "h");
        let mut config = Config::with_source("tortilla", source);
        config
            .register_vars(
                [
                    Variable::int("port"),
                    Variable::int("workers"),
                    Variable::string("host"),
                    Variable::string("url").required().unwrap(),
                ],
                "web",
            )
            .unwrap();
        config
    }

    #[test]
    fn test_resolve_declared_collects_every_failure_in_key_order() {
        for _ in 0..20 {
            let mut config = mixed_failure_config();
            assert_eq!(
                config.resolve_declared().unwrap_err(),
                ConfigError::Unresolved {
                    errors: vec![
                        ConfigError::InvalidValue {
                            key: "web.port".to_string(),
                            value: "http".to_string(),
                            expected: VarKind::Integer,
                        },
                        ConfigError::InvalidValue {
                            key: "web.workers".to_string(),
                            value: "four".to_string(),
                            expected: VarKind::Integer,
                        },
                        ConfigError::MissingRequired {
                            keys: vec!["web.url".to_string()],
                        },
                    ],
                }
            );
            assert_eq!(config.value("web.host").unwrap(), Value::from("h"));
            assert!(!config.variable("web.port").unwrap().is_defined());
        }
    }

    #[test]
    fn test_required_falsy_default_satisfies_requirement() {
        let mut config = Config::with_source("tortilla", MapSource::new());
        config
            .register_vars(
                [Variable::declare(
                    "retries",
                    VarKind::Integer,
                    None,
                    true,
                    Some(Value::Int(0)),
                )
                .unwrap()],
                "web",
            )
            .unwrap();
        config.resolve_declared().unwrap();
        assert_eq!(config.get_int("web.retries").unwrap(), 0);
    }

    #[test]
    fn test_overrides_through_config() {
        let mut config = Config::with_source("tortilla", web_source());
        config
            .register_vars([Variable::int("port")], "web.service")
            .unwrap();
        config.resolve_declared().unwrap();

        config.set_override("web.service.port", 6000).unwrap();
        assert_eq!(config.get_int("web.service.port").unwrap(), 6000);
        assert!(matches!(
            config.set_override("web.service.port", 7000),
            Err(ConfigError::AlreadyOverridden { .. })
        ));
        assert_eq!(
            config.clear_override("web.service.port").unwrap(),
            Value::Int(6000)
        );
        assert_eq!(config.get_int("web.service.port").unwrap(), 5000);
        assert!(matches!(
            config.clear_override("web.service.port"),
            Err(ConfigError::NotOverridden { .. })
        ));
        assert!(matches!(
            config.set_override("nope", 1),
            Err(ConfigError::KeyNotFound { .. })
        ));
    }
}
