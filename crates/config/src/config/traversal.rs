//! Incremental, typed path traversal.
//!
//! Responsibilities:
//! - Walk the namespace tree one segment at a time, carrying the context of
//!   traversed namespaces used for environment key derivation.
//! - Report each step as either a further namespace or a resolved value.
//!
//! Does NOT handle:
//! - Dotted key parsing or caller defaults (see `Config::get`).
//!
//! Invariants:
//! - A traversal always points at a namespace; reaching a variable ends it.
//! - `context` lists the segments from the root down to the current tip.

use crate::error::ConfigError;
use crate::namespace::{Entry, Namespace, ResolutionMode};
use crate::source::EnvSource;
use crate::types::Value;

/// The outcome of resolving a key or taking a traversal step.
#[derive(Debug)]
pub enum Resolved<'a> {
    /// The key names a namespace; keep stepping from here.
    Namespace(Traversal<'a>),
    /// The key names a variable; this is its effective value.
    Value(Value),
}

impl<'a> Resolved<'a> {
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Namespace(_) => None,
        }
    }

    pub fn into_traversal(self) -> Option<Traversal<'a>> {
        match self {
            Self::Namespace(traversal) => Some(traversal),
            Self::Value(_) => None,
        }
    }

    pub fn is_namespace(&self) -> bool {
        matches!(self, Self::Namespace(_))
    }
}

/// A position in the namespace tree.
#[derive(Debug)]
pub struct Traversal<'a> {
    tip: &'a mut Namespace,
    context: Vec<String>,
    source: &'a dyn EnvSource,
    mode: ResolutionMode,
}

impl<'a> Traversal<'a> {
    pub(crate) fn new(
        root: &'a mut Namespace,
        source: &'a dyn EnvSource,
        mode: ResolutionMode,
    ) -> Self {
        Self {
            tip: root,
            context: Vec::new(),
            source,
            mode,
        }
    }

    /// Dotted path of the current position; empty at the root.
    pub fn path(&self) -> String {
        self.context.join(".")
    }

    /// The namespace at the current position.
    pub fn namespace(&self) -> &Namespace {
        self.tip
    }

    /// Descend into `segment`.
    ///
    /// Missing children are materialized per the resolution mode (see
    /// `Namespace::get`).
    ///
    /// # Errors
    ///
    /// - `ConfigError::Undeclared` for a missing child in `Strict` mode.
    /// - `ConfigError::Undefined` when `segment` is a variable with no value yet.
    pub fn step(self, segment: &str) -> Result<Resolved<'a>, ConfigError> {
        let Self {
            tip,
            context,
            source,
            mode,
        } = self;
        let entry = tip.get(segment, &context, source, mode)?;
        Self::advance(entry, segment, context, source, mode)
    }

    /// Descend into `segment`, materializing it from an already-read `raw`
    /// value when missing.
    pub(crate) fn discover(self, segment: &str, raw: String) -> Result<Resolved<'a>, ConfigError> {
        let Self {
            tip,
            context,
            source,
            mode,
        } = self;
        let entry = tip.discover(segment, &context, raw)?;
        Self::advance(entry, segment, context, source, mode)
    }

    fn advance(
        entry: &'a mut Entry,
        segment: &str,
        mut context: Vec<String>,
        source: &'a dyn EnvSource,
        mode: ResolutionMode,
    ) -> Result<Resolved<'a>, ConfigError> {
        match entry {
            Entry::Namespace(ns) => {
                context.push(segment.to_string());
                Ok(Resolved::Namespace(Self {
                    tip: ns,
                    context,
                    source,
                    mode,
                }))
            }
            Entry::Variable(var) => Ok(Resolved::Value(var.value()?.clone())),
        }
    }

    /// Take one step per dotted segment of `path`.
    pub fn resolve(self, path: &str) -> Result<Resolved<'a>, ConfigError> {
        let segments = super::split_key(path)?;
        let mut resolved = Resolved::Namespace(self);
        for segment in segments {
            resolved = match resolved {
                Resolved::Namespace(traversal) => traversal.step(segment)?,
                Resolved::Value(_) => {
                    return Err(ConfigError::KeyNotFound {
                        key: path.to_string(),
                    });
                }
            };
        }
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::error::ConfigError;
    use crate::namespace::ResolutionMode;
    use crate::source::MapSource;
    use crate::types::{Value, Variable};

    #[test]
    fn test_step_chain_matches_dotted_get() {
        let source = MapSource::new().with_var("WEB_SERVICE_PORT", "5000");
        let mut config = Config::with_source("tortilla", source);

        let web = config.traverse().step("web").unwrap().into_traversal().unwrap();
        assert_eq!(web.path(), "web");
        let service = web.step("service").unwrap().into_traversal().unwrap();
        assert_eq!(service.path(), "web.service");
        assert_eq!(service.namespace().full_namespace(), "web.service");
        let port = service.step("port").unwrap();
        assert!(!port.is_namespace());
        assert_eq!(port.into_value(), Some(Value::from("5000")));

        assert_eq!(config.value("web.service.port").unwrap(), Value::from("5000"));
    }

    #[test]
    fn test_step_materializes_namespaces_for_unknown_segments() {
        let mut config = Config::with_source("tortilla", MapSource::new());
        let resolved = config.traverse().resolve("a.b.c").unwrap();
        assert_eq!(resolved.into_traversal().unwrap().path(), "a.b.c");
        assert_eq!(
            config.namespace("a.b.c").unwrap().full_namespace(),
            "a.b.c"
        );
    }

    #[test]
    fn test_resolve_past_variable_fails() {
        let source = MapSource::new().with_var("DEBUG", "1");
        let mut config = Config::with_source("tortilla", source);
        assert!(matches!(
            config.traverse().resolve("debug.level"),
            Err(ConfigError::KeyNotFound { .. })
        ));
    }

    #[test]
    fn test_step_on_undefined_variable_fails() {
        let mut config = Config::with_source("tortilla", MapSource::new());
        config.register_vars([Variable::int("port")], "web").unwrap();
        let web = config.traverse().step("web").unwrap().into_traversal().unwrap();
        assert!(matches!(
            web.step("port"),
            Err(ConfigError::Undefined { .. })
        ));
    }

    #[test]
    fn test_strict_traversal_rejects_unknown_segment() {
        let mut config = Config::builder()
            .with_mode(ResolutionMode::Strict)
            .with_source(MapSource::new())
            .build();
        assert!(matches!(
            config.traverse().step("web"),
            Err(ConfigError::Undeclared { .. })
        ));
    }
}
