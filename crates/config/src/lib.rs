//! Dotted-namespace configuration access.
//!
//! This crate exposes application settings under dotted keys
//! (`web.service.hostname`). Variables can be registered upfront with a type,
//! default, and required flag, or discovered lazily from an environment-like
//! source using the upper-cased, underscore-joined key (`WEB_SERVICE_HOSTNAME`).
//!
//! ```no_run
//! use tortilla_config::{Config, Variable};
//!
//! let mut config = Config::new("myapp");
//! config.register_vars([Variable::int("port").with_default(8080)?], "web.service")?;
//! config.resolve_declared()?;
//! let port = config.get_int("web.service.port")?;
//! assert!(port > 0);
//! # Ok::<(), tortilla_config::ConfigError>(())
//! ```

mod config;
pub mod constants;
mod error;
mod namespace;
pub mod source;
mod types;

pub use config::{Config, ConfigBuilder, ConfigSnapshot, Resolved, Traversal, VariableSnapshot};
pub use error::{ConfigError, DisplayOption};
pub use namespace::{Entry, Namespace, ResolutionMode};
pub use source::{DotenvSource, EnvSource, LayeredSource, MapSource, ProcessEnv, env_key};
pub use types::{Value, VarKind, Variable};
