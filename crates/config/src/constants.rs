//! Centralized constants for the tortilla configuration layer.
//!
//! This module contains naming and gating values shared across modules to
//! avoid string duplication.

// =============================================================================
// Key Naming
// =============================================================================

/// Default name of the root (entry point) namespace.
pub const DEFAULT_ENTRYPOINT_NAMESPACE: &str = "tortilla";

/// Separator between segments of a dotted configuration key (`web.service.port`).
pub const NAMESPACE_SEPARATOR: char = '.';

/// Separator between segments of a derived environment key (`WEB_SERVICE_PORT`).
pub const ENV_SEPARATOR: &str = "_";

// =============================================================================
// Dotenv
// =============================================================================

/// Environment variable that disables `.env` loading when set to `1` or `true`.
pub const DOTENV_DISABLED_VAR: &str = "DOTENV_DISABLED";

/// File name looked up in the working directory by `ConfigBuilder::load_dotenv`.
pub const DOTENV_FILE_NAME: &str = ".env";
