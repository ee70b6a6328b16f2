//! Configuration value types.
//!
//! Responsibilities:
//! - Define the tagged value model and declared kinds (`value.rs`).
//! - Define the variable cell and its lifecycle (`variable.rs`).
//!
//! Does NOT handle:
//! - Tree placement or lookup (see `namespace` and `config` modules).

mod value;
mod variable;

pub use value::{Value, VarKind};
pub use variable::Variable;
