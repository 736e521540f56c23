//! Argument handling for the wrapper's own process arguments.
//!
//! ```text
//! argv → split_argv → (settings, compiler invocation) → … → argv_to_string
//! ```
//!
//! Both stages are pure functions and can be unit-tested independently.

mod quote;
mod split;

pub use quote::argv_to_string;
pub use split::{split_argv, ArgvParts, InvocationMode};
