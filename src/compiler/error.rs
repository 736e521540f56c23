//! Errors raised while resolving the real compiler.

use thiserror::Error;

/// Errors that can occur when resolving the compiler to run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// The bare compiler name resolved back to the wrapper itself.
    #[error("Recursive invocation: compiler '{compiler}' resolves to {resolved}")]
    SelfLoop { compiler: String, resolved: String },

    /// The bare compiler name was not found in the search path.
    #[error("Could not find compiler '{compiler}' in PATH")]
    NotFound { compiler: String },
}

impl ResolveError {
    /// Short identifier used in log lines.
    pub fn error_type(&self) -> &'static str {
        match self {
            ResolveError::SelfLoop { .. } => "self_loop",
            ResolveError::NotFound { .. } => "compiler_not_found",
        }
    }
}
