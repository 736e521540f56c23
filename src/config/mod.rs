//! Wrapper configuration: file, environment and command-line settings.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{CompilerType, Config};
