//! Locating and classifying the real compiler.
//!
//! The resolver and the classifier take their filesystem capabilities as
//! closures so they can be exercised without touching `PATH` or creating
//! symlinks. [`ExecutableSearch`] and [`guess_compiler_on_disk`] are the
//! real implementations.

mod error;
mod family;
mod resolve;
mod search;

pub use error::ResolveError;
pub use family::{guess_compiler, guess_compiler_on_disk, CompilerFamily, MAX_SYMLINK_HOPS};
pub use resolve::find_compiler;
pub use search::ExecutableSearch;
