//! Front end for a caching compiler wrapper.
//!
//! The crate covers everything that happens before a cache could be
//! consulted: working out which part of the process arguments belongs to the
//! wrapper, which executable is the real compiler, what family that compiler
//! belongs to, and how to re-serialize the final invocation for platforms
//! that create processes from a single command line.
//!
//! ```text
//! argv → split → resolve → classify → (quote) → exec
//! ```

pub mod args;
pub mod compiler;
pub mod config;
pub mod exec;
pub mod logging;

use std::path::Path;

/// Canonical name of the wrapper executable.
pub const CCACHE_NAME: &str = "ccache";

/// Returns true if `path` names the wrapper itself.
///
/// Only the final path component is inspected and a trailing `.exe` in any
/// case is ignored. On Windows the name itself is compared case-insensitively.
pub fn is_ccache_executable(path: &str) -> bool {
    let stem = strip_exe_suffix(base_name(path));
    if cfg!(windows) {
        stem.eq_ignore_ascii_case(CCACHE_NAME)
    } else {
        stem == CCACHE_NAME
    }
}

/// Final component of `path`, or `path` itself when it has none.
pub fn base_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}

/// Returns true if `path` contains a directory separator, i.e. it is a
/// relative or absolute path rather than a bare program name.
pub fn is_full_path(path: &str) -> bool {
    path.contains('/') || (cfg!(windows) && path.contains('\\'))
}

/// `name` without a trailing `.exe` (any case).
pub fn strip_exe_suffix(name: &str) -> &str {
    let len = name.len();
    if len > 4 && name.is_char_boundary(len - 4) && name[len - 4..].eq_ignore_ascii_case(".exe") {
        &name[..len - 4]
    } else {
        name
    }
}
