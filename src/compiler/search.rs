//! Executable search in the execution search path, skipping the wrapper.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::is_ccache_executable;

/// Searches a `PATH`-style list of directories for executables.
///
/// Candidates that are the wrapper itself (by canonical path or by the name
/// of the file they ultimately point at) are skipped, so a directory of
/// compiler-named symlinks to the wrapper earlier in the path does not shadow
/// the real compiler.
#[derive(Debug, Clone)]
pub struct ExecutableSearch {
    search_path: Option<OsString>,
    excluded: Vec<PathBuf>,
}

impl ExecutableSearch {
    /// Search `search_path`, or `$PATH` when it is `None` or empty.
    pub fn new(search_path: Option<OsString>) -> Self {
        let search_path = search_path
            .filter(|p| !p.is_empty())
            .or_else(|| std::env::var_os("PATH"));
        let excluded = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.canonicalize().ok())
            .into_iter()
            .collect();
        Self {
            search_path,
            excluded,
        }
    }

    /// Also skip candidates that resolve to the same file as `path`.
    pub fn excluding(mut self, path: impl AsRef<Path>) -> Self {
        if let Ok(canonical) = path.as_ref().canonicalize() {
            self.excluded.push(canonical);
        }
        self
    }

    /// First executable named `name` that is not the wrapper.
    pub fn find(&self, name: &str) -> Option<String> {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let candidates = match which::which_in_all(name, self.search_path.as_ref(), cwd) {
            Ok(candidates) => candidates,
            Err(e) => {
                debug!(name, error = %e, "executable search failed");
                return None;
            }
        };

        for candidate in candidates {
            if self.is_wrapper(&candidate) {
                trace!(candidate = %candidate.display(), "skipping wrapper");
                continue;
            }
            debug!(name, found = %candidate.display(), "found executable");
            return Some(candidate.to_string_lossy().into_owned());
        }
        None
    }

    fn is_wrapper(&self, candidate: &Path) -> bool {
        let Ok(canonical) = candidate.canonicalize() else {
            return false;
        };
        self.excluded.contains(&canonical) || is_ccache_executable(&canonical.to_string_lossy())
    }
}
