//! Compiler resolver — compiler invocation → invocation of the real compiler.

use tracing::{debug, warn};

use crate::args::InvocationMode;
use crate::compiler::error::ResolveError;
use crate::{base_name, is_ccache_executable, is_full_path};

/// Replace `invocation[0]` with the executable that should actually run.
///
/// Precedence:
///
/// 1. A non-empty `configured_compiler` wins. Bare names are looked up with
///    `search`, paths are used as given.
/// 2. When masquerading, only the basename of `invocation[0]` is looked up.
///    The literal path is where the OS found the wrapper, so it may point
///    straight back at it.
/// 3. When wrapped, a path in `invocation[0]` is trusted as given. A bare name
///    is looked up and must neither be missing nor resolve to the wrapper.
///
/// Only the third case can fail. The first two use the search result as is,
/// substituting an empty program name when nothing was found.
pub fn find_compiler<F>(
    mut invocation: Vec<String>,
    configured_compiler: Option<&str>,
    mode: InvocationMode,
    search: F,
) -> Result<Vec<String>, ResolveError>
where
    F: Fn(&str) -> Option<String>,
{
    if invocation.is_empty() {
        return Ok(invocation);
    }
    let invoked: &str = &invocation[0];

    let resolved = match configured_compiler.filter(|c| !c.is_empty()) {
        Some(configured) if is_full_path(configured) => configured.to_string(),
        Some(configured) => unchecked(configured, search(configured)),
        None => match mode {
            InvocationMode::Masquerading => {
                let name = base_name(invoked);
                unchecked(name, search(name))
            }
            InvocationMode::Wrapped if is_full_path(invoked) => invoked.to_string(),
            InvocationMode::Wrapped => checked(invoked, search(invoked))?,
        },
    };

    debug!(invoked = %invoked, resolved = %resolved, ?mode, "resolved compiler");
    invocation[0] = resolved;
    Ok(invocation)
}

fn checked(name: &str, found: Option<String>) -> Result<String, ResolveError> {
    match found.filter(|path| !path.is_empty()) {
        None => Err(ResolveError::NotFound {
            compiler: name.to_string(),
        }),
        Some(path) if is_ccache_executable(&path) => Err(ResolveError::SelfLoop {
            compiler: name.to_string(),
            resolved: path,
        }),
        Some(path) => Ok(path),
    }
}

fn unchecked(name: &str, found: Option<String>) -> String {
    let path = found.unwrap_or_default();
    if path.is_empty() {
        warn!(compiler = %name, "compiler not found in search path");
    } else if is_ccache_executable(&path) {
        warn!(compiler = %name, resolved = %path, "compiler resolves to the wrapper itself");
    }
    path
}
