//! Compiler classifier — executable path → compiler family.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::debug;

use crate::strip_exe_suffix;

/// Maximum number of symlinks followed before giving up.
pub const MAX_SYMLINK_HOPS: usize = 10;

/// Coarse compiler classification used to pick family-specific handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompilerFamily {
    Gcc,
    Clang,
    Nvcc,
    /// Unrecognized. Not an error.
    Other,
}

/// Ordered name rules; the first substring match wins. `clang++` contains
/// `g++`, so clang has to come first.
static NAME_RULES: &[(&str, CompilerFamily)] = &[
    ("clang", CompilerFamily::Clang),
    ("gcc", CompilerFamily::Gcc),
    ("g++", CompilerFamily::Gcc),
    ("nvcc", CompilerFamily::Nvcc),
];

impl CompilerFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompilerFamily::Gcc => "gcc",
            CompilerFamily::Clang => "clang",
            CompilerFamily::Nvcc => "nvcc",
            CompilerFamily::Other => "other",
        }
    }
}

impl fmt::Display for CompilerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompilerFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gcc" => Ok(CompilerFamily::Gcc),
            "clang" => Ok(CompilerFamily::Clang),
            "nvcc" => Ok(CompilerFamily::Nvcc),
            "other" => Ok(CompilerFamily::Other),
            other => Err(format!("unknown compiler type '{}'", other)),
        }
    }
}

/// Classify the compiler at `path`.
///
/// The basename is matched first. Bare `cc` and `c++` carry no vendor
/// signal, so when nothing matches the symlink chain is followed through
/// `read_link` and the final target's name is matched instead. Cyclic or
/// overlong chains yield [`CompilerFamily::Other`].
pub fn guess_compiler<F>(path: &str, read_link: F) -> CompilerFamily
where
    F: Fn(&Path) -> Option<PathBuf>,
{
    if let Some(family) = family_from_name(Path::new(path)) {
        return family;
    }

    let Some(target) = follow_symlinks(Path::new(path), read_link) else {
        return CompilerFamily::Other;
    };
    debug!(path, target = %target.display(), "followed compiler symlinks");
    family_from_name(&target).unwrap_or(CompilerFamily::Other)
}

/// [`guess_compiler`] against the real filesystem.
pub fn guess_compiler_on_disk(path: &str) -> CompilerFamily {
    guess_compiler(path, |p| std::fs::read_link(p).ok())
}

fn family_from_name(path: &Path) -> Option<CompilerFamily> {
    let name = path.file_name()?.to_str()?.to_ascii_lowercase();
    let name = strip_exe_suffix(&name);
    NAME_RULES
        .iter()
        .find(|(needle, _)| name.contains(needle))
        .map(|(_, family)| *family)
}

/// Final target of the symlink chain starting at `start`, or `None` when
/// `start` is not a link or the chain does not terminate within
/// [`MAX_SYMLINK_HOPS`].
fn follow_symlinks<F>(start: &Path, read_link: F) -> Option<PathBuf>
where
    F: Fn(&Path) -> Option<PathBuf>,
{
    let mut current = start.to_path_buf();
    let mut visited = HashSet::new();
    visited.insert(current.clone());

    for _ in 0..MAX_SYMLINK_HOPS {
        let Some(target) = read_link(&current) else {
            return (current != start).then_some(current);
        };
        // Relative targets are relative to the directory holding the link.
        let next = match current.parent() {
            Some(dir) if target.is_relative() => dir.join(target),
            _ => target,
        };
        if !visited.insert(next.clone()) {
            debug!(path = %start.display(), "symlink cycle while classifying compiler");
            return None;
        }
        current = next;
    }

    if read_link(&current).is_none() {
        return Some(current);
    }
    debug!(path = %start.display(), "too many symlinks while classifying compiler");
    None
}
