use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::compiler::CompilerFamily;

/// Effective wrapper configuration.
///
/// Every field has a default, so an empty file (or no file) is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Compiler to run instead of the one named on the command line.
    /// Empty means "use the invoked name".
    pub compiler: String,
    /// Compiler family override; `auto` guesses from the executable name.
    pub compiler_type: CompilerType,
    /// Search path used to locate compilers. Empty means `$PATH`.
    pub path: String,
    /// File receiving the wrapper's log. Empty disables logging.
    pub log_file: String,
}

/// Value of the `compiler_type` setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompilerType {
    #[default]
    Auto,
    Gcc,
    Clang,
    Nvcc,
    Other,
}

impl CompilerType {
    /// Forced family, or `None` for `auto`.
    pub fn family(self) -> Option<CompilerFamily> {
        match self {
            CompilerType::Auto => None,
            CompilerType::Gcc => Some(CompilerFamily::Gcc),
            CompilerType::Clang => Some(CompilerFamily::Clang),
            CompilerType::Nvcc => Some(CompilerFamily::Nvcc),
            CompilerType::Other => Some(CompilerFamily::Other),
        }
    }
}

impl FromStr for CompilerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("auto") {
            return Ok(CompilerType::Auto);
        }
        Ok(match s.parse::<CompilerFamily>()? {
            CompilerFamily::Gcc => CompilerType::Gcc,
            CompilerFamily::Clang => CompilerType::Clang,
            CompilerFamily::Nvcc => CompilerType::Nvcc,
            CompilerFamily::Other => CompilerType::Other,
        })
    }
}

impl fmt::Display for CompilerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.family() {
            Some(family) => fmt::Display::fmt(&family, f),
            None => f.write_str("auto"),
        }
    }
}
