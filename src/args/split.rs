//! Argument splitter — raw process argv → wrapper settings + compiler invocation.

use crate::{is_ccache_executable, is_full_path};

/// How the wrapper was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationMode {
    /// Reached through a compiler-named symlink, e.g. `/usr/lib/ccache/gcc`.
    /// `argv[0]` is the path the OS used to find the wrapper itself.
    Masquerading,
    /// Explicit wrapper call, e.g. `ccache gcc -c foo.c`.
    Wrapped,
}

/// Result of splitting the raw process arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgvParts {
    pub invocation: InvocationMode,
    /// `key=value` settings that preceded the compiler. Always empty when
    /// masquerading.
    pub config_settings: Vec<String>,
    /// Compiler name followed by its arguments. May be empty.
    pub compiler_and_args: Vec<String>,
}

impl ArgvParts {
    pub fn masquerading_as_compiler(&self) -> bool {
        self.invocation == InvocationMode::Masquerading
    }
}

/// Split the process argument vector.
///
/// With no program name at all there is nothing proving a wrapper call, so
/// the result is treated as masquerading with an empty invocation.
pub fn split_argv(argv: &[String]) -> ArgvParts {
    let Some(program) = argv.first() else {
        return ArgvParts {
            invocation: InvocationMode::Masquerading,
            config_settings: Vec::new(),
            compiler_and_args: Vec::new(),
        };
    };

    if !is_ccache_executable(program) {
        return ArgvParts {
            invocation: InvocationMode::Masquerading,
            config_settings: Vec::new(),
            compiler_and_args: argv.to_vec(),
        };
    }

    let rest = &argv[1..];
    let settings_len = rest
        .iter()
        .take_while(|arg| is_config_setting(arg))
        .count();

    ArgvParts {
        invocation: InvocationMode::Wrapped,
        config_settings: rest[..settings_len].to_vec(),
        compiler_and_args: rest[settings_len..].to_vec(),
    }
}

/// Returns true for `key=value` tokens whose key is not a path.
///
/// The key is only trimmed for the check; the token itself is kept verbatim
/// so `c = d` is still a setting.
fn is_config_setting(arg: &str) -> bool {
    match arg.split_once('=') {
        Some((key, _)) => {
            let key = key.trim();
            !key.is_empty() && !is_full_path(key)
        }
        None => false,
    }
}
