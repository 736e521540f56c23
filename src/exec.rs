//! Running the resolved compiler.

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, ExitStatus};

use thiserror::Error;
use tracing::debug;

use crate::args::argv_to_string;

/// Interpreter used for shell-script "compilers" on Windows.
pub const SHELL: &str = "sh.exe";

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("No compiler given")]
    EmptyInvocation,

    /// The requested compiler resolved to nothing, e.g. a masquerading
    /// `gcc` when the only `gcc` in the search path is the wrapper.
    #[error("Could not find compiler '{compiler}' in search path")]
    NotFound { compiler: String },

    #[error("Failed to execute compiler '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Append `.exe` unless `path` already ends in `.exe`, `.bat` or `.sh`.
pub fn add_exe_suffix(path: &str) -> String {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("exe" | "bat" | "sh") => path.to_string(),
        _ => format!("{}.exe", path),
    }
}

/// Exit code to report for a finished compiler: its own code, or
/// `128 + signal` when a signal killed it.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;

        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

/// A fully resolved compiler invocation ready to be spawned.
///
/// Arguments are kept as `OsString` and forwarded byte for byte; only the
/// program name has to be valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerCommand {
    program: String,
    args: Vec<OsString>,
}

impl CompilerCommand {
    /// Build from a resolved program and the untouched compiler arguments.
    ///
    /// `requested` is the compiler the user asked for. It is only used to
    /// report an empty `program`.
    pub fn resolved(requested: &str, program: String, args: Vec<OsString>) -> Result<Self, ExecError> {
        if program.is_empty() {
            return Err(ExecError::NotFound {
                compiler: requested.to_string(),
            });
        }
        Ok(Self { program, args })
    }

    /// Build from a resolved invocation (`[compiler, args...]`).
    pub fn from_invocation(invocation: &[String]) -> Result<Self, ExecError> {
        let (program, args) = invocation.split_first().ok_or(ExecError::EmptyInvocation)?;
        if program.is_empty() {
            return Err(ExecError::EmptyInvocation);
        }
        Ok(Self {
            program: program.clone(),
            args: args.iter().map(OsString::from).collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Shell scripts can't be started directly by the Windows loader.
    pub fn is_shell_script(&self) -> bool {
        Path::new(&self.program)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("sh"))
    }

    /// The single-string command line used where processes are created from
    /// one string, with the shell in the program slot for scripts.
    ///
    /// Arguments that are not valid Unicode are converted lossily.
    pub fn command_line(&self) -> String {
        let prefix = self.is_shell_script().then_some(SHELL);
        argv_to_string(&self.argv_lossy(), prefix, false)
    }

    fn argv_lossy(&self) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().map(|a| a.to_string_lossy().into_owned()))
            .collect()
    }

    #[cfg(not(windows))]
    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }

    #[cfg(windows)]
    fn to_command(&self) -> Command {
        use std::os::windows::process::CommandExt;

        // std quotes the program itself; everything after it goes through
        // our serializer verbatim.
        let argv = self.argv_lossy();
        if self.is_shell_script() {
            let mut cmd = Command::new(SHELL);
            cmd.raw_arg(argv_to_string(&argv, None, false));
            cmd
        } else {
            let mut cmd = Command::new(add_exe_suffix(&self.program));
            if argv.len() > 1 {
                cmd.raw_arg(argv_to_string(&argv[1..], None, false));
            }
            cmd
        }
    }

    /// Run the compiler with inherited stdio and wait for it.
    pub fn run(&self) -> Result<ExitStatus, ExecError> {
        debug!(command_line = %self.command_line(), "executing compiler");
        self.to_command().status().map_err(|e| ExecError::Spawn {
            program: self.program.clone(),
            source: e,
        })
    }
}
