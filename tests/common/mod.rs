//! Shared test utilities.

#![allow(dead_code)]

use std::path::Path;
use std::process::Command;

/// Build an owned argument vector.
pub fn argv(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| a.to_string()).collect()
}

/// Search stub in the style of a PATH lookup that always succeeds:
/// `name` → `resolved_<name>`.
pub fn resolved(name: &str) -> Option<String> {
    Some(format!("resolved_{}", name))
}

/// Write a shell script into `dir` and make it executable.
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("Failed to write script");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("Failed to make script executable");
    path
}

/// The wrapper binary with configuration isolated from the user's machine.
pub fn ccache_cmd(config_dir: &Path) -> Command {
    isolated(Command::new(env!("CARGO_BIN_EXE_ccache")), config_dir)
}

/// Clear inherited `CCACHE_*` variables and point the config file into
/// `config_dir`.
pub fn isolated(mut cmd: Command, config_dir: &Path) -> Command {
    for var in ["CCACHE_COMPILER", "CCACHE_COMPILERTYPE", "CCACHE_PATH", "CCACHE_LOGFILE"] {
        cmd.env_remove(var);
    }
    cmd.env("CCACHE_CONFIGPATH", config_dir.join("ccache.toml"));
    cmd
}
