use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;
use crate::is_ccache_executable;

/// Environment variable naming an alternative config file.
pub const CONFIG_PATH_ENV: &str = "CCACHE_CONFIGPATH";

/// Environment variables and the settings they override.
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("CCACHE_COMPILER", "compiler"),
    ("CCACHE_COMPILERTYPE", "compiler_type"),
    ("CCACHE_PATH", "path"),
    ("CCACHE_LOGFILE", "log_file"),
];

/// Errors that can occur when loading or updating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Unknown configuration key '{key}'")]
    UnknownKey { key: String },

    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// `CCACHE_CONFIGPATH` wins when set. Otherwise uses
    /// `~/.config/ccache/ccache.toml` on Unix, or the equivalent via
    /// `dirs::config_dir()`, falling back to the current directory.
    pub fn config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
            return PathBuf::from(path);
        }
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("ccache").join("ccache.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Applies `CCACHE_*` overrides from the process environment.
    pub fn apply_process_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env(|name| std::env::var(name).ok())
    }

    /// Applies `CCACHE_*` overrides using `lookup` to read variables.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        for (var, key) in ENV_OVERRIDES {
            if let Some(value) = lookup(var) {
                self.set(key, &value)?;
            }
        }
        self.validate()
    }

    /// Applies a `key=value` setting given on the command line.
    ///
    /// Key and value are trimmed, so `compiler = clang` works too.
    pub fn apply_setting(&mut self, setting: &str) -> Result<(), ConfigError> {
        let (key, value) = setting
            .split_once('=')
            .ok_or_else(|| ConfigError::InvalidValue {
                key: setting.to_string(),
                message: "expected key=value".to_string(),
            })?;
        self.set(key.trim(), value.trim())?;
        self.validate()
    }

    /// Sets a single key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "compiler" => self.compiler = value.to_string(),
            "compiler_type" => {
                self.compiler_type = value.parse().map_err(|message| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message,
                })?
            }
            "path" => self.path = value.to_string(),
            "log_file" => self.log_file = value.to_string(),
            _ => {
                return Err(ConfigError::UnknownKey {
                    key: key.to_string(),
                })
            }
        }
        Ok(())
    }

    /// The configured compiler, if one is set.
    pub fn compiler_override(&self) -> Option<&str> {
        Some(self.compiler.as_str()).filter(|c| !c.is_empty())
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The configured compiler is not the wrapper itself
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.compiler_override().is_some_and(is_ccache_executable) {
            return Err(ConfigError::ValidationError {
                message: format!("compiler '{}' refers to the wrapper itself", self.compiler),
            });
        }
        Ok(())
    }
}
