//! Launcher configuration
//!
//! Precedence: config file > environment variables > built-in defaults.
//! The file is TOML with a single `[launcher]` table:
//!
//! ```toml
//! [launcher]
//! shell = "/bin/bash"
//! timeout_secs = 30
//! clear_env = false
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::RunnerError;

/// Shell used for command lines that contain shell metacharacters.
pub const DEFAULT_SHELL: &str = if cfg!(windows) { "cmd" } else { "/bin/sh" };

/// Environment variable overriding [`LaunchConfig::shell`].
pub const SHELL_ENV: &str = "SPAWNLINE_SHELL";

/// Environment variable overriding [`LaunchConfig::timeout_secs`].
pub const TIMEOUT_ENV: &str = "SPAWNLINE_TIMEOUT_SECS";

/// Settings for the native launcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchConfig {
    pub shell: String,
    /// Kill the child after this many seconds. `None` waits forever.
    pub timeout_secs: Option<u64>,
    /// Never let children inherit the parent's environment.
    pub clear_env: bool,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            shell: DEFAULT_SHELL.to_string(),
            timeout_secs: None,
            clear_env: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    launcher: LauncherSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LauncherSection {
    shell: Option<String>,
    timeout_secs: Option<u64>,
    clear_env: Option<bool>,
}

impl LaunchConfig {
    /// Defaults, then environment, then `path` if given.
    pub fn discover(path: Option<&Path>) -> Result<Self, RunnerError> {
        let mut config = Self::default().with_env_overrides(|key| std::env::var(key).ok())?;
        if let Some(path) = path {
            let contents = fs::read_to_string(path).map_err(|e| {
                RunnerError::ConfigurationInvalid {
                    reason: format!("cannot read {}: {e}", path.display()),
                }
            })?;
            config = config.merge_toml(&contents)?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document on top of the defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, RunnerError> {
        let config = Self::default().merge_toml(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn merge_toml(mut self, contents: &str) -> Result<Self, RunnerError> {
        let file: ConfigFile =
            toml::from_str(contents).map_err(|e| RunnerError::ConfigurationInvalid {
                reason: e.to_string(),
            })?;
        let section = file.launcher;
        if let Some(shell) = section.shell {
            self.shell = shell;
        }
        if section.timeout_secs.is_some() {
            self.timeout_secs = section.timeout_secs;
        }
        if let Some(clear_env) = section.clear_env {
            self.clear_env = clear_env;
        }
        Ok(self)
    }

    /// Apply `SPAWNLINE_*` overrides read through `lookup`.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, RunnerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(shell) = lookup(SHELL_ENV) {
            self.shell = shell;
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|e| RunnerError::ConfigurationInvalid {
                    reason: format!("{TIMEOUT_ENV}={raw:?}: {e}"),
                })?;
            self.timeout_secs = Some(secs);
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), RunnerError> {
        if self.shell.trim().is_empty() {
            return Err(RunnerError::ConfigurationInvalid {
                reason: "shell must not be empty".to_string(),
            });
        }
        if self.timeout_secs == Some(0) {
            return Err(RunnerError::ConfigurationInvalid {
                reason: "timeout_secs must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
