use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::RunnerError;

// ============================================================================
// SpawnOptions - Launcher pass-through configuration
// ============================================================================

/// Options forwarded untouched to the [`Launcher`].
///
/// The runner never inspects these; they only matter to the launcher that
/// performs the spawn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpawnOptions {
    /// Working directory for the child.
    pub chdir: Option<PathBuf>,
    /// Environment overrides, applied on top of the inherited environment.
    pub env: BTreeMap<String, String>,
    /// Start the child with an empty environment before applying `env`.
    pub clear_env: bool,
    /// Bytes written to the child's stdin. `None` connects stdin to null.
    pub input: Option<Vec<u8>>,
}

impl SpawnOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn chdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.chdir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub const fn clear_env(mut self) -> Self {
        self.clear_env = true;
        self
    }

    #[must_use]
    pub fn input(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.input = Some(data.into());
        self
    }
}

// ============================================================================
// Launcher Trait - Process Spawn Boundary
// ============================================================================

/// Raw output of one launched process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchOutput {
    pub exit_status: i32,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl LaunchOutput {
    #[must_use]
    pub const fn new(exit_status: i32, stdout: Vec<u8>, stderr: Vec<u8>) -> Self {
        Self {
            exit_status,
            stdout,
            stderr,
        }
    }

    /// Get stdout as a UTF-8 string, lossy conversion.
    #[must_use]
    pub fn stdout_string(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    /// Get stderr as a UTF-8 string, lossy conversion.
    #[must_use]
    pub fn stderr_string(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// Executes a fully built command line.
///
/// The runner calls `launch` exactly once per invocation. Implementations
/// block until the process exits and both streams are drained.
///
/// # Returns
///
/// * `Ok(LaunchOutput)` - The process ran, whatever its exit status
/// * `Err(RunnerError::NoSuchFile)` - The executable does not exist
/// * `Err(RunnerError::LaunchFailed)` - Any other spawn or wait failure
/// * `Err(RunnerError::Timeout)` - The launcher enforced a deadline
///
/// # Example
///
/// ```rust
/// use spawnline_runner::{LaunchOutput, Launcher, RunnerError, SpawnOptions};
///
/// struct Canned;
///
/// impl Launcher for Canned {
///     fn launch(&self, _line: &str, _options: &SpawnOptions) -> Result<LaunchOutput, RunnerError> {
///         Ok(LaunchOutput::new(0, b"ok\n".to_vec(), Vec::new()))
///     }
/// }
///
/// let out = Canned.launch("true", &SpawnOptions::default()).unwrap();
/// assert_eq!(out.stdout_string(), "ok\n");
/// ```
pub trait Launcher {
    fn launch(
        &self,
        command_line: &str,
        options: &SpawnOptions,
    ) -> Result<LaunchOutput, RunnerError>;
}

impl<L: Launcher + ?Sized> Launcher for &L {
    fn launch(
        &self,
        command_line: &str,
        options: &SpawnOptions,
    ) -> Result<LaunchOutput, RunnerError> {
        (**self).launch(command_line, options)
    }
}
