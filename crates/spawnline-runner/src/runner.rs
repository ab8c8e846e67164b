//! Build, launch and wrap: the two public entry points
//!
//! [`Runner::run`] returns a [`CommandResult`] for any exit status.
//! [`Runner::run_checked`] additionally turns a nonzero exit into
//! [`RunnerError::CommandFailed`]. Both share [`Runner::execute`], and both
//! propagate launch failures unchanged.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::command_line::build_command_line;
use crate::error::RunnerError;
use crate::native::NativeLauncher;
use crate::params::Params;
use crate::process::{Launcher, SpawnOptions};
use crate::result::{CommandResult, CommandResultError};

/// Per-call options: the reserved `params` entry plus everything that is
/// forwarded to the launcher.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOptions {
    pub params: Option<Params>,
    pub spawn: SpawnOptions,
}

impl RunOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn params(mut self, params: Params) -> Self {
        self.params = Some(params);
        self
    }

    #[must_use]
    pub fn spawn(mut self, spawn: SpawnOptions) -> Self {
        self.spawn = spawn;
        self
    }

    #[must_use]
    pub fn chdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.spawn.chdir = Some(dir.into());
        self
    }
}

impl From<Params> for RunOptions {
    fn from(params: Params) -> Self {
        Self::new().params(params)
    }
}

/// Runs commands through a [`Launcher`].
///
/// Holds no per-call state, so one runner can serve many threads when its
/// launcher is `Sync`.
#[derive(Debug, Clone, Default)]
pub struct Runner<L = NativeLauncher> {
    launcher: L,
}

impl<L: Launcher> Runner<L> {
    #[must_use]
    pub const fn new(launcher: L) -> Self {
        Self { launcher }
    }

    #[must_use]
    pub const fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Build the command line, launch it once, and wrap the raw output.
    pub fn execute(
        &self,
        command: impl AsRef<Path>,
        options: &RunOptions,
    ) -> Result<CommandResult, RunnerError> {
        let command_line = build_command_line(command, options.params.as_ref())?;
        debug!(command = %command_line, "Built command line");

        let raw = self.launcher.launch(&command_line, &options.spawn)?;
        let output = raw.stdout_string();
        let error = raw.stderr_string();
        Ok(CommandResult::new(
            command_line,
            raw.exit_status,
            output,
            error,
        ))
    }

    /// Run `command`; a nonzero exit status is reported in the result, not
    /// as an error.
    pub fn run(
        &self,
        command: impl AsRef<Path>,
        options: &RunOptions,
    ) -> Result<CommandResult, RunnerError> {
        self.execute(command, options)
    }

    /// Run `command`; a nonzero exit status becomes
    /// [`RunnerError::CommandFailed`] carrying the full result.
    pub fn run_checked(
        &self,
        command: impl AsRef<Path>,
        options: &RunOptions,
    ) -> Result<CommandResult, RunnerError> {
        let result = self.execute(command, options)?;
        if result.failure() {
            debug!(
                command = %result.command(),
                exit_status = result.exit_status(),
                "Command exited nonzero"
            );
            return Err(CommandResultError::new(result).into());
        }
        Ok(result)
    }
}

/// [`Runner::run`] with the default [`NativeLauncher`].
pub fn run(command: impl AsRef<Path>, options: &RunOptions) -> Result<CommandResult, RunnerError> {
    Runner::<NativeLauncher>::default().run(command, options)
}

/// [`Runner::run_checked`] with the default [`NativeLauncher`].
pub fn run_checked(
    command: impl AsRef<Path>,
    options: &RunOptions,
) -> Result<CommandResult, RunnerError> {
    Runner::<NativeLauncher>::default().run_checked(command, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingLauncher;

    #[test]
    fn test_run_returns_nonzero_result() {
        let runner = Runner::new(RecordingLauncher::with_exit_status(3));
        let result = runner.run("false", &RunOptions::default()).unwrap();
        assert_eq!(result.exit_status(), 3);
        assert_eq!(result.command(), "false");
    }

    #[test]
    fn test_run_checked_wraps_nonzero_result() {
        let launcher = RecordingLauncher::with_exit_status(1).stdout("partial\n");
        let runner = Runner::new(launcher);
        let err = runner.run_checked("false", &RunOptions::default()).unwrap_err();
        let result = err.result().expect("CommandFailed should carry the result");
        assert_eq!(result.exit_status(), 1);
        assert_eq!(result.output(), "partial\n");
    }

    #[test]
    fn test_run_checked_passes_success_through() {
        let runner = Runner::new(RecordingLauncher::default().stderr("warning\n"));
        let result = runner.run_checked("true", &RunOptions::default()).unwrap();
        assert!(result.success());
        assert_eq!(result.error(), "warning\n");
    }

    #[test]
    fn test_launcher_receives_built_line_and_spawn_options() {
        let runner = Runner::new(RecordingLauncher::default());
        let options = RunOptions::new()
            .params(Params::new().flag("-v"))
            .chdir("..");
        runner.run("/usr/bin/ruby", &options).unwrap();

        let calls = runner.launcher().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "/usr/bin/ruby -v");
        assert_eq!(calls[0].1, SpawnOptions::new().chdir(".."));
    }

    #[test]
    fn test_invalid_params_never_launch() {
        let runner = Runner::new(RecordingLauncher::default());
        let options = RunOptions::from(Params::new().flag(""));
        let err = runner.run("true", &options).unwrap_err();
        assert!(matches!(err, RunnerError::InvalidParameter { .. }));
        assert!(runner.launcher().calls().is_empty());
    }

    #[test]
    fn test_launch_failure_is_not_wrapped() {
        let runner = Runner::new(RecordingLauncher::not_found());
        for checked in [false, true] {
            let result = if checked {
                runner.run_checked("XXXXX --user=bob", &RunOptions::default())
            } else {
                runner.run("XXXXX --user=bob", &RunOptions::default())
            };
            let err = result.unwrap_err();
            assert!(matches!(err, RunnerError::NoSuchFile { .. }));
            assert!(err.result().is_none());
        }
    }

    #[test]
    fn test_run_does_not_modify_caller_options() {
        let runner = Runner::new(RecordingLauncher::default());
        let options = RunOptions::from(
            Params::new()
                .with("--user", "bob")
                .positional(["pkg1", "some pkg"]),
        );
        let original = options.clone();
        runner.run("true", &options).unwrap();
        runner.run_checked("true", &options).unwrap();
        assert_eq!(options, original);
    }
}
