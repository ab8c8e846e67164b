//! Process exit codes for the spawnline binary
//!
//! When the launched command itself fails under `--check`, its own exit
//! status is passed through. The constants below cover failures that happen
//! before or around the launch.

use spawnline_runner::RunnerError;

/// Exit code returned by the `spawnline` binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Success - command ran (and passed `--check`, if requested)
    pub const SUCCESS: ExitCode = ExitCode(0);

    /// Internal error - general failure
    pub const INTERNAL: ExitCode = ExitCode(1);

    /// CLI arguments error - invalid parameters JSON or parameter shapes
    pub const CLI_ARGS: ExitCode = ExitCode(2);

    /// Configuration error - unreadable or invalid launcher config
    pub const CONFIG: ExitCode = ExitCode(3);

    /// Launch timeout - the command exceeded the configured timeout
    pub const TIMEOUT: ExitCode = ExitCode(124);

    /// Launch failed - the executable exists but could not be started
    pub const LAUNCH_FAILED: ExitCode = ExitCode(126);

    /// Not found - the executable does not exist
    pub const NOT_FOUND: ExitCode = ExitCode(127);

    /// Get the numeric exit code value.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }

    /// Create an exit code from a raw value.
    #[must_use]
    pub const fn from_i32(code: i32) -> Self {
        ExitCode(code)
    }
}

impl From<&RunnerError> for ExitCode {
    fn from(err: &RunnerError) -> Self {
        match err {
            RunnerError::NoSuchFile { .. } => Self::NOT_FOUND,
            RunnerError::LaunchFailed { .. } => Self::LAUNCH_FAILED,
            RunnerError::Timeout { .. } => Self::TIMEOUT,
            RunnerError::InvalidParameter { .. } => Self::CLI_ARGS,
            RunnerError::ConfigurationInvalid { .. } => Self::CONFIG,
            RunnerError::CommandFailed(failed) => {
                // A failed command never maps to success.
                match failed.result().exit_status() {
                    0 => Self::INTERNAL,
                    code => Self::from_i32(code),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spawnline_runner::{CommandResult, CommandResultError};
    use std::io;
    use std::time::Duration;

    #[test]
    fn test_launch_failures_map_to_shell_conventions() {
        let not_found = RunnerError::NoSuchFile {
            program: "XXXXX".to_string(),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert_eq!(ExitCode::from(&not_found), ExitCode::NOT_FOUND);

        let timeout = RunnerError::Timeout {
            timeout: Duration::from_secs(1),
        };
        assert_eq!(ExitCode::from(&timeout).as_i32(), 124);
    }

    #[test]
    fn test_command_failed_passes_status_through() {
        let result = CommandResult::new("false".to_string(), 5, String::new(), String::new());
        let err = RunnerError::from(CommandResultError::new(result));
        assert_eq!(ExitCode::from(&err).as_i32(), 5);
    }

    #[test]
    fn test_invalid_parameter_is_cli_args() {
        let err = RunnerError::InvalidParameter {
            reason: "flag is empty".to_string(),
        };
        assert_eq!(ExitCode::from(&err), ExitCode::CLI_ARGS);
    }
}
