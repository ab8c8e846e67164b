//! Immutable record of one command execution

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Outcome of a single command execution.
///
/// Holds the escaped command line that was actually launched, its exit
/// status, and both captured streams. Fields are private; a `CommandResult`
/// never changes after the runner builds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResult {
    command: String,
    exit_status: i32,
    output: String,
    error: String,
}

impl CommandResult {
    #[must_use]
    pub const fn new(command: String, exit_status: i32, output: String, error: String) -> Self {
        Self {
            command,
            exit_status,
            output,
            error,
        }
    }

    /// The fully escaped command line that was launched.
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    #[must_use]
    pub const fn exit_status(&self) -> i32 {
        self.exit_status
    }

    /// Captured standard output.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Captured standard error.
    #[must_use]
    pub fn error(&self) -> &str {
        &self.error
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_status == 0
    }

    #[must_use]
    pub const fn failure(&self) -> bool {
        !self.success()
    }
}

// Output streams are left out; they can be arbitrarily large.
impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "command=`{}` exit_status={}",
            self.command, self.exit_status
        )
    }
}

/// A command exited nonzero under the checked entry point.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} exit code: {}", .result.command, .result.exit_status)]
pub struct CommandResultError {
    result: CommandResult,
}

impl CommandResultError {
    #[must_use]
    pub const fn new(result: CommandResult) -> Self {
        Self { result }
    }

    #[must_use]
    pub const fn result(&self) -> &CommandResult {
        &self.result
    }

    #[must_use]
    pub fn into_result(self) -> CommandResult {
        self.result
    }
}
