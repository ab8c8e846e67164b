//! Error types for command-line building and process execution

use std::io;
use std::time::Duration;

use thiserror::Error;

use crate::result::{CommandResult, CommandResultError};

/// Errors produced while building, launching or checking a command.
///
/// Launch failures (`NoSuchFile`, `LaunchFailed`, `Timeout`) mean no
/// [`CommandResult`] exists. A nonzero exit is only an error when the caller
/// asked for it through `run_checked`, in which case the result travels
/// inside [`RunnerError::CommandFailed`].
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("No such file or directory - {program}")]
    NoSuchFile {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to launch '{program}': {source}")]
    LaunchFailed {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Execution timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("Invalid parameter: {reason}")]
    InvalidParameter { reason: String },

    #[error(transparent)]
    CommandFailed(#[from] CommandResultError),

    #[error("Launcher configuration invalid: {reason}")]
    ConfigurationInvalid { reason: String },
}

impl RunnerError {
    /// Classify a spawn failure for `program`.
    pub(crate) fn launch(program: &str, source: io::Error) -> Self {
        let program = program.to_string();
        if source.kind() == io::ErrorKind::NotFound {
            Self::NoSuchFile { program, source }
        } else {
            Self::LaunchFailed { program, source }
        }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            reason: reason.into(),
        }
    }

    /// OS error kind for launch failures.
    #[must_use]
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::NoSuchFile { source, .. } | Self::LaunchFailed { source, .. } => {
                Some(source.kind())
            }
            _ => None,
        }
    }

    /// The captured result of a command that exited nonzero under `run_checked`.
    #[must_use]
    pub fn result(&self) -> Option<&CommandResult> {
        match self {
            Self::CommandFailed(err) => Some(err.result()),
            _ => None,
        }
    }

    /// True when the process never started.
    #[must_use]
    pub const fn is_launch_failure(&self) -> bool {
        matches!(
            self,
            Self::NoSuchFile { .. } | Self::LaunchFailed { .. } | Self::Timeout { .. }
        )
    }
}
