//! Test doubles for the launch boundary
//!
//! Available to unit tests and, through the `test-utils` feature, to
//! integration tests of dependent crates.

use std::io;
use std::sync::{Mutex, PoisonError};

use crate::error::RunnerError;
use crate::process::{LaunchOutput, Launcher, SpawnOptions};

/// Launcher that records every call and returns a canned outcome.
#[derive(Debug, Default)]
pub struct RecordingLauncher {
    exit_status: i32,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
    not_found: bool,
    calls: Mutex<Vec<(String, SpawnOptions)>>,
}

impl RecordingLauncher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_exit_status(exit_status: i32) -> Self {
        Self {
            exit_status,
            ..Self::default()
        }
    }

    /// Every launch fails as if the executable did not exist.
    #[must_use]
    pub fn not_found() -> Self {
        Self {
            not_found: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn stdout(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.stdout = data.into();
        self
    }

    #[must_use]
    pub fn stderr(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.stderr = data.into();
        self
    }

    /// Command lines and spawn options received so far, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<(String, SpawnOptions)> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent command line.
    #[must_use]
    pub fn last_command_line(&self) -> Option<String> {
        self.calls().pop().map(|(line, _)| line)
    }
}

impl Launcher for RecordingLauncher {
    fn launch(
        &self,
        command_line: &str,
        options: &SpawnOptions,
    ) -> Result<LaunchOutput, RunnerError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((command_line.to_string(), options.clone()));

        if self.not_found {
            let program = command_line.split(' ').next().unwrap_or(command_line);
            return Err(RunnerError::launch(
                program,
                io::Error::from(io::ErrorKind::NotFound),
            ));
        }

        Ok(LaunchOutput::new(
            self.exit_status,
            self.stdout.clone(),
            self.stderr.clone(),
        ))
    }
}
