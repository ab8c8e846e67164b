//! spawnline - Run external commands from typed parameters
//!
//! spawnline turns a command plus an ordered set of flags and positional
//! values into one correctly escaped command line, runs it, and hands back
//! the exit status together with captured stdout and stderr.
//!
//! spawnline can be used in two ways:
//! - **Library**: call [`run`] / [`run_checked`] from your application
//! - **CLI**: `spawnline --params '<json>' <command>` for scripting and debugging
//!
//! # Quick Start (Library)
//!
//! ```rust,no_run
//! use spawnline::{Params, RunOptions, RunnerError, run, run_checked};
//!
//! let params = Params::new()
//!     .with("--user", "bob")
//!     .flag("--db")
//!     .positional(["pkg1", "some pkg"]);
//!
//! // Never fails on a nonzero exit status.
//! let result = run("true", &RunOptions::from(params)).unwrap();
//! assert_eq!(result.exit_status(), 0);
//!
//! // Fails with the full result attached.
//! match run_checked("false", &RunOptions::default()) {
//!     Err(RunnerError::CommandFailed(err)) => assert_eq!(err.result().exit_status(), 1),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```
//!
//! # Quick Start (CLI)
//!
//! ```bash
//! spawnline --params '[["--user","bob"],[null,["pkg1","some pkg"]]]' --dry-run echo
//! spawnline --check --json -- "echo 'bad' && false"
//! ```
//!
//! # Stable Public API
//!
//! - [`run`], [`run_checked`], [`Runner`] - entry points
//! - [`Params`], [`ParamKey`], [`ParamValue`], [`Scalar`] - parameter model
//! - [`CommandResult`], [`CommandResultError`], [`RunnerError`] - outcomes
//! - [`Launcher`], [`SpawnOptions`], [`LaunchOutput`] - launch boundary
//! - [`build_command_line`], [`escape`] - command-line construction

pub use spawnline_runner::{
    CommandResult, CommandResultError, LaunchConfig, LaunchOutput, Launcher, NativeLauncher,
    ParamKey, ParamValue, Params, RunOptions, Runner, RunnerError, Scalar, SpawnOptions,
    build_command_line, escape, run, run_checked,
};

#[doc(hidden)]
pub use spawnline_runner as runner;

#[doc(hidden)]
#[cfg(feature = "test-utils")]
pub use spawnline_runner::test_support;

pub mod cli;
pub mod exit_codes;
pub mod logging;

pub use exit_codes::ExitCode;
