//! Escaped command-line construction and process execution
//!
//! Turns a command plus an ordered parameter set into one shell-safe command
//! line, launches it, and returns the exit status and captured streams as a
//! [`CommandResult`].
//!
//! ```rust,no_run
//! use spawnline_runner::{run, Params, RunOptions};
//!
//! let params = Params::new()
//!     .with("--user", "bob")
//!     .with("--desc=", "Some Description")
//!     .positional(["pkg1", "some pkg"]);
//! let result = run("true", &RunOptions::from(params)).unwrap();
//! assert_eq!(result.command(), "true --user bob --desc=Some\\ Description pkg1 some\\ pkg");
//! assert_eq!(result.exit_status(), 0);
//! ```
//!
//! # Escaping Model
//!
//! Parameter values are backslash-escaped character by character (see
//! [`escape`](crate::escape::escape)); the command itself is trusted and
//! passed through verbatim. Escaping follows POSIX shell rules only.

pub mod command_line;
pub mod config;
pub mod error;
pub mod escape;
pub mod native;
pub mod params;
pub mod process;
pub mod result;
pub mod runner;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_support;

pub use command_line::build_command_line;
pub use config::LaunchConfig;
pub use error::RunnerError;
pub use escape::escape;
pub use native::NativeLauncher;
pub use params::{ParamKey, ParamValue, Params, Scalar};
pub use process::{LaunchOutput, Launcher, SpawnOptions};
pub use result::{CommandResult, CommandResultError};
pub use runner::{RunOptions, Runner, run, run_checked};
