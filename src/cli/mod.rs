//! CLI module for spawnline
//!
//! - `args`: clap argument definitions
//! - `run`: parse, configure, launch and report

pub mod args;
mod run;

pub use args::{Cli, build_cli};
pub use run::{execute, run};
