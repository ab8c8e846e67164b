//! CLI argument definitions and parsing structures
//!
//! This module defines the command-line interface using clap.

use clap::Parser;
use std::path::PathBuf;

/// spawnline - run a command with safely escaped parameters
#[derive(Parser, Debug)]
#[command(name = "spawnline")]
#[command(about = "Run a command with safely escaped parameters and captured output")]
#[command(long_about = r#"
spawnline builds one escaped command line from a command and a parameter set,
runs it, and reports the exit status with captured stdout and stderr.

EXAMPLES:
  # Show the command line that would run
  spawnline --dry-run --params '[["--user","bob"],["--db",null],[null,["pkg1","some pkg"]]]' mytool

  # Object form keeps entry order
  spawnline --params '{"--desc=":"Some Description","-v":null}' mytool

  # Fail with the command's exit status when it exits nonzero
  spawnline --check -- "echo 'bad' && false"

  # Print the result as JSON (command, exit_status, output, error)
  spawnline --json -- "echo \"Hello World\""

CONFIGURATION:
  Launcher settings come from --config <FILE> ([launcher] table), then
  SPAWNLINE_SHELL / SPAWNLINE_TIMEOUT_SECS, then defaults.
"#)]
#[command(version)]
pub struct Cli {
    /// Command to run; used verbatim, never escaped
    pub command: String,

    /// Parameters as JSON: a list of [key, value] pairs or an object
    #[arg(long, value_name = "JSON")]
    pub params: Option<String>,

    /// Working directory for the command
    #[arg(long, value_name = "DIR")]
    pub chdir: Option<PathBuf>,

    /// Extra environment variable for the command (repeatable)
    #[arg(long = "env", value_name = "KEY=VALUE", value_parser = parse_env_pair)]
    pub env: Vec<(String, String)>,

    /// Data written to the command's stdin
    #[arg(long, value_name = "TEXT")]
    pub input: Option<String>,

    /// Treat a nonzero exit status as a failure
    #[arg(long)]
    pub check: bool,

    /// Print the built command line without running it
    #[arg(long)]
    pub dry_run: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Path to launcher configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Kill the command after this many seconds (overrides config)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit log events as JSON
    #[arg(long)]
    pub log_json: bool,
}

fn parse_env_pair(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got {raw:?}")),
    }
}

/// Build the clap command, for completions and tests.
#[must_use]
pub fn build_cli() -> clap::Command {
    <Cli as clap::CommandFactory>::command()
}
