//! CLI entry point and dispatch logic
//!
//! This module owns the `run()` function which:
//! - Parses CLI arguments
//! - Initializes logging
//! - Loads launcher configuration and parameters
//! - Runs (or dry-runs) the command and prints the outcome
//! - Handles all error output

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use tracing::{debug, info};

use spawnline_runner::{
    CommandResult, LaunchConfig, NativeLauncher, Params, RunOptions, Runner, RunnerError,
    SpawnOptions, build_command_line,
};

use super::args::Cli;
use crate::exit_codes::ExitCode;
use crate::logging::{LogFormat, init_tracing};

/// Main CLI execution function.
///
/// Handles ALL output including errors and returns the exit code to use on
/// failure. main.rs only maps `Err` to `std::process::exit`.
pub fn run() -> Result<(), ExitCode> {
    let cli = Cli::parse();

    let format = if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    if let Err(err) = init_tracing(cli.verbose, format) {
        eprintln!("warning: logging disabled: {err}");
    }

    let stdout = std::io::stdout();
    execute(&cli, &mut stdout.lock())
}

/// Run the parsed invocation, writing results to `out`.
pub fn execute<W: Write>(cli: &Cli, out: &mut W) -> Result<(), ExitCode> {
    let config = match load_config(cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err:#}");
            return Err(ExitCode::CONFIG);
        }
    };

    let options = match build_options(cli) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("error: {err:#}");
            return Err(ExitCode::CLI_ARGS);
        }
    };

    if cli.dry_run {
        return match build_command_line(&cli.command, options.params.as_ref()) {
            Ok(line) => {
                debug!(command = %line, "Dry run, not launching");
                write_line(out, &line)
            }
            Err(err) => fail(&err),
        };
    }

    info!(
        command = %cli.command,
        check = cli.check,
        "Running command"
    );
    let runner = Runner::new(NativeLauncher::from_config(&config));
    let outcome = if cli.check {
        runner.run_checked(&cli.command, &options)
    } else {
        runner.run(&cli.command, &options)
    };

    match outcome {
        Ok(result) => report(cli, out, &result),
        Err(err) => {
            if let Some(result) = err.result() {
                report(cli, out, result)?;
            }
            fail(&err)
        }
    }
}

fn load_config(cli: &Cli) -> Result<LaunchConfig> {
    let mut config = LaunchConfig::discover(cli.config.as_deref())
        .context("failed to load launcher configuration")?;
    if let Some(secs) = cli.timeout {
        config.timeout_secs = Some(secs);
        config.validate().context("invalid --timeout")?;
    }
    debug!(
        config_path = ?cli.config,
        shell = %config.shell,
        timeout_secs = ?config.timeout_secs,
        clear_env = config.clear_env,
        "Loaded launcher configuration"
    );
    Ok(config)
}

fn build_options(cli: &Cli) -> Result<RunOptions> {
    let params = cli
        .params
        .as_deref()
        .map(serde_json::from_str::<Params>)
        .transpose()
        .context("invalid --params JSON")?;

    debug!(
        params = params.as_ref().map_or(0, Params::len),
        "Parsed parameters"
    );

    let mut spawn = SpawnOptions::new();
    spawn.chdir.clone_from(&cli.chdir);
    spawn.env.extend(cli.env.iter().cloned());
    spawn.input = cli.input.as_ref().map(|text| text.as_bytes().to_vec());

    Ok(RunOptions { params, spawn })
}

fn report<W: Write>(cli: &Cli, out: &mut W, result: &CommandResult) -> Result<(), ExitCode> {
    if cli.json {
        let rendered = serde_json::to_string_pretty(result).map_err(|err| {
            eprintln!("error: failed to serialize result: {err}");
            ExitCode::INTERNAL
        })?;
        return write_line(out, &rendered);
    }

    out.write_all(result.output().as_bytes())
        .and_then(|()| out.flush())
        .map_err(|err| {
            eprintln!("error: failed to write output: {err}");
            ExitCode::INTERNAL
        })?;
    eprint!("{}", result.error());
    Ok(())
}

fn write_line<W: Write>(out: &mut W, line: &str) -> Result<(), ExitCode> {
    writeln!(out, "{line}").map_err(|err| {
        eprintln!("error: failed to write output: {err}");
        ExitCode::INTERNAL
    })
}

fn fail(err: &RunnerError) -> Result<(), ExitCode> {
    eprintln!("error: {err}");
    Err(ExitCode::from(err))
}
