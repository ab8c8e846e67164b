//! Real process execution through the default native launcher
//!
//! These tests spawn `/bin/sh` and coreutils, so they only run on Unix.

#![cfg(unix)]

use spawnline::{
    LaunchConfig, NativeLauncher, Params, RunOptions, Runner, RunnerError, SpawnOptions, run,
    run_checked,
};
use std::time::Duration;

#[test]
fn test_true_succeeds() {
    let result = run("true", &RunOptions::default()).unwrap();
    assert_eq!(result.exit_status(), 0);
    assert!(result.success());
    assert_eq!(result.output(), "");
    assert_eq!(result.error(), "");
}

#[test]
fn test_false_is_reported_by_run() {
    let result = run("false", &RunOptions::default()).unwrap();
    assert_eq!(result.exit_status(), 1);
    assert!(result.failure());
}

#[test]
fn test_false_fails_run_checked() {
    let err = run_checked("false", &RunOptions::default()).unwrap_err();
    let result = err.result().expect("nonzero exit carries its result");
    assert_eq!(result.exit_status(), 1);
    assert_eq!(err.to_string(), "false exit code: 1");
}

#[test]
fn test_missing_program_is_no_such_file() {
    let options = RunOptions::default();
    for err in [
        run("XXXXX --user=bob", &options).unwrap_err(),
        run_checked("XXXXX --user=bob", &options).unwrap_err(),
    ] {
        assert!(matches!(err, RunnerError::NoSuchFile { .. }), "{err:?}");
        assert_eq!(err.to_string(), "No such file or directory - XXXXX");
    }
}

#[test]
fn test_stdout_is_captured() {
    let result = run("echo \"Hello World\"", &RunOptions::default()).unwrap();
    assert_eq!(result.output(), "Hello World\n");
    assert_eq!(result.error(), "");
}

#[test]
fn test_stderr_is_captured() {
    let result = run("echo \"Hello World\" >&2", &RunOptions::default()).unwrap();
    assert_eq!(result.output(), "");
    assert_eq!(result.error(), "Hello World\n");
}

#[test]
fn test_failure_keeps_both_streams() {
    let result = run("echo 'bad' && echo 'worse' >&2 && false", &RunOptions::default()).unwrap();
    assert_eq!(result.exit_status(), 1);
    assert_eq!(result.output(), "bad\n");
    assert_eq!(result.error(), "worse\n");

    let err = run_checked("echo 'bad' && false", &RunOptions::default()).unwrap_err();
    assert_eq!(err.result().map(|r| r.output()), Some("bad\n"));
}

#[test]
fn test_escaped_params_reach_the_program_intact() {
    let params = Params::new()
        .with("--pass", "P@$sw0^& |<>/-+*d%")
        .positional(["some pkg", "", "line\nbreak"]);
    let result = run("printf '%s|'", &RunOptions::from(params)).unwrap();
    assert_eq!(result.output(), "--pass|P@$sw0^& |<>/-+*d%|some pkg||line\nbreak|");
}

#[test]
fn test_chdir_is_applied() {
    let dir = tempfile::tempdir().unwrap();
    let expected = dir.path().canonicalize().unwrap();

    let result = run("pwd -P", &RunOptions::new().chdir(dir.path())).unwrap();
    assert_eq!(result.output().trim_end(), expected.to_str().unwrap());
}

#[test]
fn test_env_and_input_are_forwarded() {
    let spawn = SpawnOptions::new()
        .env("SPAWNLINE_TEST_VALUE", "from env")
        .input("from stdin");
    let options = RunOptions::new().spawn(spawn);

    let result = run("echo \"$SPAWNLINE_TEST_VALUE\"; cat", &options).unwrap();
    assert_eq!(result.output(), "from env\nfrom stdin");
}

#[test]
fn test_timeout_kills_the_command() {
    let launcher = NativeLauncher::new().with_timeout(Duration::from_secs(1));
    let runner = Runner::new(launcher);

    let err = runner.run("sleep 30", &RunOptions::default()).unwrap_err();
    assert!(
        matches!(err, RunnerError::Timeout { timeout } if timeout == Duration::from_secs(1)),
        "{err:?}"
    );
    assert_eq!(err.to_string(), "Execution timed out after 1s");
}

#[test]
fn test_configured_shell_is_used() {
    let config = LaunchConfig::from_toml_str("[launcher]\nshell = \"/definitely/not/a/shell\"\n")
        .unwrap();
    let runner = Runner::new(NativeLauncher::from_config(&config));

    let err = runner.run("echo $HOME", &RunOptions::default()).unwrap_err();
    assert!(matches!(err, RunnerError::NoSuchFile { .. }), "{err:?}");
}
