use std::io::Write;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Output, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::{DEFAULT_SHELL, LaunchConfig};
use crate::error::RunnerError;
use crate::process::{LaunchOutput, Launcher, SpawnOptions};

// ============================================================================
// Shell detection
// ============================================================================

/// Characters that make a command line need a shell.
const SHELL_METACHARACTERS: &[char] = &[
    '*', '?', '{', '}', '[', ']', '<', '>', '(', ')', '~', '&', '|', '\\', '$', ';', '\'', '`',
    '"', '\n', '#',
];

/// POSIX special builtins and reserved words, sorted for binary search.
const SHELL_WORDS: &[&str] = &[
    "!", ".", ":", "break", "case", "continue", "do", "done", "elif", "else", "esac", "eval",
    "exec", "exit", "export", "fi", "for", "if", "in", "readonly", "return", "set", "shift",
    "then", "times", "trap", "unset", "until", "while",
];

/// Whether `command_line` must run through the shell.
///
/// True if it contains a shell metacharacter, if its first word looks like
/// an environment assignment (`=` before any `/`), or if its first word is
/// a shell builtin or reserved word. Otherwise the line is split on blanks
/// and executed directly.
#[must_use]
pub fn needs_shell(command_line: &str) -> bool {
    if command_line.contains(SHELL_METACHARACTERS) {
        return true;
    }
    let Some(first) = command_line.split([' ', '\t']).find(|w| !w.is_empty()) else {
        return false;
    };
    if first.split('/').next().is_some_and(|head| head.contains('=')) {
        return true;
    }
    SHELL_WORDS.binary_search(&first).is_ok()
}

// ============================================================================
// NativeLauncher - std::process implementation of the launch boundary
// ============================================================================

/// Launcher built on `std::process::Command`.
///
/// Lines containing shell syntax go to `<shell> -c <line>`; plain lines are
/// split on blanks and the program is executed directly, so a missing
/// executable is reported as [`RunnerError::NoSuchFile`] rather than as a
/// shell exit status of 127.
///
/// # Example
///
/// ```rust,no_run
/// use spawnline_runner::{Launcher, NativeLauncher, SpawnOptions};
///
/// let launcher = NativeLauncher::new();
/// let output = launcher.launch("echo hello", &SpawnOptions::default()).unwrap();
/// assert_eq!(output.stdout_string(), "hello\n");
/// ```
#[derive(Debug, Clone)]
pub struct NativeLauncher {
    shell: PathBuf,
    timeout: Option<Duration>,
    clear_env: bool,
}

impl Default for NativeLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeLauncher {
    #[must_use]
    pub fn new() -> Self {
        Self {
            shell: PathBuf::from(DEFAULT_SHELL),
            timeout: None,
            clear_env: false,
        }
    }

    #[must_use]
    pub fn from_config(config: &LaunchConfig) -> Self {
        Self {
            shell: PathBuf::from(&config.shell),
            timeout: config.timeout(),
            clear_env: config.clear_env,
        }
    }

    #[must_use]
    pub fn with_shell(mut self, shell: impl Into<PathBuf>) -> Self {
        self.shell = shell.into();
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the `Command` for a line and name the program for error reports.
    fn command_for(&self, command_line: &str) -> Result<(Command, String), RunnerError> {
        if needs_shell(command_line) {
            let flag = if cfg!(windows) { "/C" } else { "-c" };
            let mut command = Command::new(&self.shell);
            command.arg(flag).arg(command_line);
            return Ok((command, self.shell.display().to_string()));
        }

        let mut words = command_line.split([' ', '\t']).filter(|w| !w.is_empty());
        let program = words
            .next()
            .ok_or_else(|| RunnerError::invalid("command line is empty"))?;
        let mut command = Command::new(program);
        command.args(words);
        Ok((command, program.to_string()))
    }

    fn apply_options(&self, command: &mut Command, options: &SpawnOptions) {
        #[cfg(unix)]
        if self.timeout.is_some() {
            use std::os::unix::process::CommandExt;
            // Own process group so a timeout can kill the whole tree.
            command.process_group(0);
        }

        if let Some(dir) = &options.chdir {
            command.current_dir(dir);
        }
        if self.clear_env || options.clear_env {
            command.env_clear();
        }
        command.envs(&options.env);

        let stdin = if options.input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        };
        command
            .stdin(stdin)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
    }

    fn wait(&self, child: Child, program: &str) -> Result<Output, RunnerError> {
        let Some(timeout) = self.timeout else {
            return child
                .wait_with_output()
                .map_err(|e| RunnerError::launch(program, e));
        };

        let (tx, rx) = mpsc::channel();
        let child_id = child.id();
        let handle = thread::spawn(move || {
            let _ = tx.send(child.wait_with_output());
        });

        match rx.recv_timeout(timeout) {
            Ok(output) => {
                let _ = handle.join();
                output.map_err(|e| RunnerError::launch(program, e))
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                warn!(
                    program = %program,
                    timeout_ms = timeout.as_millis() as u64,
                    "Command timed out, killing process"
                );
                if terminate_process(child_id) {
                    let _ = handle.join();
                }
                Err(RunnerError::Timeout { timeout })
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(RunnerError::LaunchFailed {
                program: program.to_string(),
                source: std::io::Error::other("process monitoring thread terminated unexpectedly"),
            }),
        }
    }
}

/// Kill the process group led by `pid`. Returns false if the platform has
/// no way to do so, in which case the waiter thread is left detached.
#[cfg(unix)]
fn terminate_process(pid: u32) -> bool {
    let Ok(pgid) = i32::try_from(pid) else {
        return false;
    };
    // SAFETY: kill(2) has no memory-safety preconditions.
    unsafe {
        libc::kill(-pgid, libc::SIGKILL);
    }
    true
}

#[cfg(not(unix))]
fn terminate_process(_pid: u32) -> bool {
    false
}

/// Exit code, or `128 + signal` for a child killed by a signal.
fn exit_status_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    -1
}

impl Launcher for NativeLauncher {
    fn launch(
        &self,
        command_line: &str,
        options: &SpawnOptions,
    ) -> Result<LaunchOutput, RunnerError> {
        let (mut command, program) = self.command_for(command_line)?;
        self.apply_options(&mut command, options);

        debug!(
            command = %command_line,
            shell = needs_shell(command_line),
            chdir = ?options.chdir,
            "Launching command"
        );
        let started = Instant::now();

        let mut child = command
            .spawn()
            .map_err(|e| RunnerError::launch(&program, e))?;

        let writer = match (&options.input, child.stdin.take()) {
            (Some(data), Some(mut stdin)) => {
                let data = data.clone();
                // A child that exits without reading closes the pipe; that is not an error.
                Some(thread::spawn(move || {
                    let _ = stdin.write_all(&data);
                }))
            }
            _ => None,
        };

        let output = self.wait(child, &program)?;
        if let Some(writer) = writer {
            let _ = writer.join();
        }

        let exit_status = exit_status_code(output.status);
        info!(
            command = %command_line,
            exit_status,
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );

        Ok(LaunchOutput::new(exit_status, output.stdout, output.stderr))
    }
}
