//! External process execution through the platform shell.
//!
//! The seam mirrors how the host runs external tools: the command line is a
//! single pre-quoted string handed to the shell, the caller gets control back
//! as soon as the process is spawned, and completion arrives asynchronously
//! over a channel. Every failure mode (spawn refusal, stdin write failure,
//! abnormal termination) is delivered through that channel as an exit report
//! rather than as an error from the spawn call itself.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// Exit code reported when the process could not run or its status is unknown.
pub const SPAWN_FAILURE_CODE: i32 = -1;

/// Description of a process to launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnRequest {
    /// The executable to run; quoted before being handed to the shell.
    pub program: PathBuf,
    /// Pre-rendered argument string appended verbatim after the program.
    pub raw_args: String,
    /// When set, written to the child's stdin immediately after spawning and
    /// the stream is closed. When unset, stdin is never touched.
    pub stdin_payload: Option<String>,
}

impl SpawnRequest {
    /// The full command line as the shell sees it.
    pub fn command_line(&self) -> String {
        format!("\"{}\" {}", self.program.display(), self.raw_args)
    }
}

/// Terminal report for a spawned process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessExit {
    /// Process exit code, or [`SPAWN_FAILURE_CODE`] when unavailable.
    pub code: i32,
    /// Captured standard-error text, or the spawn failure message.
    pub stderr: String,
}

/// Executes external tools and reports completion asynchronously.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Spawn the process described by `request`, deliver the stdin payload
    /// when present, and return a receiver that resolves once the process
    /// exits. Spawn failures resolve the receiver with
    /// [`SPAWN_FAILURE_CODE`]; they are not surfaced as call errors.
    async fn spawn(&self, request: SpawnRequest) -> oneshot::Receiver<ProcessExit>;
}

/// Runner that executes through the platform shell (`cmd /C` on windows,
/// `sh -c` elsewhere).
#[derive(Debug, Default)]
pub struct ShellProcessRunner;

impl ShellProcessRunner {
    fn shell_command(command_line: &str) -> Command {
        #[cfg(windows)]
        {
            let mut command = Command::new("cmd");
            command.args(["/C", command_line]);
            command
        }
        #[cfg(not(windows))]
        {
            let mut command = Command::new("sh");
            command.args(["-c", command_line]);
            command
        }
    }
}

#[async_trait]
impl ProcessRunner for ShellProcessRunner {
    async fn spawn(&self, request: SpawnRequest) -> oneshot::Receiver<ProcessExit> {
        let (exit_tx, exit_rx) = oneshot::channel();
        let command_line = request.command_line();
        debug!(program = %request.program.display(), "spawning external process");

        let mut command = Self::shell_command(&command_line);
        command
            .stdin(if request.stdin_payload.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(error) => {
                warn!(program = %request.program.display(), error = %error, "spawn failed");
                let _ = exit_tx.send(ProcessExit {
                    code: SPAWN_FAILURE_CODE,
                    stderr: error.to_string(),
                });
                return exit_rx;
            }
        };

        if let Some(payload) = request.stdin_payload {
            if let Some(mut stdin) = child.stdin.take() {
                if let Err(error) = stdin.write_all(payload.as_bytes()).await {
                    warn!(error = %error, "failed writing to child stdin");
                }
                // Dropping the handle closes the stream so the child's read
                // of its password prompt terminates.
                drop(stdin);
            }
        }

        tokio::spawn(async move {
            let exit = match child.wait_with_output().await {
                Ok(output) => ProcessExit {
                    code: output.status.code().unwrap_or(SPAWN_FAILURE_CODE),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                },
                Err(error) => ProcessExit {
                    code: SPAWN_FAILURE_CODE,
                    stderr: error.to_string(),
                },
            };
            let _ = exit_tx.send(exit);
        });

        exit_rx
    }
}

/// Runner that records requests and replies with a canned exit; used by tests
/// without touching the host system.
#[derive(Debug)]
pub struct RecordingRunner {
    requests: Mutex<Vec<SpawnRequest>>,
    exit: ProcessExit,
}

impl RecordingRunner {
    pub fn new(exit: ProcessExit) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            exit,
        }
    }

    /// Snapshot of every request spawned so far.
    pub fn requests(&self) -> Vec<SpawnRequest> {
        self.requests.lock().expect("runner lock poisoned").clone()
    }
}

impl Default for RecordingRunner {
    fn default() -> Self {
        Self::new(ProcessExit {
            code: 0,
            stderr: String::new(),
        })
    }
}

#[async_trait]
impl ProcessRunner for RecordingRunner {
    async fn spawn(&self, request: SpawnRequest) -> oneshot::Receiver<ProcessExit> {
        self.requests.lock().expect("runner lock poisoned").push(request);
        let (exit_tx, exit_rx) = oneshot::channel();
        let _ = exit_tx.send(self.exit.clone());
        exit_rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn recording_runner_captures_requests_and_replies() {
        let runner = RecordingRunner::new(ProcessExit {
            code: 3,
            stderr: "boom".into(),
        });
        let request = SpawnRequest {
            program: PathBuf::from("/opt/tool"),
            raw_args: "-a \"x\"".into(),
            stdin_payload: Some("secret".into()),
        };
        let exit = runner.spawn(request.clone()).await.await.expect("exit report");
        assert_eq!(exit.code, 3);
        assert_eq!(runner.requests(), vec![request]);
    }

    #[test]
    fn command_line_quotes_the_program() {
        let request = SpawnRequest {
            program: PathBuf::from("/opt/my tools/ssmsmin"),
            raw_args: "-G".into(),
            stdin_payload: None,
        };
        assert_eq!(request.command_line(), "\"/opt/my tools/ssmsmin\" -G");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn shell_runner_reports_exit_code_and_stderr() {
        let runner = ShellProcessRunner;
        let request = SpawnRequest {
            program: PathBuf::from("sh"),
            raw_args: "-c 'echo oops >&2; exit 7'".into(),
            stdin_payload: None,
        };
        let exit = runner.spawn(request).await.await.expect("exit report");
        assert_eq!(exit.code, 7);
        assert_eq!(exit.stderr.trim(), "oops");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn shell_runner_writes_and_closes_stdin() {
        let runner = ShellProcessRunner;
        // `cat` only terminates once stdin is closed; a leaked handle would
        // hang this test.
        let request = SpawnRequest {
            program: PathBuf::from("cat"),
            raw_args: ">/dev/null".into(),
            stdin_payload: Some("password-line".into()),
        };
        let exit = runner.spawn(request).await.await.expect("exit report");
        assert_eq!(exit.code, 0);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn shell_runner_delivers_spawn_failures_through_the_channel() {
        let runner = ShellProcessRunner;
        let request = SpawnRequest {
            program: PathBuf::from("/definitely/not/a/real/tool"),
            raw_args: String::new(),
            stdin_payload: None,
        };
        let exit = runner.spawn(request).await.await.expect("exit report");
        // The shell itself spawns fine and reports the missing program as a
        // non-zero exit.
        assert_ne!(exit.code, 0);
    }
}
