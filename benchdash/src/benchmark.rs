//! Fire-and-forget benchmark launcher.
//!
//! Each trigger spawns a detached task that runs the configured script to
//! completion. Nothing is tracked after the spawn: overlapping runs are
//! allowed and the outcome only reaches the server log.
//!
//! The script's stdout and stderr are forwarded to the log line by line as
//! they arrive; only the last few stderr lines are retained for the failure
//! report.

use crate::config::BenchmarkConfig;
use log::{info, warn};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{ChildStderr, ChildStdout, Command};
use tokio::task::JoinHandle;

const STDERR_TAIL_LINES: usize = 20;

#[derive(Debug)]
pub enum RunOutcome {
    /// Script not present; nothing was launched.
    Missing,
    Finished {
        status: ExitStatus,
        stderr_tail: Vec<String>,
    },
    SpawnFailed(std::io::Error),
}

#[derive(Debug, Clone)]
pub struct BenchmarkLauncher {
    interpreter: String,
    script: PathBuf,
}

impl BenchmarkLauncher {
    pub fn new(cfg: &BenchmarkConfig) -> Self {
        Self {
            interpreter: cfg.interpreter.clone(),
            script: cfg.script.clone(),
        }
    }

    /// Start a run in the background and return without waiting for it.
    ///
    /// `kind` is only recorded in the log; the same script runs for every kind.
    pub fn trigger(&self, kind: &str) -> JoinHandle<RunOutcome> {
        let launcher = self.clone();
        let kind = kind.to_string();
        tokio::spawn(async move {
            let outcome = launcher.run().await;
            log_outcome(&kind, &launcher.script, &outcome);
            outcome
        })
    }

    async fn run(&self) -> RunOutcome {
        if !self.script.is_file() {
            return RunOutcome::Missing;
        }

        info!(
            "[benchmark] launching {} {}",
            self.interpreter,
            self.script.display()
        );
        let mut child = match Command::new(&self.interpreter)
            .arg(&self.script)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(err) => return RunOutcome::SpawnFailed(err),
        };

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let ((), stderr_tail, status) = tokio::join!(
            forward_stdout(stdout),
            forward_stderr(stderr),
            child.wait()
        );

        match status {
            Ok(status) => RunOutcome::Finished {
                status,
                stderr_tail: stderr_tail.into(),
            },
            Err(err) => RunOutcome::SpawnFailed(err),
        }
    }
}

async fn forward_stdout(stdout: Option<ChildStdout>) {
    let Some(stdout) = stdout else {
        return;
    };
    let mut lines = BufReader::new(stdout).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        info!("[benchmark] {line}");
    }
}

async fn forward_stderr(stderr: Option<ChildStderr>) -> VecDeque<String> {
    let mut tail = VecDeque::with_capacity(STDERR_TAIL_LINES);
    let Some(stderr) = stderr else {
        return tail;
    };
    let mut lines = BufReader::new(stderr).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        info!("[benchmark] stderr: {line}");
        if tail.len() == STDERR_TAIL_LINES {
            tail.pop_front();
        }
        tail.push_back(line);
    }
    tail
}

fn log_outcome(kind: &str, script: &Path, outcome: &RunOutcome) {
    match outcome {
        RunOutcome::Missing => warn!(
            "[benchmark] {} not found; {kind} run not started",
            script.display()
        ),
        RunOutcome::Finished { status, .. } if status.success() => {
            info!("[benchmark] {kind} run completed")
        }
        RunOutcome::Finished {
            status,
            stderr_tail,
        } => {
            warn!("[benchmark] {kind} run failed: {status}");
            for line in stderr_tail {
                warn!("[benchmark]   {line}");
            }
        }
        RunOutcome::SpawnFailed(err) => {
            warn!("[benchmark] failed to start {}: {err}", script.display())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};
    use tempfile::TempDir;

    fn launcher_for(script: PathBuf) -> BenchmarkLauncher {
        BenchmarkLauncher::new(&BenchmarkConfig {
            script,
            interpreter: "bash".to_string(),
        })
    }

    fn write_script(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("run-baseline.sh");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[tokio::test]
    async fn missing_script_launches_nothing() {
        let dir = TempDir::new().unwrap();
        let launcher = launcher_for(dir.path().join("absent.sh"));
        let outcome = launcher.trigger("baseline").await.unwrap();
        assert!(matches!(outcome, RunOutcome::Missing));
    }

    #[tokio::test]
    async fn script_runs_to_completion() {
        let dir = TempDir::new().unwrap();
        let marker = dir.path().join("ran");
        let script = write_script(&dir, &format!("touch '{}'\n", marker.display()));

        let outcome = launcher_for(script).trigger("baseline").await.unwrap();
        match outcome {
            RunOutcome::Finished { status, .. } => assert!(status.success()),
            other => panic!("unexpected outcome {other:?}"),
        }
        assert!(marker.exists());
    }

    #[tokio::test]
    async fn failing_script_reports_status_and_stderr() {
        let dir = TempDir::new().unwrap();
        let script = write_script(&dir, "echo progress\necho boom >&2\nexit 3\n");

        let outcome = launcher_for(script).trigger("custom").await.unwrap();
        match outcome {
            RunOutcome::Finished {
                status,
                stderr_tail,
            } => {
                assert_eq!(status.code(), Some(3));
                assert_eq!(stderr_tail, vec!["boom".to_string()]);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[tokio::test]
    async fn stderr_tail_keeps_last_lines() {
        let dir = TempDir::new().unwrap();
        let script = write_script(
            &dir,
            "for i in $(seq 1 30); do echo \"line $i\" >&2; done\nexit 1\n",
        );

        let outcome = launcher_for(script).trigger("baseline").await.unwrap();
        match outcome {
            RunOutcome::Finished { stderr_tail, .. } => {
                assert_eq!(stderr_tail.len(), STDERR_TAIL_LINES);
                assert_eq!(stderr_tail.first().unwrap(), "line 11");
                assert_eq!(stderr_tail.last().unwrap(), "line 30");
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[tokio::test]
    async fn large_output_is_streamed_not_buffered() {
        let dir = TempDir::new().unwrap();
        // Far beyond a pipe buffer on both streams
        let script = write_script(&dir, "seq 1 200000\nseq 1 200000 >&2\n");

        let outcome = launcher_for(script).trigger("baseline").await.unwrap();
        match outcome {
            RunOutcome::Finished {
                status,
                stderr_tail,
            } => {
                assert!(status.success());
                assert_eq!(stderr_tail.len(), STDERR_TAIL_LINES);
                assert_eq!(stderr_tail.last().unwrap(), "200000");
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_interpreter_is_spawn_failure() {
        let dir = TempDir::new().unwrap();
        let script = write_script(&dir, "exit 0\n");
        let launcher = BenchmarkLauncher::new(&BenchmarkConfig {
            script,
            interpreter: "/nonexistent/interpreter".to_string(),
        });

        let outcome = launcher.trigger("baseline").await.unwrap();
        assert!(matches!(outcome, RunOutcome::SpawnFailed(_)));
    }

    #[tokio::test]
    async fn trigger_returns_before_script_finishes() {
        let dir = TempDir::new().unwrap();
        let script = write_script(&dir, "sleep 3\n");
        let launcher = launcher_for(script);

        let start = Instant::now();
        let handle = launcher.trigger("baseline");
        assert!(start.elapsed() < Duration::from_millis(500));
        assert!(!handle.is_finished());
        handle.abort();
    }
}
