use std::io::Read;
use std::process::{Command, ExitStatus, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use super::ProcessError;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug)]
pub struct Captured {
    pub status: ExitStatus,
    pub stdout: String,
}

/// Runs `command` with stdout captured and stdin/stderr detached.
///
/// The child is killed if it has not exited within `timeout`.
pub fn run_captured(command: &mut Command, timeout: Duration) -> Result<Captured, ProcessError> {
    let invocation = format!("{:?}", command);
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| ProcessError::Spawn {
            invocation: invocation.clone(),
            source,
        })?;

    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| ProcessError::Other("child stdout was not captured".to_string()))?;

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = String::new();
        let result = stdout.read_to_string(&mut buf).map(|_| buf);
        let _ = tx.send(result);
    });

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait().map_err(ProcessError::Wait)? {
            Some(status) => break status,
            None if Instant::now() >= deadline => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ProcessError::TimedOut {
                    invocation,
                    after: timeout,
                });
            }
            None => thread::sleep(POLL_INTERVAL),
        }
    };

    // A grandchild may still hold the pipe open; don't wait on it forever.
    let remaining = deadline
        .saturating_duration_since(Instant::now())
        .max(POLL_INTERVAL);
    let stdout = rx
        .recv_timeout(remaining)
        .map_err(|_| ProcessError::TimedOut {
            invocation,
            after: timeout,
        })??;

    Ok(Captured { status, stdout })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captures_stdout() {
        let mut command = Command::new("sh");
        command.args(["-c", "echo hello"]);
        let captured = run_captured(&mut command, Duration::from_secs(5)).unwrap();
        assert!(captured.status.success());
        assert_eq!(captured.stdout, "hello\n");
    }

    #[test]
    fn test_nonzero_exit_still_returns_output() {
        let mut command = Command::new("sh");
        command.args(["-c", "echo partial; exit 3"]);
        let captured = run_captured(&mut command, Duration::from_secs(5)).unwrap();
        assert_eq!(captured.status.code(), Some(3));
        assert_eq!(captured.stdout, "partial\n");
    }

    #[test]
    fn test_times_out() {
        let mut command = Command::new("sleep");
        command.arg("5");
        let started = Instant::now();
        let result = run_captured(&mut command, Duration::from_millis(100));
        assert!(matches!(result, Err(ProcessError::TimedOut { .. })));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_spawn_failure() {
        let mut command = Command::new("/nonexistent/subsh-test-binary");
        let result = run_captured(&mut command, Duration::from_secs(1));
        assert!(matches!(result, Err(ProcessError::Spawn { .. })));
    }
}
