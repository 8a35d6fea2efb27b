//! Synchronous child-process invocation with captured output and a timeout.

use std::ffi::{OsStr, OsString};
use std::io::Read;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{BuildError, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Captured outcome of one external tool run.
#[derive(Debug)]
pub struct ProcessOutput {
    /// Whether the process exited with code zero.
    pub success: bool,
    /// Verbatim stdout, lossily decoded.
    pub stdout: String,
    /// Verbatim stderr, lossily decoded.
    pub stderr: String,
}

/// Run an external tool to completion, capturing stdout and stderr
/// separately. The child is killed and a timeout error returned if it does
/// not exit within `timeout`.
pub fn run_captured(program: &OsStr, args: &[OsString], timeout: Duration) -> Result<ProcessOutput> {
    let tool = program.to_string_lossy().into_owned();

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| BuildError::Spawn {
            tool: tool.clone(),
            source,
        })?;

    // Drain both pipes on their own threads so a chatty child cannot fill a
    // pipe buffer and deadlock against our wait loop.
    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(BuildError::Timeout {
                        tool,
                        secs: timeout.as_secs(),
                    });
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(source) => {
                let _ = child.kill();
                return Err(BuildError::Wait { tool, source });
            }
        }
    };

    Ok(ProcessOutput {
        success: status.success(),
        stdout: join_lossy(stdout),
        stderr: join_lossy(stderr),
    })
}

fn drain<R: Read + Send + 'static>(stream: Option<R>) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut stream) = stream {
            let _ = stream.read_to_end(&mut buf);
        }
        buf
    })
}

fn join_lossy(handle: thread::JoinHandle<Vec<u8>>) -> String {
    let bytes = handle.join().unwrap_or_default();
    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_sh(script: &str, timeout: Duration) -> Result<ProcessOutput> {
        let args = [OsString::from("-c"), OsString::from(script)];
        run_captured(OsStr::new("sh"), &args, timeout)
    }

    #[test]
    fn captures_stdout_and_stderr_separately() {
        let out = run_sh(
            "printf hello; printf oops >&2",
            Duration::from_secs(10),
        )
        .unwrap();
        assert!(out.success);
        assert_eq!(out.stdout, "hello");
        assert_eq!(out.stderr, "oops");
    }

    #[test]
    fn nonzero_exit_is_not_success() {
        let out = run_sh("exit 3", Duration::from_secs(10)).unwrap();
        assert!(!out.success);
    }

    #[test]
    fn missing_executable_is_spawn_error() {
        let err = run_captured(
            OsStr::new("definitely-not-a-real-tool"),
            &[],
            Duration::from_secs(10),
        )
        .unwrap_err();
        assert!(matches!(err, BuildError::Spawn { .. }));
    }

    #[test]
    fn hung_child_times_out() {
        let err = run_sh("sleep 30", Duration::from_millis(200)).unwrap_err();
        assert!(matches!(err, BuildError::Timeout { .. }));
    }
}
