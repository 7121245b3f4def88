//! Tool invocation: the text source feeding the parsers.
//!
//! Runs the `gpac` binary with a given argument string and returns decoded,
//! ANSI-color-stripped text. Output arrives on two channels: normal output
//! and diagnostic output. Diagnostic output on a command expected to be
//! clean aborts the whole run; commands that report on the diagnostic
//! channel by design (the links report) pass `diagnostics_as_output`.
//!
//! Invocations are attempted exactly once per target, block until the child
//! exits, and are bounded by a per-invocation timeout.

use std::io::Read;
use std::process::{Command, Stdio};
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use thiserror::Error;
use tracing::debug;
use wait_timeout::ChildExt;

/// Default timeout for one help invocation.
const INVOKE_TIMEOUT_MS: u64 = 30_000;

/// `ESC [ ... m` color sequences emitted by the tool.
static ANSI_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("static regex must compile"));

/// Errors that abort a generation run.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Spawning the tool failed (not installed, not executable, ...).
    #[error("failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Waiting on the child process failed.
    #[error("waiting on '{command}' failed: {source}")]
    Wait {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The invocation did not finish within the timeout.
    #[error("'{command}' did not finish within {timeout_ms}ms")]
    Timeout { command: String, timeout_ms: u64 },

    /// A command expected to be clean reported diagnostic output.
    #[error("'{command}' reported diagnostics: {diagnostics}")]
    Diagnostics {
        command: String,
        diagnostics: String,
    },
}

/// Convenience alias for results with [`ExtractError`].
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Source of raw help text, one invocation per call.
///
/// The production implementation is [`GpacRunner`]; tests substitute a fake
/// that replays captured text.
pub trait ToolInvoker {
    /// Runs the tool with the given argument string.
    ///
    /// With `diagnostics_as_output` unset, any diagnostic-channel output is
    /// fatal and the normal channel is returned. With it set, the diagnostic
    /// channel is returned when non-empty (falling back to the normal
    /// channel) and never treated as an error.
    fn invoke(&self, args: &str, diagnostics_as_output: bool) -> Result<String>;
}

/// Invokes a `gpac` binary as a child process.
pub struct GpacRunner {
    binary: String,
    timeout: Duration,
}

impl GpacRunner {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            timeout: Duration::from_millis(INVOKE_TIMEOUT_MS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn command_line(&self, args: &str) -> String {
        format!("{} {args}", self.binary)
    }
}

impl ToolInvoker for GpacRunner {
    fn invoke(&self, args: &str, diagnostics_as_output: bool) -> Result<String> {
        let command_line = self.command_line(args);
        debug!(command = %command_line, "invoking tool");

        let mut child = Command::new(&self.binary)
            .args(args.split_whitespace())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ExtractError::Spawn {
                command: command_line.clone(),
                source,
            })?;

        // Drain both pipes on background threads to prevent deadlock when
        // the child's pipe buffer fills before it exits.
        let stdout_thread = child.stdout.take().map(|mut pipe| {
            std::thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = pipe.read_to_end(&mut buf);
                buf
            })
        });
        let stderr_thread = child.stderr.take().map(|mut pipe| {
            std::thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = pipe.read_to_end(&mut buf);
                buf
            })
        });

        let status = child
            .wait_timeout(self.timeout)
            .map_err(|source| ExtractError::Wait {
                command: command_line.clone(),
                source,
            })?;
        let Some(status) = status else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(ExtractError::Timeout {
                command: command_line,
                timeout_ms: self.timeout.as_millis() as u64,
            });
        };
        debug!(command = %command_line, exit_code = ?status.code(), "tool exited");

        let stdout_buf = stdout_thread
            .and_then(|t| t.join().ok())
            .unwrap_or_default();
        let stderr_buf = stderr_thread
            .and_then(|t| t.join().ok())
            .unwrap_or_default();

        let stdout = strip_ansi_colors(&String::from_utf8_lossy(&stdout_buf));
        let stderr = strip_ansi_colors(&String::from_utf8_lossy(&stderr_buf));

        if diagnostics_as_output {
            return Ok(if stderr.is_empty() { stdout } else { stderr });
        }
        if !stderr.is_empty() {
            return Err(ExtractError::Diagnostics {
                command: command_line,
                diagnostics: stderr,
            });
        }
        Ok(stdout)
    }
}

/// Removes `ESC [ ... m` color sequences.
fn strip_ansi_colors(text: &str) -> String {
    ANSI_COLOR.replace_all(text, "").into_owned()
}
