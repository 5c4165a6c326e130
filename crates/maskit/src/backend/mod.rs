//! Process execution abstraction.
//!
//! The [`CommandRunner`] trait is the only way this crate talks to the
//! outside world, allowing for different implementations:
//! - [`system::SystemRunner`] spawns real processes
//! - [`scripted::ScriptedRunner`] replays canned output for tests

pub mod scripted;
pub mod system;

use crate::error::Result;
use std::path::Path;

/// Captured result of one finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` if the process was killed by a signal
    pub code: Option<i32>,
    /// Standard output, lossily decoded
    pub stdout: String,
    /// Standard error, lossily decoded
    pub stderr: String,
}

impl CommandOutput {
    /// A successful run with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed run with the given exit code and stderr.
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Whether the process exited with status zero.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::Output> for CommandOutput {
    fn from(output: std::process::Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

/// Runs a program to completion and captures its output.
///
/// Implementations block until the process exits. There is no timeout.
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`.
    ///
    /// Returns `Err` only when the process could not be started; a nonzero
    /// exit is reported through [`CommandOutput::code`].
    fn run(&self, program: &Path, args: &[&str]) -> Result<CommandOutput>;
}
