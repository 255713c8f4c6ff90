//! External command execution
//!
//! The connection driver shells out to the system's interface-control
//! commands through this seam so the process layer can be substituted in
//! tests or by embedders with their own supervision.

use std::io;
use std::path::Path;
use std::process::Command;

/// Captured result of one external command.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// Exit code, if the process terminated normally
    pub code: Option<i32>,
    /// Whether the process reported success
    pub success: bool,
    /// Combined stdout and stderr
    pub output: String,
}

/// Runs an external command to completion, capturing its exit status
/// and combined output. Blocking; no timeout is imposed here.
pub trait CommandRunner {
    fn run(&self, program: &Path, args: &[String]) -> io::Result<ProcessOutput>;
}

/// [`CommandRunner`] backed by `std::process`.
///
/// The combined output is stdout followed by stderr, decoded lossily.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &Path, args: &[String]) -> io::Result<ProcessOutput> {
        let output = Command::new(program).args(args).output()?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(ProcessOutput {
            code: output.status.code(),
            success: output.status.success(),
            output: combined,
        })
    }
}
