//! Subprocess execution with captured output

use camino::Utf8Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use crate::error::{Error, Result};

/// Captured result of a finished subprocess
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
    /// Exit code (None if terminated by signal)
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    /// Whether the process exited with code 0
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Best single-line-ish description of a failure
    ///
    /// Prefers stderr, falls back to stdout, then to the exit status.
    pub fn failure_message(&self) -> String {
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        let stdout = self.stdout.trim();
        if !stdout.is_empty() {
            return stdout.to_string();
        }
        match self.exit_code {
            Some(code) => format!("exited with code {}", code),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Run `program args..` in `cwd`, wait for it, and capture stdout/stderr
///
/// stdin is closed; the child never shares the terminal with the spinner.
pub async fn run_command(program: &str, args: &[&str], cwd: &Utf8Path) -> Result<CommandOutput> {
    let cmdline = command_line(program, args);
    debug!("Running: {} (in {})", cmdline, cwd);

    let output = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| Error::spawn(cmdline.clone(), e))?;

    let result = CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code(),
    };

    debug!("{} finished with {:?}", cmdline, result.exit_code);
    Ok(result)
}

fn command_line(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}
