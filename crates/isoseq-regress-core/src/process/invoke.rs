//! Blocking execution of collaborator processes

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::instrument;

use super::CommandSpec;
use crate::error::{RegressError, RegressResult};

/// Outcome of one collaborator invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Shell-quoted command line, including trailing path arguments
    pub command: String,
    /// Raw exit code; `None` when the process was killed by a signal
    pub exit_code: Option<i32>,
    /// Exit status as a POSIX shell reports it (`128 + signal` when killed)
    pub status: i32,
    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,
}

impl StepRecord {
    /// Whether the process exited with status 0
    pub fn succeeded(&self) -> bool {
        self.status == 0
    }
}

/// Map an exit status to the number a shell would print for `$?`
pub fn shell_status(status: ExitStatus) -> i32 {
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

fn build_command(spec: &CommandSpec, trailing: &[PathBuf], cwd: &Path) -> Command {
    let mut cmd = Command::new(&spec.program);
    cmd.args(&spec.args).args(trailing).current_dir(cwd);
    cmd
}

fn render(spec: &CommandSpec, trailing: &[PathBuf]) -> String {
    let trailing: Vec<String> = trailing
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect();
    spec.render_with(&trailing)
}

/// Run `spec` with `trailing` appended, inheriting all standard streams
#[instrument(skip_all, fields(program = %spec.program))]
pub async fn run_inherited(
    spec: &CommandSpec,
    trailing: &[PathBuf],
    cwd: &Path,
) -> RegressResult<StepRecord> {
    let command = render(spec, trailing);
    tracing::debug!(%command, cwd = %cwd.display(), "spawning");

    let start = Instant::now();
    let status = build_command(spec, trailing, cwd)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .map_err(|e| {
            RegressError::spawn(&spec.program, e.to_string())
                .with_context_str(format!("Running '{}' in '{}'", command, cwd.display()))
        })?;

    Ok(StepRecord {
        command,
        exit_code: status.code(),
        status: shell_status(status),
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

/// Run `spec` with `trailing` appended, streaming stdout into `stdout_path`
///
/// The file is created or truncated before the child starts. Stdin and
/// stderr are inherited untouched.
#[instrument(skip_all, fields(program = %spec.program))]
pub async fn run_to_file(
    spec: &CommandSpec,
    trailing: &[PathBuf],
    cwd: &Path,
    stdout_path: &Path,
) -> RegressResult<StepRecord> {
    let command = render(spec, trailing);
    tracing::debug!(%command, stdout = %stdout_path.display(), "spawning with redirected stdout");

    let file = std::fs::File::create(stdout_path).map_err(|e| {
        RegressError::io_with_path(format!("Failed to create output file: {}", e), stdout_path)
    })?;

    let start = Instant::now();
    let status = build_command(spec, trailing, cwd)
        .stdin(Stdio::inherit())
        .stdout(Stdio::from(file))
        .stderr(Stdio::inherit())
        .status()
        .await
        .map_err(|e| {
            RegressError::spawn(&spec.program, e.to_string())
                .with_context_str(format!("Running '{}' in '{}'", command, cwd.display()))
        })?;

    Ok(StepRecord {
        command,
        exit_code: status.code(),
        status: shell_status(status),
        duration_ms: start.elapsed().as_millis() as u64,
    })
}
