//! Runner backed by real processes

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::{CommandOutput, CommandRunner, Invocation};
use crate::error::{CoreError, Result};

/// Spawns processes on the host
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }

    fn command(invocation: &Invocation) -> Command {
        let mut cmd = Command::new(invocation.program());
        cmd.args(invocation.arguments());
        cmd
    }

    fn spawn_error(invocation: &Invocation, source: std::io::Error) -> CoreError {
        CoreError::Spawn {
            program: invocation.program().to_string(),
            source,
        }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<()> {
        tracing::debug!(command = %invocation, "running");

        let status = Self::command(invocation)
            .status()
            .map_err(|e| Self::spawn_error(invocation, e))?;

        if status.success() {
            Ok(())
        } else {
            Err(CoreError::CommandFailed {
                command: invocation.command_line(),
                status: status.to_string(),
                stderr: String::new(),
            })
        }
    }

    fn output(&self, invocation: &Invocation) -> Result<CommandOutput> {
        tracing::debug!(command = %invocation, "running (captured)");

        let output = Self::command(invocation)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| Self::spawn_error(invocation, e))?;

        let captured = CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if output.status.success() {
            Ok(captured)
        } else {
            Err(CoreError::CommandFailed {
                command: invocation.command_line(),
                status: output.status.to_string(),
                stderr: captured.stderr,
            })
        }
    }

    fn succeeds(&self, invocation: &Invocation) -> bool {
        tracing::debug!(command = %invocation, "probing");

        Self::command(invocation)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    fn locate(&self, program: &str) -> Option<PathBuf> {
        let paths = std::env::var_os("PATH")?;
        std::env::split_paths(&paths)
            .map(|dir| dir.join(program))
            .find(|candidate| is_executable(candidate))
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_captures_stdout() {
        let runner = SystemRunner::new();
        let out = runner
            .output(&Invocation::shell("echo hello"))
            .unwrap();
        assert!(out.success());
        assert_eq!(out.stdout.trim(), "hello");
    }

    #[test]
    fn test_output_failure_carries_stderr() {
        let runner = SystemRunner::new();
        let err = runner
            .output(&Invocation::shell("echo boom >&2; exit 3"))
            .unwrap_err();
        match err {
            CoreError::CommandFailed { stderr, .. } => assert_eq!(stderr.trim(), "boom"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_succeeds_on_missing_program() {
        let runner = SystemRunner::new();
        assert!(!runner.succeeds(&Invocation::new("definitely-not-a-real-binary-42")));
        assert!(runner.succeeds(&Invocation::shell("true")));
    }

    #[test]
    fn test_locate_shell() {
        let runner = SystemRunner::new();
        assert!(runner.locate("sh").is_some());
        assert!(runner.locate("definitely-not-a-real-binary-42").is_none());
    }
}
