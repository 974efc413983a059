//! External process execution
//!
//! Every side effect deployer has on the host goes through a [`CommandRunner`]:
//! - **SystemRunner**: spawns real processes with `std::process::Command`
//! - **MockRunner**: scripted responses and a call log, for tests
//!
//! Each call blocks until the child exits. There are no timeouts and no retries.

mod mock;
mod system;

pub use mock::MockRunner;
pub use system::SystemRunner;

use std::fmt;
use std::path::PathBuf;

use crate::error::Result;

/// A single external command: program plus arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
}

impl Invocation {
    /// Create an invocation of `program` with no arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Run `script` through `sh -c`
    pub fn shell(script: impl Into<String>) -> Self {
        Self::new("sh").arg("-c").arg(script)
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// Space-joined command line, used for logging and error messages
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// Captured result of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` if the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs external commands on behalf of the deployer flows
pub trait CommandRunner {
    /// Run with inherited stdio; fails on spawn error or non-zero exit
    fn run(&self, invocation: &Invocation) -> Result<()>;

    /// Run capturing stdout/stderr; fails on spawn error or non-zero exit
    fn output(&self, invocation: &Invocation) -> Result<CommandOutput>;

    /// Probe: true iff the process started and exited with status 0
    fn succeeds(&self, invocation: &Invocation) -> bool;

    /// Find `program` on `PATH`
    fn locate(&self, program: &str) -> Option<PathBuf>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, invocation: &Invocation) -> Result<()> {
        (**self).run(invocation)
    }

    fn output(&self, invocation: &Invocation) -> Result<CommandOutput> {
        (**self).output(invocation)
    }

    fn succeeds(&self, invocation: &Invocation) -> bool {
        (**self).succeeds(invocation)
    }

    fn locate(&self, program: &str) -> Option<PathBuf> {
        (**self).locate(program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line() {
        let inv = Invocation::new("k3d").args(["cluster", "create", "local"]);
        assert_eq!(inv.command_line(), "k3d cluster create local");
        assert_eq!(inv.program(), "k3d");
        assert_eq!(inv.arguments().len(), 3);
    }

    #[test]
    fn test_shell_wraps_script() {
        let inv = Invocation::shell("helm version");
        assert_eq!(inv.program(), "sh");
        assert_eq!(inv.arguments(), ["-c", "helm version"]);
    }

    #[test]
    fn test_output_success() {
        let out = CommandOutput {
            code: Some(0),
            ..Default::default()
        };
        assert!(out.success());

        let killed = CommandOutput::default();
        assert!(!killed.success());
    }
}
