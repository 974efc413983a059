//! Scripted runner for testing
//!
//! Nothing is spawned. Responses are matched against the command line by
//! prefix (longest registered prefix wins); unmatched commands succeed with
//! empty output. Every invocation is recorded for assertions.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use super::{CommandOutput, CommandRunner, Invocation};
use crate::error::{CoreError, Result};

#[derive(Debug, Clone)]
enum Response {
    Succeed { stdout: String },
    Fail { stderr: String },
}

#[derive(Debug, Default)]
struct MockState {
    responses: Vec<(String, Response)>,
    on_path: HashSet<String>,
    calls: Vec<Invocation>,
}

/// In-memory runner for unit tests
#[derive(Debug, Clone, Default)]
pub struct MockRunner {
    state: Arc<Mutex<MockState>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `program` visible to [`CommandRunner::locate`]
    pub fn with_program(self, program: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .on_path
            .insert(program.to_string());
        self
    }

    /// Commands starting with `prefix` succeed and print `stdout`
    pub fn respond(self, prefix: &str, stdout: &str) -> Self {
        self.state.lock().unwrap().responses.push((
            prefix.to_string(),
            Response::Succeed {
                stdout: stdout.to_string(),
            },
        ));
        self
    }

    /// Commands starting with `prefix` exit 1 and print `stderr`
    pub fn fail(self, prefix: &str, stderr: &str) -> Self {
        self.state.lock().unwrap().responses.push((
            prefix.to_string(),
            Response::Fail {
                stderr: stderr.to_string(),
            },
        ));
        self
    }

    /// Every recorded invocation, in order
    pub fn calls(&self) -> Vec<Invocation> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Recorded invocations rendered as command lines
    pub fn command_lines(&self) -> Vec<String> {
        self.calls().iter().map(Invocation::command_line).collect()
    }

    /// Whether any recorded command line starts with `prefix`
    pub fn ran(&self, prefix: &str) -> bool {
        self.command_lines().iter().any(|l| l.starts_with(prefix))
    }

    /// Number of recorded command lines starting with `prefix`
    pub fn count(&self, prefix: &str) -> usize {
        self.command_lines()
            .iter()
            .filter(|l| l.starts_with(prefix))
            .count()
    }

    fn respond_to(&self, invocation: &Invocation) -> Response {
        let line = invocation.command_line();
        let mut state = self.state.lock().unwrap();
        state.calls.push(invocation.clone());
        state
            .responses
            .iter()
            .filter(|(prefix, _)| line.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, response)| response.clone())
            .unwrap_or(Response::Succeed {
                stdout: String::new(),
            })
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, invocation: &Invocation) -> Result<()> {
        self.output(invocation).map(|_| ())
    }

    fn output(&self, invocation: &Invocation) -> Result<CommandOutput> {
        match self.respond_to(invocation) {
            Response::Succeed { stdout } => Ok(CommandOutput {
                code: Some(0),
                stdout,
                stderr: String::new(),
            }),
            Response::Fail { stderr } => Err(CoreError::CommandFailed {
                command: invocation.command_line(),
                status: "exit status: 1".to_string(),
                stderr,
            }),
        }
    }

    fn succeeds(&self, invocation: &Invocation) -> bool {
        matches!(self.respond_to(invocation), Response::Succeed { .. })
    }

    fn locate(&self, program: &str) -> Option<PathBuf> {
        let state = self.state.lock().unwrap();
        state
            .on_path
            .contains(program)
            .then(|| PathBuf::from("/usr/local/bin").join(program))
    }
}
