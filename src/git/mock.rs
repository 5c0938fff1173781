use crate::domain::Branch;
use crate::error::{AutoVersionError, Result};
use crate::git::{commands, CommandRunner};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Canned command outputs, keyed by the exact command line
///
/// A non-empty table means mocking is active.
#[derive(Debug, Clone, Default)]
pub struct MockTable {
    outputs: HashMap<String, String>,
}

impl MockTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, command: impl Into<String>, output: impl Into<String>) {
        self.outputs.insert(command.into(), output.into());
    }

    /// Mock both divergence queries between two branches
    pub fn insert_divergence(&mut self, from: &str, to: &str, ahead: u32, behind: u32) {
        let from = Branch::new(from);
        let to = Branch::new(to);
        self.insert(commands::commits_ahead(&from, &to), ahead.to_string());
        self.insert(commands::commits_behind(&from, &to), behind.to_string());
    }

    pub fn get(&self, command: &str) -> Option<&str> {
        self.outputs.get(command).map(String::as_str)
    }

    pub fn contains(&self, command: &str) -> bool {
        self.outputs.contains_key(command)
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn clear(&mut self) {
        self.outputs.clear();
    }
}

#[derive(Debug, Default)]
struct StubState {
    responses: HashMap<String, std::result::Result<String, String>>,
    executed: Vec<String>,
}

/// Recording executor for tests
///
/// Every command that reaches the stub is recorded. Commands without a scripted
/// response fail like a missing binary would (exit code 127). Clones share state,
/// so a test can keep a handle after moving the stub into a [crate::git::GitShell].
#[derive(Debug, Clone, Default)]
pub struct StubRunner {
    state: Arc<Mutex<StubState>>,
}

impl StubRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful response
    pub fn respond(&self, command: impl Into<String>, stdout: impl Into<String>) {
        self.lock().responses.insert(command.into(), Ok(stdout.into()));
    }

    /// Script a failing response with the given diagnostic output
    pub fn fail(&self, command: impl Into<String>, stderr: impl Into<String>) {
        self.lock().responses.insert(command.into(), Err(stderr.into()));
    }

    /// Commands that reached the stub, in execution order
    pub fn executed(&self) -> Vec<String> {
        self.lock().executed.clone()
    }

    fn lock(&self) -> MutexGuard<'_, StubState> {
        // A panicking test thread must not hide the recorded commands from others
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl CommandRunner for StubRunner {
    fn run(&self, command: &str) -> Result<String> {
        let mut state = self.lock();
        state.executed.push(command.to_string());

        match state.responses.get(command) {
            Some(Ok(stdout)) => Ok(stdout.clone()),
            Some(Err(stderr)) => Err(AutoVersionError::Command {
                command: command.to_string(),
                exit_code: Some(1),
                stdout: String::new(),
                stderr: stderr.clone(),
            }),
            None => Err(AutoVersionError::Command {
                command: command.to_string(),
                exit_code: Some(127),
                stdout: String::new(),
                stderr: format!("no stubbed response for `{}`", command),
            }),
        }
    }
}
