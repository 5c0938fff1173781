use crate::error::{AutoVersionError, Result};
use crate::git::mock::MockTable;
use crate::git::CommandRunner;
use tracing::{debug, trace};

/// Verbs that mutate a repository or its remote
pub const DESTRUCTIVE_VERBS: &[&str] = &["git push", "git merge", "git tag"];

/// Command executor with a mock override table in front of the real runner
///
/// The table is consulted first. While it is non-empty, any destructive command
/// that has no canned response is refused instead of reaching the runner, so a
/// test can never push to a real remote by accident.
pub struct GitShell {
    runner: Box<dyn CommandRunner>,
    mocks: MockTable,
}

impl GitShell {
    pub fn new(runner: impl CommandRunner + 'static) -> Self {
        GitShell::with_mocks(runner, MockTable::new())
    }

    pub fn with_mocks(runner: impl CommandRunner + 'static, mocks: MockTable) -> Self {
        GitShell {
            runner: Box::new(runner),
            mocks,
        }
    }

    pub fn is_mocking(&self) -> bool {
        !self.mocks.is_empty()
    }

    pub fn mocks(&self) -> &MockTable {
        &self.mocks
    }

    pub fn run(&self, command: &str) -> Result<String> {
        if let Some(output) = self.mocks.get(command) {
            trace!(command, "using mocked output");
            return Ok(output.to_string());
        }

        if self.is_mocking() && is_destructive(command) {
            return Err(AutoVersionError::UnsafeMockOperation {
                command: command.to_string(),
            });
        }

        debug!(command, "running");
        self.runner.run(command)
    }
}

pub fn is_destructive(command: &str) -> bool {
    DESTRUCTIVE_VERBS.iter().any(|verb| command.contains(verb))
}
