//! Git command contract
//!
//! Everything above this module talks to git through one narrow seam: a command
//! string goes in, captured standard output comes back, or a typed error.
//!
//! # Overview
//!
//! - [CommandRunner]: the executor seam
//! - [runner::ShellRunner]: runs commands through `bash -c` inside the work tree
//! - [shell::GitShell]: consults the mock override table first and refuses
//!   destructive commands while mocking is active
//! - [mock::StubRunner]: a recording executor for tests
//! - [repository::RefRepository]: typed queries and operations built on top
//!
//! ```rust
//! # use git_autoversion::git::{commands, GitShell, MockTable, StubRunner};
//! let mut mocks = MockTable::new();
//! mocks.insert(commands::current_branch(), "develop");
//! let shell = GitShell::with_mocks(StubRunner::new(), mocks);
//! assert_eq!(shell.run(&commands::current_branch()).unwrap(), "develop");
//! ```

pub mod commands;
pub mod mock;
pub mod repository;
pub mod runner;
pub mod shell;

pub use mock::{MockTable, StubRunner};
pub use repository::{Divergence, RefRepository};
pub use runner::ShellRunner;
pub use shell::GitShell;

use crate::error::Result;

/// Executes a single command line and returns its standard output
///
/// Implementations must fail with [crate::error::AutoVersionError::Command] when
/// the command exits non-zero, carrying the exit code and diagnostic output.
pub trait CommandRunner: Send + Sync {
    fn run(&self, command: &str) -> Result<String>;
}
