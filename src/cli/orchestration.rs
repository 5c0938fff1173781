//! Main workflow orchestration logic
//!
//! Maps a parsed [Command] onto the library operations. Printing is left to the
//! caller so every path here can be driven by a stubbed repository.

use crate::args::{ExampleArgs, Properties};
use crate::cli::Command;
use crate::config::Config;
use crate::domain::Branch;
use crate::environment::Environment;
use crate::error::Result;
use crate::git::{GitShell, RefRepository, ShellRunner};
use crate::resolver::BuildInfo;
use crate::{migration, resolver, retire};
use std::path::Path;
use tracing::debug;

/// Result of one subcommand
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Version(String),
    BuildInfo(BuildInfo),
    Migrated {
        current: Branch,
        merged: Vec<Branch>,
    },
    Retired {
        current: Branch,
        tag: String,
    },
    Pruned,
    Args(ExampleArgs),
}

/// Repository over the git work tree containing `path`, configured from `config`
pub fn build_repository(config: &Config, path: impl AsRef<Path>) -> Result<RefRepository> {
    let patterns = config.patterns.compile()?;
    let environment = Environment::detect(&config.ci);
    let runner = ShellRunner::discover(path)?;
    debug!(work_dir = %runner.work_dir().display(), "using work tree");

    Ok(RefRepository::new(GitShell::new(runner), environment, patterns))
}

/// The `args` subcommand; needs no repository
pub fn example_args(properties: &Properties) -> Result<Outcome> {
    ExampleArgs::from_properties(properties).map(Outcome::Args)
}

/// Run `command` against `repo`
pub fn execute(command: &Command, repo: &RefRepository, properties: &Properties) -> Result<Outcome> {
    match command {
        Command::Version => resolver::resolve_current(repo).map(Outcome::Version),
        Command::Info => resolver::build_info(repo).map(Outcome::BuildInfo),
        Command::Migrate => {
            let current = repo.current_branch()?;
            let merged = migration::migrate(repo, &current)?;
            Ok(Outcome::Migrated { current, merged })
        }
        Command::Retire => {
            let current = repo.current_branch()?;
            let tag = retire::retire(repo, &current)?;
            Ok(Outcome::Retired { current, tag })
        }
        Command::Prune => {
            repo.prune_local_untracked()?;
            Ok(Outcome::Pruned)
        }
        Command::Args => example_args(properties),
    }
}
