use crate::boundary::BoundaryWarning;
use crate::domain::pattern::ReleasePatterns;
use crate::domain::{sort_releases, Branch, Tag};
use crate::environment::Environment;
use crate::error::{AutoVersionError, Result};
use crate::git::commands;
use crate::git::shell::GitShell;
use std::cell::RefCell;
use tracing::{debug, info};

/// Commit distance between two branches
///
/// Split out of [RefRepository] so version resolution and migration can be
/// exercised against any source of ahead/behind counts.
pub trait Divergence {
    /// Commits reachable from `from` but not from `to`
    fn commits_ahead(&self, from: &Branch, to: &Branch) -> Result<u32>;

    /// Commits reachable from `to` but not from `from`
    fn commits_behind(&self, from: &Branch, to: &Branch) -> Result<u32>;
}

/// Typed view of the repository and its `origin` remote
///
/// Every query is issued fresh; nothing is cached between calls.
pub struct RefRepository {
    shell: GitShell,
    environment: Environment,
    patterns: ReleasePatterns,
    warnings: RefCell<Vec<BoundaryWarning>>,
}

impl RefRepository {
    pub fn new(shell: GitShell, environment: Environment, patterns: ReleasePatterns) -> Self {
        RefRepository {
            shell,
            environment,
            patterns,
            warnings: RefCell::new(Vec::new()),
        }
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn patterns(&self) -> &ReleasePatterns {
        &self.patterns
    }

    pub fn shell(&self) -> &GitShell {
        &self.shell
    }

    pub fn is_mocking(&self) -> bool {
        self.shell.is_mocking()
    }

    /// Drain the warnings collected so far
    pub fn take_warnings(&self) -> Vec<BoundaryWarning> {
        self.warnings.borrow_mut().drain(..).collect()
    }

    // Displayed by the caller after draining; logged here only for -v runs
    fn warn(&self, warning: BoundaryWarning) {
        debug!(%warning, "boundary warning");
        self.warnings.borrow_mut().push(warning);
    }

    /// Refuse to mutate anything unless on the build server or fully mocked
    pub fn require_destructive_allowed(&self, operation: &str) -> Result<()> {
        let mocking = self.is_mocking();
        if !self.environment.is_build_server && !mocking {
            return Err(AutoVersionError::configuration(format!(
                "{} expected to be run on build server.",
                operation
            )));
        }
        if self.environment.is_build_server && mocking {
            self.warn(BoundaryWarning::MockingOnBuildServer {
                mocked_commands: self.shell.mocks().len(),
            });
        }
        Ok(())
    }

    /// Currently checked out local branch
    pub fn current_branch(&self) -> Result<Branch> {
        let output = self.shell.run(&commands::current_branch())?;
        Ok(Branch::with_pattern(output.trim(), &self.patterns.branch))
    }

    /// Commits reachable from HEAD since repository inception
    pub fn version_code(&self) -> Result<u64> {
        let command = commands::commits_since_inception();
        let output = self.shell.run(&command)?;
        output
            .trim()
            .parse::<u64>()
            .map_err(|_| AutoVersionError::UnexpectedOutput { command, output })
    }

    /// Remote release branches, oldest first
    pub fn release_branches(&self) -> Result<Vec<Branch>> {
        let output = self.run_listing(&commands::release_branches(&self.patterns.branch_filter))?;
        let branches = split_listing(&output)
            .map(|name| Branch::with_pattern(name, &self.patterns.branch));
        Ok(sort_releases(branches))
    }

    /// Remote release tags, oldest first
    pub fn release_tags(&self) -> Result<Vec<Tag>> {
        let output = self.run_listing(&commands::remote_tags())?;
        // ls-remote prints "<sha>\t<ref>"; the ref name is the last column
        let tags = split_listing(&output)
            .filter_map(|line| line.split_whitespace().last())
            .map(|name| Tag::with_pattern(name, &self.patterns.tag));
        Ok(sort_releases(tags))
    }

    pub fn checkout(&self, branch: &Branch) -> Result<()> {
        self.shell.run(&commands::checkout(branch))?;
        Ok(())
    }

    pub fn pull(&self) -> Result<()> {
        self.shell.run(&commands::pull())?;
        Ok(())
    }

    /// Merge `head` into the checked out branch
    ///
    /// A failed merge is left as is for manual resolution; nothing is aborted.
    pub fn merge(&self, head: &Branch) -> Result<()> {
        let command = commands::merge(head);
        match self.shell.run(&command) {
            Ok(_) => {
                info!(branch = %head, "merged");
                Ok(())
            }
            Err(AutoVersionError::Command { stdout, stderr, .. }) => {
                let output = [stdout.trim(), stderr.trim()]
                    .iter()
                    .filter(|part| !part.is_empty())
                    .copied()
                    .collect::<Vec<_>>()
                    .join("\n");
                Err(AutoVersionError::MergeConflict { command, output })
            }
            Err(e) => Err(e),
        }
    }

    pub fn push(&self, branch: &Branch) -> Result<()> {
        self.shell.run(&commands::push(branch))?;
        info!(branch = %branch, "pushed");
        Ok(())
    }

    /// Tag name a retired release line gets under the configured tag pattern
    pub fn release_tag_name(&self, version: &str) -> String {
        Tag::release_tag_name(version, &self.patterns.tag)
    }

    pub fn create_release_tag(&self, tag: &str) -> Result<()> {
        self.shell.run(&commands::add_release_tag(tag))?;
        Ok(())
    }

    pub fn push_release_tag(&self, tag: &str) -> Result<()> {
        self.shell.run(&commands::push_release_tag(tag))?;
        info!(tag, "pushed tag");
        Ok(())
    }

    pub fn delete_remote_branch(&self, branch: &Branch) -> Result<()> {
        self.shell.run(&commands::delete_remote_branch(branch))?;
        info!(branch = %branch, "deleted remote branch");
        Ok(())
    }

    /// Fetch, then delete local branches whose upstream is gone
    pub fn prune_local_untracked(&self) -> Result<()> {
        self.shell.run(&commands::fetch())?;
        self.shell.run(&commands::prune_local_untracked_branches())?;
        Ok(())
    }

    /// Read-only listings degrade to empty off the build server so offline
    /// local builds still work; on the build server they stay fatal.
    fn run_listing(&self, command: &str) -> Result<String> {
        match self.shell.run(command) {
            Err(AutoVersionError::Command { stderr, .. }) if !self.environment.is_build_server => {
                self.warn(BoundaryWarning::ListingUnavailable {
                    command: command.to_string(),
                    reason: stderr,
                });
                Ok(String::new())
            }
            other => other,
        }
    }

    fn run_count(&self, command: String) -> Result<u32> {
        let output = self.shell.run(&command)?;
        output
            .trim()
            .parse::<u32>()
            .map_err(|_| AutoVersionError::UnexpectedOutput { command, output })
    }
}

impl Divergence for RefRepository {
    fn commits_ahead(&self, from: &Branch, to: &Branch) -> Result<u32> {
        self.run_count(commands::commits_ahead(from, to))
    }

    fn commits_behind(&self, from: &Branch, to: &Branch) -> Result<u32> {
        self.run_count(commands::commits_behind(from, to))
    }
}

fn split_listing(output: &str) -> impl Iterator<Item = &str> {
    output
        .split(|c| c == '\n' || c == ',')
        .map(str::trim)
        .filter(|line| !line.is_empty())
}
