//! Catalogue of the git command lines the tool issues.
//!
//! The exact strings double as keys of the mock override table, so tests build
//! their keys through these functions rather than by hand.

use crate::domain::pattern::REMOTE;
use crate::domain::Branch;

pub fn current_branch() -> String {
    "git rev-parse --abbrev-ref HEAD".to_string()
}

pub fn commits_since_inception() -> String {
    "git rev-list HEAD --count".to_string()
}

/// Remote branches matching a glob, to keep the listing small
pub fn release_branches(filter: &str) -> String {
    format!("git branch -r --list '{}'", filter)
}

pub fn remote_tags() -> String {
    format!("git ls-remote --tags {}", REMOTE)
}

/// Commits reachable from `from` but not from `to`
pub fn commits_ahead(from: &Branch, to: &Branch) -> String {
    format!("git rev-list --left-only --count {}...{}", from, to)
}

/// Commits reachable from `to` but not from `from`
pub fn commits_behind(from: &Branch, to: &Branch) -> String {
    format!("git rev-list --right-only --count {}...{}", from, to)
}

pub fn checkout(branch: &Branch) -> String {
    format!("git checkout {}", branch)
}

pub fn pull() -> String {
    "git pull".to_string()
}

pub fn merge(head: &Branch) -> String {
    format!("git merge {}", head)
}

/// Push with upstream tracking so a first push works too
pub fn push(branch: &Branch) -> String {
    format!("git push -u {} {}", REMOTE, branch)
}

pub fn add_release_tag(tag: &str) -> String {
    format!("git tag -a {} -m 'Master release tag'", tag)
}

pub fn push_release_tag(tag: &str) -> String {
    format!("git push {} {}", REMOTE, tag)
}

pub fn delete_remote_branch(branch: &Branch) -> String {
    format!("git push --delete {} {}", REMOTE, branch)
}

pub fn fetch() -> String {
    "git fetch".to_string()
}

/// Delete local branches whose upstream no longer exists
pub fn prune_local_untracked_branches() -> String {
    "git branch -vv | grep ': gone]' | awk '{print $1}' | xargs git branch -D".to_string()
}
