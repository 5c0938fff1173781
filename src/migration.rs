//! Merging upstream release lines into release and develop branches.
//!
//! Modifies the local and the remote repository. Meant for the build server.

use crate::domain::pattern::REMOTE;
use crate::domain::{Branch, SemanticRef};
use crate::error::{AutoVersionError, Result};
use crate::git::{Divergence, RefRepository};
use tracing::{debug, info};

/// `origin/master`, then release branches oldest first, then `origin/develop`
pub fn migration_candidates(branches: &[Branch]) -> Vec<Branch> {
    let mut candidates = Vec::with_capacity(branches.len() + 2);
    candidates.push(Branch::master());
    candidates.extend(branches.iter().cloned());
    candidates.push(Branch::develop());
    candidates
}

/// Merge every upstream branch that `current` is behind, oldest first, stopping at
/// `current`'s own position. Pushes once if anything was merged.
///
/// Returns the branches merged from, in merge order. Running it again with no new
/// upstream commits merges nothing and pushes nothing.
pub fn migrate(repo: &RefRepository, current: &Branch) -> Result<Vec<Branch>> {
    if !current.is_release() && !current.is_develop() {
        return Err(AutoVersionError::configuration(format!(
            "Commit migration expected on release or develop branches only, not '{}'.",
            current
        )));
    }
    repo.require_destructive_allowed("Commit migration")?;

    let candidates = migration_candidates(&repo.release_branches()?);
    let own = current.remote_name();
    if !candidates.iter().any(|candidate| candidate.name() == own) {
        return Err(AutoVersionError::configuration(format!(
            "Branch '{}' not found on {}; push it before migrating.",
            current, REMOTE
        )));
    }

    let mut merged = Vec::new();
    for candidate in candidates {
        if candidate.name() == own {
            break;
        }

        let behind = repo.commits_behind(current, &candidate)?;
        if behind == 0 {
            debug!(candidate = %candidate, "up to date");
            continue;
        }

        info!(candidate = %candidate, behind, "merging into {}", current);
        repo.merge(&candidate)?;
        merged.push(candidate);
    }

    if !merged.is_empty() {
        repo.push(current)?;
    }
    Ok(merged)
}
