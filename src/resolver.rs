//! Version name inference from branch topology.

use crate::domain::{Branch, SemanticRef, Tag, Version};
use crate::error::Result;
use crate::git::{Divergence, RefRepository};
use tracing::debug;

/// Values handed to packaging steps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    /// Semantic version, e.g. "2.2.0"
    pub version_name: String,
    /// Commit count since repository inception
    pub version_code: u64,
}

/// Compute the version name of the checked out branch
///
/// A release branch needs no remote listing, so none is queried for it.
pub fn resolve_current(repo: &RefRepository) -> Result<String> {
    let current = repo.current_branch()?;
    if let Some(version) = current.semantic_version() {
        return Ok(version);
    }

    let branches = repo.release_branches()?;
    let tags = repo.release_tags()?;
    resolve_version(&current, &branches, &tags, repo)
}

/// Compute version name and version code of the checked out branch
pub fn build_info(repo: &RefRepository) -> Result<BuildInfo> {
    Ok(BuildInfo {
        version_name: resolve_current(repo)?,
        version_code: repo.version_code()?,
    })
}

/// Decide the version name for `current`.
///
/// `branches` and `tags` must be release refs sorted oldest first. First match wins:
/// 1. a release branch reports its own version
/// 2. master reports the latest release tag
/// 3. develop reports the next minor after the latest release line
/// 4. any other branch takes the version of its closest parent (see [closest_parent])
pub fn resolve_version(
    current: &Branch,
    branches: &[Branch],
    tags: &[Tag],
    divergence: &impl Divergence,
) -> Result<String> {
    if let Some(version) = current.semantic_version() {
        return Ok(version);
    }
    if current.is_master() {
        return Ok(latest_release_version(tags));
    }
    if current.is_develop() {
        return Ok(next_release_version(branches, tags));
    }

    let parent = closest_parent(current, branches, divergence)?;
    debug!(branch = %current, parent = %parent, "closest parent");
    match parent.semantic_version() {
        Some(version) if !parent.is_develop() => Ok(version),
        _ => Ok(next_release_version(branches, tags)),
    }
}

/// Latest release tag's version, or "0.0.0" without any release tag
pub fn latest_release_version(tags: &[Tag]) -> String {
    tags.last()
        .and_then(|tag| tag.semantic_version())
        .unwrap_or_else(|| Version::zero().to_string())
}

/// Next minor after the newest release branch, else after the newest release tag,
/// else "0.0.0"
pub fn next_release_version(branches: &[Branch], tags: &[Tag]) -> String {
    branches
        .last()
        .and_then(|branch| branch.next_semantic_version())
        .or_else(|| tags.last().and_then(|tag| tag.next_semantic_version()))
        .unwrap_or_else(|| Version::zero().to_string())
}

/// Release branches followed by `origin/develop`
pub fn parent_candidates(branches: &[Branch]) -> Vec<Branch> {
    let mut candidates = branches.to_vec();
    candidates.push(Branch::develop());
    candidates
}

/// The candidate `current` has diverged from least.
///
/// Candidates are ranked by (commits ahead, commits behind); the earliest candidate
/// wins a full tie.
pub fn closest_parent(
    current: &Branch,
    branches: &[Branch],
    divergence: &impl Divergence,
) -> Result<Branch> {
    let mut closest: Option<((u32, u32), Branch)> = None;

    for candidate in parent_candidates(branches) {
        let ahead = divergence.commits_ahead(current, &candidate)?;
        let behind = divergence.commits_behind(current, &candidate)?;
        debug!(candidate = %candidate, ahead, behind, "divergence");

        let is_closer = match &closest {
            Some((best, _)) => (ahead, behind) < *best,
            None => true,
        };
        if is_closer {
            closest = Some(((ahead, behind), candidate));
        }
    }

    // parent_candidates always ends with develop, so there is at least one candidate
    Ok(closest
        .map(|(_, branch)| branch)
        .unwrap_or_else(Branch::develop))
}
