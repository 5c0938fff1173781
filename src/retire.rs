use crate::domain::branch::MASTER;
use crate::domain::{Branch, SemanticRef};
use crate::error::{AutoVersionError, Result};
use crate::git::RefRepository;
use tracing::info;

/// Tag master with the release version, merge the release branch into master and
/// delete the remote release branch. Returns the tag name.
///
/// Steps run in order and stop at the first failure. Completed steps are not
/// rolled back, so the repository is left as it was at the failing step.
pub fn retire(repo: &RefRepository, current: &Branch) -> Result<String> {
    let version = current.semantic_version().ok_or_else(|| {
        AutoVersionError::configuration(format!(
            "Attempting to retire non-release branch '{}'!",
            current
        ))
    })?;
    repo.require_destructive_allowed("Release retirement")?;

    let master = Branch::new(MASTER);
    let tag = repo.release_tag_name(&version);
    repo.create_release_tag(&tag)?;
    repo.push_release_tag(&tag)?;
    repo.checkout(&master)?;
    repo.pull()?;
    repo.merge(current)?;
    repo.push(&master)?;
    repo.checkout(current)?;
    repo.delete_remote_branch(current)?;

    info!(branch = %current, tag = %tag, "retired release branch");
    Ok(tag)
}
