//! Domain logic - pure release naming rules independent of git operations

pub mod branch;
pub mod pattern;
pub mod tag;
pub mod version;

pub use branch::Branch;
pub use pattern::ReleasePattern;
pub use tag::Tag;
pub use version::Version;

/// A branch or tag whose name may encode a release version
pub trait SemanticRef {
    /// Name as reported by git, with or without the remote prefix
    fn name(&self) -> &str;

    /// Parsed release version, present only for release refs
    fn release(&self) -> Option<Version>;

    fn is_release(&self) -> bool {
        self.release().is_some()
    }

    /// "{major}.{minor}.{patch}"
    fn semantic_version(&self) -> Option<String> {
        self.release().map(|v| v.to_string())
    }

    /// "{major}.{minor+1}.0"; `None` for non-release refs or when minor cannot grow
    fn next_semantic_version(&self) -> Option<String> {
        self.release()
            .and_then(|v| v.next_minor())
            .map(|v| v.to_string())
    }
}

/// Keep only release refs, ordered oldest first by (major, minor, patch).
///
/// The sort is stable, so refs carrying the same version keep their listing order.
pub fn sort_releases<R: SemanticRef>(refs: impl IntoIterator<Item = R>) -> Vec<R> {
    let mut releases: Vec<R> = refs.into_iter().filter(|r| r.is_release()).collect();
    releases.sort_by_key(|r| r.release());
    releases
}
