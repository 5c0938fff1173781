use crate::domain::pattern::{normalize, ReleasePattern};
use crate::domain::{SemanticRef, Version};
use std::fmt;

pub const DEVELOP: &str = "develop";
pub const MASTER: &str = "master";

/// Represents a git branch classified against the branching model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    name: String,
    release: Option<Version>,
    is_develop: bool,
    is_master: bool,
}

impl Branch {
    /// Classify a branch name with the default release pattern
    pub fn new(name: impl Into<String>) -> Self {
        Branch::with_pattern(name, ReleasePattern::default_branch())
    }

    /// Classify a branch name with a configured release pattern
    pub fn with_pattern(name: impl Into<String>, pattern: &ReleasePattern) -> Self {
        let name = name.into();
        let release = pattern.parse(&name);
        let is_develop = name == DEVELOP || name == normalize(DEVELOP);
        let is_master = name == MASTER || name == normalize(MASTER);

        Branch {
            name,
            release,
            is_develop,
            is_master,
        }
    }

    pub fn develop() -> Self {
        Branch::new(normalize(DEVELOP))
    }

    pub fn master() -> Self {
        Branch::new(normalize(MASTER))
    }

    pub fn is_develop(&self) -> bool {
        self.is_develop
    }

    pub fn is_master(&self) -> bool {
        self.is_master
    }

    /// Name of the remote-tracking counterpart (e.g. "develop" -> "origin/develop")
    pub fn remote_name(&self) -> String {
        normalize(&self.name)
    }
}

impl SemanticRef for Branch {
    fn name(&self) -> &str {
        &self.name
    }

    fn release(&self) -> Option<Version> {
        self.release
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_branch() {
        let branch = Branch::new("releases/2.0.2");
        assert!(branch.is_release());
        assert_eq!(branch.semantic_version().as_deref(), Some("2.0.2"));
        assert_eq!(branch.next_semantic_version().as_deref(), Some("2.1.0"));
        assert!(!branch.is_develop());
        assert!(!branch.is_master());
    }

    #[test]
    fn test_release_branch_at_minor_limit_has_no_next_version() {
        let branch = Branch::new("releases/1.4294967295");
        assert_eq!(branch.semantic_version().as_deref(), Some("1.4294967295.0"));
        assert_eq!(branch.next_semantic_version(), None);
    }

    #[test]
    fn test_release_branch_keeps_supplied_name() {
        let local = Branch::new("releases/2.1");
        let remote = Branch::new("origin/releases/2.1");
        assert_eq!(local.name(), "releases/2.1");
        assert_eq!(remote.name(), "origin/releases/2.1");
        assert_eq!(local.release(), remote.release());
        assert_eq!(local.remote_name(), remote.name());
    }

    #[test]
    fn test_develop_branch() {
        assert!(Branch::new("develop").is_develop());
        assert!(Branch::new("origin/develop").is_develop());
        assert!(!Branch::new("feature/develop").is_develop());
        assert!(!Branch::new("develop").is_release());
    }

    #[test]
    fn test_master_branch() {
        assert!(Branch::new("master").is_master());
        assert!(Branch::master().is_master());
        assert_eq!(Branch::master().name(), "origin/master");
        assert!(!Branch::new("main").is_master());
    }

    #[test]
    fn test_non_release_has_no_versions() {
        let branch = Branch::new("origin/releases/badNameToExclude");
        assert!(!branch.is_release());
        assert_eq!(branch.semantic_version(), None);
        assert_eq!(branch.next_semantic_version(), None);
    }

    #[test]
    fn test_display_is_raw_name() {
        assert_eq!(Branch::new("releases/2.1").to_string(), "releases/2.1");
    }
}
