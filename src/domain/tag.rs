use crate::domain::pattern::{ReleasePattern, REMOTE};
use crate::domain::{SemanticRef, Version};
use std::fmt;

/// Ref namespace of tags as listed by `git ls-remote --tags`
pub const TAG_REF_PREFIX: &str = "refs/tags/";

/// Represents a git tag as listed on the remote (e.g. "refs/tags/v1.8.1")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    name: String,
    release: Option<Version>,
}

impl Tag {
    /// Classify a tag name with the default release pattern
    pub fn new(name: impl Into<String>) -> Self {
        Tag::with_pattern(name, ReleasePattern::default_tag())
    }

    /// Classify a tag name with a configured release pattern
    pub fn with_pattern(name: impl Into<String>, pattern: &ReleasePattern) -> Self {
        let name = name.into();
        let release = pattern.parse(&name);
        Tag { name, release }
    }

    /// Short name of the tag created when a release line is retired, built from
    /// the tag pattern so the new tag is listed as a release afterwards
    pub fn release_tag_name(version: &str, pattern: &ReleasePattern) -> String {
        let rendered = pattern.render(version);
        let remote_prefix = format!("{}/", REMOTE);
        let name = rendered.strip_prefix(&remote_prefix).unwrap_or(&rendered);
        name.strip_prefix(TAG_REF_PREFIX).unwrap_or(name).to_string()
    }
}

impl SemanticRef for Tag {
    fn name(&self) -> &str {
        &self.name
    }

    fn release(&self) -> Option<Version> {
        self.release
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
