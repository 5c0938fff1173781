use crate::domain::version::Version;
use crate::error::{AutoVersionError, Result};
use regex::Regex;
use std::sync::OnceLock;

/// Remote every ref is resolved against
pub const REMOTE: &str = "origin";

/// Placeholder a pattern template must contain
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// Default template for remote release branches
pub const DEFAULT_BRANCH_TEMPLATE: &str = "origin/releases/{version}";

/// Default template for release tags as listed by `git ls-remote --tags`
pub const DEFAULT_TAG_TEMPLATE: &str = "refs/tags/v{version}";

// major, minor, separator+patch, patch
const VERSION_GRAMMAR: &str = r"(\d+)\.(\d+)(\.(\d+))?";

/// Release naming pattern (e.g. "origin/releases/{version}", "refs/tags/v{version}")
///
/// `{version}` stands for `<major>.<minor>[.<patch>]`. Matching is anchored at the
/// end of the ref name only, so trailing characters after the version never match.
#[derive(Debug, Clone)]
pub struct ReleasePattern {
    template: String,
    regex: Regex,
}

impl ReleasePattern {
    /// Compile a pattern template
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        if template.matches(VERSION_PLACEHOLDER).count() != 1 {
            return Err(AutoVersionError::configuration(format!(
                "Pattern '{}' must contain the {} placeholder exactly once",
                template, VERSION_PLACEHOLDER
            )));
        }

        let escaped = regex::escape(&template);
        let regex_pattern = escaped.replace(r"\{version\}", VERSION_GRAMMAR);
        let regex = Regex::new(&format!("{}$", regex_pattern)).map_err(|e| {
            AutoVersionError::configuration(format!("Invalid pattern '{}': {}", template, e))
        })?;

        Ok(ReleasePattern { template, regex })
    }

    /// Pattern used for release branches unless configured otherwise
    pub fn default_branch() -> &'static ReleasePattern {
        static PATTERN: OnceLock<ReleasePattern> = OnceLock::new();
        PATTERN.get_or_init(|| {
            ReleasePattern::new(DEFAULT_BRANCH_TEMPLATE).expect("default branch pattern is valid")
        })
    }

    /// Pattern used for release tags unless configured otherwise
    pub fn default_tag() -> &'static ReleasePattern {
        static PATTERN: OnceLock<ReleasePattern> = OnceLock::new();
        PATTERN.get_or_init(|| {
            ReleasePattern::new(DEFAULT_TAG_TEMPLATE).expect("default tag pattern is valid")
        })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// The template with `{version}` substituted
    pub fn render(&self, version: &str) -> String {
        self.template.replace(VERSION_PLACEHOLDER, version)
    }

    /// Extract the release version from a ref name, if it is a release.
    ///
    /// The name is normalized with the remote prefix first, so `releases/2.1` and
    /// `origin/releases/2.1` yield the same result. A missing patch defaults to 0.
    pub fn parse(&self, name: &str) -> Option<Version> {
        let normalized = normalize(name);
        let captures = self.regex.captures(&normalized)?;

        let major = captures.get(1)?.as_str().parse::<u32>().ok()?;
        let minor = captures.get(2)?.as_str().parse::<u32>().ok()?;
        let patch = match captures.get(4) {
            Some(m) => m.as_str().parse::<u32>().ok()?,
            None => 0,
        };

        Some(Version::new(major, minor, patch))
    }

    pub fn matches(&self, name: &str) -> bool {
        self.parse(name).is_some()
    }
}

/// Default glob used to keep the remote branch listing small
pub const DEFAULT_BRANCH_FILTER: &str = "*origin/releases/*";

/// The two release patterns in use plus the listing filter for release branches
#[derive(Debug, Clone)]
pub struct ReleasePatterns {
    pub branch: ReleasePattern,
    pub tag: ReleasePattern,
    pub branch_filter: String,
}

impl Default for ReleasePatterns {
    fn default() -> Self {
        ReleasePatterns {
            branch: ReleasePattern::default_branch().clone(),
            tag: ReleasePattern::default_tag().clone(),
            branch_filter: DEFAULT_BRANCH_FILTER.to_string(),
        }
    }
}

/// Prefix a ref name with the remote unless it already carries it
pub fn normalize(name: &str) -> String {
    let prefix = format!("{}/", REMOTE);
    if name.starts_with(&prefix) {
        name.to_string()
    } else {
        format!("{}{}", prefix, name)
    }
}
