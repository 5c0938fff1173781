use std::fmt;

/// Semantic version carried by a release branch or release tag
///
/// Field order matters: the derived `Ord` compares major, then minor, then patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    /// Create a new version
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Version reported before any release exists
    pub fn zero() -> Self {
        Version::new(0, 0, 0)
    }

    /// The version the next release line will carry (e.g. 2.1.1 -> 2.2.0)
    ///
    /// `None` when the minor component is already `u32::MAX`.
    pub fn next_minor(&self) -> Option<Self> {
        Some(Version {
            major: self.major,
            minor: self.minor.checked_add(1)?,
            patch: 0,
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
