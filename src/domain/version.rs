use crate::domain::ReleaseType;
use crate::error::{ChangesetError, Result};
use std::fmt;
use std::str::FromStr;

/// Semantic version representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Version reported for a project with no release yet
    pub const INITIAL: Version = Version::new(0, 0, 0);

    /// Create a new version
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse a version string (e.g., "1.2.3" or "v1.2.3").
    ///
    /// Exactly three dot-separated non-negative integers are accepted.
    pub fn parse(input: &str) -> Result<Self> {
        let clean = input.trim();
        let clean = clean.strip_prefix('v').unwrap_or(clean);

        let parts: Vec<&str> = clean.split('.').collect();
        if parts.len() != 3 {
            return Err(ChangesetError::version(format!(
                "'{}' - expected X.Y.Z",
                input
            )));
        }

        let component = |part: &str| -> Result<u64> {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ChangesetError::version(format!(
                    "'{}' - component '{}' is not a non-negative integer",
                    input, part
                )));
            }
            part.parse::<u64>().map_err(|e| {
                ChangesetError::version(format!("'{}' - component '{}': {}", input, part, e))
            })
        };

        Ok(Version {
            major: component(parts[0])?,
            minor: component(parts[1])?,
            patch: component(parts[2])?,
        })
    }

    /// Bump version according to release type.
    ///
    /// Fails with `InvalidVersion` when the bumped component would overflow.
    pub fn bump(&self, release_type: ReleaseType) -> Result<Self> {
        let next = |component: u64| {
            component.checked_add(1).ok_or_else(|| {
                ChangesetError::version(format!("{} cannot take a {} bump", self, release_type))
            })
        };

        Ok(match release_type {
            ReleaseType::Major => Version::new(next(self.major)?, 0, 0),
            ReleaseType::Minor => Version::new(self.major, next(self.minor)?, 0),
            ReleaseType::Patch => Version::new(self.major, self.minor, next(self.patch)?),
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = ChangesetError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

/// Bump a textual version, failing when it is not exactly `X.Y.Z`.
pub fn bump_version(current: &str, release_type: ReleaseType) -> Result<Version> {
    Version::parse(current)?.bump(release_type)
}
