use crate::error::{ChangesetError, Result};
use std::fmt;
use std::str::FromStr;

/// Severity of a change, and of the release that ships it.
///
/// Ordered `Patch < Minor < Major` so the dominant bump of a batch is its maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReleaseType {
    Patch,
    Minor,
    Major,
}

impl ReleaseType {
    /// Precedence order used when matching note names and rendering groups
    pub const ALL: [ReleaseType; 3] = [ReleaseType::Major, ReleaseType::Minor, ReleaseType::Patch];

    /// Lowercase token, also used as the note file-name prefix
    pub fn name(&self) -> &'static str {
        match self {
            ReleaseType::Major => "major",
            ReleaseType::Minor => "minor",
            ReleaseType::Patch => "patch",
        }
    }

    /// Changelog sub-heading for the group of notes with this severity
    pub fn heading(&self) -> &'static str {
        match self {
            ReleaseType::Major => "Major Changes",
            ReleaseType::Minor => "Minor Changes",
            ReleaseType::Patch => "Patch Changes",
        }
    }

    /// Resolve a severity from a note's file name.
    ///
    /// Case-insensitive prefix match against `major`, `minor`, `patch`, in that order.
    /// Returns `None` for names that match none of them.
    pub fn from_note_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|release_type| lower.starts_with(release_type.name()))
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReleaseType {
    type Err = ChangesetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "major" => Ok(ReleaseType::Major),
            "minor" => Ok(ReleaseType::Minor),
            "patch" => Ok(ReleaseType::Patch),
            other => Err(ChangesetError::bump_type(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(ReleaseType::Major > ReleaseType::Minor);
        assert!(ReleaseType::Minor > ReleaseType::Patch);
    }

    #[test]
    fn test_from_note_name() {
        assert_eq!(
            ReleaseType::from_note_name("major-123.md"),
            Some(ReleaseType::Major)
        );
        assert_eq!(
            ReleaseType::from_note_name("Minor-feature.md"),
            Some(ReleaseType::Minor)
        );
        assert_eq!(
            ReleaseType::from_note_name("PATCH-2.md"),
            Some(ReleaseType::Patch)
        );
        assert_eq!(ReleaseType::from_note_name("README.md"), None);
        assert_eq!(ReleaseType::from_note_name("fix-major.md"), None);
    }

    #[test]
    fn test_prefix_without_separator_still_matches() {
        assert_eq!(
            ReleaseType::from_note_name("majorthing.md"),
            Some(ReleaseType::Major)
        );
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Major".parse::<ReleaseType>().unwrap(), ReleaseType::Major);
        assert_eq!(" patch ".parse::<ReleaseType>().unwrap(), ReleaseType::Patch);

        let err = "huge".parse::<ReleaseType>().unwrap_err();
        assert!(matches!(err, ChangesetError::InvalidBumpType(ref t) if t == "huge"));
    }

    #[test]
    fn test_display_and_heading() {
        assert_eq!(ReleaseType::Minor.to_string(), "minor");
        assert_eq!(ReleaseType::Patch.heading(), "Patch Changes");
    }
}
