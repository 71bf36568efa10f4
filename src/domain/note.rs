use crate::domain::ReleaseType;
use std::path::{Path, PathBuf};

/// One pending, unreleased change.
///
/// Built only from entries that classify and carry a description; consumed
/// (deleted from the store) by a successful apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeNote {
    pub severity: ReleaseType,
    pub description: String,
    source: PathBuf,
}

impl ChangeNote {
    pub fn new(severity: ReleaseType, description: impl Into<String>, source: PathBuf) -> Self {
        ChangeNote {
            severity,
            description: description.into(),
            source,
        }
    }

    /// Backing entry in the note store, used for deletion
    pub fn source(&self) -> &Path {
        &self.source
    }
}

/// Extract the single-line description from a note's content.
///
/// Lines are scanned in order; a leading heading marker (`#`, `###`, ...) and
/// surrounding whitespace are trimmed, and the first non-empty result wins.
/// Returns `None` when no line qualifies.
pub fn extract_description(content: &str) -> Option<String> {
    content
        .lines()
        .map(|line| line.trim_start().trim_start_matches('#').trim())
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_plain() {
        assert_eq!(
            extract_description("Add feature X\n"),
            Some("Add feature X".to_string())
        );
    }

    #[test]
    fn test_extract_heading_marker() {
        assert_eq!(
            extract_description("### Fix the thing\n\nmore text\n"),
            Some("Fix the thing".to_string())
        );
    }

    #[test]
    fn test_extract_skips_blank_and_bare_marker_lines() {
        assert_eq!(
            extract_description("\n   \n###\n  ## Second try  \nlater"),
            Some("Second try".to_string())
        );
    }

    #[test]
    fn test_extract_all_blank() {
        assert_eq!(extract_description(""), None);
        assert_eq!(extract_description("\n \n\t\n"), None);
        assert_eq!(extract_description("###\n"), None);
    }

    #[test]
    fn test_extract_crlf() {
        assert_eq!(
            extract_description("\r\nWindows line\r\n"),
            Some("Windows line".to_string())
        );
    }

    #[test]
    fn test_change_note_source() {
        let note = ChangeNote::new(ReleaseType::Patch, "Fix", PathBuf::from("patch-1.md"));
        assert_eq!(note.source(), Path::new("patch-1.md"));
    }
}
