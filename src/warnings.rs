use std::fmt;

/// Non-fatal issues met while releasing.
/// The operation carries on; these are reported to the user afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseWarning {
    /// A note already written into the changelog could not be removed
    NoteNotRemoved { note: String, reason: String },
    /// The release tag already exists, so tagging was skipped
    TagExists { tag: String },
    /// Applying the release left nothing to commit
    NothingToCommit,
}

impl fmt::Display for ReleaseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseWarning::NoteNotRemoved { note, reason } => write!(
                f,
                "Changeset '{}' is already in the changelog but could not be removed ({}); delete it manually",
                note, reason
            ),
            ReleaseWarning::TagExists { tag } => {
                write!(f, "Tag {} already exists, skipping", tag)
            }
            ReleaseWarning::NothingToCommit => write!(f, "No changes to commit"),
        }
    }
}
