use crate::domain::{ChangeNote, ReleaseType};
use crate::error::{ChangesetError, Result};
use crate::store::{NoteEntry, NoteStore};
use tracing::{debug, warn};

/// Severity of a note, from its file name.
///
/// `None` means the entry is unclassified and takes no part in the release.
pub fn classify(name: &str) -> Option<ReleaseType> {
    ReleaseType::from_note_name(name)
}

/// Turn store entries into release notes.
///
/// Entries that do not classify, cannot be read, or have no description line
/// are dropped without error and stay in the store.
pub fn collect_notes<S>(store: &S, entries: &[NoteEntry]) -> Result<Vec<ChangeNote>>
where
    S: NoteStore + ?Sized,
{
    let mut notes = Vec::with_capacity(entries.len());

    for entry in entries {
        let Some(severity) = classify(&entry.name) else {
            debug!(note = %entry.name, "skipping unclassified note");
            continue;
        };

        let description = match store.read_description(entry) {
            Ok(Some(description)) => description,
            Ok(None) => {
                debug!(note = %entry.name, "skipping note without description");
                continue;
            }
            Err(e) => {
                warn!(note = %entry.name, error = %e, "skipping unreadable note");
                continue;
            }
        };

        notes.push(ChangeNote::new(severity, description, entry.path.clone()));
    }

    Ok(notes)
}

/// Dominant bump of a batch: Major if any note is major, else Minor, else Patch.
///
/// Counts and order are irrelevant; an empty batch is `NoValidNotes`.
pub fn dominant_bump(notes: &[ChangeNote]) -> Result<ReleaseType> {
    notes
        .iter()
        .map(|note| note.severity)
        .max()
        .ok_or(ChangesetError::NoValidNotes)
}
