//! Release aggregation: pending notes in, next version and changelog section out.
//!
//! [Aggregator::preview] never mutates anything. [Aggregator::apply] writes the
//! changelog first and only then removes the consumed notes, so a failed write
//! leaves every note in place for a retry.

use crate::analyzer::{collect_notes, compute_next};
use crate::changelog::{prepend, render_section};
use crate::domain::{ChangeNote, ReleaseType, Version};
use crate::error::Result;
use crate::store::{ChangelogStore, NoteStore};
use crate::warnings::ReleaseWarning;
use tracing::{info, instrument, warn};

/// Result of one aggregation pass
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseBatch {
    pub release_type: ReleaseType,
    pub version: Version,
    pub notes: Vec<ChangeNote>,
}

impl ReleaseBatch {
    /// Number of notes with the given severity
    pub fn count(&self, release_type: ReleaseType) -> usize {
        self.notes
            .iter()
            .filter(|note| note.severity == release_type)
            .count()
    }

    /// Rendered changelog section for this batch
    pub fn section(&self) -> String {
        render_section(&self.version, &self.notes)
    }
}

/// Outcome of a successful apply
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyReport {
    pub version: Version,
    pub release_type: ReleaseType,
    /// Notes written into the changelog
    pub consumed: usize,
    pub warnings: Vec<ReleaseWarning>,
}

/// Composes the note store, classifier, version engine and renderer
pub struct Aggregator<N, C> {
    notes: N,
    changelog: C,
}

impl<N: NoteStore, C: ChangelogStore> Aggregator<N, C> {
    pub fn new(notes: N, changelog: C) -> Self {
        Aggregator { notes, changelog }
    }

    pub fn note_store(&self) -> &N {
        &self.notes
    }

    pub fn changelog_store(&self) -> &C {
        &self.changelog
    }

    /// Compute the next release without touching the stores.
    #[instrument(skip(self))]
    pub fn preview(&self) -> Result<ReleaseBatch> {
        let entries = self.notes.list_entries()?;
        let notes = collect_notes(&self.notes, &entries)?;
        let changelog = self.read_changelog_lenient();
        let (version, release_type) = compute_next(changelog.as_deref(), &notes)?;

        Ok(ReleaseBatch {
            release_type,
            version,
            notes,
        })
    }

    /// Write the next release into the changelog and consume its notes.
    #[instrument(skip(self))]
    pub fn apply(&self) -> Result<ApplyReport> {
        let entries = self.notes.list_entries()?;
        let notes = collect_notes(&self.notes, &entries)?;

        // Prepending to a document that exists but cannot be read would drop its history.
        let existing = self.changelog.read()?;
        let (version, release_type) = compute_next(existing.as_deref(), &notes)?;
        let batch = ReleaseBatch {
            release_type,
            version,
            notes,
        };

        self.changelog
            .write(&prepend(existing.as_deref(), &batch.section()))?;
        info!(%version, %release_type, notes = batch.notes.len(), changelog = %self.changelog.location(), "applied changesets");

        let mut warnings = Vec::new();
        for note in &batch.notes {
            if let Err(e) = self.notes.delete(note.source()) {
                warn!(note = %note.source().display(), error = %e, "failed to remove consumed note");
                warnings.push(ReleaseWarning::NoteNotRemoved {
                    note: note.source().display().to_string(),
                    reason: e.to_string(),
                });
            }
        }

        Ok(ApplyReport {
            version,
            release_type,
            consumed: batch.notes.len(),
            warnings,
        })
    }

    fn read_changelog_lenient(&self) -> Option<String> {
        match self.changelog.read() {
            Ok(content) => content,
            Err(e) => {
                warn!(changelog = %self.changelog.location(), error = %e, "changelog unreadable, assuming no release");
                None
            }
        }
    }
}
