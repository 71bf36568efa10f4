//! Storage abstraction for pending notes and the changelog document
//!
//! The aggregator only talks to the [NoteStore] and [ChangelogStore] traits, so the
//! release pipeline can run against the filesystem or against in-memory stores.
//!
//! - [fs::FsNoteStore] / [fs::FsChangelogStore]: files under the project root
//! - [mock::MemoryNoteStore] / [mock::MemoryChangelogStore]: test doubles with failure injection

pub mod fs;
pub mod mock;

pub use fs::{FsChangelogStore, FsNoteStore};
pub use mock::{MemoryChangelogStore, MemoryNoteStore};

use crate::domain::{extract_description, ReleaseType};
use crate::error::Result;
use std::path::{Path, PathBuf};

/// A note-bearing entry found in the pending-notes location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteEntry {
    /// File name, used for severity classification
    pub name: String,
    /// Handle used to read and delete the entry
    pub path: PathBuf,
}

impl NoteEntry {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        NoteEntry {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Pending-notes storage.
///
/// ## Error Handling
///
/// `list_entries` fails with [crate::error::ChangesetError::NotFound] when the
/// location is missing or holds no note entries; both mean "nothing to release".
pub trait NoteStore: Send + Sync {
    /// Enumerate note entries, sorted by name
    fn list_entries(&self) -> Result<Vec<NoteEntry>>;

    /// Raw content of one entry
    fn read(&self, entry: &NoteEntry) -> Result<String>;

    /// Remove the entry behind a consumed note
    fn delete(&self, path: &Path) -> Result<()>;

    /// Record a new pending note and return its handle
    fn create(&self, release_type: ReleaseType, description: &str) -> Result<PathBuf>;

    /// First meaningful line of an entry, or `None` if it has none
    fn read_description(&self, entry: &NoteEntry) -> Result<Option<String>> {
        Ok(extract_description(&self.read(entry)?))
    }
}

/// The changelog document.
pub trait ChangelogStore: Send + Sync {
    /// Current content; `Ok(None)` when the document does not exist yet
    fn read(&self) -> Result<Option<String>>;

    /// Replace the whole document
    fn write(&self, content: &str) -> Result<()>;

    /// Human-readable location for messages
    fn location(&self) -> String;
}
