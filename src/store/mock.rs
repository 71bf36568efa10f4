use crate::domain::ReleaseType;
use crate::error::{ChangesetError, Result};
use crate::store::{ChangelogStore, NoteEntry, NoteStore};
use std::collections::{BTreeMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

fn injected(what: &str) -> ChangesetError {
    ChangesetError::Io(io::Error::new(
        io::ErrorKind::PermissionDenied,
        format!("injected {} failure", what),
    ))
}

/// In-memory note store for testing without touching the filesystem
#[derive(Debug, Default)]
pub struct MemoryNoteStore {
    notes: Mutex<BTreeMap<String, String>>,
    undeletable: HashSet<String>,
    unreadable: HashSet<String>,
    counter: Mutex<u64>,
}

impl MemoryNoteStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a note entry with the given file name and content
    pub fn with_note(self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.lock().insert(name.into(), content.into());
        self
    }

    /// Make deleting the named entry fail
    pub fn fail_delete(mut self, name: impl Into<String>) -> Self {
        self.undeletable.insert(name.into());
        self
    }

    /// Make reading the named entry fail
    pub fn fail_read(mut self, name: impl Into<String>) -> Self {
        self.unreadable.insert(name.into());
        self
    }

    /// Names of the entries still pending
    pub fn names(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    /// Content of an entry, if present
    pub fn content(&self, name: &str) -> Option<String> {
        self.lock().get(name).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.notes.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl NoteStore for MemoryNoteStore {
    fn list_entries(&self) -> Result<Vec<NoteEntry>> {
        let notes = self.lock();
        if notes.is_empty() {
            return Err(ChangesetError::NotFound);
        }
        Ok(notes
            .keys()
            .map(|name| NoteEntry::new(name.clone(), name.clone()))
            .collect())
    }

    fn read(&self, entry: &NoteEntry) -> Result<String> {
        if self.unreadable.contains(&entry.name) {
            return Err(injected("read"));
        }
        self.lock().get(&entry.name).cloned().ok_or_else(|| {
            ChangesetError::Io(io::Error::new(io::ErrorKind::NotFound, entry.name.clone()))
        })
    }

    fn delete(&self, path: &Path) -> Result<()> {
        let name = path.to_string_lossy().into_owned();
        if self.undeletable.contains(&name) {
            return Err(injected("delete"));
        }
        self.lock().remove(&name);
        Ok(())
    }

    fn create(&self, release_type: ReleaseType, description: &str) -> Result<PathBuf> {
        let description = description.trim();
        if description.is_empty() {
            return Err(ChangesetError::NoValidNotes);
        }

        let mut counter = self.counter.lock().unwrap_or_else(|e| e.into_inner());
        *counter += 1;
        let name = format!("{}-{}.md", release_type, counter);
        self.lock().insert(name.clone(), format!("{}\n", description));
        Ok(PathBuf::from(name))
    }
}

/// In-memory changelog for testing
#[derive(Debug, Default)]
pub struct MemoryChangelogStore {
    content: Mutex<Option<String>>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryChangelogStore {
    /// Changelog that does not exist yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Changelog with existing content
    pub fn with_content(content: impl Into<String>) -> Self {
        MemoryChangelogStore {
            content: Mutex::new(Some(content.into())),
            ..Self::default()
        }
    }

    /// Make every read fail, as an unreadable file would
    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    /// Make every write fail
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Current content regardless of injected failures
    pub fn content(&self) -> Option<String> {
        self.content.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl ChangelogStore for MemoryChangelogStore {
    fn read(&self) -> Result<Option<String>> {
        if self.fail_reads {
            return Err(injected("read"));
        }
        Ok(self.content())
    }

    fn write(&self, content: &str) -> Result<()> {
        if self.fail_writes {
            return Err(injected("write"));
        }
        *self.content.lock().unwrap_or_else(|e| e.into_inner()) = Some(content.to_string());
        Ok(())
    }

    fn location(&self) -> String {
        "memory://CHANGELOG.md".to_string()
    }
}
