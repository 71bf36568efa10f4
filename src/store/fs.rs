use crate::domain::ReleaseType;
use crate::error::{ChangesetError, Result};
use crate::store::{ChangelogStore, NoteEntry, NoteStore};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

/// Pending notes kept as files in a single directory
#[derive(Debug, Clone)]
pub struct FsNoteStore {
    dir: PathBuf,
    extension: String,
}

impl FsNoteStore {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        FsNoteStore {
            dir: dir.into(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    fn is_note(&self, path: &Path) -> bool {
        path.extension().and_then(|e| e.to_str()) == Some(self.extension.as_str())
    }
}

impl NoteStore for FsNoteStore {
    fn list_entries(&self) -> Result<Vec<NoteEntry>> {
        let read_dir = match fs::read_dir(&self.dir) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(dir = %self.dir.display(), "changeset directory missing");
                return Err(ChangesetError::NotFound);
            }
            Err(e) => return Err(e.into()),
        };

        let mut entries = Vec::new();
        for dir_entry in read_dir {
            let dir_entry = dir_entry?;
            if !dir_entry.file_type()?.is_file() {
                continue;
            }

            let path = dir_entry.path();
            if !self.is_note(&path) {
                continue;
            }

            let name = dir_entry.file_name().to_string_lossy().into_owned();
            entries.push(NoteEntry::new(name, path));
        }

        if entries.is_empty() {
            debug!(dir = %self.dir.display(), "changeset directory has no notes");
            return Err(ChangesetError::NotFound);
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        debug!(count = entries.len(), "listed pending notes");
        Ok(entries)
    }

    /// Invalid UTF-8 is replaced rather than rejected.
    fn read(&self, entry: &NoteEntry) -> Result<String> {
        let bytes = fs::read(&entry.path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn delete(&self, path: &Path) -> Result<()> {
        fs::remove_file(path)?;
        debug!(path = %path.display(), "removed consumed note");
        Ok(())
    }

    fn create(&self, release_type: ReleaseType, description: &str) -> Result<PathBuf> {
        let description = description.trim();
        if description.is_empty() {
            return Err(ChangesetError::NoValidNotes);
        }

        fs::create_dir_all(&self.dir)?;

        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let path = self
            .dir
            .join(format!("{}-{}.{}", release_type, nanos, self.extension));

        fs::write(&path, format!("{}\n", description))?;
        info!(path = %path.display(), %release_type, "recorded changeset");
        Ok(path)
    }
}

/// Changelog document kept as a single file
#[derive(Debug, Clone)]
pub struct FsChangelogStore {
    path: PathBuf,
}

impl FsChangelogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FsChangelogStore { path: path.into() }
    }
}

impl ChangelogStore for FsChangelogStore {
    fn read(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes a sibling temp file and renames it over the document, so a failed
    /// write never leaves a truncated changelog behind.
    fn write(&self, content: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        fs::write(&tmp_path, content)?;
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        info!(path = %self.path.display(), "updated changelog");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
