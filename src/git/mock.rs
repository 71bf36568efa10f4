use crate::error::{ChangesetError, Result};
use crate::git::Repository;
use std::collections::BTreeSet;
use std::sync::Mutex;

/// A call made against the mock, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Commit { message: String },
    Tag { name: String, message: String },
    Push { remote: String },
}

/// Mock repository for testing without actual git operations
#[derive(Debug, Default)]
pub struct MockRepository {
    tags: Mutex<BTreeSet<String>>,
    calls: Mutex<Vec<RecordedCall>>,
    clean: bool,
    fail_push: bool,
    fail_tag: bool,
}

impl MockRepository {
    /// Create a new mock with a dirty working tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an existing tag
    pub fn with_tag(self, name: impl Into<String>) -> Self {
        self.tags
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(name.into());
        self
    }

    /// Report a clean working tree, so commits are skipped
    pub fn clean(mut self) -> Self {
        self.clean = true;
        self
    }

    /// Make pushes fail as a rejected remote would
    pub fn failing_push(mut self) -> Self {
        self.fail_push = true;
        self
    }

    /// Make tag creation fail
    pub fn failing_tag(mut self) -> Self {
        self.fail_tag = true;
        self
    }

    /// Calls recorded so far
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn record(&self, call: RecordedCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }
}

impl Repository for MockRepository {
    fn tag_exists(&self, name: &str) -> Result<bool> {
        Ok(self
            .tags
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(name))
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        if self.fail_tag {
            return Err(ChangesetError::tag(format!("Cannot create tag '{}'", name)));
        }
        let mut tags = self.tags.lock().unwrap_or_else(|e| e.into_inner());
        if !tags.insert(name.to_string()) {
            return Err(ChangesetError::tag(format!("Tag '{}' already exists", name)));
        }
        drop(tags);

        self.record(RecordedCall::Tag {
            name: name.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }

    fn commit_all(&self, message: &str) -> Result<Option<String>> {
        if self.clean {
            return Ok(None);
        }
        self.record(RecordedCall::Commit {
            message: message.to_string(),
        });
        Ok(Some("0000000".to_string()))
    }

    fn push_with_tags(&self, remote: &str) -> Result<()> {
        if self.fail_push {
            return Err(ChangesetError::remote(format!("push to '{}' rejected", remote)));
        }
        self.record(RecordedCall::Push {
            remote: remote.to_string(),
        });
        Ok(())
    }
}
