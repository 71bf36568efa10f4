use crate::error::{ChangesetError, Result};
use git2::{IndexAddOption, Repository as Git2Repo, Status, StatusOptions};
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn has_changes(&self) -> Result<bool> {
        let mut options = StatusOptions::new();
        options.include_untracked(true).recurse_untracked_dirs(true);

        let statuses = self.repo.statuses(Some(&mut options))?;
        Ok(statuses
            .iter()
            .any(|entry| entry.status() != Status::CURRENT && !entry.status().is_ignored()))
    }

    fn workdir(&self) -> Result<&Path> {
        self.repo
            .workdir()
            .ok_or_else(|| ChangesetError::remote("repository has no working directory"))
    }
}

impl super::Repository for Git2Repository {
    fn tag_exists(&self, name: &str) -> Result<bool> {
        let reference_name = format!("refs/tags/{}", name);

        match self.repo.find_reference(&reference_name) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(false),
            Err(e) => Err(ChangesetError::tag(format!(
                "Cannot look up tag '{}': {}",
                name, e
            ))),
        }
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        let head = self
            .repo
            .head()
            .and_then(|head| head.peel_to_commit())
            .map_err(|e| ChangesetError::tag(format!("Cannot resolve HEAD: {}", e)))?;

        let signature = self.repo.signature()?;
        self.repo
            .tag(name, head.as_object(), &signature, message, false)
            .map_err(|e| ChangesetError::tag(format!("Cannot create tag '{}': {}", name, e)))?;

        info!(tag = name, "created annotated tag");
        Ok(())
    }

    fn commit_all(&self, message: &str) -> Result<Option<String>> {
        if !self.has_changes()? {
            debug!("working tree clean, nothing to commit");
            return Ok(None);
        }

        let mut index = self.repo.index()?;
        index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
        // Picks up deletions, such as consumed notes.
        index.update_all(["*"].iter(), None)?;
        index.write()?;

        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let signature = self.repo.signature()?;

        let parent = match self.repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => None,
            Err(e) => return Err(e.into()),
        };
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        let oid = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;

        info!(commit = %oid, "committed release changes");
        Ok(Some(oid.to_string()))
    }

    /// Shells out to the git CLI so the user's credential helpers and SSH agent apply.
    fn push_with_tags(&self, remote: &str) -> Result<()> {
        let output = Command::new("git")
            .current_dir(self.workdir()?)
            .args(["push", "--follow-tags", remote])
            .output()
            .map_err(|e| ChangesetError::remote(format!("Failed to run git push: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ChangesetError::remote(format!(
                "git push to '{}' failed with exit code {}: {}",
                remote,
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }

        info!(remote, "pushed commits and tags");
        Ok(())
    }
}

// SAFETY: git2::Repository is Send; this wrapper is only used from one thread at a time.
unsafe impl Sync for Git2Repository {}
