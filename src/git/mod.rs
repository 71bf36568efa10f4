//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the version-control side
//! effects of a release, allowing for a real implementation and a mock for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. The concrete implementations include:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation that records calls
//!
//! # Usage
//!
//! The release commands depend on the [Repository] trait rather than on a concrete
//! implementation, so the publish flow can be exercised without a repository.
//!
//! ```rust
//! # use changeset_release::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! if !repo.tag_exists("v1.0.0")? {
//!     repo.create_annotated_tag("v1.0.0", "release v1.0.0")?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::{MockRepository, RecordedCall};
pub use repository::Git2Repository;

use crate::error::Result;

/// Version-control operations a release needs
///
/// ## Thread Safety
///
/// All implementors must be `Send + Sync`.
///
/// ## Error Handling
///
/// Implementations map underlying failures to [crate::error::ChangesetError::Git],
/// [crate::error::ChangesetError::Tag] or [crate::error::ChangesetError::Remote],
/// all of which the command layer reports with the version-control exit code.
pub trait Repository: Send + Sync {
    /// Check whether a tag with this name exists
    ///
    /// # Arguments
    /// * `name` - Tag name (e.g., "v1.0.0")
    ///
    /// # Returns
    /// * `Ok(true)` / `Ok(false)` - Whether the tag exists
    /// * `Err` - If there's a Git error
    fn tag_exists(&self, name: &str) -> Result<bool>;

    /// Create an annotated tag on HEAD
    ///
    /// # Arguments
    /// * `name` - Name for the new tag
    /// * `message` - Tag annotation
    ///
    /// # Returns
    /// * `Ok(())` - Success
    /// * `Err` - If the tag already exists, HEAD is unborn, or a Git error occurs
    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()>;

    /// Stage every working-tree change and commit it on HEAD
    ///
    /// # Returns
    /// * `Ok(Some(hash))` - The new commit
    /// * `Ok(None)` - Nothing changed, no commit was made
    /// * `Err` - If staging or committing fails
    fn commit_all(&self, message: &str) -> Result<Option<String>>;

    /// Push the current branch with its reachable annotated tags
    ///
    /// # Arguments
    /// * `remote` - Name of the remote (e.g., "origin")
    fn push_with_tags(&self, remote: &str) -> Result<()>;
}
