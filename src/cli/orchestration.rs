//! Release workflow orchestration
//!
//! The command handlers in [crate::cli] parse arguments and print; the functions
//! here run the workflows against the store and repository traits, so every flow
//! can be driven programmatically and in tests without clap or a terminal.

use anyhow::Result;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::aggregator::{Aggregator, ApplyReport, ReleaseBatch};
use crate::analyzer::latest_version_in;
use crate::config::ReleaseConfig;
use crate::domain::{ReleaseType, Version};
use crate::error::ChangesetError;
use crate::git::Repository;
use crate::store::{ChangelogStore, NoteStore};
use crate::warnings::ReleaseWarning;

/// Options for the publish and tag workflows.
///
/// Built once from the configuration and the command line, then passed down
/// explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishOptions {
    /// Skip the confirmation prompt
    pub yes: bool,

    /// Push commits and tags after publishing
    pub push: bool,

    /// Remote to push to
    pub remote: String,
}

impl PublishOptions {
    /// Merge command-line flags over the release configuration
    pub fn from_config(release: &ReleaseConfig, yes: bool, push: bool) -> Self {
        PublishOptions {
            yes,
            push: push || release.push,
            remote: release.remote.clone(),
        }
    }
}

/// Result of a successful publish workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// The version that was released
    pub version: Version,

    /// The tag that names the release
    pub tag: String,

    /// Whether a release commit was created
    pub committed: bool,

    /// Whether commits and tags were pushed to the remote
    pub pushed: bool,

    /// Non-fatal issues collected along the way
    pub warnings: Vec<ReleaseWarning>,
}

/// Result of the tag workflow
#[derive(Debug, Clone, PartialEq)]
pub struct TagResult {
    pub tag: String,
    pub created: bool,
    pub pushed: bool,
}

/// Record a new changeset.
///
/// Missing fields are asked for through the given prompts.
pub fn run_add<N, S, D>(
    notes: &N,
    release_type: Option<ReleaseType>,
    message: Option<String>,
    select_type: S,
    prompt_description: D,
) -> Result<PathBuf>
where
    N: NoteStore,
    S: FnOnce() -> Result<ReleaseType>,
    D: FnOnce() -> Result<String>,
{
    let release_type = match release_type {
        Some(release_type) => release_type,
        None => select_type()?,
    };
    let description = match message {
        Some(message) => message,
        None => prompt_description()?,
    };

    Ok(notes.create(release_type, &description)?)
}

/// Apply pending changesets to the changelog.
pub fn run_version<N: NoteStore, C: ChangelogStore>(
    aggregator: &Aggregator<N, C>,
) -> Result<ApplyReport> {
    Ok(aggregator.apply()?)
}

/// Report what the next release would be, without changing anything.
pub fn run_status<N: NoteStore, C: ChangelogStore>(
    aggregator: &Aggregator<N, C>,
) -> Result<ReleaseBatch> {
    Ok(aggregator.preview()?)
}

/// Tag the latest released version if the tag does not exist yet.
pub fn run_tag<C, R>(
    changelog: &C,
    repo: &R,
    release: &ReleaseConfig,
    options: &PublishOptions,
) -> Result<TagResult>
where
    C: ChangelogStore,
    R: Repository,
{
    let version = latest_version_in(changelog)?;
    if version == Version::INITIAL {
        return Err(ChangesetError::version(format!(
            "no release recorded in {}",
            changelog.location()
        ))
        .into());
    }

    let tag = release.tag_name(&version.to_string());
    if repo.tag_exists(&tag)? {
        debug!(%tag, "tag already exists");
        return Ok(TagResult {
            tag,
            created: false,
            pushed: false,
        });
    }

    repo.create_annotated_tag(&tag, &release.render_tag_message(&tag))?;
    if options.push {
        repo.push_with_tags(&options.remote)?;
    }

    Ok(TagResult {
        tag,
        created: true,
        pushed: options.push,
    })
}

/// Main publish workflow
///
/// Orchestrates the entire release:
/// 1. Preview the next version
/// 2. Ask for confirmation (unless `options.yes`)
/// 3. Apply changesets to the changelog
/// 4. Commit all changes
/// 5. Tag the release if the tag is absent
/// 6. Push when enabled
///
/// # Arguments
///
/// * `aggregator` - Note and changelog stores
/// * `repo` - Version-control backend
/// * `release` - Tag and message templates
/// * `options` - Confirmation and push behaviour
/// * `confirm` - Shown the preview and the tag; returns whether to go on
pub fn run_publish<N, C, R, F>(
    aggregator: &Aggregator<N, C>,
    repo: &R,
    release: &ReleaseConfig,
    options: &PublishOptions,
    confirm: F,
) -> Result<WorkflowResult>
where
    N: NoteStore,
    C: ChangelogStore,
    R: Repository,
    F: FnOnce(&ReleaseBatch, &str) -> Result<bool>,
{
    let batch = aggregator.preview()?;
    let planned_tag = release.tag_name(&batch.version.to_string());

    if !options.yes && !confirm(&batch, &planned_tag)? {
        return Err(ChangesetError::Cancelled.into());
    }

    let report = aggregator.apply()?;
    let tag = release.tag_name(&report.version.to_string());
    let mut warnings = report.warnings;

    let committed = repo
        .commit_all(&release.render_commit_message(&tag))?
        .is_some();
    if !committed {
        warnings.push(ReleaseWarning::NothingToCommit);
    }

    if repo.tag_exists(&tag)? {
        warnings.push(ReleaseWarning::TagExists { tag: tag.clone() });
    } else {
        repo.create_annotated_tag(&tag, &release.render_tag_message(&tag))?;
    }

    if options.push {
        repo.push_with_tags(&options.remote)?;
    }

    info!(%tag, committed, pushed = options.push, "published release");
    Ok(WorkflowResult {
        version: report.version,
        tag,
        committed,
        pushed: options.push,
        warnings,
    })
}

/// Exit code for a failed command: the typed error's code, or 1.
pub fn exit_code_for(error: &anyhow::Error) -> i32 {
    error
        .downcast_ref::<ChangesetError>()
        .map(ChangesetError::exit_code)
        .unwrap_or(1)
}
