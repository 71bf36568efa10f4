//! Command-line surface: argument parsing and per-command output

pub mod orchestration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::aggregator::Aggregator;
use crate::config::{self, Config};
use crate::domain::ReleaseType;
use crate::git::Git2Repository;
use crate::store::{FsChangelogStore, FsNoteStore};
use crate::ui;
use orchestration::PublishOptions;

#[derive(Parser, Debug)]
#[command(
    name = "changeset",
    version,
    about = "Record changesets and turn them into versioned releases"
)]
pub struct Cli {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Path to changelog file")]
    pub changelog: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Add a new changeset
    Add {
        #[arg(short = 't', long = "type", help = "Release type: major, minor or patch")]
        release_type: Option<ReleaseType>,

        #[arg(short, long, help = "Change description")]
        message: Option<String>,
    },

    /// Apply pending changesets and bump version
    #[command(alias = "apply")]
    Version,

    /// Show the pending bump and next version without changing anything
    Status,

    /// Create a git tag for the latest version
    Tag {
        #[arg(long, help = "Push commits and tags after tagging")]
        push: bool,
    },

    /// Bump version, commit, and create a tag
    Publish {
        #[arg(short, long, help = "Auto-confirm publish without prompting")]
        yes: bool,

        #[arg(long, help = "Auto-push commits and tags after publish")]
        push: bool,
    },
}

impl Cli {
    /// Run the selected command
    pub fn execute(self) -> Result<()> {
        let mut config = config::load_config(self.config.as_deref())?;
        if let Some(changelog) = self.changelog {
            config.paths.changelog = changelog;
        }

        match self.command {
            Commands::Add {
                release_type,
                message,
            } => add(&config, release_type, message),
            Commands::Version => version(&config),
            Commands::Status => status(&config),
            Commands::Tag { push } => tag(&config, push),
            Commands::Publish { yes, push } => publish(&config, yes, push),
        }
    }
}

fn note_store(config: &Config) -> FsNoteStore {
    FsNoteStore::new(&config.paths.changeset_dir, &config.paths.note_extension)
}

fn changelog_store(config: &Config) -> FsChangelogStore {
    FsChangelogStore::new(&config.paths.changelog)
}

fn aggregator(config: &Config) -> Aggregator<FsNoteStore, FsChangelogStore> {
    Aggregator::new(note_store(config), changelog_store(config))
}

fn add(config: &Config, release_type: Option<ReleaseType>, message: Option<String>) -> Result<()> {
    let path = orchestration::run_add(
        &note_store(config),
        release_type,
        message,
        ui::select_release_type,
        ui::prompt_description,
    )?;
    ui::display_success(&format!("Changeset added: {}", path.display()));
    Ok(())
}

fn version(config: &Config) -> Result<()> {
    let report = orchestration::run_version(&aggregator(config))?;
    let tag = config.release.tag_name(&report.version.to_string());
    ui::display_apply_report(&report, &tag);
    Ok(())
}

fn status(config: &Config) -> Result<()> {
    let batch = orchestration::run_status(&aggregator(config))?;
    let tag = config.release.tag_name(&batch.version.to_string());
    ui::display_release_preview(&batch, &tag);
    Ok(())
}

fn tag(config: &Config, push: bool) -> Result<()> {
    let repo = Git2Repository::open(".")?;
    let options = PublishOptions::from_config(&config.release, true, push);

    let result =
        orchestration::run_tag(&changelog_store(config), &repo, &config.release, &options)?;
    if !result.created {
        ui::display_warning(&crate::warnings::ReleaseWarning::TagExists { tag: result.tag });
        return Ok(());
    }

    ui::display_success(&format!("Git tag {} created", result.tag));
    if result.pushed {
        ui::display_success("Changes pushed with tags");
    } else {
        ui::display_manual_push_instruction(&options.remote);
    }
    Ok(())
}

fn publish(config: &Config, yes: bool, push: bool) -> Result<()> {
    let repo = Git2Repository::open(".")?;
    let options = PublishOptions::from_config(&config.release, yes, push);

    ui::display_status(&format!(
        "Preparing release from {}",
        config.paths.changeset_dir.display()
    ));
    let result = orchestration::run_publish(
        &aggregator(config),
        &repo,
        &config.release,
        &options,
        |batch, tag| {
            ui::display_release_preview(batch, tag);
            ui::confirm_action("Do you want to continue with this release?")
        },
    )?;

    for warning in &result.warnings {
        ui::display_warning(warning);
    }
    if result.committed {
        ui::display_success(&format!(
            "Committed release changes: {}",
            config.release.render_commit_message(&result.tag)
        ));
    }
    if result.pushed {
        ui::display_success("Changes pushed with tags");
    } else {
        ui::display_manual_push_instruction(&options.remote);
    }
    ui::display_success(&format!("Published: {}", result.tag));
    Ok(())
}
