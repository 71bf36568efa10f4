use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ChangesetError, Result};

/// File name looked up in the working directory and the user config directory.
pub const CONFIG_FILE_NAME: &str = "changeset.toml";

/// Represents the complete configuration for the changeset tool.
///
/// Contains the storage locations and release behaviour (tagging, committing, pushing).
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub release: ReleaseConfig,
}

fn default_changeset_dir() -> PathBuf {
    PathBuf::from(".changesets")
}

fn default_changelog() -> PathBuf {
    PathBuf::from("CHANGELOG.md")
}

fn default_note_extension() -> String {
    "md".to_string()
}

/// Where pending notes and the changelog live.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PathsConfig {
    #[serde(default = "default_changeset_dir")]
    pub changeset_dir: PathBuf,

    #[serde(default = "default_changelog")]
    pub changelog: PathBuf,

    /// Only entries with this extension are treated as notes
    #[serde(default = "default_note_extension")]
    pub note_extension: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            changeset_dir: default_changeset_dir(),
            changelog: default_changelog(),
            note_extension: default_note_extension(),
        }
    }
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_tag_prefix() -> String {
    "v".to_string()
}

fn default_commit_message() -> String {
    "chore: release {tag}".to_string()
}

fn default_tag_message() -> String {
    "release {tag}".to_string()
}

/// Configuration for the version-control side of a release.
///
/// `{tag}` in the message templates is replaced by the full tag name.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,

    #[serde(default = "default_commit_message")]
    pub commit_message: String,

    #[serde(default = "default_tag_message")]
    pub tag_message: String,

    #[serde(default)]
    pub push: bool,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            remote: default_remote(),
            tag_prefix: default_tag_prefix(),
            commit_message: default_commit_message(),
            tag_message: default_tag_message(),
            push: false,
        }
    }
}

impl ReleaseConfig {
    /// Tag name for a released version, e.g. `v1.2.3`
    pub fn tag_name(&self, version: &str) -> String {
        format!("{}{}", self.tag_prefix, version)
    }

    pub fn render_commit_message(&self, tag: &str) -> String {
        self.commit_message.replace("{tag}", tag)
    }

    pub fn render_tag_message(&self, tag: &str) -> String {
        self.tag_message.replace("{tag}", tag)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `changeset.toml` in current directory
/// 3. `changeset.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);

    let path = if let Some(path) = config_path {
        path.to_path_buf()
    } else if local.exists() {
        local
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_path = config_dir.join(CONFIG_FILE_NAME);
        if user_path.exists() {
            user_path
        } else {
            tracing::debug!("no configuration file found, using defaults");
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    tracing::debug!(path = %path.display(), "loading configuration");
    let config_str = fs::read_to_string(&path).map_err(|e| {
        ChangesetError::config(format!("cannot read {}: {}", path.display(), e))
    })?;

    toml::from_str(&config_str)
        .map_err(|e| ChangesetError::config(format!("cannot parse {}: {}", path.display(), e)))
}
