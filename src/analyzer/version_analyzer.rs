use crate::analyzer::classifier::dominant_bump;
use crate::domain::{ChangeNote, ReleaseType, Version};
use crate::error::{ChangesetError, Result};
use crate::store::ChangelogStore;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Release heading: `##`, optional blanks, optional `v`, then `X.Y.Z`
static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^##[ \t]*v?(\d+)\.(\d+)\.(\d+)").expect("heading pattern is valid")
});

/// Latest released version recorded in a changelog document.
///
/// Sections are prepended, so the first heading in document order is the latest.
/// A missing document or one without headings yields `0.0.0`. A heading whose
/// numbers do not fit a version component is `InvalidVersion`.
pub fn latest_version(changelog: Option<&str>) -> Result<Version> {
    let Some(document) = changelog else {
        return Ok(Version::INITIAL);
    };

    let Some(captures) = HEADING.captures(document) else {
        debug!("no release heading in changelog");
        return Ok(Version::INITIAL);
    };

    let heading = captures.get(0).map(|m| m.as_str()).unwrap_or_default();
    let component = |index: usize| -> Result<u64> {
        let digits = captures.get(index).map(|m| m.as_str()).unwrap_or_default();
        digits.parse::<u64>().map_err(|e| {
            ChangesetError::version(format!("changelog heading '{}': {}", heading.trim(), e))
        })
    };

    let version = Version::new(component(1)?, component(2)?, component(3)?);
    debug!(%version, "latest version from changelog");
    Ok(version)
}

/// Latest version read through a changelog store.
///
/// An unreadable changelog counts as absent here, as the bootstrap state.
pub fn latest_version_in<C>(store: &C) -> Result<Version>
where
    C: ChangelogStore + ?Sized,
{
    match store.read() {
        Ok(content) => latest_version(content.as_deref()),
        Err(e) => {
            warn!(changelog = %store.location(), error = %e, "changelog unreadable, assuming no release");
            Ok(Version::INITIAL)
        }
    }
}

/// Next version and bump type for a batch of notes against a changelog.
///
/// Pure: nothing is written.
pub fn compute_next(
    changelog: Option<&str>,
    notes: &[ChangeNote],
) -> Result<(Version, ReleaseType)> {
    let release_type = dominant_bump(notes)?;
    let current = latest_version(changelog)?;
    let next = current.bump(release_type)?;
    debug!(%current, %next, %release_type, "computed next version");
    Ok((next, release_type))
}
