//! Changelog section rendering.
//!
//! A section looks like:
//!
//! ```text
//! ## 0.1.0
//!
//! ### Minor Changes
//!
//! - Add feature X
//!
//! ### Patch Changes
//!
//! - Fix bug Y
//!
//! ```
//!
//! Groups appear in Major, Minor, Patch order and empty groups are left out.

use crate::domain::{ChangeNote, ReleaseType, Version};

/// Render the section for a release of `version` from its notes.
pub fn render_section(version: &Version, notes: &[ChangeNote]) -> String {
    let mut section = String::new();
    section.push_str(&format!("## {}\n\n", version));

    for release_type in ReleaseType::ALL {
        let items: Vec<&str> = notes
            .iter()
            .filter(|note| note.severity == release_type)
            .map(|note| note.description.as_str())
            .collect();

        if items.is_empty() {
            continue;
        }

        section.push_str(&format!("### {}\n\n", release_type.heading()));
        for item in items {
            section.push_str(&format!("- {}\n", item));
        }
        section.push('\n');
    }

    section
}

/// Place a new section before everything already in the document.
pub fn prepend(existing: Option<&str>, section: &str) -> String {
    match existing {
        Some(existing) => format!("{}{}", section, existing),
        None => section.to_string(),
    }
}
