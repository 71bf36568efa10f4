//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user interaction.
//! The `format_*` functions build strings and are testable; `display_*` print them.

use console::style;

use crate::aggregator::{ApplyReport, ReleaseBatch};
use crate::domain::ReleaseType;
use crate::warnings::ReleaseWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a release warning to the user.
pub fn display_warning(warning: &ReleaseWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Build the release preview shown before publishing.
///
/// Lists the pending bump, the next version and how many notes each group holds.
pub fn format_release_preview(batch: &ReleaseBatch, tag: &str) -> String {
    let mut lines = vec![
        "Release preview".to_string(),
        "------------------".to_string(),
        format!(" Pending bump : {}", batch.release_type),
        format!(" Next version : {}", tag),
    ];

    for release_type in ReleaseType::ALL {
        let count = batch.count(release_type);
        if count > 0 {
            lines.push(format!(
                " {:<13}: {}",
                release_type.heading(),
                count
            ));
        }
    }

    lines.join("\n")
}

/// Display the release preview.
pub fn display_release_preview(batch: &ReleaseBatch, tag: &str) {
    println!("\n{}\n", style(format_release_preview(batch, tag)).bold());
}

/// Display the outcome of applying changesets, including leftover warnings.
pub fn display_apply_report(report: &ApplyReport, tag: &str) {
    display_success(&format!(
        "Version bumped to {} ({} bump, {} changesets)",
        tag, report.release_type, report.consumed
    ));
    for warning in &report.warnings {
        display_warning(warning);
    }
}

/// Display manual push instruction for a release.
pub fn display_manual_push_instruction(remote: &str) {
    println!(
        "\n{} To push this release later, run:\n  {}",
        style("→").yellow(),
        style(format!("git push --follow-tags {}", remote)).cyan()
    );
}
