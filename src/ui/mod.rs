//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling

use std::io::{self, BufRead, Write};

use anyhow::Result;

use crate::domain::ReleaseType;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_apply_report, display_error, display_manual_push_instruction,
    display_release_preview, display_status, display_success, display_warning,
};

/// Prompts user to select the release type of a new changeset.
///
/// Displays the numbered severities and accepts a 1-based index or the type's name.
/// Default selection is `patch` if user presses Enter.
///
/// # Returns
/// * `Ok(ReleaseType)` - The selected release type
/// * `Err` - If selection is invalid or input fails
pub fn select_release_type() -> Result<ReleaseType> {
    select_release_type_from(&mut io::stdin().lock(), &mut io::stdout())
}

/// [select_release_type] over arbitrary input and output streams.
pub fn select_release_type_from<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<ReleaseType> {
    writeln!(output, "\nSelect release type:")?;
    for (i, release_type) in ReleaseType::ALL.iter().enumerate() {
        writeln!(output, "  {}. {}", i + 1, release_type)?;
    }
    write!(output, "\nRelease type (1-3) [default: patch]: ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let selection = line.trim();

    if selection.is_empty() {
        return Ok(ReleaseType::Patch);
    }

    if let Ok(index) = selection.parse::<usize>() {
        return ReleaseType::ALL
            .get(index.wrapping_sub(1))
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Invalid selection: {}", selection));
    }

    Ok(selection.parse::<ReleaseType>()?)
}

/// Prompts user for the one-line description of a change.
///
/// # Returns
/// * `Ok(String)` - The trimmed description
/// * `Err` - If the description is empty or input fails
pub fn prompt_description() -> Result<String> {
    prompt_description_from(&mut io::stdin().lock(), &mut io::stdout())
}

/// [prompt_description] over arbitrary input and output streams.
pub fn prompt_description_from<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<String> {
    write!(output, "Enter change description: ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let description = line.trim();

    if description.is_empty() {
        return Err(anyhow::anyhow!("Change description must not be empty"));
    }
    Ok(description.to_string())
}

/// Prompts user to confirm an action with a yes/no prompt.
///
/// Accepts "y" or "yes" (case-insensitive) as confirmation.
/// Default is "no" if user presses Enter.
///
/// # Arguments
/// * `prompt` - The prompt message to display (without the "(y/N): " suffix)
///
/// # Returns
/// * `Ok(true)` - If user entered "y" or "yes"
/// * `Ok(false)` - Otherwise (including Enter, or "n"/"no")
/// * `Err` - If input error occurs
pub fn confirm_action(prompt: &str) -> Result<bool> {
    confirm_action_from(prompt, &mut io::stdin().lock(), &mut io::stdout())
}

/// [confirm_action] over arbitrary input and output streams.
pub fn confirm_action_from<R: BufRead, W: Write>(
    prompt: &str,
    input: &mut R,
    output: &mut W,
) -> Result<bool> {
    write!(output, "\n{} (y/N): ", prompt)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    let response = line.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}
