//! Note classification and version computation

pub mod classifier;
pub mod version_analyzer;

pub use classifier::{classify, collect_notes, dominant_bump};
pub use version_analyzer::{compute_next, latest_version, latest_version_in};
