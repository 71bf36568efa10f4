//! Domain logic - pure release rules independent of storage and git

pub mod note;
pub mod release_type;
pub mod version;

pub use note::{extract_description, ChangeNote};
pub use release_type::ReleaseType;
pub use version::{bump_version, Version};
