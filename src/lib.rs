pub mod aggregator;
pub mod analyzer;
pub mod changelog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod store;
pub mod ui;
pub mod warnings;

pub use error::{ChangesetError, Result};
