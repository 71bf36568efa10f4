use thiserror::Error;

/// Unified error type for changeset operations
#[derive(Error, Debug)]
pub enum ChangesetError {
    #[error("No changesets found")]
    NotFound,

    #[error("No valid bump types found in changesets")]
    NoValidNotes,

    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    #[error("Unknown release type: {0}")]
    InvalidBumpType(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("Operation cancelled by user")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in changeset operations
pub type Result<T> = std::result::Result<T, ChangesetError>;

impl ChangesetError {
    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ChangesetError::InvalidVersion(msg.into())
    }

    /// Create a bump type error with context
    pub fn bump_type(msg: impl Into<String>) -> Self {
        ChangesetError::InvalidBumpType(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ChangesetError::Config(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        ChangesetError::Tag(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        ChangesetError::Remote(msg.into())
    }

    /// Process exit code the command layer reports for this error.
    ///
    /// 1 = nothing to do or validation failure, 2 = cancelled by the user,
    /// 3 = the version-control tool failed.
    pub fn exit_code(&self) -> i32 {
        match self {
            ChangesetError::Cancelled => 2,
            ChangesetError::Git(_) | ChangesetError::Tag(_) | ChangesetError::Remote(_) => 3,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ChangesetError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ChangesetError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_constructors() {
        assert!(ChangesetError::version("1.2")
            .to_string()
            .contains("Invalid version"));
        assert!(ChangesetError::bump_type("huge")
            .to_string()
            .contains("huge"));
        assert!(ChangesetError::tag("test").to_string().contains("Tag"));
    }

    #[test]
    fn test_exit_codes() {
        let cases = vec![
            (ChangesetError::NotFound, 1),
            (ChangesetError::NoValidNotes, 1),
            (ChangesetError::version("x"), 1),
            (ChangesetError::config("x"), 1),
            (ChangesetError::Cancelled, 2),
            (ChangesetError::tag("x"), 3),
            (ChangesetError::remote("x"), 3),
        ];

        for (err, code) in cases {
            assert_eq!(err.exit_code(), code, "unexpected exit code for {}", err);
        }
    }

    #[test]
    fn test_git_error_maps_to_vcs_exit_code() {
        let err: ChangesetError = git2::Error::from_str("boom").into();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().starts_with("Git operation failed"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (ChangesetError::NotFound, "No changesets found"),
            (ChangesetError::NoValidNotes, "No valid bump types"),
            (ChangesetError::config("x"), "Configuration error"),
            (ChangesetError::remote("x"), "Remote operation failed"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
