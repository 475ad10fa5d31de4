use thiserror::Error;

/// Unified error type for version-bump operations
#[derive(Error, Debug)]
pub enum VersionBumpError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Version bump error: {0}")]
    Version(String),

    #[error("Git command failed: {0}")]
    Git(String),

    #[error("Missing environment variable: {0}")]
    Env(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in version-bump
pub type Result<T> = std::result::Result<T, VersionBumpError>;

impl VersionBumpError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        VersionBumpError::Config(msg.into())
    }

    /// Create a manifest error with context
    pub fn manifest(msg: impl Into<String>) -> Self {
        VersionBumpError::Manifest(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        VersionBumpError::Version(msg.into())
    }

    /// Create a git error with context
    pub fn git(msg: impl Into<String>) -> Self {
        VersionBumpError::Git(msg.into())
    }

    /// Create an error for a missing environment variable
    pub fn env(var: impl Into<String>) -> Self {
        VersionBumpError::Env(var.into())
    }
}
