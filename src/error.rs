use thiserror::Error;

/// Unified error type for mono-publish operations
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Bundler failed: {0}")]
    Bundler(String),

    #[error("Version tool failed: {0}")]
    VersionTool(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in mono-publish
pub type Result<T> = std::result::Result<T, PublishError>;

impl PublishError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        PublishError::Config(msg.into())
    }

    /// Create a manifest error with context
    pub fn manifest(msg: impl Into<String>) -> Self {
        PublishError::Manifest(msg.into())
    }

    /// Create a bundler error with context
    pub fn bundler(msg: impl Into<String>) -> Self {
        PublishError::Bundler(msg.into())
    }

    /// Create a version-tool error with context
    pub fn version_tool(msg: impl Into<String>) -> Self {
        PublishError::VersionTool(msg.into())
    }

    /// Create a version parsing error with context
    pub fn version(msg: impl Into<String>) -> Self {
        PublishError::Version(msg.into())
    }
}
