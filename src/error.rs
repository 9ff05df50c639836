use thiserror::Error;

/// Unified error type for lean-update operations
#[derive(Error, Debug)]
pub enum UpdateError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Unsupported manifest: {0}")]
    UnsupportedManifest(String),

    #[error("Could not find {}.\nHint: {hint}", .tried.join(" or "))]
    MissingManifest { tried: Vec<String>, hint: String },

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("External tool failed: {0}")]
    Tool(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml_edit::TomlError),
}

/// Convenience type alias for Results in lean-update
pub type Result<T> = std::result::Result<T, UpdateError>;

impl UpdateError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        UpdateError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        UpdateError::Version(msg.into())
    }

    /// Create an unsupported-manifest error with context
    pub fn unsupported_manifest(msg: impl Into<String>) -> Self {
        UpdateError::UnsupportedManifest(msg.into())
    }

    /// Create a manifest error with context
    pub fn manifest(msg: impl Into<String>) -> Self {
        UpdateError::Manifest(msg.into())
    }

    /// Create an external tool error with context
    pub fn tool(msg: impl Into<String>) -> Self {
        UpdateError::Tool(msg.into())
    }
}
