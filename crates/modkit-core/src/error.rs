//! Error types for modkit

use thiserror::Error;

/// The main error type for modkit operations
#[derive(Debug, Error)]
pub enum ModkitError {
    #[error("Unsupported audio format: {0}")]
    UnsupportedAudioFormat(String),

    #[error("Unsupported texture format: {0}")]
    UnsupportedTextureFormat(String),

    #[error("Conversion failed: {0}")]
    ConversionFailed(String),

    #[error("Unsupported converter: {0}")]
    UnsupportedConverter(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Manifest error: {0}")]
    ManifestError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Archive error: {0}")]
    ArchiveError(String),

    #[error("Job not found: {0}")]
    JobNotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for modkit operations
pub type Result<T> = std::result::Result<T, ModkitError>;

impl From<serde_json::Error> for ModkitError {
    fn from(err: serde_json::Error) -> Self {
        ModkitError::ManifestError(err.to_string())
    }
}
