//! Error types for Kingpad

use thiserror::Error;

/// Result type alias for Kingpad operations
pub type Result<T> = std::result::Result<T, KingpadError>;

/// Kingpad error types
#[derive(Error, Debug)]
pub enum KingpadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Cannot write configuration: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("No file name")]
    NoFileName,

    #[error("Document {0} has unsaved changes")]
    Unsaved(String),

    #[error("No such tab: {0}")]
    NoSuchTab(usize),

    #[error("{0}")]
    Message(String),
}
