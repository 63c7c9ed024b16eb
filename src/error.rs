use thiserror::Error;

/// Main error type for the image-style library
#[derive(Error, Debug)]
pub enum ImageStyleError {
    #[error("Style error: {0}")]
    Style(#[from] StyleError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Style-selection errors
#[derive(Error, Debug)]
pub enum StyleError {
    #[error("Unknown style identifier: {name}")]
    UnknownStyle { name: String },
}

/// Settings persistence errors
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to serialize settings: {reason}")]
    SerializeFailed { reason: String },

    #[error("Failed to write settings file: {path}")]
    WriteFailed { path: String },
}

/// Convenience type alias for Results using ImageStyleError
pub type Result<T> = std::result::Result<T, ImageStyleError>;
