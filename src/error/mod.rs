//! Error handling module for BatchCut

use thiserror::Error;

/// Main error type for BatchCut operations
#[derive(Error, Debug)]
pub enum BatchCutError {
    /// Input file not found or inaccessible
    #[error("Input file not found: {path}")]
    InputFileNotFound { path: String },

    /// Unrecognized media container extension
    #[error("Unsupported file extension: {path}")]
    UnsupportedExtension { path: String },

    /// Invalid time format
    #[error("Invalid time format: {time}. Expected HH:MM:SS.ms, MM:SS.ms, or seconds")]
    InvalidTimeFormat { time: String },

    /// Invalid rotation value
    #[error("Invalid rotation: {value}. Expected 0, 90, 180, or 270")]
    InvalidRotation { value: String },

    /// Media probe error
    #[error("Failed to probe media file: {message}")]
    ProbeError { message: String },

    /// The probed file carries no video stream
    #[error("No video stream found in: {path}")]
    NoVideoStream { path: String },

    /// External engine process could not be spawned
    #[error("Failed to start engine process: {message}")]
    SpawnError { message: String },

    /// Configuration file error
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for BatchCut operations
pub type BatchCutResult<T> = std::result::Result<T, BatchCutError>;
