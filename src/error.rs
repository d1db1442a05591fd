//! Error types for the beatmap pipeline

use std::fmt;
use std::path::PathBuf;

/// Errors that can occur while turning an audio file into a beatmap
#[derive(Debug, Clone)]
pub enum BeatmapError {
    /// Missing or malformed command-line argument
    InvalidArgument(String),

    /// Audio decoding error (unreadable path, unsupported codec, corrupt stream)
    DecodingError(String),

    /// Invalid parameters passed to onset detection
    InvalidInput(String),

    /// Processing error during detection or encoding
    ProcessingError(String),

    /// Output file could not be written
    WriteError {
        /// Target path
        path: PathBuf,
        /// Underlying error message
        message: String,
    },
}

impl BeatmapError {
    /// Pipeline stage that failed, for user-facing reports
    pub fn stage(&self) -> &'static str {
        match self {
            BeatmapError::InvalidArgument(_) => "argument parsing",
            BeatmapError::DecodingError(_) => "decode",
            BeatmapError::InvalidInput(_) | BeatmapError::ProcessingError(_) => "onset detection",
            BeatmapError::WriteError { .. } => "write",
        }
    }
}

impl fmt::Display for BeatmapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BeatmapError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            BeatmapError::DecodingError(msg) => write!(f, "Decoding error: {}", msg),
            BeatmapError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            BeatmapError::ProcessingError(msg) => write!(f, "Processing error: {}", msg),
            BeatmapError::WriteError { path, message } => {
                write!(f, "Write error: {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for BeatmapError {}

impl From<symphonia::core::errors::Error> for BeatmapError {
    fn from(err: symphonia::core::errors::Error) -> Self {
        BeatmapError::DecodingError(err.to_string())
    }
}
