/*!
 * Error types for the slideline library.
 *
 * This module contains custom error types for the timeline builder and the
 * subtitle exporter, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors raised while validating or building a timeline
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimelineError {
    /// The request is structurally unusable; no timeline is produced
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl TimelineError {
    /// Shorthand for building an `InvalidInput` error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

/// Errors that can occur while exporting subtitles
#[derive(Error, Debug)]
pub enum ExportError {
    /// A timeline entry has a time that cannot be expressed as a subtitle timestamp
    #[error("Invalid timestamp for cue {cue}: {seconds}s")]
    InvalidTimestamp {
        /// 1-based cue number
        cue: usize,
        /// Offending time in seconds
        seconds: f64,
    },

    /// Writing the subtitle file failed
    #[error("Failed to write subtitle file: {0}")]
    Io(#[from] std::io::Error),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from timeline building
    #[error("Timeline error: {0}")]
    Timeline(#[from] TimelineError),

    /// Error from subtitle export
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
