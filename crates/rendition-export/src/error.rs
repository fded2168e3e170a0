//! Error types for rendition-export

use std::io;
use thiserror::Error;

/// Export error type
#[derive(Error, Debug)]
pub enum ExportError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Buffer construction failed (shape or sample rate)
    #[error(transparent)]
    Buffer(#[from] rendition_core::Error),

    /// Bad speed, cutoff, rolloff or filter settings
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Encoding was asked for a buffer with no frames
    #[error("Buffer has no frames to encode")]
    EmptyBuffer,

    /// Input audio could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Unsupported format or file extension
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Invalid audio data
    #[error("Invalid audio data: {0}")]
    InvalidData(String),

    /// Export abandoned through its handle
    #[error("Export cancelled")]
    Cancelled,

    /// Background export thread panicked
    #[error("Export thread panicked")]
    Panicked,
}

/// Result type for export operations
pub type Result<T> = std::result::Result<T, ExportError>;

impl From<rendition_dsp::Error> for ExportError {
    fn from(e: rendition_dsp::Error) -> Self {
        match e {
            rendition_dsp::Error::InvalidParameters(msg) => ExportError::InvalidParameters(msg),
        }
    }
}
