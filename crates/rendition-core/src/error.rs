//! Error types for rendition-core.

use thiserror::Error;

/// Error type for buffer construction and configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid buffer shape: {0}")]
    InvalidShape(String),

    #[error("Invalid sample rate: {0} Hz")]
    InvalidRate(u32),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
