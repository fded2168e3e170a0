//! Error types for rendition-dsp

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid parameter: {0}")]
    InvalidParameters(String),
}

pub type Result<T> = std::result::Result<T, Error>;
