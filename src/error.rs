//! Centralized error type for the rendition umbrella crate.
//!
//! Wraps all subsystem errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] rendition_core::Error),

    #[error("DSP: {0}")]
    Dsp(#[from] rendition_dsp::Error),

    #[cfg(feature = "export")]
    #[error("Export: {0}")]
    Export(#[from] rendition_export::ExportError),
}

pub type Result<T> = std::result::Result<T, Error>;
