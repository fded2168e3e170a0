//! # Rendition - Offline Audio Renderer
//!
//! Loads nothing and plays nothing: give it decoded float PCM and a set of
//! render parameters, get back a processed buffer or a WAV file.
//!
//! ## Architecture
//!
//! Rendition is an umbrella crate that coordinates:
//! - **rendition-core** - `SampleBuffer` data model and render configuration
//! - **rendition-dsp** - Biquad filter stages (lowpass, highpass, bandpass)
//! - **rendition-export** - Render pipeline, WAV encoder, background export
//!
//! ## Quick Start
//!
//! ```ignore
//! use rendition::prelude::*;
//!
//! let source = SampleBuffer::stereo(44100, left, right)?;
//!
//! Exporter::new(source)
//!     .params(RenderParameters::default().speed(1.5).filter(FilterKind::Lowpass, 1200.0))
//!     .bit_depth(BitDepth::Int16)
//!     .to_file(DEFAULT_FILE_NAME)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `default` - Everything (`export`)
//! - `export` - Render pipeline, WAV encoding and export handle

/// Re-export of rendition-core for direct access
pub use rendition_core as core;

/// Re-export of rendition-dsp for direct access
pub use rendition_dsp as dsp;

// Core types
pub use rendition_core::{RenderConfig, SampleBuffer};

// DSP types
pub use rendition_dsp::{FilterKind, FilterStage, Rolloff};

// Export subsystem
#[cfg(feature = "export")]
pub use rendition_export as export;

#[cfg(feature = "export")]
pub use rendition_export::{
    encode_wav, write_wav_file, AudioDecoder, BitDepth, ExportError, ExportHandle, ExportPhase,
    ExportProgress, ExportStatus, Exporter, RenderParameters, RenderPipeline, WavEncoder,
    WavHeader, DEFAULT_FILE_NAME,
};

mod error;
pub use error::{Error, Result};

/// Convenient imports for common usage
pub mod prelude {
    pub use crate::{Error, FilterKind, FilterStage, RenderConfig, Result, Rolloff, SampleBuffer};

    #[cfg(feature = "export")]
    pub use crate::{
        encode_wav, AudioDecoder, BitDepth, ExportHandle, ExportStatus, Exporter,
        RenderParameters, RenderPipeline, WavEncoder, WavHeader, DEFAULT_FILE_NAME,
    };
}
