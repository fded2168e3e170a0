//! # Rendition Export
//!
//! Offline rendering and WAV export.
//!
//! This crate provides:
//! - **Render pipeline**: speed-linked linear resampling and an optional
//!   biquad filter per channel, over a whole buffer at once
//! - **WAV encoding**: byte-exact canonical RIFF/WAVE, 16-bit PCM or 32-bit float
//! - **Export service**: render + encode in one call, or on a background
//!   thread with progress polling and cancellation
//!
//! ```
//! use rendition_export::{encode_wav, BitDepth, RenderParameters, RenderPipeline, SampleBuffer};
//!
//! let source = SampleBuffer::mono(44100, vec![0.0; 44100])?;
//! let rendered = RenderPipeline::new().render(&source, &RenderParameters::default().speed(2.0))?;
//! assert_eq!(rendered.frames(), 22050);
//!
//! let bytes = encode_wav(&rendered, BitDepth::Int16)?;
//! assert_eq!(bytes.len(), 44 + 22050 * 2);
//! # Ok::<(), rendition_export::ExportError>(())
//! ```

// Core modules
pub mod error;
pub mod export_builder;
mod handle;
mod options;
pub mod renderer;

// Advanced APIs
pub mod decode;
pub mod format;

// Re-exports
pub use decode::AudioDecoder;
pub use error::{ExportError, Result};
pub use export_builder::{ExportPhase, ExportProgress, Exporter};
pub use handle::{ExportHandle, ExportStatus};
pub use options::{BitDepth, RenderParameters, DEFAULT_FILE_NAME};
pub use renderer::RenderPipeline;

pub use format::wav::{encode_wav, write_wav_file, WavEncoder, WavHeader};

pub use rendition_core::SampleBuffer;
pub use rendition_dsp::FilterKind;
