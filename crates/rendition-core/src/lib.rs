//! Data model for offline audio rendering.
//!
//! # Primary API
//!
//! - [`SampleBuffer`]: planar float PCM with sample rate and frame count
//! - [`RenderConfig`]: accepted sample-rate range
//!
//! Buffers are immutable after construction; processing stages always
//! produce a new buffer.

pub mod error;
pub use error::{Error, Result};

mod buffer;
pub use buffer::SampleBuffer;

mod config;
pub use config::RenderConfig;
