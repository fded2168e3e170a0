//! Decoder seam.
//!
//! Decoding compressed or container audio is left to the host (a browser
//! decoder, symphonia, ...). Anything that can produce a [`SampleBuffer`]
//! plugs in here.

use crate::error::Result;
use rendition_core::SampleBuffer;

/// Turns an encoded audio file into float PCM.
///
/// Implementations report corrupt or unsupported input as
/// [`ExportError::Decode`](crate::ExportError::Decode).
pub trait AudioDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<SampleBuffer>;
}

impl<F> AudioDecoder for F
where
    F: Fn(&[u8]) -> Result<SampleBuffer>,
{
    fn decode(&self, bytes: &[u8]) -> Result<SampleBuffer> {
        self(bytes)
    }
}
