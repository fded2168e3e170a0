//! Multi-channel float PCM buffer.
//!
//! A `SampleBuffer` is created once (usually by a decoder) and only read
//! afterwards. Rendering produces a new buffer instead of mutating the
//! input, so the same source can be exported repeatedly with different
//! parameters.

use crate::{Error, Result};

/// Planar 32-bit float audio with a fixed sample rate.
///
/// Every channel holds exactly `frames()` samples. Values are nominally in
/// `[-1.0, 1.0]`; anything outside is kept as-is until an encoder narrows it.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    sample_rate: u32,
    frames: usize,
    channels: Vec<Vec<f32>>,
}

impl SampleBuffer {
    /// Create a buffer from per-channel sample vectors.
    ///
    /// Fails with [`Error::InvalidRate`] if `sample_rate` is zero and with
    /// [`Error::InvalidShape`] if there are no channels or their lengths differ.
    pub fn new(sample_rate: u32, channels: Vec<Vec<f32>>) -> Result<Self> {
        if sample_rate == 0 {
            return Err(Error::InvalidRate(sample_rate));
        }

        let frames = match channels.first() {
            Some(first) => first.len(),
            None => {
                return Err(Error::InvalidShape(
                    "buffer must have at least one channel".into(),
                ))
            }
        };

        if let Some((index, channel)) = channels
            .iter()
            .enumerate()
            .find(|(_, channel)| channel.len() != frames)
        {
            return Err(Error::InvalidShape(format!(
                "channel {} has {} frames, expected {}",
                index,
                channel.len(),
                frames
            )));
        }

        Ok(Self {
            sample_rate,
            frames,
            channels,
        })
    }

    /// Create a single-channel buffer.
    pub fn mono(sample_rate: u32, samples: Vec<f32>) -> Result<Self> {
        Self::new(sample_rate, vec![samples])
    }

    /// Create a two-channel buffer.
    pub fn stereo(sample_rate: u32, left: Vec<f32>, right: Vec<f32>) -> Result<Self> {
        Self::new(sample_rate, vec![left, right])
    }

    /// Create a zero-filled buffer.
    pub fn silence(sample_rate: u32, channel_count: usize, frames: usize) -> Result<Self> {
        Self::new(sample_rate, vec![vec![0.0; frames]; channel_count])
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Samples per channel.
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames == 0
    }

    /// Samples of one channel, or `None` if `index` is out of range.
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    /// Iterate over channels in order.
    pub fn channels(&self) -> impl ExactSizeIterator<Item = &[f32]> + '_ {
        self.channels.iter().map(Vec::as_slice)
    }

    /// Consume the buffer, returning the per-channel data.
    pub fn into_channels(self) -> Vec<Vec<f32>> {
        self.channels
    }

    pub fn duration_seconds(&self) -> f64 {
        self.frames as f64 / self.sample_rate as f64
    }

    /// Largest absolute sample value across all channels.
    pub fn peak(&self) -> f32 {
        self.channels
            .iter()
            .flatten()
            .map(|s| s.abs())
            .fold(0.0f32, f32::max)
    }

    /// Frame-major interleaved samples [c0, c1, ..., c0, c1, ...].
    ///
    /// Mono buffers come back unchanged.
    pub fn interleaved(&self) -> Vec<f32> {
        if let [only] = self.channels.as_slice() {
            return only.clone();
        }

        let mut result = Vec::with_capacity(self.frames * self.channels.len());
        for i in 0..self.frames {
            for channel in &self.channels {
                result.push(channel[i]);
            }
        }
        result
    }
}
