//! Offline render pipeline
//!
//! The `RenderPipeline` turns a source buffer plus [`RenderParameters`] into
//! a new buffer: speed-linked linear resampling followed by an optional
//! filter stage per channel. It never touches the source, so the same input
//! can be rendered again with other settings.

use crate::error::{ExportError, Result};
use crate::export_builder::{ExportPhase, ExportProgress};
use crate::format::wav::MAX_DATA_LEN;
use crate::options::RenderParameters;
use rendition_core::{RenderConfig, SampleBuffer};
use rendition_dsp::FilterStage;

/// Offline renderer for whole buffers.
///
/// By default any buffer rate is accepted; [`RenderPipeline::with_config`]
/// narrows it to a host-chosen range.
#[derive(Debug, Clone, Default)]
pub struct RenderPipeline {
    config: Option<RenderConfig>,
}

impl RenderPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only accept buffers whose rate falls inside `config`.
    pub fn with_config(config: RenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: Some(config),
        })
    }

    pub fn config(&self) -> Option<&RenderConfig> {
        self.config.as_ref()
    }

    /// Render `input` with `params`.
    pub fn render(&self, input: &SampleBuffer, params: &RenderParameters) -> Result<SampleBuffer> {
        self.render_with_progress(input, params, |_| {})
    }

    /// Render, reporting per-channel progress for the resampling and
    /// filtering phases.
    pub fn render_with_progress(
        &self,
        input: &SampleBuffer,
        params: &RenderParameters,
        on_progress: impl Fn(ExportProgress),
    ) -> Result<SampleBuffer> {
        params.validate()?;
        if let Some(config) = &self.config {
            config.check_sample_rate(input.sample_rate())?;
        }

        let output_frames = output_frames(input.frames(), params.speed_factor)?;

        // Build filters up front so a bad cutoff fails before any work is done
        let mut filters = if params.filter_kind.is_none() {
            Vec::new()
        } else {
            let rolloff = params.rolloff_sections()?;
            (0..input.channel_count())
                .map(|_| {
                    FilterStage::with_q(
                        params.filter_kind,
                        params.cutoff_hz,
                        rolloff,
                        params.section_q(),
                        input.sample_rate(),
                    )
                })
                .collect::<std::result::Result<Vec<_>, _>>()?
        };

        let channel_count = input.channel_count();
        let mut channels = Vec::with_capacity(channel_count);

        on_progress(ExportProgress {
            phase: ExportPhase::Resampling,
            progress: 0.0,
        });
        for (index, source) in input.channels().enumerate() {
            channels.push(resample_linear(source, params.speed_factor, output_frames));
            on_progress(ExportProgress {
                phase: ExportPhase::Resampling,
                progress: (index + 1) as f32 / channel_count as f32,
            });
        }

        if !filters.is_empty() {
            on_progress(ExportProgress {
                phase: ExportPhase::Filtering,
                progress: 0.0,
            });
            let pairs = channels.iter_mut().zip(filters.iter_mut());
            for (index, (channel, filter)) in pairs.enumerate() {
                filter.process_slice(channel);
                on_progress(ExportProgress {
                    phase: ExportPhase::Filtering,
                    progress: (index + 1) as f32 / channel_count as f32,
                });
            }
        }

        let output = SampleBuffer::new(input.sample_rate(), channels)?;
        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "Rendered {} ch x {} frames -> {} frames (speed {}, filter {} @ {} Hz, peak {:.3})",
                channel_count,
                input.frames(),
                output_frames,
                params.speed_factor,
                params.filter_kind,
                params.cutoff_hz,
                output.peak()
            );
        }

        Ok(output)
    }
}

/// Most frames any WAV file can carry (16-bit mono).
pub const MAX_OUTPUT_FRAMES: u64 = MAX_DATA_LEN / 2;

/// `ceil(frames / speed_factor)`, rejecting lengths no WAV file can hold.
///
/// The check runs before any allocation. Wider frames (more channels or
/// float samples) hold less, so a render that passes here can still be
/// refused by the encoder with [`ExportError::InvalidData`].
pub fn output_frames(frames: usize, speed_factor: f64) -> Result<usize> {
    let exact = (frames as f64 / speed_factor).ceil();
    if !exact.is_finite() || exact > MAX_OUTPUT_FRAMES as f64 {
        return Err(ExportError::InvalidParameters(format!(
            "speed factor {} yields an output of {} frames",
            speed_factor, exact
        )));
    }
    Ok(exact as usize)
}

/// Resample one channel to `output_frames` samples.
///
/// Output index `i` reads the source at fractional position
/// `i * speed_factor` with linear interpolation; positions past the last
/// source sample read as silence.
pub fn resample_linear(source: &[f32], speed_factor: f64, output_frames: usize) -> Vec<f32> {
    if speed_factor == 1.0 {
        let mut out = source[..output_frames.min(source.len())].to_vec();
        out.resize(output_frames, 0.0);
        return out;
    }

    let at = |index: usize| source.get(index).copied().unwrap_or(0.0) as f64;

    (0..output_frames)
        .map(|i| {
            let position = i as f64 * speed_factor;
            let index = position.floor() as usize;
            let frac = position - index as f64;
            let s0 = at(index);
            let s1 = at(index + 1);
            (s0 + (s1 - s0) * frac) as f32
        })
        .collect()
}
