//! Render parameters and output options.

use crate::error::{ExportError, Result};
use rendition_dsp::{FilterKind, Rolloff};
use serde::{Deserialize, Serialize};

/// File name offered to the host for the exported artifact.
pub const DEFAULT_FILE_NAME: &str = "processed.wav";

/// Output sample encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BitDepth {
    /// Signed 16-bit integer PCM.
    #[default]
    Int16,
    /// IEEE-754 32-bit float.
    Float32,
}

impl BitDepth {
    /// Bits per sample.
    pub fn bits(&self) -> u16 {
        match self {
            BitDepth::Int16 => 16,
            BitDepth::Float32 => 32,
        }
    }

    pub fn bytes_per_sample(&self) -> u16 {
        self.bits() / 8
    }

    /// WAVE `fmt ` format code (1 = integer PCM, 3 = IEEE float).
    pub fn format_code(&self) -> u16 {
        match self {
            BitDepth::Int16 => 1,
            BitDepth::Float32 => 3,
        }
    }
}

/// Settings for one render, fixed for its whole duration.
///
/// ```
/// use rendition_export::{FilterKind, RenderParameters};
///
/// let params = RenderParameters::default()
///     .speed(1.5)
///     .filter(FilterKind::Lowpass, 2000.0);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderParameters {
    /// Playback-rate multiplier; above 1.0 shortens the output.
    pub speed_factor: f64,
    pub filter_kind: FilterKind,
    pub cutoff_hz: f64,
    /// Slope in dB/octave: -12, -24, -48 or -96.
    pub rolloff_db_per_octave: f64,
    /// Resonance of each filter section; `None` uses the kind's default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<f64>,
}

impl Default for RenderParameters {
    fn default() -> Self {
        Self {
            speed_factor: 1.0,
            filter_kind: FilterKind::None,
            cutoff_hz: 350.0,
            rolloff_db_per_octave: -12.0,
            q: None,
        }
    }
}

impl RenderParameters {
    pub fn speed(mut self, speed_factor: f64) -> Self {
        self.speed_factor = speed_factor;
        self
    }

    pub fn filter(mut self, kind: FilterKind, cutoff_hz: f64) -> Self {
        self.filter_kind = kind;
        self.cutoff_hz = cutoff_hz;
        self
    }

    pub fn rolloff(mut self, db_per_octave: f64) -> Self {
        self.rolloff_db_per_octave = db_per_octave;
        self
    }

    pub fn q(mut self, q: f64) -> Self {
        self.q = Some(q);
        self
    }

    /// Q handed to each filter section.
    pub fn section_q(&self) -> f64 {
        self.q.unwrap_or_else(|| self.filter_kind.default_q())
    }

    /// Check ranges that do not depend on the input buffer.
    ///
    /// The cutoff-below-Nyquist check happens when the filter is built,
    /// since it needs the buffer's sample rate.
    pub fn validate(&self) -> Result<()> {
        if !(self.speed_factor.is_finite() && self.speed_factor > 0.0) {
            return Err(ExportError::InvalidParameters(format!(
                "speed factor {} must be positive",
                self.speed_factor
            )));
        }
        if !(self.cutoff_hz.is_finite() && self.cutoff_hz > 0.0) {
            return Err(ExportError::InvalidParameters(format!(
                "cutoff {} Hz must be positive",
                self.cutoff_hz
            )));
        }
        if !self.filter_kind.is_none() {
            self.rolloff_sections()?;
            let q = self.section_q();
            if !(q.is_finite() && q > 0.0) {
                return Err(ExportError::InvalidParameters(format!(
                    "Q {} must be positive",
                    q
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn rolloff_sections(&self) -> Result<Rolloff> {
        Ok(Rolloff::from_db_per_octave(self.rolloff_db_per_octave)?)
    }
}
