//! Per-channel filter stage built from cascaded biquads.

use crate::{Biquad, BiquadCoefs, Error, FilterKind, Result, Rolloff};

/// Filter for a single channel.
///
/// Coefficients are fixed at construction. [`FilterStage::process`] advances
/// the delay lines by exactly one sample, so output at index `n` depends only
/// on inputs up to `n`. A stage must not be shared between renders; call
/// [`FilterStage::reset`] before reusing one.
#[derive(Debug, Clone)]
pub struct FilterStage {
    sections: Vec<Biquad>,
}

impl FilterStage {
    /// Build a stage with the kind's [default Q](FilterKind::default_q).
    pub fn new(
        kind: FilterKind,
        cutoff_hz: f64,
        rolloff: Rolloff,
        sample_rate: u32,
    ) -> Result<Self> {
        Self::with_q(kind, cutoff_hz, rolloff, kind.default_q(), sample_rate)
    }

    /// Build a stage with an explicit section Q.
    ///
    /// Fails with [`Error::InvalidParameters`] if `kind` is
    /// [`FilterKind::None`], if `q` is not positive, or if the normalised
    /// cutoff `cutoff_hz / (sample_rate / 2)` is outside the open interval
    /// `(0, 1)`.
    pub fn with_q(
        kind: FilterKind,
        cutoff_hz: f64,
        rolloff: Rolloff,
        q: f64,
        sample_rate: u32,
    ) -> Result<Self> {
        if kind.is_none() {
            return Err(Error::InvalidParameters(
                "filter kind 'none' has no filter stage".into(),
            ));
        }
        if sample_rate == 0 {
            return Err(Error::InvalidParameters("sample rate must be positive".into()));
        }
        if !(q.is_finite() && q > 0.0) {
            return Err(Error::InvalidParameters(format!("Q {} must be positive", q)));
        }

        let nyquist = sample_rate as f64 / 2.0;
        let normalized = cutoff_hz / nyquist;
        if !(normalized > 0.0 && normalized < 1.0) {
            return Err(Error::InvalidParameters(format!(
                "cutoff {} Hz must be between 0 and Nyquist ({} Hz)",
                cutoff_hz, nyquist
            )));
        }

        let coefs = BiquadCoefs::design(kind, cutoff_hz, q, sample_rate as f64);
        log::trace!(
            "{} stage at {} Hz ({} sections): {:?}",
            kind,
            cutoff_hz,
            rolloff.sections(),
            coefs
        );

        Ok(Self {
            sections: vec![Biquad::new(coefs); rolloff.sections()],
        })
    }

    /// Filter order (two delay elements per section).
    pub fn order(&self) -> usize {
        self.sections.len() * 2
    }

    #[inline]
    pub fn process(&mut self, sample: f32) -> f32 {
        self.sections
            .iter_mut()
            .fold(sample as f64, |x, section| section.tick(x)) as f32
    }

    /// Filter a block in place, in index order.
    pub fn process_slice(&mut self, samples: &mut [f32]) {
        for sample in samples.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Zero all delay lines.
    pub fn reset(&mut self) {
        for section in &mut self.sections {
            section.reset();
        }
    }
}
