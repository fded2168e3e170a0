//! Filter response selection.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Filter response applied after resampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    /// Bypass: no filter stage is built.
    #[default]
    None,
    Lowpass,
    Highpass,
    Bandpass,
}

impl FilterKind {
    pub fn all() -> &'static [FilterKind] {
        &[
            FilterKind::None,
            FilterKind::Lowpass,
            FilterKind::Highpass,
            FilterKind::Bandpass,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            FilterKind::None => "none",
            FilterKind::Lowpass => "lowpass",
            FilterKind::Highpass => "highpass",
            FilterKind::Bandpass => "bandpass",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, FilterKind::None)
    }

    /// Section Q used when the caller does not pick one.
    ///
    /// Lowpass and highpass get a 1 dB resonance peak (linear Q of
    /// 10^(1/20)); bandpass gets a linear Q of 1, one octave wide at -3 dB.
    pub fn default_q(&self) -> f64 {
        match self {
            FilterKind::Lowpass | FilterKind::Highpass => 10f64.powf(1.0 / 20.0),
            FilterKind::None | FilterKind::Bandpass => 1.0,
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        FilterKind::all()
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidParameters(format!("unknown filter kind '{}'", s)))
    }
}

/// Slope of a filter, realised as a cascade of second-order sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rolloff {
    #[default]
    Db12,
    Db24,
    Db48,
    Db96,
}

impl Rolloff {
    /// Number of cascaded biquads.
    pub fn sections(&self) -> usize {
        match self {
            Rolloff::Db12 => 1,
            Rolloff::Db24 => 2,
            Rolloff::Db48 => 4,
            Rolloff::Db96 => 8,
        }
    }

    pub fn db_per_octave(&self) -> f64 {
        -12.0 * self.sections() as f64
    }

    /// Map a slope in dB/octave (-12, -24, -48 or -96) to a rolloff.
    pub fn from_db_per_octave(db: f64) -> Result<Self> {
        [Rolloff::Db12, Rolloff::Db24, Rolloff::Db48, Rolloff::Db96]
            .into_iter()
            .find(|r| r.db_per_octave() == db)
            .ok_or_else(|| {
                Error::InvalidParameters(format!(
                    "rolloff {} dB/octave not supported (use -12, -24, -48 or -96)",
                    db
                ))
            })
    }
}
