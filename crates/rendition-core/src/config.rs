//! Render configuration.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Optional sample-rate limits a host can impose on the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub min_sample_rate: u32,
    pub max_sample_rate: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            min_sample_rate: 8000,
            max_sample_rate: 384000,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_sample_rate == 0 || self.min_sample_rate > self.max_sample_rate {
            return Err(Error::InvalidConfig(format!(
                "sample rate range {}-{} Hz is empty",
                self.min_sample_rate, self.max_sample_rate
            )));
        }
        Ok(())
    }

    /// Reject a buffer rate outside the configured range.
    pub fn check_sample_rate(&self, sample_rate: u32) -> Result<()> {
        if sample_rate < self.min_sample_rate || sample_rate > self.max_sample_rate {
            return Err(Error::InvalidRate(sample_rate));
        }
        Ok(())
    }
}
