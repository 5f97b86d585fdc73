//! Inter-frame motion magnitude.
//!
//! Motion is the mean absolute luma difference between consecutive
//! frames, measured on a fixed analysis grid so the value is comparable
//! across input resolutions. The result lives on the 0-255 scale of the
//! underlying 8-bit samples.

use crate::error::{MetricsError, Result};
use rayon::prelude::*;

/// Configuration for motion measurement.
#[derive(Debug, Clone)]
pub struct MotionConfig {
    /// Width of the analysis grid both frames are resampled to.
    pub analysis_width: u32,
    /// Height of the analysis grid.
    pub analysis_height: u32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            analysis_width: 320,
            analysis_height: 240,
        }
    }
}

impl MotionConfig {
    /// Validate the analysis grid dimensions.
    pub fn validate(&self) -> Result<()> {
        if self.analysis_width == 0 || self.analysis_height == 0 {
            return Err(MetricsError::InvalidParameter(format!(
                "motion analysis grid must be non-empty, got {}x{}",
                self.analysis_width, self.analysis_height
            )));
        }
        Ok(())
    }
}

/// Motion magnitude calculator.
#[derive(Debug, Clone, Default)]
pub struct Motion {
    config: MotionConfig,
}

impl Motion {
    /// Create a motion calculator with the default 320x240 grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a motion calculator with a custom grid.
    pub fn with_config(config: MotionConfig) -> Self {
        Self { config }
    }

    /// Number of samples on the analysis grid.
    pub fn grid_len(&self) -> usize {
        (self.config.analysis_width * self.config.analysis_height) as usize
    }

    /// Grid dimensions as (width, height).
    pub fn grid_size(&self) -> (u32, u32) {
        (self.config.analysis_width, self.config.analysis_height)
    }

    /// Mean absolute difference between two analysis-grid planes.
    ///
    /// Both planes must already be resampled to the configured grid;
    /// mismatched lengths (a degraded frame upstream) score 0.0 rather
    /// than failing the pipeline.
    pub fn calculate(&self, prev: &[u8], curr: &[u8]) -> f64 {
        let len = self.grid_len();
        if len == 0 || prev.len() != len || curr.len() != len {
            return 0.0;
        }

        let total: u64 = prev
            .par_iter()
            .zip(curr.par_iter())
            .map(|(&a, &b)| (a as i32 - b as i32).unsigned_abs() as u64)
            .sum();

        total as f64 / len as f64
    }
}
