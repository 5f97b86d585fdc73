//! # Framecheck Metrics
//!
//! Per-frame measurement stage of the framecheck pipeline.
//!
//! For every decoded frame the [`MetricExtractor`] produces one
//! [`FrameMetrics`]: sharpness (variance of a Laplacian edge response),
//! motion magnitude relative to the previous frame, and the presentation
//! timestamp gap. The extractor owns the only rolling state this stage
//! needs — the previous frame's analysis-grid luma and timestamp — so
//! pixel buffers are never retained past their frame.
//!
//! ```rust
//! use framecheck_core::{Frame, PixelFormat};
//! use framecheck_metrics::MetricExtractor;
//!
//! let mut extractor = MetricExtractor::new();
//! let frame = Frame::new(320, 240, PixelFormat::Gray8).with_pts_ms(33.3);
//! let metrics = extractor.extract(0, &frame);
//! assert_eq!(metrics.motion, 0.0); // no prior frame
//! ```

pub mod error;
pub mod luma;
pub mod motion;
pub mod sharpness;

pub use error::{MetricsError, Result};
pub use motion::{Motion, MotionConfig};
pub use sharpness::Sharpness;

use framecheck_core::Frame;

/// Derived measurements for one frame. Immutable, produced exactly once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMetrics {
    /// 0-based sequence position.
    pub frame_index: u64,
    /// Presentation timestamp in milliseconds.
    pub timestamp_ms: f64,
    /// Laplacian variance; higher = crisper. Non-negative.
    pub sharpness: f64,
    /// Mean absolute luma change from the previous frame (0-255 scale).
    /// Zero for frame 0 by convention.
    pub motion: f64,
    /// Milliseconds elapsed since the previous frame; zero for frame 0.
    pub ts_gap_ms: f64,
    /// The frame buffer was unreadable; all measurements are zeroed.
    pub degraded: bool,
}

impl FrameMetrics {
    /// Zeroed metrics for a degraded frame.
    pub fn degraded(frame_index: u64, timestamp_ms: f64, ts_gap_ms: f64) -> Self {
        Self {
            frame_index,
            timestamp_ms,
            sharpness: 0.0,
            motion: 0.0,
            ts_gap_ms,
            degraded: true,
        }
    }
}

/// Configuration for the metric extractor.
#[derive(Debug, Clone, Default)]
pub struct MetricConfig {
    /// Motion analysis grid settings.
    pub motion: MotionConfig,
}

impl MetricConfig {
    /// Validate all settings.
    pub fn validate(&self) -> Result<()> {
        self.motion.validate()
    }
}

/// Computes [`FrameMetrics`] for a stream of frames in order.
#[derive(Debug, Default)]
pub struct MetricExtractor {
    sharpness: Sharpness,
    motion: Motion,
    /// Analysis-grid luma of the previous usable frame.
    prev_grid: Option<Vec<u8>>,
    /// Timestamp of the previous frame, usable or not.
    prev_pts_ms: Option<f64>,
}

impl MetricExtractor {
    /// Create an extractor with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with a custom configuration.
    pub fn with_config(config: MetricConfig) -> Self {
        Self {
            sharpness: Sharpness::new(),
            motion: Motion::with_config(config.motion),
            prev_grid: None,
            prev_pts_ms: None,
        }
    }

    /// Measure one frame.
    ///
    /// Frames must arrive in presentation order; the timestamp gap and
    /// motion baseline both derive from the immediately preceding call.
    /// A degraded frame yields zeroed metrics and clears the motion
    /// baseline, but never fails — one bad frame must not abort a run.
    pub fn extract(&mut self, frame_index: u64, frame: &Frame) -> FrameMetrics {
        let ts_gap_ms = match self.prev_pts_ms {
            Some(prev) => frame.pts_ms - prev,
            None => 0.0,
        };
        self.prev_pts_ms = Some(frame.pts_ms);

        if frame.is_degraded() {
            self.prev_grid = None;
            return FrameMetrics::degraded(frame_index, frame.pts_ms, ts_gap_ms);
        }

        let plane = luma::luma_plane(frame);
        let sharpness = self
            .sharpness
            .calculate(&plane, frame.width(), frame.height());

        let (gw, gh) = self.motion.grid_size();
        let grid = luma::resample(&plane, frame.width(), frame.height(), gw, gh);
        let motion = match &self.prev_grid {
            Some(prev) => self.motion.calculate(prev, &grid),
            None => 0.0,
        };
        self.prev_grid = Some(grid);

        FrameMetrics {
            frame_index,
            timestamp_ms: frame.pts_ms,
            sharpness,
            motion,
            ts_gap_ms,
            degraded: false,
        }
    }

    /// Forget the rolling state, e.g. before a new sequence.
    pub fn reset(&mut self) {
        self.prev_grid = None;
        self.prev_pts_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use framecheck_core::{FrameFlags, PixelFormat};

    fn gray_frame(value: u8, pts_ms: f64) -> Frame {
        let mut frame = Frame::new(64, 48, PixelFormat::Gray8).with_pts_ms(pts_ms);
        frame.data_mut().fill(value);
        frame
    }

    #[test]
    fn test_first_frame_conventions() {
        let mut extractor = MetricExtractor::new();
        let metrics = extractor.extract(0, &gray_frame(128, 100.0));
        assert_eq!(metrics.frame_index, 0);
        assert_eq!(metrics.motion, 0.0);
        assert_eq!(metrics.ts_gap_ms, 0.0);
        assert!(!metrics.degraded);
    }

    #[test]
    fn test_gap_and_motion_tracking() {
        let mut extractor = MetricExtractor::new();
        extractor.extract(0, &gray_frame(100, 0.0));
        let metrics = extractor.extract(1, &gray_frame(160, 33.3));
        assert!((metrics.ts_gap_ms - 33.3).abs() < 1e-9);
        assert!((metrics.motion - 60.0).abs() < 0.5);
    }

    #[test]
    fn test_degraded_frame_zeroes_metrics() {
        let mut extractor = MetricExtractor::new();
        extractor.extract(0, &gray_frame(100, 0.0));

        let mut bad = gray_frame(200, 33.3);
        bad.flags |= FrameFlags::DEGRADED;
        let metrics = extractor.extract(1, &bad);
        assert!(metrics.degraded);
        assert_eq!(metrics.sharpness, 0.0);
        assert_eq!(metrics.motion, 0.0);
        // The gap is still measured from the timestamps.
        assert!((metrics.ts_gap_ms - 33.3).abs() < 1e-9);
    }

    #[test]
    fn test_baseline_cleared_after_degraded() {
        let mut extractor = MetricExtractor::new();
        extractor.extract(0, &gray_frame(0, 0.0));

        let mut bad = gray_frame(0, 33.3);
        bad.flags |= FrameFlags::DEGRADED;
        extractor.extract(1, &bad);

        // No baseline survives the degraded frame, so motion restarts at 0.
        let metrics = extractor.extract(2, &gray_frame(255, 66.6));
        assert_eq!(metrics.motion, 0.0);
    }

    #[test]
    fn test_reset() {
        let mut extractor = MetricExtractor::new();
        extractor.extract(0, &gray_frame(10, 0.0));
        extractor.reset();
        let metrics = extractor.extract(0, &gray_frame(250, 1000.0));
        assert_eq!(metrics.ts_gap_ms, 0.0);
        assert_eq!(metrics.motion, 0.0);
    }
}
