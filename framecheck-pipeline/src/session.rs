//! Re-analysis of cached metrics.
//!
//! Metric extraction is the expensive half of a run; the classifier is a
//! cheap linear scan. A session keeps the metric sequence (never the
//! pixel data) after a run so interactive re-tuning can re-apply new
//! thresholds to the same decoded sequence without re-decoding.

use framecheck_classify::{classify_all, ClassifierConfig};
use framecheck_core::Result;
use framecheck_metrics::FrameMetrics;
use framecheck_report::{Report, VideoInfo};
use std::time::Instant;
use tracing::debug;

/// Cached metrics for one decoded sequence.
#[derive(Debug, Clone)]
pub struct AnalysisSession {
    video_info: VideoInfo,
    expected_interval_ms: f64,
    metrics: Vec<FrameMetrics>,
}

impl AnalysisSession {
    /// Create a session from an extracted metric sequence.
    pub fn new(
        video_info: VideoInfo,
        expected_interval_ms: f64,
        metrics: Vec<FrameMetrics>,
    ) -> Self {
        Self {
            video_info,
            expected_interval_ms,
            metrics,
        }
    }

    /// The stream this session was extracted from.
    pub fn video_info(&self) -> &VideoInfo {
        &self.video_info
    }

    /// Expected frame interval derived from the nominal rate.
    pub fn expected_interval_ms(&self) -> f64 {
        self.expected_interval_ms
    }

    /// The cached metric sequence, in frame order.
    pub fn metrics(&self) -> &[FrameMetrics] {
        &self.metrics
    }

    /// Re-classify the cached metrics with new thresholds.
    ///
    /// Thresholds are validated before the scan; the same config always
    /// reproduces the same report apart from `processing_time`.
    pub fn reclassify(&self, config: ClassifierConfig) -> Result<Report> {
        let start = Instant::now();
        let records = classify_all(config, self.expected_interval_ms, &self.metrics)
            .map_err(framecheck_core::Error::from)?;
        let elapsed = start.elapsed().as_secs_f64();

        debug!(
            frames = records.len(),
            elapsed_secs = elapsed,
            "reclassified cached metrics"
        );

        Ok(Report::from_records(
            self.video_info.clone(),
            &records,
            elapsed,
        ))
    }
}
