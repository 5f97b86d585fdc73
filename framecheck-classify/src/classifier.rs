//! Temporal frame classifier.
//!
//! A linear scan over the metric stream: each frame is tested against
//! three anomaly signals and the first match wins. The priority is an
//! explicit policy, not an accident of check ordering:
//!
//! 1. Drop via timestamp gap
//! 2. Drop via motion discontinuity
//! 3. Merge via low sharpness
//! 4. Normal
//!
//! Drop outranks Merge because a missing frame is the more actionable
//! failure. Reordering these checks changes classification results.

use crate::error::{ClassifyError, Result};
use crate::record::{ClassificationRecord, Status, StatusCounts};
use framecheck_metrics::FrameMetrics;

/// Default timestamp-gap ratio: a gap beyond 1.5x the expected interval
/// reads as a dropped frame.
pub const DEFAULT_GAP_RATIO: f64 = 1.5;

/// Default motion-discontinuity multiple over the local baseline.
pub const DEFAULT_MOTION_THRESHOLD: f64 = 3.0;

/// Default sharpness floor below which a frame reads as a merge.
pub const DEFAULT_SHARPNESS_THRESHOLD: f64 = 100.0;

/// Floor applied to the motion baseline so a near-static scene cannot
/// trip the discontinuity check on sensor noise.
pub const MOTION_BASELINE_FLOOR: f64 = 30.0;

/// Divisor mapping gap-ratio overshoot onto [0, 1] confidence.
const GAP_CONFIDENCE_SCALE: f64 = 1.5;

/// Tunable thresholds for the classifier.
///
/// All values are runtime parameters so the same decoded sequence can be
/// re-classified interactively without re-decoding; the defaults are the
/// documented baked-in baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifierConfig {
    /// Timestamp-gap multiple of the expected interval that flags a Drop.
    pub gap_ratio: f64,
    /// Motion multiple of the local baseline that flags a Drop.
    pub motion_threshold: f64,
    /// Sharpness floor that flags a Merge.
    pub sharpness_threshold: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            gap_ratio: DEFAULT_GAP_RATIO,
            motion_threshold: DEFAULT_MOTION_THRESHOLD,
            sharpness_threshold: DEFAULT_SHARPNESS_THRESHOLD,
        }
    }
}

impl ClassifierConfig {
    /// Validate all thresholds, naming the offending parameter.
    ///
    /// Runs before any processing starts so a bad value can never
    /// produce a partial report.
    pub fn validate(&self) -> Result<()> {
        if !self.gap_ratio.is_finite() || self.gap_ratio < 1.0 {
            return Err(ClassifyError::InvalidThreshold {
                name: "gap_ratio",
                value: self.gap_ratio,
                reason: "must be finite and at least 1.0",
            });
        }
        if !self.motion_threshold.is_finite() || self.motion_threshold < 1.0 {
            return Err(ClassifyError::InvalidThreshold {
                name: "motion_threshold",
                value: self.motion_threshold,
                reason: "must be finite and at least 1.0",
            });
        }
        if !self.sharpness_threshold.is_finite() || self.sharpness_threshold < 0.0 {
            return Err(ClassifyError::InvalidThreshold {
                name: "sharpness_threshold",
                value: self.sharpness_threshold,
                reason: "must be finite and non-negative",
            });
        }
        Ok(())
    }
}

/// Stateful sequential classifier.
///
/// The only rolling state is the previous frame's metrics plus the
/// status tallies; the expected interval is derived once from the
/// nominal frame rate and held constant for the run.
#[derive(Debug, Clone)]
pub struct TemporalClassifier {
    config: ClassifierConfig,
    expected_interval_ms: f64,
    prev: Option<FrameMetrics>,
    frames_seen: u64,
    counts: StatusCounts,
}

impl TemporalClassifier {
    /// Create a classifier for a sequence with the given expected frame
    /// interval. Thresholds are validated up front.
    pub fn new(config: ClassifierConfig, expected_interval_ms: f64) -> Result<Self> {
        config.validate()?;
        if !expected_interval_ms.is_finite() || expected_interval_ms <= 0.0 {
            return Err(ClassifyError::InvalidInterval(expected_interval_ms));
        }
        Ok(Self {
            config,
            expected_interval_ms,
            prev: None,
            frames_seen: 0,
            counts: StatusCounts::default(),
        })
    }

    /// The expected frame interval this classifier was built with.
    pub fn expected_interval_ms(&self) -> f64 {
        self.expected_interval_ms
    }

    /// Status tallies for the frames classified so far.
    pub fn counts(&self) -> StatusCounts {
        self.counts
    }

    /// Classify one frame's metrics.
    ///
    /// Metrics must arrive in strict index order; exactly one record is
    /// produced per call. Re-running the same metrics with the same
    /// thresholds yields identical records.
    pub fn classify(&mut self, metrics: &FrameMetrics) -> ClassificationRecord {
        let (status, confidence) = self.decide(metrics);

        self.counts.record(status);
        self.frames_seen += 1;
        self.prev = Some(*metrics);

        ClassificationRecord {
            frame_index: metrics.frame_index,
            status,
            confidence,
            timestamp_ms: metrics.timestamp_ms,
            sharpness: metrics.sharpness,
            motion: metrics.motion,
            ts_gap_ms: metrics.ts_gap_ms,
        }
    }

    /// Forget rolling state so the classifier can scan a new sequence.
    pub fn reset(&mut self) {
        self.prev = None;
        self.frames_seen = 0;
        self.counts = StatusCounts::default();
    }

    /// First-match-wins decision for one frame.
    fn decide(&self, metrics: &FrameMetrics) -> (Status, f64) {
        // Boundary rule, not an exception path: the first frame has no
        // predecessor to compare against and is always Normal.
        if self.frames_seen == 0 {
            return (Status::Normal, 1.0);
        }

        let gap_score = self.gap_score(metrics);
        if metrics.ts_gap_ms > self.config.gap_ratio * self.expected_interval_ms {
            return (Status::Drop, gap_score.clamp(0.0, 1.0));
        }

        // Degraded frames carry zeroed measurements; only the timestamp
        // gap above is trustworthy for them.
        if !metrics.degraded {
            if let Some(motion_overshoot) = self.motion_overshoot(metrics) {
                if motion_overshoot > 0.0 {
                    return (Status::Drop, motion_overshoot.clamp(0.0, 1.0));
                }
            }

            let threshold = self.config.sharpness_threshold;
            if threshold > 0.0 && metrics.sharpness < threshold {
                let confidence = (1.0 - metrics.sharpness / threshold).clamp(0.0, 1.0);
                return (Status::Merge, confidence);
            }
        }

        // Normal confidence reflects how close the strongest partial
        // signal came to firing; clean frames report 1.0.
        let partial = gap_score.clamp(0.0, 1.0);
        (Status::Normal, (1.0 - partial).clamp(0.0, 1.0))
    }

    /// Gap overshoot mapped onto the confidence scale. Negative when the
    /// gap is under the expected interval.
    fn gap_score(&self, metrics: &FrameMetrics) -> f64 {
        (metrics.ts_gap_ms / self.expected_interval_ms - 1.0) / GAP_CONFIDENCE_SCALE
    }

    /// Motion overshoot beyond `motion_threshold` times the local
    /// baseline, or `None` when no baseline exists yet.
    ///
    /// The baseline is the previous frame's motion, floored at
    /// [`MOTION_BASELINE_FLOOR`]. The check needs two prior frames: the
    /// first measured motion value has nothing to deviate from.
    fn motion_overshoot(&self, metrics: &FrameMetrics) -> Option<f64> {
        if self.frames_seen < 2 {
            return None;
        }
        let prev = self.prev.as_ref()?;
        let baseline = prev.motion.max(MOTION_BASELINE_FLOOR);
        Some(metrics.motion / (self.config.motion_threshold * baseline) - 1.0)
    }
}

/// Classify a full metric sequence in one call.
///
/// Convenience for re-analysis of cached metrics: same inputs and
/// thresholds produce byte-identical records.
pub fn classify_all(
    config: ClassifierConfig,
    expected_interval_ms: f64,
    metrics: &[FrameMetrics],
) -> Result<Vec<ClassificationRecord>> {
    let mut classifier = TemporalClassifier::new(config, expected_interval_ms)?;
    Ok(metrics.iter().map(|m| classifier.classify(m)).collect())
}
