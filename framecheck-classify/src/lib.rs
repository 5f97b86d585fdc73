//! # Framecheck Classify
//!
//! Temporal classification of decoded frames into Normal, Drop, or
//! Merge, combining timestamp-interval analysis with the motion and
//! sharpness metrics produced by `framecheck-metrics`.
//!
//! The scan is strictly sequential: the motion-discontinuity check
//! depends on the immediately preceding frame's metrics, so frames must
//! not be reordered or classified in parallel.
//!
//! ```rust
//! use framecheck_classify::{ClassifierConfig, TemporalClassifier, Status};
//! use framecheck_metrics::FrameMetrics;
//!
//! let mut classifier =
//!     TemporalClassifier::new(ClassifierConfig::default(), 33.33).unwrap();
//!
//! let first = FrameMetrics {
//!     frame_index: 0,
//!     timestamp_ms: 0.0,
//!     sharpness: 200.0,
//!     motion: 0.0,
//!     ts_gap_ms: 0.0,
//!     degraded: false,
//! };
//! let record = classifier.classify(&first);
//! assert_eq!(record.status, Status::Normal);
//! assert_eq!(record.confidence, 1.0);
//! ```

pub mod classifier;
pub mod error;
pub mod record;

pub use classifier::{
    classify_all, ClassifierConfig, TemporalClassifier, DEFAULT_GAP_RATIO,
    DEFAULT_MOTION_THRESHOLD, DEFAULT_SHARPNESS_THRESHOLD, MOTION_BASELINE_FLOOR,
};
pub use error::{ClassifyError, Result};
pub use record::{ClassificationRecord, Status, StatusCounts};
