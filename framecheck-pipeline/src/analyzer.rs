//! Sequential analysis driver.
//!
//! One strict-order pass: Frame Source → Metric Extractor → Temporal
//! Classifier → {Annotator → Frame Sink, Report Builder}. Each frame's
//! pixel buffer is released as soon as its annotated copy has been
//! written; the only rolling state is owned by the extractor and the
//! classifier, so memory stays bounded over arbitrarily long videos.
//!
//! Frame order is a correctness requirement, not a simplification: the
//! motion-discontinuity signal compares against the immediately
//! preceding frame, so the pass must never reorder or parallelize
//! across frame boundaries.

use crate::cancel::CancelToken;
use crate::session::AnalysisSession;
use framecheck_annotate::{AnnotateConfig, Annotator};
use framecheck_classify::{ClassifierConfig, TemporalClassifier};
use framecheck_core::{Error, FrameSink, FrameSource, Result};
use framecheck_metrics::{MetricConfig, MetricExtractor};
use framecheck_report::{Report, ReportBuilder, VideoInfo};
use std::time::Instant;
use tracing::{debug, info, trace, warn};

/// Configuration for an analysis run.
#[derive(Debug, Clone, Default)]
pub struct AnalyzerConfig {
    /// Classifier thresholds.
    pub classifier: ClassifierConfig,
    /// Metric extraction settings.
    pub metrics: MetricConfig,
    /// Overlay geometry for the annotated stream.
    pub annotate: AnnotateConfig,
}

/// Result of a completed analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    /// The complete report for the run.
    pub report: Report,
    /// Cached metrics for threshold re-tuning without re-decoding.
    pub session: AnalysisSession,
}

impl AnalysisRun {
    /// Whether the source produced zero decodable frames.
    pub fn is_empty(&self) -> bool {
        self.report.frames.is_empty()
    }
}

/// Drives one full analysis pass over a frame source.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    /// Create an analyzer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer with custom settings.
    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Run the full pipeline over `source`.
    ///
    /// Annotated frames are forwarded to `sink` when one is provided;
    /// the report is built either way. Parameters are validated before
    /// the first frame is pulled. The caller receives either a complete,
    /// consistent report or a single error — never a partial report.
    /// Cancellation is checked between frames and surfaces as
    /// [`Error::Cancelled`].
    pub fn run(
        &self,
        source: &mut dyn FrameSource,
        mut sink: Option<&mut dyn FrameSink>,
        cancel: Option<&CancelToken>,
    ) -> Result<AnalysisRun> {
        self.config.metrics.validate().map_err(Error::from)?;

        let rate = source.frame_rate();
        let expected_interval_ms = rate.frame_interval_ms();
        let mut classifier =
            TemporalClassifier::new(self.config.classifier, expected_interval_ms)
                .map_err(Error::from)?;
        let mut extractor = MetricExtractor::with_config(self.config.metrics.clone());
        let annotator = Annotator::with_config(self.config.annotate.clone());

        info!(
            width = source.width(),
            height = source.height(),
            fps = rate.as_f64(),
            expected_interval_ms,
            declared_frames = source.frame_count(),
            "starting analysis pass"
        );

        let start = Instant::now();
        let mut metrics_seq = Vec::new();
        let mut records = Vec::new();
        let mut index: u64 = 0;

        while let Some(frame) = source.next_frame()? {
            if cancel.is_some_and(CancelToken::is_cancelled) {
                debug!(frames_processed = index, "analysis cancelled");
                return Err(Error::Cancelled);
            }

            let metrics = extractor.extract(index, &frame);
            let record = classifier.classify(&metrics);
            trace!(
                frame = index,
                status = %record.status,
                confidence = record.confidence,
                sharpness = metrics.sharpness,
                motion = metrics.motion,
                ts_gap_ms = metrics.ts_gap_ms,
                "classified frame"
            );

            if let Some(sink) = sink.as_deref_mut() {
                let annotated = annotator.annotate(&frame, &record);
                sink.write_frame(&annotated)?;
            }

            metrics_seq.push(metrics);
            records.push(record);
            index += 1;
            // `frame` drops here; no pixel data outlives its iteration.
        }

        if let Some(sink) = sink.as_deref_mut() {
            sink.finish()?;
        }

        if let Some(declared) = source.frame_count() {
            if declared != index {
                warn!(declared, decoded = index, "source frame count mismatch");
            }
        }

        let elapsed = start.elapsed().as_secs_f64();
        let counts = classifier.counts();
        info!(
            frames = index,
            drops = counts.drops,
            merges = counts.merges,
            elapsed_secs = elapsed,
            "analysis pass complete"
        );

        let video_info = VideoInfo::new(rate, index, source.width(), source.height());
        let mut builder = ReportBuilder::new(video_info.clone());
        for record in &records {
            builder.record(record);
        }

        Ok(AnalysisRun {
            report: builder.finish(elapsed),
            session: AnalysisSession::new(video_info, expected_interval_ms, metrics_seq),
        })
    }
}
