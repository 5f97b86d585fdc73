//! # Framecheck Report
//!
//! Aggregates per-frame classification records into a serializable
//! analysis report. The JSON shape is an external contract: top-level
//! `frames` (ordered per-frame objects) and `statistics`, plus
//! `video_info` describing the analyzed stream.
//!
//! Building is a single pass over the records; frame pixel data is never
//! touched here. A report is built once per run and never mutated after
//! emission.

use framecheck_classify::{ClassificationRecord, Status, StatusCounts};
use framecheck_core::FrameRate;
use serde::Serialize;

/// Round to two decimals for the serialized boundary, matching the
/// precision consuming UIs display.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Properties of the analyzed stream.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VideoInfo {
    /// Nominal frames per second.
    pub fps: f64,
    /// Frame count reported by the source.
    pub frame_count: u64,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Duration in seconds derived from count and rate.
    pub duration: f64,
}

impl VideoInfo {
    /// Describe a stream from its nominal rate, dimensions, and count.
    pub fn new(rate: FrameRate, frame_count: u64, width: u32, height: u32) -> Self {
        let fps = rate.as_f64();
        let duration = if rate.is_valid() {
            frame_count as f64 / fps
        } else {
            0.0
        };
        Self {
            fps,
            frame_count,
            width,
            height,
            duration: round2(duration),
        }
    }
}

/// Summary statistics over one analysis run.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Statistics {
    /// Count of records (equals the source frame count).
    pub total_frames: u64,
    /// Frames classified Drop.
    pub drops_detected: u64,
    /// Frames classified Merge.
    pub merges_detected: u64,
    /// Frames classified Normal.
    pub normal_frames: u64,
    /// Wall-clock processing time in seconds, measured by the caller.
    pub processing_time: f64,
}

/// One frame's entry in the serialized report.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FrameRecord {
    /// 0-based sequence position.
    pub frame_index: u64,
    /// "Normal" | "Drop" | "Merge".
    pub status: &'static str,
    /// Decision strength in [0, 1].
    pub confidence: f64,
    /// Presentation timestamp in milliseconds.
    pub timestamp: f64,
    /// Laplacian-variance sharpness.
    pub sharpness: f64,
    /// Inter-frame motion magnitude.
    pub motion: f64,
    /// Timestamp gap in milliseconds.
    pub ts_gap: f64,
}

impl From<&ClassificationRecord> for FrameRecord {
    fn from(record: &ClassificationRecord) -> Self {
        Self {
            frame_index: record.frame_index,
            status: record.status.as_str(),
            confidence: round2(record.confidence),
            timestamp: round2(record.timestamp_ms),
            sharpness: round2(record.sharpness),
            motion: round2(record.motion),
            ts_gap: round2(record.ts_gap_ms),
        }
    }
}

/// Complete analysis report.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Report {
    /// Properties of the analyzed stream.
    pub video_info: VideoInfo,
    /// Summary statistics.
    pub statistics: Statistics,
    /// Ordered per-frame records.
    pub frames: Vec<FrameRecord>,
}

impl Report {
    /// Build a report from a full record sequence in one pass.
    pub fn from_records(
        video_info: VideoInfo,
        records: &[ClassificationRecord],
        processing_time_secs: f64,
    ) -> Self {
        let mut builder = ReportBuilder::new(video_info);
        for record in records {
            builder.record(record);
        }
        builder.finish(processing_time_secs)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Serialize to compact JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Streaming report builder fed one record at a time by the pipeline.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    video_info: VideoInfo,
    counts: StatusCounts,
    frames: Vec<FrameRecord>,
}

impl ReportBuilder {
    /// Start a report for the given stream.
    pub fn new(video_info: VideoInfo) -> Self {
        Self {
            video_info,
            counts: StatusCounts::default(),
            frames: Vec::new(),
        }
    }

    /// Append one classification record.
    pub fn record(&mut self, record: &ClassificationRecord) {
        self.counts.record(record.status);
        self.frames.push(FrameRecord::from(record));
    }

    /// Number of records collected so far.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether no records have been collected. An empty builder still
    /// finishes into a valid zeroed report (the EmptyInput outcome).
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Finalize with the caller-measured wall-clock duration.
    pub fn finish(self, processing_time_secs: f64) -> Report {
        let statistics = Statistics {
            total_frames: self.counts.total(),
            drops_detected: self.counts.drops,
            merges_detected: self.counts.merges,
            normal_frames: self.counts.normal,
            processing_time: round2(processing_time_secs),
        };
        Report {
            video_info: self.video_info,
            statistics,
            frames: self.frames,
        }
    }
}
