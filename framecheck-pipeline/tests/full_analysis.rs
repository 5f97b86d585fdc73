//! Pipeline integration tests.
//!
//! Exercises the full analysis pass with mock source and sink
//! collaborators to verify data flow, report consistency, and the
//! error/cancellation contract.

use framecheck_classify::ClassifierConfig;
use framecheck_core::{Error, Frame, FrameFlags, FrameRate, FrameSink, FrameSource, PixelFormat, Result};
use framecheck_pipeline::{Analyzer, AnalyzerConfig, CancelToken};

// =============================================================================
// Mock Implementations
// =============================================================================

/// Mock decoder producing a programmed frame sequence.
struct MockSource {
    frames: Vec<Frame>,
    cursor: usize,
    rate: FrameRate,
    /// Fail with a decode error after this many frames.
    fail_after: Option<usize>,
}

impl MockSource {
    fn new(frames: Vec<Frame>, rate: FrameRate) -> Self {
        Self {
            frames,
            cursor: 0,
            rate,
            fail_after: None,
        }
    }
}

impl FrameSource for MockSource {
    fn next_frame(&mut self) -> Result<Option<Frame>> {
        if self.fail_after == Some(self.cursor) {
            return Err(Error::decode("mock bitstream corrupted"));
        }
        let frame = self.frames.get(self.cursor).cloned();
        if frame.is_some() {
            self.cursor += 1;
        }
        Ok(frame)
    }

    fn frame_rate(&self) -> FrameRate {
        self.rate
    }

    fn frame_count(&self) -> Option<u64> {
        Some(self.frames.len() as u64)
    }

    fn width(&self) -> u32 {
        self.frames.first().map_or(0, Frame::width)
    }

    fn height(&self) -> u32 {
        self.frames.first().map_or(0, Frame::height)
    }
}

/// Mock encoder capturing everything it is asked to write.
#[derive(Default)]
struct MockSink {
    frames: Vec<Frame>,
    finished: bool,
}

impl FrameSink for MockSink {
    fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        self.frames.push(frame.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}

// =============================================================================
// Frame Builders
// =============================================================================

/// A high-sharpness checkerboard frame; identical copies have zero
/// motion between them.
fn checker_frame(pts_ms: f64) -> Frame {
    let mut frame = Frame::new(64, 48, PixelFormat::Gray8).with_pts_ms(pts_ms);
    let width = frame.width() as usize;
    for (i, px) in frame.data_mut().iter_mut().enumerate() {
        let (x, y) = (i % width, i / width);
        *px = if (x + y) % 2 == 0 { 255 } else { 0 };
    }
    frame
}

/// A featureless frame: zero Laplacian variance.
fn flat_frame(pts_ms: f64) -> Frame {
    let mut frame = Frame::new(64, 48, PixelFormat::Gray8).with_pts_ms(pts_ms);
    frame.data_mut().fill(128);
    frame
}

/// Ten crisp frames at a clean 30 fps cadence.
fn clean_sequence() -> Vec<Frame> {
    (0..10).map(|i| checker_frame(i as f64 * 33.33)).collect()
}

// =============================================================================
// Tests
// =============================================================================

#[test]
fn test_clean_run_all_normal() {
    let mut source = MockSource::new(clean_sequence(), FrameRate::new(30, 1));
    let mut sink = MockSink::default();

    let run = Analyzer::new()
        .run(&mut source, Some(&mut sink), None)
        .unwrap();

    let stats = &run.report.statistics;
    assert_eq!(stats.total_frames, 10);
    assert_eq!(stats.drops_detected, 0);
    assert_eq!(stats.merges_detected, 0);
    assert_eq!(stats.normal_frames, 10);

    // One record per frame, indices strictly increasing from 0.
    assert_eq!(run.report.frames.len(), 10);
    for (i, frame) in run.report.frames.iter().enumerate() {
        assert_eq!(frame.frame_index, i as u64);
        assert_eq!(frame.status, "Normal");
    }
}

#[test]
fn test_sink_receives_annotated_stream() {
    let frames = clean_sequence();
    let mut source = MockSource::new(frames.clone(), FrameRate::new(30, 1));
    let mut sink = MockSink::default();

    Analyzer::new()
        .run(&mut source, Some(&mut sink), None)
        .unwrap();

    // Same count, order, resolution, and timing as the input.
    assert_eq!(sink.frames.len(), frames.len());
    assert!(sink.finished);
    for (original, annotated) in frames.iter().zip(&sink.frames) {
        assert_eq!(annotated.width(), original.width());
        assert_eq!(annotated.height(), original.height());
        assert_eq!(annotated.pts_ms, original.pts_ms);
    }
    // The banner actually changed pixels on the first row.
    assert_ne!(sink.frames[0].row(0), frames[0].row(0));
}

#[test]
fn test_timestamp_gap_yields_drop() {
    let mut frames = clean_sequence();
    // Frame 5 arrives 100 ms after frame 4.
    for (i, frame) in frames.iter_mut().enumerate().skip(5) {
        frame.pts_ms = 4.0 * 33.33 + 100.0 + (i as f64 - 5.0) * 33.33;
    }

    let mut source = MockSource::new(frames, FrameRate::new(30, 1));
    let run = Analyzer::new().run(&mut source, None, None).unwrap();

    assert_eq!(run.report.statistics.drops_detected, 1);
    let dropped = &run.report.frames[5];
    assert_eq!(dropped.status, "Drop");
    assert_eq!(dropped.confidence, 1.0);
}

#[test]
fn test_flat_sequence_merges() {
    let frames: Vec<_> = (0..6).map(|i| flat_frame(i as f64 * 33.33)).collect();
    let mut source = MockSource::new(frames, FrameRate::new(30, 1));
    let run = Analyzer::new().run(&mut source, None, None).unwrap();

    // Frame 0 is Normal by rule; zero-sharpness frames after it merge.
    assert_eq!(run.report.frames[0].status, "Normal");
    assert_eq!(run.report.statistics.merges_detected, 5);
    for frame in &run.report.frames[1..] {
        assert_eq!(frame.status, "Merge");
        assert_eq!(frame.confidence, 1.0);
    }
}

#[test]
fn test_degraded_frame_survives_run() {
    let mut frames = clean_sequence();
    frames[4].flags |= FrameFlags::DEGRADED;

    let mut source = MockSource::new(frames, FrameRate::new(30, 1));
    let mut sink = MockSink::default();
    let run = Analyzer::new()
        .run(&mut source, Some(&mut sink), None)
        .unwrap();

    // One bad frame does not abort the analysis or shrink the outputs.
    assert_eq!(run.report.statistics.total_frames, 10);
    assert_eq!(sink.frames.len(), 10);
    // Degraded + clean timing biases to Normal, not Merge.
    assert_eq!(run.report.frames[4].status, "Normal");
}

#[test]
fn test_empty_source_yields_empty_report() {
    let mut source = MockSource::new(Vec::new(), FrameRate::new(30, 1));
    let run = Analyzer::new().run(&mut source, None, None).unwrap();

    assert!(run.is_empty());
    assert_eq!(run.report.statistics.total_frames, 0);
    assert_eq!(run.report.statistics.drops_detected, 0);
    assert_eq!(run.report.statistics.merges_detected, 0);
}

#[test]
fn test_decode_failure_aborts_without_report() {
    let mut source = MockSource::new(clean_sequence(), FrameRate::new(30, 1));
    source.fail_after = Some(3);

    let result = Analyzer::new().run(&mut source, None, None);
    assert!(matches!(result, Err(Error::Decode(_))));
}

#[test]
fn test_invalid_thresholds_rejected_before_decode() {
    let config = AnalyzerConfig {
        classifier: ClassifierConfig {
            sharpness_threshold: f64::NAN,
            ..Default::default()
        },
        ..Default::default()
    };

    let mut source = MockSource::new(clean_sequence(), FrameRate::new(30, 1));
    let result = Analyzer::with_config(config).run(&mut source, None, None);
    assert!(matches!(result, Err(Error::InvalidParameter(_))));
    // No frame was pulled.
    assert_eq!(source.cursor, 0);
}

#[test]
fn test_cancellation_stops_run() {
    let token = CancelToken::new();
    token.cancel();

    let mut source = MockSource::new(clean_sequence(), FrameRate::new(30, 1));
    let mut sink = MockSink::default();
    let result = Analyzer::new().run(&mut source, Some(&mut sink), Some(&token));

    assert!(matches!(result, Err(Error::Cancelled)));
    // Nothing was emitted for the cancelled run.
    assert!(sink.frames.is_empty());
}

#[test]
fn test_session_retunes_without_redecode() {
    let frames: Vec<_> = (0..6).map(|i| flat_frame(i as f64 * 33.33)).collect();
    let mut source = MockSource::new(frames, FrameRate::new(30, 1));
    let run = Analyzer::new().run(&mut source, None, None).unwrap();
    assert_eq!(run.report.statistics.merges_detected, 5);

    // Source is exhausted; retuning works purely off cached metrics.
    assert!(source.next_frame().unwrap().is_none());

    let retuned = run
        .session
        .reclassify(ClassifierConfig {
            sharpness_threshold: 0.0,
            ..Default::default()
        })
        .unwrap();
    assert_eq!(retuned.statistics.merges_detected, 0);
    assert_eq!(retuned.statistics.total_frames, 5 + 1);
}

#[test]
fn test_repeat_runs_identical_records() {
    let make = || MockSource::new(clean_sequence(), FrameRate::new(30, 1));
    let a = Analyzer::new().run(&mut make(), None, None).unwrap();
    let b = Analyzer::new().run(&mut make(), None, None).unwrap();
    assert_eq!(a.report.frames, b.report.frames);
    assert_eq!(a.report.statistics.drops_detected, b.report.statistics.drops_detected);
}
