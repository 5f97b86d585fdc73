//! Status overlay compositing.
//!
//! Produces a new frame with a translucent status-colored banner across
//! the top and a solid badge disc near the top-right corner. Compositing
//! is a pure function of (frame, record): no state is shared across
//! frames and the input is never mutated.

use crate::color::{status_color, Color};
use framecheck_classify::ClassificationRecord;
use framecheck_core::{Frame, PixelFormat};

/// Overlay geometry and blending settings.
#[derive(Debug, Clone)]
pub struct AnnotateConfig {
    /// Banner height in pixels (clipped to the frame).
    pub banner_height: u32,
    /// Banner opacity in [0, 1].
    pub banner_alpha: f32,
    /// Badge disc radius in pixels.
    pub badge_radius: u32,
    /// Badge center distance from the right edge.
    pub badge_margin: u32,
}

impl Default for AnnotateConfig {
    fn default() -> Self {
        Self {
            banner_height: 60,
            banner_alpha: 0.3,
            badge_radius: 15,
            badge_margin: 40,
        }
    }
}

/// Composites status overlays onto frames.
#[derive(Debug, Clone, Default)]
pub struct Annotator {
    config: AnnotateConfig,
}

impl Annotator {
    /// Create an annotator with default geometry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an annotator with custom geometry.
    pub fn with_config(config: AnnotateConfig) -> Self {
        Self { config }
    }

    /// Produce an annotated copy of `frame` for its classification.
    ///
    /// Resolution, pixel format, and timing are preserved. A degraded
    /// frame (unusable buffer) is replaced by a black frame of the same
    /// geometry so the output stream keeps the source's frame count.
    pub fn annotate(&self, frame: &Frame, record: &ClassificationRecord) -> Frame {
        self.composite(frame, status_color(Some(record.status)))
    }

    /// Annotate a frame that has no classification record, using the
    /// neutral color.
    pub fn annotate_unclassified(&self, frame: &Frame) -> Frame {
        self.composite(frame, status_color(None))
    }

    fn composite(&self, frame: &Frame, color: Color) -> Frame {
        let mut out = if frame.is_degraded() {
            let mut black = Frame::new(frame.width(), frame.height(), frame.format());
            black.pts_ms = frame.pts_ms;
            black.flags = frame.flags;
            black
        } else {
            frame.clone()
        };

        self.blend_banner(&mut out, color);
        self.draw_badge(&mut out, color);
        out
    }

    /// Alpha-blend the banner strip over the top of the frame.
    fn blend_banner(&self, frame: &mut Frame, color: Color) {
        let format = frame.format();
        let channels = format.channels();
        let overlay = color.channels(format);
        let rows = self.config.banner_height.min(frame.height());

        // Fixed-point weights, 8-bit fraction.
        let alpha = self.config.banner_alpha.clamp(0.0, 1.0);
        let w_overlay = (alpha * 256.0) as u32;
        let w_frame = 256 - w_overlay;

        for y in 0..rows {
            let row = match frame.row_mut(y) {
                Some(row) => row,
                None => break,
            };
            for px in row.chunks_exact_mut(channels) {
                for (c, value) in px.iter_mut().enumerate() {
                    if format.has_alpha() && c == channels - 1 {
                        continue;
                    }
                    let blended =
                        (*value as u32 * w_frame + overlay[c] as u32 * w_overlay + 128) >> 8;
                    *value = blended.min(255) as u8;
                }
            }
        }
    }

    /// Draw the solid badge disc near the top-right corner.
    fn draw_badge(&self, frame: &mut Frame, color: Color) {
        let format = frame.format();
        let channels = format.channels();
        let fill = color.channels(format);

        let radius = self.config.badge_radius as i64;
        let cx = frame.width() as i64 - self.config.badge_margin as i64;
        let cy = (self.config.banner_height.min(frame.height()) / 2) as i64;
        let width = frame.width() as i64;
        let height = frame.height() as i64;

        for dy in -radius..=radius {
            let y = cy + dy;
            if y < 0 || y >= height {
                continue;
            }
            let row = match frame.row_mut(y as u32) {
                Some(row) => row,
                None => continue,
            };
            for dx in -radius..=radius {
                let x = cx + dx;
                if x < 0 || x >= width || dx * dx + dy * dy > radius * radius {
                    continue;
                }
                let start = x as usize * channels;
                for c in 0..channels {
                    if format.has_alpha() && c == channels - 1 {
                        continue;
                    }
                    row[start + c] = fill[c];
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use framecheck_classify::Status;
    use framecheck_core::FrameFlags;

    fn record(status: Status) -> ClassificationRecord {
        ClassificationRecord {
            frame_index: 3,
            status,
            confidence: 0.9,
            timestamp_ms: 100.0,
            sharpness: 150.0,
            motion: 4.0,
            ts_gap_ms: 33.0,
        }
    }

    fn gray_frame(value: u8) -> Frame {
        let mut frame = Frame::new(160, 120, PixelFormat::Gray8).with_pts_ms(100.0);
        frame.data_mut().fill(value);
        frame
    }

    #[test]
    fn test_preserves_geometry_and_timing() {
        let frame = gray_frame(100);
        let out = Annotator::new().annotate(&frame, &record(Status::Normal));
        assert_eq!(out.width(), 160);
        assert_eq!(out.height(), 120);
        assert_eq!(out.format(), PixelFormat::Gray8);
        assert_eq!(out.pts_ms, 100.0);
    }

    #[test]
    fn test_input_not_mutated() {
        let frame = gray_frame(100);
        let before = frame.data().to_vec();
        let _ = Annotator::new().annotate(&frame, &record(Status::Drop));
        assert_eq!(frame.data(), &before[..]);
    }

    #[test]
    fn test_banner_blended_below_banner_untouched() {
        let frame = gray_frame(100);
        let out = Annotator::new().annotate(&frame, &record(Status::Drop));

        // Inside the banner (away from the badge): 0.3 toward red's luma.
        let banner_px = out.row(10).unwrap()[5];
        assert_ne!(banner_px, 100);

        // Below the banner: untouched.
        assert_eq!(out.row(100).unwrap()[5], 100);
    }

    #[test]
    fn test_badge_is_solid_status_color() {
        let mut frame = Frame::new(160, 120, PixelFormat::Rgb24);
        frame.data_mut().fill(10);
        let out = Annotator::new().annotate(&frame, &record(Status::Merge));

        // Badge center at (width - 40, 30).
        let row = out.row(30).unwrap();
        let px = &row[(160 - 40) * 3..(160 - 40) * 3 + 3];
        assert_eq!(px, &[255, 255, 0]);
    }

    #[test]
    fn test_bgr_badge_channel_order() {
        let mut frame = Frame::new(160, 120, PixelFormat::Bgr24);
        frame.data_mut().fill(0);
        let out = Annotator::new().annotate(&frame, &record(Status::Drop));

        let row = out.row(30).unwrap();
        let px = &row[(160 - 40) * 3..(160 - 40) * 3 + 3];
        assert_eq!(px, &[0, 0, 255]);
    }

    #[test]
    fn test_degraded_frame_becomes_black_with_overlay() {
        let mut frame = gray_frame(200);
        frame.flags |= FrameFlags::DEGRADED;
        let out = Annotator::new().annotate(&frame, &record(Status::Normal));

        assert_eq!(out.width(), 160);
        assert_eq!(out.height(), 120);
        // Body is black, banner still carries the status tint.
        assert_eq!(out.row(100).unwrap()[5], 0);
        assert_ne!(out.row(10).unwrap()[5], 0);
    }

    #[test]
    fn test_banner_clipped_to_short_frames() {
        let mut frame = Frame::new(64, 20, PixelFormat::Gray8);
        frame.data_mut().fill(50);
        // Banner (60) taller than the frame (20) must not panic.
        let out = Annotator::new().annotate(&frame, &record(Status::Normal));
        assert_eq!(out.height(), 20);
    }

    #[test]
    fn test_unclassified_uses_neutral() {
        let frame = gray_frame(0);
        let out = Annotator::new().annotate_unclassified(&frame);
        // Neutral gray luma is 128; banner at alpha 0.3 over black ≈ 38.
        let px = out.row(10).unwrap()[5];
        assert!(px > 30 && px < 50);
    }
}
