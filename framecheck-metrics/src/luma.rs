//! Grayscale reduction and fixed-size resampling.
//!
//! Both metrics operate on 8-bit luma: sharpness on the full-resolution
//! reduction, motion on a fixed analysis grid so scores stay comparable
//! across input resolutions.

use framecheck_core::{Frame, PixelFormat};

/// Reduce a packed frame to an 8-bit luma plane.
///
/// Uses integer BT.601 weights (77/150/29, rounding) for color formats;
/// gray input is copied through.
pub fn luma_plane(frame: &Frame) -> Vec<u8> {
    let data = frame.data();
    let channels = frame.format().channels();

    match frame.format() {
        PixelFormat::Gray8 => data.to_vec(),
        _ => {
            let bgr = frame.format().is_bgr_order();
            data.chunks_exact(channels)
                .map(|px| {
                    let (r, g, b) = if bgr {
                        (px[2] as u32, px[1] as u32, px[0] as u32)
                    } else {
                        (px[0] as u32, px[1] as u32, px[2] as u32)
                    };
                    ((77 * r + 150 * g + 29 * b + 128) >> 8) as u8
                })
                .collect()
        }
    }
}

/// Resample a luma plane to the given size by nearest-neighbor sampling.
///
/// Accuracy beyond this is wasted on a mean-absolute-difference metric,
/// and nearest keeps the resample deterministic across platforms.
pub fn resample(plane: &[u8], width: u32, height: u32, dst_width: u32, dst_height: u32) -> Vec<u8> {
    if width == 0 || height == 0 || dst_width == 0 || dst_height == 0 {
        return Vec::new();
    }

    let mut out = Vec::with_capacity((dst_width * dst_height) as usize);
    for dy in 0..dst_height {
        let sy = (dy as u64 * height as u64 / dst_height as u64) as usize;
        let row_start = sy * width as usize;
        for dx in 0..dst_width {
            let sx = (dx as u64 * width as u64 / dst_width as u64) as usize;
            out.push(plane.get(row_start + sx).copied().unwrap_or(0));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_passthrough() {
        let mut frame = Frame::new(4, 2, PixelFormat::Gray8);
        frame.data_mut().copy_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(luma_plane(&frame), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_rgb_and_bgr_agree() {
        let mut rgb = Frame::new(1, 1, PixelFormat::Rgb24);
        rgb.data_mut().copy_from_slice(&[200, 100, 50]);

        let mut bgr = Frame::new(1, 1, PixelFormat::Bgr24);
        bgr.data_mut().copy_from_slice(&[50, 100, 200]);

        assert_eq!(luma_plane(&rgb), luma_plane(&bgr));
    }

    #[test]
    fn test_white_is_white() {
        let mut frame = Frame::new(2, 2, PixelFormat::Rgba);
        frame.data_mut().fill(255);
        assert!(luma_plane(&frame).iter().all(|&v| v >= 254));
    }

    #[test]
    fn test_resample_identity() {
        let plane = vec![10, 20, 30, 40];
        assert_eq!(resample(&plane, 2, 2, 2, 2), plane);
    }

    #[test]
    fn test_resample_downscale_uniform() {
        let plane = vec![128u8; 64 * 64];
        let small = resample(&plane, 64, 64, 8, 8);
        assert_eq!(small.len(), 64);
        assert!(small.iter().all(|&v| v == 128));
    }

    #[test]
    fn test_resample_empty_dimensions() {
        assert!(resample(&[], 0, 0, 8, 8).is_empty());
        assert!(resample(&[1, 2, 3, 4], 2, 2, 0, 8).is_empty());
    }
}
