//! Decoded video frame abstractions.
//!
//! Frames here are packed single-plane buffers: the detection pipeline
//! consumes whatever the decoder collaborator hands over and only ever
//! needs grayscale reductions of it, so planar YUV layouts are out of
//! scope for this crate.

use crate::error::{Error, Result};
use bitflags::bitflags;
use std::fmt;

/// Pixel format for decoded frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PixelFormat {
    /// Grayscale, 8bpp.
    Gray8,
    /// Packed RGB, 24bpp.
    Rgb24,
    /// Packed BGR, 24bpp.
    Bgr24,
    /// Packed RGBA, 32bpp.
    Rgba,
    /// Packed BGRA, 32bpp.
    Bgra,
}

impl PixelFormat {
    /// Get the number of interleaved channels.
    pub fn channels(&self) -> usize {
        match self {
            Self::Gray8 => 1,
            Self::Rgb24 | Self::Bgr24 => 3,
            Self::Rgba | Self::Bgra => 4,
        }
    }

    /// Check if this format carries an alpha channel.
    pub fn has_alpha(&self) -> bool {
        matches!(self, Self::Rgba | Self::Bgra)
    }

    /// Check if the color channels are stored blue-first.
    pub fn is_bgr_order(&self) -> bool {
        matches!(self, Self::Bgr24 | Self::Bgra)
    }

    /// Calculate the buffer size for the given dimensions.
    pub fn frame_size(&self, width: u32, height: u32) -> usize {
        (width as usize) * (height as usize) * self.channels()
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gray8 => write!(f, "gray8"),
            Self::Rgb24 => write!(f, "rgb24"),
            Self::Bgr24 => write!(f, "bgr24"),
            Self::Rgba => write!(f, "rgba"),
            Self::Bgra => write!(f, "bgra"),
        }
    }
}

bitflags! {
    /// Frame flags indicating frame properties.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FrameFlags: u32 {
        /// The frame buffer was unreadable or truncated at decode time.
        /// Metrics for such a frame are reported as zero and the frame
        /// still flows through classification.
        const DEGRADED = 0x0001;
    }
}

impl Default for FrameFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// A decoded video frame with presentation timing.
#[derive(Clone)]
pub struct Frame {
    /// Packed pixel data.
    data: Vec<u8>,
    /// Frame width in pixels.
    width: u32,
    /// Frame height in pixels.
    height: u32,
    /// Pixel format.
    format: PixelFormat,
    /// Presentation timestamp in milliseconds.
    pub pts_ms: f64,
    /// Frame flags.
    pub flags: FrameFlags,
}

impl Frame {
    /// Create a new zero-filled frame.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        Self {
            data: vec![0u8; format.frame_size(width, height)],
            width,
            height,
            format,
            pts_ms: 0.0,
            flags: FrameFlags::empty(),
        }
    }

    /// Create a frame from an existing packed buffer.
    ///
    /// The buffer is taken as-is; call [`Frame::validate`] to check that
    /// its length matches the dimensions.
    pub fn from_data(data: Vec<u8>, width: u32, height: u32, format: PixelFormat) -> Self {
        Self {
            data,
            width,
            height,
            format,
            pts_ms: 0.0,
            flags: FrameFlags::empty(),
        }
    }

    /// Set the presentation timestamp, builder-style.
    pub fn with_pts_ms(mut self, pts_ms: f64) -> Self {
        self.pts_ms = pts_ms;
        self
    }

    /// Get the frame width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the frame height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the pixel format.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Get the packed pixel data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get a mutable reference to the packed pixel data.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Get one row of pixels, if it exists.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let stride = self.width as usize * self.format.channels();
        let start = y as usize * stride;
        self.data.get(start..start + stride)
    }

    /// Get one mutable row of pixels, if it exists.
    pub fn row_mut(&mut self, y: u32) -> Option<&mut [u8]> {
        if y >= self.height {
            return None;
        }
        let stride = self.width as usize * self.format.channels();
        let start = y as usize * stride;
        self.data.get_mut(start..start + stride)
    }

    /// Validate that the buffer length matches the frame dimensions.
    pub fn validate(&self) -> Result<()> {
        let expected = self.format.frame_size(self.width, self.height);
        if self.data.len() != expected {
            return Err(Error::decode(format!(
                "frame buffer is {} bytes, expected {} for {}x{} {}",
                self.data.len(),
                expected,
                self.width,
                self.height,
                self.format
            )));
        }
        Ok(())
    }

    /// Check whether this frame's pixel data is unusable.
    ///
    /// Empty or short buffers count as degraded even when the decoder
    /// did not flag them.
    pub fn is_degraded(&self) -> bool {
        self.flags.contains(FrameFlags::DEGRADED)
            || self.data.len() < self.format.frame_size(self.width, self.height)
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .field("pts_ms", &self.pts_ms)
            .field("flags", &self.flags)
            .finish()
    }
}
