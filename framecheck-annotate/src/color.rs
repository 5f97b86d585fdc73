//! Status color mapping.
//!
//! The mapping is part of the external contract: any UI consuming the
//! annotated stream keys off these exact colors.

use framecheck_classify::Status;
use framecheck_core::PixelFormat;

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    /// Red component.
    pub r: u8,
    /// Green component.
    pub g: u8,
    /// Blue component.
    pub b: u8,
}

impl Color {
    /// Normal frames: green.
    pub const GREEN: Self = Self { r: 0, g: 255, b: 0 };
    /// Dropped frames: red.
    pub const RED: Self = Self { r: 255, g: 0, b: 0 };
    /// Merged frames: yellow.
    pub const YELLOW: Self = Self { r: 255, g: 255, b: 0 };
    /// Unrecognized status: neutral gray.
    pub const NEUTRAL: Self = Self {
        r: 128,
        g: 128,
        b: 128,
    };

    /// 8-bit luma of this color (BT.601 integer weights), used when
    /// compositing onto grayscale frames.
    pub fn luma(&self) -> u8 {
        ((77 * self.r as u32 + 150 * self.g as u32 + 29 * self.b as u32 + 128) >> 8) as u8
    }

    /// Channel values in the storage order of the given format.
    /// Alpha, when present, is fully opaque.
    pub fn channels(&self, format: PixelFormat) -> [u8; 4] {
        match format {
            PixelFormat::Gray8 => [self.luma(), 0, 0, 0],
            f if f.is_bgr_order() => [self.b, self.g, self.r, 255],
            _ => [self.r, self.g, self.b, 255],
        }
    }
}

/// Color for a classification status; `None` (no record available) maps
/// to neutral gray.
pub fn status_color(status: Option<Status>) -> Color {
    match status {
        Some(Status::Normal) => Color::GREEN,
        Some(Status::Drop) => Color::RED,
        Some(Status::Merge) => Color::YELLOW,
        None => Color::NEUTRAL,
    }
}
