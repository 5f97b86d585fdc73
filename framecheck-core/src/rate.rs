//! Frame rate representation.
//!
//! Nominal frame rates are kept as rationals so NTSC rates (30000/1001)
//! survive the trip into an expected frame interval without drift.

use std::fmt;

/// Expected frame interval used when the container reports no usable
/// frame rate (matches a nominal ~30 fps stream).
pub const DEFAULT_INTERVAL_MS: f64 = 33.33;

/// Nominal frame rate as a rational number of frames per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRate {
    /// Numerator (frames).
    pub num: i64,
    /// Denominator (seconds), always positive.
    pub den: i64,
}

impl FrameRate {
    /// Create a new frame rate.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is zero.
    pub fn new(num: i64, den: i64) -> Self {
        assert!(den != 0, "Frame rate denominator cannot be zero");
        let (num, den) = if den < 0 { (-num, -den) } else { (num, den) };
        Self { num, den }
    }

    /// NTSC video (29.97 fps).
    pub const NTSC: Self = Self {
        num: 30000,
        den: 1001,
    };

    /// PAL video (25 fps).
    pub const PAL: Self = Self { num: 25, den: 1 };

    /// Film (24 fps).
    pub const FILM: Self = Self { num: 24, den: 1 };

    /// An unknown frame rate (0 fps); callers fall back to
    /// [`DEFAULT_INTERVAL_MS`].
    pub const UNKNOWN: Self = Self { num: 0, den: 1 };

    /// Build from a floating fps value, as reported by most decoders.
    ///
    /// The value is held at millihertz precision, which is enough to
    /// round-trip the common broadcast rates.
    pub fn from_fps(fps: f64) -> Self {
        if !fps.is_finite() || fps <= 0.0 {
            return Self::UNKNOWN;
        }
        Self::new((fps * 1000.0).round() as i64, 1000)
    }

    /// Frames per second as a float.
    pub fn as_f64(&self) -> f64 {
        self.num as f64 / self.den as f64
    }

    /// Check whether this rate can produce a meaningful interval.
    pub fn is_valid(&self) -> bool {
        self.num > 0
    }

    /// Expected interval between frames in milliseconds.
    ///
    /// Unknown or non-positive rates fall back to
    /// [`DEFAULT_INTERVAL_MS`].
    pub fn frame_interval_ms(&self) -> f64 {
        if self.is_valid() {
            1000.0 * self.den as f64 / self.num as f64
        } else {
            DEFAULT_INTERVAL_MS
        }
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{} fps", self.num)
        } else {
            write!(f, "{:.3} fps", self.as_f64())
        }
    }
}
