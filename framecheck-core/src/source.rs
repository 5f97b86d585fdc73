//! Collaborator traits for frame producers and consumers.
//!
//! Container decoding and encoding live outside this workspace; the
//! pipeline talks to them through these traits. Sources are ordered,
//! finite, and non-restartable: once `next_frame` returns `None` the
//! sequence is exhausted.

use crate::error::Result;
use crate::frame::Frame;
use crate::rate::FrameRate;

/// An ordered, finite stream of decoded frames (decoder collaborator).
pub trait FrameSource {
    /// Produce the next frame in presentation order, or `None` when the
    /// sequence is exhausted.
    ///
    /// An error here is a decode failure and aborts the whole run; an
    /// individual unreadable frame should instead be returned with its
    /// DEGRADED flag set so analysis can continue.
    fn next_frame(&mut self) -> Result<Option<Frame>>;

    /// Nominal frame rate reported by the container.
    fn frame_rate(&self) -> FrameRate;

    /// Total frame count, if the container knows it up front.
    fn frame_count(&self) -> Option<u64>;

    /// Frame width in pixels.
    fn width(&self) -> u32;

    /// Frame height in pixels.
    fn height(&self) -> u32;
}

/// A consumer of annotated frames (encoder collaborator).
pub trait FrameSink {
    /// Write one annotated frame. Frames arrive in the same order and at
    /// the same resolution as the source produced them.
    fn write_frame(&mut self, frame: &Frame) -> Result<()>;

    /// Flush and finalize the output.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}
