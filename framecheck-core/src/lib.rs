//! # Framecheck Core
//!
//! Core types and collaborator traits for the framecheck toolkit.
//!
//! This crate provides the building blocks shared across all framecheck
//! components:
//! - Error handling types
//! - Packed frame buffer abstractions
//! - Frame rate and interval handling
//! - Decoder/encoder collaborator traits

pub mod error;
pub mod frame;
pub mod rate;
pub mod source;

pub use error::{Error, Result};
pub use frame::{Frame, FrameFlags, PixelFormat};
pub use rate::{FrameRate, DEFAULT_INTERVAL_MS};
pub use source::{FrameSink, FrameSource};
