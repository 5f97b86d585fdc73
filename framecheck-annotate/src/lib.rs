//! # Framecheck Annotate
//!
//! Status overlay stage of the framecheck pipeline: every classified
//! frame is composited with a translucent banner and a solid badge in
//! its status color before being handed to the encoder collaborator.
//!
//! Color contract (consuming UIs depend on it): Normal is green, Drop is
//! red, Merge is yellow, anything unrecognized is neutral gray.

pub mod color;
pub mod overlay;

pub use color::{status_color, Color};
pub use overlay::{AnnotateConfig, Annotator};
