//! BatchCut - batch media transformation driven by FFmpeg
//!
//! Synthesizes FFmpeg command lines from edit requests (trim, crop, scale,
//! rotate, speed, re-encode, frame extraction) and runs them in a bounded
//! parallel worker pool with live progress reporting.

pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod probe;
pub mod utils;

pub use domain::model::{
    CropRect, EditRequest, FrameExtractRequest, MediaInfo, Rotation, TimeSpec,
};
pub use error::{BatchCutError, BatchCutResult};
