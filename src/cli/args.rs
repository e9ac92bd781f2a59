//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

/// Arguments for the compress command
#[derive(Args, Debug)]
pub struct CompressArgs {
    /// Input media files or directories to scan
    #[arg(required = true)]
    pub inputs: Vec<String>,

    /// Output directory (default: from configuration)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Crop rectangle as x,y,width,height in source pixels
    #[arg(long)]
    pub crop: Option<String>,

    /// Resize target width (omit for auto)
    #[arg(long)]
    pub width: Option<u32>,

    /// Resize target height (omit for auto)
    #[arg(long)]
    pub height: Option<u32>,

    /// Rotation in degrees (0, 90, 180, 270)
    #[arg(long, default_value = "0")]
    pub rotate: String,

    /// Playback speed multiplier
    #[arg(long)]
    pub speed: Option<f64>,

    /// Target frame rate
    #[arg(long)]
    pub fps: Option<f64>,

    /// Video codec
    #[arg(long)]
    pub codec: Option<String>,

    /// Remove audio streams
    #[arg(long)]
    pub no_audio: bool,

    /// Trim start (HH:MM:SS.ms, MM:SS.ms, or seconds)
    #[arg(short, long)]
    pub start: Option<String>,

    /// Trim end (HH:MM:SS.ms, MM:SS.ms, or seconds)
    #[arg(short, long)]
    pub end: Option<String>,

    /// Report progress as JSON lines
    #[arg(long)]
    pub json_progress: bool,

    /// Concurrent engine processes (default: logical CPU count)
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

/// Arguments for the frames command
#[derive(Args, Debug)]
pub struct FramesArgs {
    /// Input media files or directories to scan
    #[arg(required = true)]
    pub inputs: Vec<String>,

    /// Output directory (default: from configuration)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Frames sampled per second of source media
    #[arg(long)]
    pub fps: Option<u32>,

    /// Total number of frames to extract
    #[arg(long)]
    pub count: Option<u32>,

    /// Image quality level (lower is higher quality)
    #[arg(short, long)]
    pub quality: Option<u32>,

    /// Trim start (HH:MM:SS.ms, MM:SS.ms, or seconds)
    #[arg(short, long)]
    pub start: Option<String>,

    /// Trim end (HH:MM:SS.ms, MM:SS.ms, or seconds)
    #[arg(short, long)]
    pub end: Option<String>,

    /// Report progress as JSON lines
    #[arg(long)]
    pub json_progress: bool,

    /// Concurrent engine processes (default: logical CPU count)
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

/// Arguments for the thumbnail command
#[derive(Args, Debug)]
pub struct ThumbnailArgs {
    /// Input media file path
    pub input: String,

    /// Timestamp to extract the frame at (HH:MM:SS.ms, MM:SS.ms, or seconds)
    #[arg(long, conflicts_with = "last")]
    pub at: Option<String>,

    /// Extract the last frame instead of a timestamp
    #[arg(long)]
    pub last: bool,

    /// Thumbnail cache directory (default: from configuration)
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,
}

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Input media file path
    pub input: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
