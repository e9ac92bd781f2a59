//! Command synthesis and parallel execution engine

pub mod command;
pub mod executor;
pub mod filter;
pub mod progress;

/// External transcoding executable, resolved through PATH
pub const ENGINE_BIN: &str = "ffmpeg";

/// External probing executable, resolved through PATH
pub const PROBE_BIN: &str = "ffprobe";

/// Container extension for compressed video output
pub const MOVIE_FORMAT: &str = "mp4";

/// Image extension for extracted frame sequences
pub const IMAGE_FORMAT: &str = "png";

/// Image extension for thumbnails
pub const THUMBNAIL_FORMAT: &str = "jpg";

/// Fixed quality level for thumbnail extraction
pub const THUMBNAIL_QUALITY: u32 = 2;
