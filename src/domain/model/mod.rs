// Domain models - Core types and data structures

use std::fmt;
use std::path::PathBuf;

use crate::error::{BatchCutError, BatchCutResult};

/// Time specification with precision - represents time in seconds with fractional precision
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TimeSpec {
    pub seconds: f64,
}

impl TimeSpec {
    /// Create a new TimeSpec from seconds
    pub fn from_seconds(seconds: f64) -> Self {
        Self { seconds }
    }

    /// Create a new TimeSpec from hours, minutes, seconds, milliseconds
    pub fn from_components(hours: u32, minutes: u32, seconds: u32, milliseconds: u32) -> Self {
        let total_seconds =
            hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds as f64 + milliseconds as f64 / 1000.0;
        Self { seconds: total_seconds }
    }

    /// Parse time string in various formats
    pub fn parse(time_str: &str) -> BatchCutResult<Self> {
        let trimmed = time_str.trim();

        // Try parsing as seconds (float)
        if let Ok(seconds) = trimmed.parse::<f64>() {
            if seconds < 0.0 {
                return Err(BatchCutError::InvalidTimeFormat {
                    time: time_str.to_string(),
                });
            }
            return Ok(Self::from_seconds(seconds));
        }

        let parts: Vec<&str> = trimmed.split(':').collect();
        match parts.len() {
            // MM:SS(.ms) format
            2 => {
                let minutes = parts[0]
                    .parse::<u32>()
                    .map_err(|_| BatchCutError::InvalidTimeFormat {
                        time: time_str.to_string(),
                    })?;
                let seconds = Self::parse_seconds_part(parts[1], time_str)?;
                Ok(Self::from_seconds(minutes as f64 * 60.0 + seconds))
            }
            // HH:MM:SS(.ms) format
            3 => {
                let hours = parts[0]
                    .parse::<u32>()
                    .map_err(|_| BatchCutError::InvalidTimeFormat {
                        time: time_str.to_string(),
                    })?;
                let minutes = parts[1]
                    .parse::<u32>()
                    .map_err(|_| BatchCutError::InvalidTimeFormat {
                        time: time_str.to_string(),
                    })?;
                if minutes >= 60 {
                    return Err(BatchCutError::InvalidTimeFormat {
                        time: time_str.to_string(),
                    });
                }
                let seconds = Self::parse_seconds_part(parts[2], time_str)?;
                Ok(Self::from_seconds(
                    hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds,
                ))
            }
            _ => Err(BatchCutError::InvalidTimeFormat {
                time: time_str.to_string(),
            }),
        }
    }

    fn parse_seconds_part(part: &str, original: &str) -> BatchCutResult<f64> {
        let seconds = part
            .parse::<f64>()
            .map_err(|_| BatchCutError::InvalidTimeFormat {
                time: original.to_string(),
            })?;
        if !(0.0..60.0).contains(&seconds) {
            return Err(BatchCutError::InvalidTimeFormat {
                time: original.to_string(),
            });
        }
        Ok(seconds)
    }

    /// Format for the engine command line: always `hh:mm:ss.fff`
    pub fn format_engine(&self) -> String {
        let total_ms = (self.seconds * 1000.0).round() as u64;
        let hours = total_ms / 3_600_000;
        let minutes = (total_ms % 3_600_000) / 60_000;
        let seconds = (total_ms % 60_000) / 1000;
        let milliseconds = total_ms % 1000;
        format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, milliseconds)
    }

    /// Compact form `hhmmssfff` used in generated file names
    pub fn format_compact(&self) -> String {
        let total_ms = (self.seconds * 1000.0).round() as u64;
        let hours = total_ms / 3_600_000;
        let minutes = (total_ms % 3_600_000) / 60_000;
        let seconds = (total_ms % 60_000) / 1000;
        let milliseconds = total_ms % 1000;
        format!("{:02}{:02}{:02}{:03}", hours, minutes, seconds, milliseconds)
    }
}

impl fmt::Display for TimeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_engine())
    }
}

/// Crop rectangle in original-pixel space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
}

/// Baked-in rotation applied to the video stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    None,
    Rotate90,
    Rotate180,
    Rotate270,
}

impl Rotation {
    /// Parse a rotation from its CLI spelling (degrees)
    pub fn parse(value: &str) -> BatchCutResult<Self> {
        match value.trim() {
            "" | "0" | "none" => Ok(Self::None),
            "90" => Ok(Self::Rotate90),
            "180" => Ok(Self::Rotate180),
            "270" => Ok(Self::Rotate270),
            other => Err(BatchCutError::InvalidRotation {
                value: other.to_string(),
            }),
        }
    }
}

/// One queued compress-and-trim edit
///
/// All edit parameters are independently optional; absent parameters are
/// simply omitted from the synthesized command.
#[derive(Debug, Clone)]
pub struct EditRequest {
    /// Input media file path
    pub file_path: String,
    /// Original frame width in pixels
    pub original_width: u32,
    /// Original frame height in pixels
    pub original_height: u32,
    /// Crop rectangle, absent when no crop is requested
    pub crop: Option<CropRect>,
    /// Resize target width; `None` means auto from aspect ratio
    pub resize_width: Option<u32>,
    /// Resize target height; `None` means auto from aspect ratio
    pub resize_height: Option<u32>,
    /// Baked-in rotation
    pub rotation: Rotation,
    /// Playback speed multiplier, must be > 0 when present
    pub speed: Option<f64>,
    /// Target output frame rate, must be > 0 when present
    pub frame_rate: Option<f64>,
    /// Video codec identifier passed to the engine
    pub codec: Option<String>,
    /// Strip all audio streams
    pub audio_disabled: bool,
    /// Trim window start
    pub trim_start: Option<TimeSpec>,
    /// Trim window end
    pub trim_end: Option<TimeSpec>,
    /// Directory the output file is written to
    pub output_directory: PathBuf,
    /// Output file base name, without extension
    pub output_name: String,
}

impl EditRequest {
    /// Create a request with no edits applied
    pub fn new(
        file_path: impl Into<String>,
        original_width: u32,
        original_height: u32,
        output_directory: impl Into<PathBuf>,
        output_name: impl Into<String>,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            original_width,
            original_height,
            crop: None,
            resize_width: None,
            resize_height: None,
            rotation: Rotation::None,
            speed: None,
            frame_rate: None,
            codec: None,
            audio_disabled: false,
            trim_start: None,
            trim_end: None,
            output_directory: output_directory.into(),
            output_name: output_name.into(),
        }
    }

    pub fn with_crop(mut self, crop: CropRect) -> Self {
        self.crop = Some(crop);
        self
    }

    pub fn with_resize(mut self, width: Option<u32>, height: Option<u32>) -> Self {
        self.resize_width = width;
        self.resize_height = height;
        self
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the playback speed multiplier; non-positive values are ignored
    pub fn with_speed(mut self, speed: f64) -> Self {
        if speed > 0.0 {
            self.speed = Some(speed);
        }
        self
    }

    /// Set the target frame rate; non-positive values are ignored
    pub fn with_frame_rate(mut self, frame_rate: f64) -> Self {
        if frame_rate > 0.0 {
            self.frame_rate = Some(frame_rate);
        }
        self
    }

    pub fn with_codec(mut self, codec: impl Into<String>) -> Self {
        let codec = codec.into();
        if !codec.trim().is_empty() {
            self.codec = Some(codec);
        }
        self
    }

    pub fn with_audio_disabled(mut self, disabled: bool) -> Self {
        self.audio_disabled = disabled;
        self
    }

    pub fn with_trim(mut self, start: Option<TimeSpec>, end: Option<TimeSpec>) -> Self {
        self.trim_start = start;
        self.trim_end = end;
        self
    }
}

/// One queued frame-sequence extraction
#[derive(Debug, Clone)]
pub struct FrameExtractRequest {
    /// Input media file path
    pub file_path: String,
    /// Frames sampled per second of source media, >= 1 when present
    pub frames_per_second: Option<u32>,
    /// Cap on the total number of extracted frames, >= 1 when present
    pub frame_count: Option<u32>,
    /// Image quality level; lower is higher quality
    pub quality: Option<u32>,
    /// Trim window start
    pub trim_start: Option<TimeSpec>,
    /// Trim window end
    pub trim_end: Option<TimeSpec>,
    /// Directory the per-item output folder is created in
    pub output_directory: PathBuf,
    /// Base name for the output folder and the numbered frames
    pub output_name: String,
}

impl FrameExtractRequest {
    pub fn new(
        file_path: impl Into<String>,
        output_directory: impl Into<PathBuf>,
        output_name: impl Into<String>,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            frames_per_second: None,
            frame_count: None,
            quality: None,
            trim_start: None,
            trim_end: None,
            output_directory: output_directory.into(),
            output_name: output_name.into(),
        }
    }

    pub fn with_frames_per_second(mut self, fps: u32) -> Self {
        if fps >= 1 {
            self.frames_per_second = Some(fps);
        }
        self
    }

    pub fn with_frame_count(mut self, count: u32) -> Self {
        if count >= 1 {
            self.frame_count = Some(count);
        }
        self
    }

    pub fn with_quality(mut self, quality: u32) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn with_trim(mut self, start: Option<TimeSpec>, end: Option<TimeSpec>) -> Self {
        self.trim_start = start;
        self.trim_end = end;
        self
    }
}

/// Media container extensions the probe accepts
pub const SUPPORTED_EXTENSIONS: &[&str] = &["mp4", "mov", "agm", "avi", "wmv"];

/// Check a path's extension against the supported container list
pub fn is_supported_extension(path: &str) -> bool {
    std::path::Path::new(path)
        .extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Probed media file information
#[derive(Debug, Clone)]
pub struct MediaInfo {
    /// Full input path
    pub file_path: String,
    /// File name without extension
    pub file_stem: String,
    /// File extension, lowercase, without the dot
    pub extension: String,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Total playback duration
    pub duration: TimeSpec,
    /// Source frame rate
    pub frame_rate: f64,
    /// Video codec name
    pub video_codec: String,
    /// File size in bytes
    pub file_size: u64,
}
