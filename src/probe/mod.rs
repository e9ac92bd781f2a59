//! Media probing via the external ffprobe executable
//!
//! The probe is an opaque collaborator: it either yields the stream facts
//! needed to populate an edit request (frame size, duration, frame rate,
//! codec, file size) or rejects the file. Rejection of one file never stops
//! the rest of a batch; the caller skips the item and moves on.

use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::domain::model::{is_supported_extension, MediaInfo, TimeSpec};
use crate::engine::PROBE_BIN;
use crate::error::{BatchCutError, BatchCutResult};

/// Probe collaborator interface
#[async_trait]
pub trait MediaProbe: Send + Sync {
    /// Inspect a media file, rejecting unsupported containers and files
    /// without a video stream.
    async fn probe_media(&self, file_path: &str) -> BatchCutResult<MediaInfo>;
}

/// ffprobe-backed probe implementation
pub struct FfprobeInspector;

impl FfprobeInspector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FfprobeInspector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaProbe for FfprobeInspector {
    async fn probe_media(&self, file_path: &str) -> BatchCutResult<MediaInfo> {
        if !Path::new(file_path).exists() {
            return Err(BatchCutError::InputFileNotFound {
                path: file_path.to_string(),
            });
        }

        if !is_supported_extension(file_path) {
            return Err(BatchCutError::UnsupportedExtension {
                path: file_path.to_string(),
            });
        }

        debug!(path = %file_path, "probing media file");
        let output = tokio::process::Command::new(PROBE_BIN)
            .args([
                "-v",
                "error",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
                file_path,
            ])
            .output()
            .await
            .map_err(|e| BatchCutError::ProbeError {
                message: format!("failed to run {}: {}", PROBE_BIN, e),
            })?;

        if !output.status.success() {
            return Err(BatchCutError::ProbeError {
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let file_size = std::fs::metadata(file_path)?.len();
        parse_probe_output(&output.stdout, file_path, file_size)
    }
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
    format: Option<ProbeFormat>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    codec_type: Option<String>,
    codec_name: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    avg_frame_rate: Option<String>,
    r_frame_rate: Option<String>,
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

/// Decode an ffprobe JSON document into [`MediaInfo`]
fn parse_probe_output(json: &[u8], file_path: &str, file_size: u64) -> BatchCutResult<MediaInfo> {
    let parsed: ProbeOutput =
        serde_json::from_slice(json).map_err(|e| BatchCutError::ProbeError {
            message: format!("malformed probe output: {}", e),
        })?;

    let video = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| BatchCutError::NoVideoStream {
            path: file_path.to_string(),
        })?;

    let duration_seconds = video
        .duration
        .as_deref()
        .or(parsed.format.as_ref().and_then(|f| f.duration.as_deref()))
        .and_then(|d| d.parse::<f64>().ok())
        .unwrap_or(0.0);

    let frame_rate = video
        .avg_frame_rate
        .as_deref()
        .and_then(parse_rational)
        .or_else(|| video.r_frame_rate.as_deref().and_then(parse_rational))
        .unwrap_or(0.0);

    let path = Path::new(file_path);
    Ok(MediaInfo {
        file_path: file_path.to_string(),
        file_stem: path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default(),
        extension: path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default(),
        width: video.width.unwrap_or(0),
        height: video.height.unwrap_or(0),
        duration: TimeSpec::from_seconds(duration_seconds),
        frame_rate,
        video_codec: video.codec_name.clone().unwrap_or_default(),
        file_size,
    })
}

/// Parse ffprobe's `num/den` frame-rate spelling
fn parse_rational(value: &str) -> Option<f64> {
    match value.split_once('/') {
        Some((num, den)) => {
            let num = num.parse::<f64>().ok()?;
            let den = den.parse::<f64>().ok()?;
            if den == 0.0 {
                None
            } else {
                Some(num / den)
            }
        }
        None => value.parse::<f64>().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_PROBE_JSON: &str = r#"{
        "streams": [
            {
                "codec_type": "audio",
                "codec_name": "aac"
            },
            {
                "codec_type": "video",
                "codec_name": "h264",
                "width": 1920,
                "height": 1080,
                "avg_frame_rate": "30000/1001",
                "r_frame_rate": "30000/1001",
                "duration": "12.345"
            }
        ],
        "format": {
            "duration": "12.400"
        }
    }"#;

    #[test]
    fn test_parse_probe_output() {
        let info =
            parse_probe_output(SAMPLE_PROBE_JSON.as_bytes(), "/media/clip.mp4", 4096).unwrap();
        assert_eq!(info.file_stem, "clip");
        assert_eq!(info.extension, "mp4");
        assert_eq!(info.width, 1920);
        assert_eq!(info.height, 1080);
        assert_eq!(info.video_codec, "h264");
        assert_eq!(info.file_size, 4096);
        assert!((info.frame_rate - 29.97).abs() < 0.01);
        assert_eq!(info.duration.seconds, 12.345);
    }

    #[test]
    fn test_parse_probe_output_no_video_stream() {
        let json = r#"{"streams": [{"codec_type": "audio", "codec_name": "aac"}]}"#;
        let err = parse_probe_output(json.as_bytes(), "/media/song.mp4", 0).unwrap_err();
        assert!(matches!(err, BatchCutError::NoVideoStream { .. }));
    }

    #[test]
    fn test_parse_probe_output_malformed_json() {
        let err = parse_probe_output(b"not json", "/media/clip.mp4", 0).unwrap_err();
        assert!(matches!(err, BatchCutError::ProbeError { .. }));
    }

    #[test]
    fn test_parse_rational() {
        assert_eq!(parse_rational("30/1"), Some(30.0));
        assert_eq!(parse_rational("0/0"), None);
        assert_eq!(parse_rational("25"), Some(25.0));
        assert_eq!(parse_rational("abc"), None);
    }

    #[tokio::test]
    async fn test_probe_rejects_unsupported_extension() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("song.mp3");
        std::fs::write(&path, b"").unwrap();

        let inspector = FfprobeInspector::new();
        let err = inspector
            .probe_media(path.to_str().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, BatchCutError::UnsupportedExtension { .. }));
    }

    #[tokio::test]
    async fn test_probe_rejects_missing_file() {
        let inspector = FfprobeInspector::new();
        let err = inspector.probe_media("/no/such/file.mp4").await.unwrap_err();
        assert!(matches!(err, BatchCutError::InputFileNotFound { .. }));
    }
}
