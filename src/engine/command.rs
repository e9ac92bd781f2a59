//! Engine command synthesis
//!
//! Turns edit and extraction requests into complete argument strings for the
//! external engine. These builders never spawn the engine themselves; the
//! only filesystem effects are the existence checks behind output-path
//! allocation and the creation of per-item output folders.
//!
//! Optional parameters that fail their presence rule (zero frame counts,
//! blank codecs) are omitted from the command rather than rejected; the
//! request builders already enforce the same rules on construction.

use std::path::{Path, PathBuf};

use crate::domain::model::{EditRequest, FrameExtractRequest, TimeSpec};
use crate::engine::filter::build_filter_args;
use crate::engine::{IMAGE_FORMAT, MOVIE_FORMAT, THUMBNAIL_FORMAT, THUMBNAIL_QUALITY};
use crate::error::BatchCutResult;
use crate::utils::path::{allocate_unique, ensure_dir};

/// Build the full argument string for one compress-and-trim invocation.
///
/// Argument order is fixed: input, filter block, frame rate, codec, audio
/// disable, trim window, output path.
pub fn build_compress_command(req: &EditRequest) -> String {
    let mut args: Vec<String> = vec![format!("-y -i \"{}\"", req.file_path)];

    if let Some(graph) = build_filter_args(req) {
        args.push(graph.to_command_fragment());
    }

    if let Some(rate) = req.frame_rate {
        args.push(format!("-r {}", rate));
    }

    if let Some(codec) = &req.codec {
        args.push(format!("-c:v {}", codec));
    }

    if req.audio_disabled {
        args.push("-an".to_string());
    }

    push_trim_window(&mut args, req.trim_start, req.trim_end);

    let candidate = req
        .output_directory
        .join(format!("{}.{}", req.output_name, MOVIE_FORMAT));
    let output = allocate_unique(&candidate);
    args.push(format!("\"{}\"", output.display()));

    args.join(" ")
}

/// Build the full argument string for one frame-sequence extraction.
///
/// Creates the per-item output folder `<dir>/<name>/` and emits a six-digit
/// zero-padded numbering pattern inside it.
pub fn build_frame_extract_command(req: &FrameExtractRequest) -> BatchCutResult<String> {
    let mut args: Vec<String> = vec![format!("-y -i \"{}\"", req.file_path)];

    if let Some(fps) = req.frames_per_second {
        args.push(format!("-r {}", fps));
    }

    if let Some(count) = req.frame_count {
        args.push(format!("-vframes {}", count));
    }

    if let Some(quality) = req.quality {
        args.push(format!("-q:v {}", quality));
    }

    push_trim_window(&mut args, req.trim_start, req.trim_end);

    let frame_dir = req.output_directory.join(&req.output_name);
    ensure_dir(&frame_dir)?;

    let candidate = frame_dir.join(format!("{}_%06d.{}", req.output_name, IMAGE_FORMAT));
    let output = allocate_unique(&candidate);
    args.push(format!("\"{}\"", output.display()));

    Ok(args.join(" "))
}

/// Single-frame thumbnail command synthesis.
///
/// Holds the cache directory thumbnails are written into; callers thread the
/// configured directory in rather than relying on any process-wide state.
#[derive(Debug, Clone)]
pub struct ThumbnailBuilder {
    cache_dir: PathBuf,
}

impl ThumbnailBuilder {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// Command extracting a single frame at `at`, plus the allocated output path
    pub fn build_thumbnail_command(
        &self,
        media_path: &str,
        at: TimeSpec,
    ) -> BatchCutResult<(String, PathBuf)> {
        ensure_dir(&self.cache_dir)?;

        let file_name = format!(
            "{}_{}.{}",
            file_stem(media_path),
            at.format_compact(),
            THUMBNAIL_FORMAT
        );
        let output = allocate_unique(&self.cache_dir.join(file_name));

        let command = format!(
            "-y -i \"{}\" -ss {} -vframes 1 -q:v {} \"{}\"",
            media_path,
            at.format_engine(),
            THUMBNAIL_QUALITY,
            output.display()
        );
        Ok((command, output))
    }

    /// Command extracting the last frame via a seek-from-end offset
    pub fn build_last_frame_command(&self, media_path: &str) -> BatchCutResult<(String, PathBuf)> {
        ensure_dir(&self.cache_dir)?;

        let file_name = format!("{}_last.{}", file_stem(media_path), THUMBNAIL_FORMAT);
        let output = allocate_unique(&self.cache_dir.join(file_name));

        let command = format!(
            "-y -sseof -1 -i \"{}\" -vframes 1 -q:v {} \"{}\"",
            media_path,
            THUMBNAIL_QUALITY,
            output.display()
        );
        Ok((command, output))
    }
}

fn push_trim_window(args: &mut Vec<String>, start: Option<TimeSpec>, end: Option<TimeSpec>) {
    if let Some(start) = start {
        args.push(format!("-ss {}", start.format_engine()));
    }
    if let Some(end) = end {
        args.push(format!("-to {}", end.format_engine()));
    }
}

fn file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}
