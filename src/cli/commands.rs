//! Command implementations

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::cli::args::{CompressArgs, FramesArgs, InspectArgs, ThumbnailArgs};
use crate::config::BatchConfig;
use crate::domain::model::{
    is_supported_extension, CropRect, EditRequest, FrameExtractRequest, MediaInfo, Rotation,
    TimeSpec,
};
use crate::engine::command::{build_compress_command, build_frame_extract_command, ThumbnailBuilder};
use crate::engine::executor::{ParallelExecutor, ProcessHandle};
use crate::engine::progress::{
    ConsoleProgressObserver, JsonProgressObserver, ProgressObserver, ProgressTracker,
};
use crate::probe::{FfprobeInspector, MediaProbe};
use crate::utils::path::ensure_dir;

/// Execute the compress command
pub async fn compress(args: CompressArgs, config: BatchConfig) -> Result<()> {
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output_directory.clone());
    ensure_dir(&output_dir).context("Failed to create output directory")?;

    let crop = args
        .crop
        .as_deref()
        .map(parse_crop)
        .transpose()
        .context("Invalid crop rectangle")?;
    let rotation = Rotation::parse(&args.rotate)?;
    let trim_start = parse_optional_time(args.start.as_deref())?;
    let trim_end = parse_optional_time(args.end.as_deref())?;
    if let (Some(start), Some(end)) = (trim_start, trim_end) {
        if start.seconds > end.seconds {
            return Err(anyhow::anyhow!("Trim start must not be after trim end"));
        }
    }

    let files = collect_media_files(&args.inputs);
    if files.is_empty() {
        return Err(anyhow::anyhow!("No supported media files found"));
    }

    let probe = FfprobeInspector::new();
    let mut handles: Vec<Arc<ProcessHandle>> = Vec::new();
    for file in &files {
        let media = match probe.probe_media(file).await {
            Ok(media) => media,
            Err(e) => {
                warn!(path = %file, error = %e, "skipping item");
                continue;
            }
        };

        let mut request = EditRequest::new(
            media.file_path.clone(),
            media.width,
            media.height,
            output_dir.clone(),
            media.file_stem.clone(),
        )
        .with_rotation(rotation)
        .with_audio_disabled(args.no_audio || config.audio_disabled)
        .with_resize(args.width, args.height)
        .with_trim(trim_start, trim_end);
        if let Some(crop) = crop {
            request = request.with_crop(crop);
        }
        if let Some(speed) = args.speed {
            request = request.with_speed(speed);
        }
        if let Some(fps) = args.fps.or(config.frame_rate) {
            request = request.with_frame_rate(fps);
        }
        if let Some(codec) = args.codec.clone().or_else(|| config.codec.clone()) {
            request = request.with_codec(codec);
        }

        let command = build_compress_command(&request);
        info!(command = %command, "queued");
        handles.push(Arc::new(ProcessHandle::new(command)));
    }

    run_batch(
        handles,
        files.len(),
        args.json_progress,
        args.jobs.or(config.jobs),
    )
    .await
}

/// Execute the frames command
pub async fn frames(args: FramesArgs, config: BatchConfig) -> Result<()> {
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output_directory.clone());
    ensure_dir(&output_dir).context("Failed to create output directory")?;

    let trim_start = parse_optional_time(args.start.as_deref())?;
    let trim_end = parse_optional_time(args.end.as_deref())?;

    let files = collect_media_files(&args.inputs);
    if files.is_empty() {
        return Err(anyhow::anyhow!("No supported media files found"));
    }

    let probe = FfprobeInspector::new();
    let mut handles: Vec<Arc<ProcessHandle>> = Vec::new();
    for file in &files {
        let media = match probe.probe_media(file).await {
            Ok(media) => media,
            Err(e) => {
                warn!(path = %file, error = %e, "skipping item");
                continue;
            }
        };

        let mut request =
            FrameExtractRequest::new(media.file_path.clone(), output_dir.clone(), media.file_stem)
                .with_trim(trim_start, trim_end);
        if let Some(fps) = args.fps {
            request = request.with_frames_per_second(fps);
        }
        if let Some(count) = args.count {
            request = request.with_frame_count(count);
        }
        if let Some(quality) = args.quality {
            request = request.with_quality(quality);
        }

        let command = match build_frame_extract_command(&request) {
            Ok(command) => command,
            Err(e) => {
                warn!(path = %file, error = %e, "skipping item");
                continue;
            }
        };
        info!(command = %command, "queued");
        handles.push(Arc::new(ProcessHandle::new(command)));
    }

    run_batch(
        handles,
        files.len(),
        args.json_progress,
        args.jobs.or(config.jobs),
    )
    .await
}

/// Execute the thumbnail command
pub async fn thumbnail(args: ThumbnailArgs, config: BatchConfig) -> Result<()> {
    let cache_dir = args
        .cache_dir
        .clone()
        .unwrap_or_else(|| config.thumbnail_directory.clone());
    let builder = ThumbnailBuilder::new(cache_dir);

    let (command, output) = if args.last {
        builder
            .build_last_frame_command(&args.input)
            .context("Failed to build thumbnail command")?
    } else {
        let at = args
            .at
            .as_deref()
            .map(TimeSpec::parse)
            .transpose()?
            .unwrap_or_else(|| TimeSpec::from_seconds(0.0));
        builder
            .build_thumbnail_command(&args.input, at)
            .context("Failed to build thumbnail command")?
    };

    let handles = vec![Arc::new(ProcessHandle::new(command))];
    tokio::task::spawn_blocking({
        let handles = handles.clone();
        move || ParallelExecutor::run_all(&handles)
    })
    .await
    .context("Thumbnail task failed")?;

    if handles[0].is_completed() && output.exists() {
        println!("{}", output.display());
        Ok(())
    } else {
        Err(anyhow::anyhow!("Thumbnail extraction failed"))
    }
}

/// Execute the inspect command
pub async fn inspect(args: InspectArgs) -> Result<()> {
    let probe = FfprobeInspector::new();
    let media = probe.probe_media(&args.input).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&media_to_json(&media))?);
    } else {
        println!("File:       {}", media.file_path);
        println!("Resolution: {}x{}", media.width, media.height);
        println!("Duration:   {}", media.duration);
        println!("Frame rate: {:.3} fps", media.frame_rate);
        println!("Codec:      {}", media.video_codec);
        println!("Size:       {} bytes", media.file_size);
    }
    Ok(())
}

/// Expand inputs into probe-able media files.
///
/// Directories are walked recursively; files with unsupported extensions are
/// skipped with a warning rather than failing the batch.
fn collect_media_files(inputs: &[String]) -> Vec<String> {
    let mut files = Vec::new();
    for input in inputs {
        let path = Path::new(input);
        if path.is_dir() {
            for entry in WalkDir::new(path)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
            {
                let candidate = entry.path().to_string_lossy().to_string();
                if is_supported_extension(&candidate) {
                    files.push(candidate);
                }
            }
        } else if path.is_file() {
            if is_supported_extension(input) {
                files.push(input.clone());
            } else {
                warn!(path = %input, "skipping unsupported file");
            }
        } else {
            warn!(path = %input, "input not found");
        }
    }
    files
}

/// Run a batch to completion with live progress and Ctrl-C cancellation.
///
/// `queued` is the number of items submitted before per-item rejections, so
/// the final report reflects what the user asked for.
async fn run_batch(
    handles: Vec<Arc<ProcessHandle>>,
    queued: usize,
    json_progress: bool,
    jobs: Option<usize>,
) -> Result<()> {
    if handles.is_empty() {
        return Err(anyhow::anyhow!("All items were rejected"));
    }
    let limit = jobs.unwrap_or_else(num_cpus::get);

    let observer: Arc<dyn ProgressObserver> = if json_progress {
        Arc::new(JsonProgressObserver)
    } else {
        Arc::new(ConsoleProgressObserver)
    };
    let mut tracker = ProgressTracker::start(&handles, observer);

    let mut runner = tokio::task::spawn_blocking({
        let handles = handles.clone();
        move || ParallelExecutor::run_all_with_limit(&handles, limit)
    });

    tokio::select! {
        result = &mut runner => {
            result.context("Batch execution task failed")?;
        }
        _ = tokio::signal::ctrl_c() => {
            warn!("cancellation requested, killing remaining processes");
            ParallelExecutor::kill_all(&handles);
            let _ = runner.await;
        }
    }

    tracker.stop();
    let (done, total) = tracker.snapshot();
    if !json_progress {
        println!();
    }
    info!(completed = done, total = queued, "batch finished");
    println!("{} of {} completed", done, queued);

    if done < total {
        warn!("{} item(s) did not complete", total - done);
    }
    Ok(())
}

fn parse_optional_time(value: Option<&str>) -> Result<Option<TimeSpec>> {
    Ok(value.map(TimeSpec::parse).transpose()?)
}

/// Parse a crop rectangle from its `x,y,width,height` CLI spelling
fn parse_crop(value: &str) -> Result<CropRect> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        return Err(anyhow::anyhow!(
            "Crop must be x,y,width,height (got '{}')",
            value
        ));
    }
    let numbers = parts
        .iter()
        .map(|p| p.parse::<f64>())
        .collect::<std::result::Result<Vec<f64>, _>>()
        .map_err(|_| anyhow::anyhow!("Crop must be numeric (got '{}')", value))?;
    Ok(CropRect::new(numbers[0], numbers[1], numbers[2], numbers[3]))
}

fn media_to_json(media: &MediaInfo) -> serde_json::Value {
    serde_json::json!({
        "file_path": media.file_path,
        "file_stem": media.file_stem,
        "extension": media.extension,
        "width": media.width,
        "height": media.height,
        "duration_seconds": media.duration.seconds,
        "frame_rate": media.frame_rate,
        "video_codec": media.video_codec,
        "file_size": media.file_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_crop() {
        let crop = parse_crop("10, 20, 300, 400").unwrap();
        assert_eq!(crop, CropRect::new(10.0, 20.0, 300.0, 400.0));

        assert!(parse_crop("10,20,300").is_err());
        assert!(parse_crop("a,b,c,d").is_err());
    }

    #[test]
    fn test_collect_media_files_skips_unsupported() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.mp4"), b"").unwrap();
        std::fs::write(dir.path().join("b.mp3"), b"").unwrap();
        std::fs::write(dir.path().join("c.MOV"), b"").unwrap();

        let mut files = collect_media_files(&[dir.path().to_string_lossy().to_string()]);
        files.sort();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("a.mp4"));
        assert!(files[1].ends_with("c.MOV"));
    }

    #[test]
    fn test_collect_media_files_explicit_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.mp4");
        std::fs::write(&file, b"").unwrap();

        let files = collect_media_files(&[file.to_string_lossy().to_string()]);
        assert_eq!(files.len(), 1);
    }
}
