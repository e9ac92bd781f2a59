//! CLI module for BatchCut
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

/// BatchCut - batch media transformation driven by FFmpeg
///
/// Queues media files for batch compression, frame extraction or thumbnail
/// generation and executes the work in parallel against the external engine.
#[derive(Parser)]
#[command(name = "batchcut")]
#[command(about = "BatchCut - batch media transformation driven by FFmpeg")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Compress and trim a batch of media files
    Compress(args::CompressArgs),
    /// Extract numbered frame sequences from a batch of media files
    Frames(args::FramesArgs),
    /// Extract a single thumbnail frame from one media file
    Thumbnail(args::ThumbnailArgs),
    /// Inspect media file information
    Inspect(args::InspectArgs),
}
