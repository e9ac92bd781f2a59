use anyhow::Result;
use clap::Parser;

use batchcut::cli::{commands, Cli, Commands};
use batchcut::config::BatchConfig;
use batchcut::utils::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level, cli.log_json);

    let config = BatchConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Compress(args) => commands::compress(args, config).await,
        Commands::Frames(args) => commands::frames(args, config).await,
        Commands::Thumbnail(args) => commands::thumbnail(args, config).await,
        Commands::Inspect(args) => commands::inspect(args).await,
    }
}
