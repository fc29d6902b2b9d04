use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use codenote::cli::{Cli, Commands};
use codenote::config::Config;
use codenote::logging::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    // Determine project root (current directory)
    let project_root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    // Load configuration (if available, otherwise use defaults)
    let config = Config::load(&project_root).unwrap_or_default();

    // Initialize logging with configuration
    // The guard MUST be held until program exit to ensure logs are flushed
    let _logging_guard = init_logging(&config.logging, &project_root)?;

    tracing::info!("codenote starting up");
    tracing::debug!("Loaded configuration from: {}", project_root.display());

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            codenote::commands::init::run().await?;
        }
        Commands::Annotate {
            pattern,
            file,
            style,
        } => {
            codenote::commands::annotate::run(pattern, file, style).await?;
        }
        Commands::Test => {
            codenote::commands::test::run().await?;
        }
    }

    Ok(())
}
