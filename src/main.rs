use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use dockdash::app::App;
use dockdash::config::Config;

/// Terminal dashboard for the Docker Engine
#[derive(Parser, Debug)]
#[command(name = "dockdash", version, about)]
struct Cli {
    /// Path to a configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Docker host to connect to (overrides the config file)
    #[arg(long)]
    host: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Shorthand for --log-level debug
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };

    if let Some(host) = &cli.host {
        config.docker.host = Some(host.clone());
    }
    if cli.debug {
        config.logging.level = "debug".to_string();
    } else if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }

    init_logging(&config)?;
    info!("Starting dockdash");

    // The terminal is still in cooked mode here, so a failed first
    // connection prints a readable error and exits.
    let mut app = App::new(config).await?;
    app.run().await?;

    info!("Shutdown complete");
    Ok(())
}

/// Log to a file; stdout belongs to the TUI.
fn init_logging(config: &Config) -> Result<()> {
    use tracing_subscriber::EnvFilter;

    let path = config
        .logging
        .file
        .clone()
        .unwrap_or_else(|| PathBuf::from("/tmp/dockdash.log"));

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
        }
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dockdash={}", config.logging.level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
