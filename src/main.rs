use std::{io, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use log::info;
use scrawl::{config, App};

/// Draw lines, rectangles and bucket fills on a text canvas.
#[derive(Debug, Parser)]
#[command(name = "scrawl", version, about)]
struct Cli {
    /// Configuration file (defaults to ./scrawl.toml when present).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Render the canvas with terminal colors.
    #[arg(long)]
    color: bool,

    /// Do not print the command catalogue on start.
    #[arg(long)]
    no_catalogue: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if cli.color {
        config.display.color = true;
    }
    if cli.no_catalogue {
        config.display.catalogue = false;
    }

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log.level.as_str()),
    )
    .format_timestamp_micros()
    .init();

    info!("Starting scrawl...");

    let mut app = App::new(config).context("Failed to initialize session")?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();
    app.run(stdin.lock(), &mut stdout.lock(), &mut stderr.lock())
        .context("Drawing session failed")?;

    info!("Shutting down.");
    Ok(())
}
