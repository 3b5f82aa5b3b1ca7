mod age;
mod birthday;
mod celebration;
mod config;
mod controller;
mod error;
mod reading;
mod state;
mod svg;

use anyhow::{Context, Result};
use clap::Parser;
use config::Config;
use controller::{Controller, spawn_line_reader};
use std::fs;
use std::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    // Logs go to stderr so stdout only carries the card / JSON
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if !config.no_svg {
        fs::create_dir_all(&config.out_dir)
            .with_context(|| format!("Failed to create {}", config.out_dir.display()))?;
    }

    let mut controller = Controller::new(&config, std::io::stdout());

    match config.birth_date {
        Some(birth_date) => controller.run_once(birth_date).await?,
        None => {
            info!("enter a birth date per line (YYYY-MM-DD), `quit` to exit");
            let lines = spawn_line_reader(BufReader::new(std::io::stdin()));
            controller.run_interactive(lines, ctrl_c()).await?;
        }
    }

    if let Some(reading) = &controller.state().reading {
        info!(next_birthday = %reading.next_birthday, "done");
    }
    if !config.no_svg {
        info!(dir = %config.out_dir.display(), "age cards written");
    }

    Ok(())
}

/// Resolves on Ctrl-C. If the handler cannot be installed it never resolves.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("cannot listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}
