//! Congregate - congregation membership registry
//!
//! Main entry point for the command-line application.

#![allow(clippy::print_stdout)]

use anyhow::Context;
use clap::Parser;
use congregate_infra::config;
use congregate_lib::utils::logging::init_tracing;
use congregate_lib::{AppContext, Cli};
use tracing::{debug, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before parsing so env-backed flags see its values
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match dotenv {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(err) => debug!(error = %err, "no .env file loaded"),
    }

    let config = match &cli.config {
        Some(path) => config::load_from_file(Some(path.clone())),
        None => config::load(),
    }
    .context("failed to load configuration")?;

    let ctx = AppContext::new(config, cli.assume_yes())
        .context("failed to initialise application context")?;
    info!("congregate initialised");

    let output = cli.execute(&ctx).await?;
    print!("{output}");
    Ok(())
}
