// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! sprintd - sprint progress reporting server.
//!
//! Serves effort summaries, issue lists, and burndown/bar charts for a
//! sprint by querying the issue tracker's database read-only.
//!
//! Usage:
//!   sprintd --config <path> [--listen <addr>]

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

mod chart;
mod error;
mod html;
mod routes;

use error::{Error, Result};
use sp_core::Config;

#[derive(Debug, Parser)]
#[command(name = "sprintd", about = "Sprint progress reporting server")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "sprintd.toml")]
    config: PathBuf,

    /// Listen address, overriding the configured one.
    #[arg(long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run(Args::parse()).await {
        tracing::error!("sprintd failed: {e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let raw = std::fs::read_to_string(&args.config)?;
    let config: Config = toml::from_str(&raw).map_err(|e| {
        Error::Config(format!("failed to parse {}: {e}", args.config.display()))
    })?;
    config.validate()?;
    std::fs::create_dir_all(&config.server.image_dir)?;

    let listen = args
        .listen
        .clone()
        .unwrap_or_else(|| config.server.listen.clone());
    tracing::info!(
        "using tracker database {}",
        config.database.path.display()
    );

    let app = routes::router(Arc::new(routes::AppState { config }));
    let listener = tokio::net::TcpListener::bind(&listen).await?;
    tracing::info!("listening on {listen}");
    axum::serve(listener, app).await?;
    Ok(())
}
