//! Noughts - unified CLI.
//!
//! One binary, two modes: the terminal client and the engine service it
//! talks to.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { engine_url } => noughts::tui::run(engine_url).await,
        Command::Serve { port, host } => run_engine_service(host, port).await,
    }
}

/// Run the HTTP engine service
async fn run_engine_service(host: String, port: u16) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!(%host, port, "starting engine service");
    noughts::engine::serve(&host, port).await
}
