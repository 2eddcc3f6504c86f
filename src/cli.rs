//! Command-line interface for noughts.

use clap::{Parser, Subcommand};

/// Noughts - tic-tac-toe against a remote move engine
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Play tic-tac-toe against a move engine over HTTP", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal against a running engine service
    Play {
        /// Engine service base URL
        #[arg(long, default_value = "http://127.0.0.1:8000")]
        engine_url: String,
    },

    /// Run the engine service
    Serve {
        /// Port to bind to
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}
