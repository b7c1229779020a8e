//! Flood Control - operator CLI for the flood dispatch daemon

mod client;
mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "floodctl")]
#[command(about = "Flood - emergency request intake and dispatch", long_about = None)]
#[command(version = flood_common::VERSION)]
struct Cli {
    /// Base URL of the daemon
    #[arg(long, global = true, default_value = client::DEFAULT_SERVER)]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report a new emergency request
    Report {
        #[arg(long, short)]
        description: String,

        /// Higher is served first
        #[arg(long, short, allow_negative_numbers = true, value_parser = commands::parse_priority)]
        priority: serde_json::Number,
    },

    /// Dispatch the highest-priority pending request
    Dispatch,

    /// Undo the last dispatch
    Undo,

    /// Regenerate the daily CSV log
    Export,

    /// Show pending and dispatched requests
    Status {
        /// Output JSON only
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = client::FloodClient::new(&cli.server)?;

    match cli.command {
        Commands::Report {
            description,
            priority,
        } => commands::report(&client, description, priority).await,
        Commands::Dispatch => commands::dispatch(&client).await,
        Commands::Undo => commands::undo(&client).await,
        Commands::Export => commands::export(&client).await,
        Commands::Status { json } => commands::status(&client, json).await,
    }
}
