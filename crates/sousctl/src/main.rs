//! Sous Control - CLI client for the sous suggestion daemon.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

const DEFAULT_URL: &str = "http://127.0.0.1:7871";

#[derive(Parser)]
#[command(name = "sousctl")]
#[command(about = "Recipe suggestions from the sous daemon", long_about = None)]
#[command(version)]
struct Cli {
    /// Daemon base URL (falls back to $SOUSD_URL, then localhost)
    #[arg(long)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask for recipe suggestions
    Suggest {
        /// Ingredients or cravings, free text
        prompt: Vec<String>,
    },

    /// Show daemon health
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let url = cli
        .url
        .or_else(|| std::env::var("SOUSD_URL").ok())
        .unwrap_or_else(|| DEFAULT_URL.to_string());

    match cli.command {
        Commands::Suggest { prompt } => commands::suggest(&url, &prompt.join(" ")).await,
        Commands::Health => commands::health(&url).await,
    }
}
