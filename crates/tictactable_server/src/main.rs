//! Tictactable - game server entry point.

use anyhow::Result;
use clap::Parser;
use tictactable_server::{Cli, Command, server};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("info,tictactable_server=debug,tictactable_core=debug")
            }),
        )
        .init();

    match cli.command {
        Command::Serve(args) => {
            let config = args.resolve()?;
            info!(?config, "Starting tictactable");
            server::serve(config).await?;
        }
    }

    Ok(())
}
