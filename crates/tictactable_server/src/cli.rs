//! Command-line interface for tictactable.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::instrument;

use crate::config::{ConfigError, ServerConfig};

/// Tictactable - authoritative tic-tac-toe table over WebSockets
#[derive(Parser, Debug)]
#[command(name = "tictactable")]
#[command(about = "Two-player tic-tac-toe game server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the game server
    Serve(ServeArgs),
}

/// Options for `serve`; flags override the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Browser origin allowed by the CORS policy
    #[arg(long)]
    pub allowed_origin: Option<String>,
}

impl ServeArgs {
    /// Builds the effective configuration.
    #[instrument(skip(self))]
    pub fn resolve(&self) -> Result<ServerConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::from_file(path)?,
            None => ServerConfig::default(),
        };
        if let Some(host) = &self.host {
            config = config.with_host(host.clone());
        }
        if let Some(port) = self.port {
            config = config.with_port(port);
        }
        if let Some(origin) = &self.allowed_origin {
            config = config.with_allowed_origin(origin.clone());
        }
        Ok(config)
    }
}
