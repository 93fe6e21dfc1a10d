//! MayanConnect server
//!
//! Serves the access rule API and the gated Mayan document proxy.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use mayanconnect_api::config::{Config, Overrides};
use mayanconnect_api::Server;

/// MayanConnect - temporary document access gateway for Mayan EDMS
#[derive(Parser, Debug)]
#[command(name = "mayanconnect")]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (TOML)
    #[arg(short, long, env = "MAYANCONNECT_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(short, long, env = "MAYANCONNECT_BIND")]
    bind: Option<SocketAddr>,

    /// Mayan API base URL, e.g. http://mayan:8000/api/v4
    #[arg(long, env = "MAYAN_API_URL")]
    mayan_api_url: Option<String>,

    /// Mayan API token
    #[arg(long, env = "MAYAN_API_TOKEN", hide_env_values = true)]
    mayan_api_token: Option<String>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            bind: self.bind,
            mayan_api_url: self.mayan_api_url.clone(),
            mayan_api_token: self.mayan_api_token.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,mayanconnect=debug".into()),
        )
        .init();

    let args = Args::parse();

    let config = Config::load(args.config.as_deref())?.with_overrides(args.overrides());
    tracing::debug!(
        bind = %config.server.bind,
        identity_header = %config.identity.header,
        "Configuration loaded"
    );

    let server = Server::new(config)?;
    if let Err(e) = server.serve().await {
        tracing::error!("Server failed: {e}");
        return Err(e.into());
    }

    Ok(())
}
