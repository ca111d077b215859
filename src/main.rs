// src/main.rs
mod config;
mod database;
mod dtos;
mod error;
mod handlers;
mod models;
mod repository;
mod routes;
mod state;


use std::net::{IpAddr, SocketAddr};

use anyhow::Context;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// How many ports past the configured one to try before giving up.
const PORT_ATTEMPTS: u16 = 20;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    let db_pool = database::create_pool(&config.database_url, config.db_max_connections)
        .await
        .context("Failed to create database pool")?;

    let app = routes::create_app(state::AppState::new(db_pool));

    let (listener, addr) = bind(config.host, config.port).await?;
    tracing::info!("Server running on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

// Try base_port..=base_port+PORT_ATTEMPTS so a busy port does not abort startup
async fn bind(host: IpAddr, base_port: u16) -> anyhow::Result<(TcpListener, SocketAddr)> {
    for offset in 0..=PORT_ATTEMPTS {
        let addr = SocketAddr::from((host, base_port.saturating_add(offset)));
        match TcpListener::bind(addr).await {
            Ok(listener) => return Ok((listener, addr)),
            Err(e) => {
                if offset == 0 {
                    tracing::warn!(%addr, error = %e, "Port in use, trying next");
                }
            }
        }
    }

    anyhow::bail!("Failed to bind to any port starting at {} on {}", base_port, host)
}
