// ABOUTME: Savora API server binary
// ABOUTME: Wires configuration, logging, store, and auth into the HTTP server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Savora

//! # Savora Server Binary
//!
//! Starts the recipe API with environment configuration, structured
//! logging, and a SQLite-backed store.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use savora::{
    auth::AuthManager,
    config::ServerConfig,
    context::ServerResources,
    database_plugins::{factory::Database, DatabaseProvider},
    logging, routes,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "savora-server")]
#[command(about = "Savora - recipe sharing API backend")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    info!("Starting Savora API");
    info!("{}", config.summary());

    let database = Database::new(&config.database_url).await?;
    info!("Database initialized: {}", database.backend_info());

    let auth = AuthManager::new(config.jwt_secret.as_bytes(), config.jwt_expiry_hours);
    info!("Authentication manager initialized");

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let resources = Arc::new(ServerResources::new(database, auth, config));
    let app = routes::router(resources);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    // Both Ok and Err mean "stop waiting"; a broken signal handler should
    // not keep the server alive forever.
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
