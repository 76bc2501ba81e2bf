// ABOUTME: PulseTrack HTTP server binary
// ABOUTME: Loads environment configuration, applies CLI overrides, migrates and serves
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! ## Usage
//!
//! ```bash
//! # Serve with environment configuration
//! cargo run --bin pulsetrack-server
//!
//! # Override port and database
//! cargo run --bin pulsetrack-server -- --port 8080 --database-url sqlite:./pulsetrack.db
//! ```

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use pulsetrack_server::config::{DatabaseUrl, LogFormat, ServerConfig};
use pulsetrack_server::database::Database;
use pulsetrack_server::logging::init_logging;
use pulsetrack_server::resources::ServerResources;
use pulsetrack_server::server;

#[derive(Parser)]
#[command(
    name = "pulsetrack-server",
    about = "PulseTrack fitness tracking backend",
    long_about = "HTTP API for users, devices, goals, exercises, daily records, locations \
                  and push notifications"
)]
struct Args {
    /// Listen port override
    #[arg(long)]
    port: Option<u16>,

    /// Bind address override
    #[arg(long)]
    host: Option<String>,

    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Emit JSON logs
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env().context("Failed to load configuration")?;
    if let Some(port) = args.port {
        config.http_port = port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(url) = args.database_url {
        config.database.url = DatabaseUrl::parse_url(&url);
    }
    if args.json_logs {
        config.logging.format = LogFormat::Json;
    }

    init_logging(&config.logging).context("Failed to initialize logging")?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        database = %config.database.url,
        "Starting PulseTrack server"
    );

    let config = Arc::new(config);
    let database = Database::new(&config.database)
        .await
        .context("Failed to open database")?;
    let resources = Arc::new(ServerResources::new(database, Arc::clone(&config))?);

    server::run(resources).await?;
    Ok(())
}
