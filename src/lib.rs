// ABOUTME: Main library entry point for the PulseTrack fitness tracking backend
// ABOUTME: HTTP API over SQLite with a partial-update merge resolver for daily records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # PulseTrack Server
//!
//! Backend for a fitness tracking application. Users register IoT devices,
//! set goals, log exercises and location samples, and receive push
//! notifications. Devices report per-day aggregates (steps, calories burned,
//! exercise minutes, body weight) that are merged into one record per user
//! and calendar date.
//!
//! ## Architecture
//!
//! - **Models** (`pulsetrack-core`): domain types, validation and the error taxonomy
//! - **Database**: SQLite managers built on `sqlx`, one per entity
//! - **Services**: the daily record merge resolver and the push relay
//! - **Routes**: one `axum` router per domain sharing `ServerResources`
//! - **Config**: environment-only settings
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pulsetrack_server::config::ServerConfig;
//! use pulsetrack_server::database::Database;
//! use pulsetrack_server::errors::AppResult;
//! use pulsetrack_server::resources::ServerResources;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = Arc::new(ServerConfig::from_env()?);
//!     let database = Database::new(&config.database).await?;
//!     let resources = Arc::new(ServerResources::new(database, config)?);
//!     pulsetrack_server::server::run(resources).await
//! }
//! ```

pub use pulsetrack_core::{errors, models};

/// Environment configuration
pub mod config;
/// SQLite store, migrations and per-entity managers
pub mod database;
/// External service clients
pub mod external;
/// Tracing subscriber setup
pub mod logging;
/// Shared request-handler dependencies
pub mod resources;
/// HTTP route modules
pub mod routes;
/// Router assembly and serve loop
pub mod server;
/// Business services
pub mod services;
