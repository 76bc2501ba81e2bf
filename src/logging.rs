// ABOUTME: Structured logging setup on top of tracing-subscriber
// ABOUTME: Selects pretty or JSON output and honours RUST_LOG style filters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::config::{LogFormat, LoggingConfig};
use crate::errors::{AppError, AppResult};

/// Install the global tracing subscriber
///
/// # Errors
///
/// Returns `ConfigError` for an unparsable filter, or when a global
/// subscriber is already installed
pub fn init_logging(config: &LoggingConfig) -> AppResult<()> {
    let filter = EnvFilter::try_new(&config.filter)
        .map_err(|e| AppError::config(format!("Invalid log filter '{}': {e}", config.filter)))?;

    let registry = Registry::default().with(filter);
    let result = match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false).with_target(true))
            .try_init(),
        LogFormat::Pretty => registry.with(fmt::layer().with_target(true)).try_init(),
    };
    result.map_err(|e| AppError::config(format!("Failed to initialize logging: {e}")))?;

    info!(
        format = ?config.format,
        filter = %config.filter,
        version = env!("CARGO_PKG_VERSION"),
        "Logging initialized"
    );
    Ok(())
}

/// Quiet subscriber for tests; repeated calls are ignored
pub fn init_test_logging() {
    let filter = EnvFilter::try_from_env("TEST_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = Registry::default()
        .with(filter)
        .with(fmt::layer().with_test_writer())
        .try_init();
}
