// ABOUTME: Configuration module root
// ABOUTME: Environment-only configuration, no config files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Environment variable parsing into `ServerConfig`
pub mod environment;

pub use environment::{
    DatabaseConfig, DatabaseUrl, LogFormat, LoggingConfig, NotificationConfig, ServerConfig,
};
