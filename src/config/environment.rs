// ABOUTME: Environment-based server configuration
// ABOUTME: Parses HTTP, database, CORS, logging and notification hub settings from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-only configuration.
//!
//! Every setting has a default so the server starts with an empty
//! environment. Malformed values are reported as `ConfigError` instead of
//! silently falling back.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::{AppError, AppResult};

const DEFAULT_HTTP_PORT: u16 = 3000;
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_DATABASE_URL: &str = "sqlite:pulsetrack.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_NOTIFICATION_TIMEOUT_SECS: u64 = 10;

/// Where the SQLite database lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseUrl {
    /// Private in-memory database, lost on shutdown
    Memory,
    /// Any other sqlx SQLite URL (`sqlite:./path.db`)
    Sqlite(String),
}

impl DatabaseUrl {
    /// Parse a connection string
    #[must_use]
    pub fn parse_url(url: &str) -> Self {
        match url.trim() {
            "sqlite::memory:" | ":memory:" => Self::Memory,
            other => Self::Sqlite(other.to_owned()),
        }
    }

    /// Connection string understood by sqlx
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::Memory => "sqlite::memory:".to_owned(),
            Self::Sqlite(url) => url.clone(),
        }
    }

    /// True for the in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::Sqlite(DEFAULT_DATABASE_URL.to_owned())
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_connection_string())
    }
}

/// Database connection settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database location
    pub url: DatabaseUrl,
    /// Pool size; forced to one for in-memory databases
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DatabaseUrl::default(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human readable, for terminals
    #[default]
    Pretty,
    /// One JSON object per line, for log shippers
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(AppError::config(format!("Unknown LOG_FORMAT: {other}"))),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `EnvFilter` directive string
    pub filter: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_owned(),
            format: LogFormat::Pretty,
        }
    }
}

/// Cloud notification hub settings
#[derive(Debug, Clone)]
pub struct NotificationConfig {
    /// Hub endpoint that accepts push messages; relay disabled when `None`
    pub hub_url: Option<String>,
    /// Bearer token sent to the hub
    pub hub_token: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            hub_url: None,
            hub_token: None,
            timeout: Duration::from_secs(DEFAULT_NOTIFICATION_TIMEOUT_SECS),
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address
    pub host: String,
    /// Listen port
    pub http_port: u16,
    /// Database settings
    pub database: DatabaseConfig,
    /// Allowed CORS origins; `*` allows any
    pub cors_allowed_origins: Vec<String>,
    /// HTTP request timeout
    pub request_timeout: Duration,
    /// Logging settings
    pub logging: LoggingConfig,
    /// Notification hub settings
    pub notifications: NotificationConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            http_port: DEFAULT_HTTP_PORT,
            database: DatabaseConfig::default(),
            cors_allowed_origins: vec!["*".to_owned()],
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            logging: LoggingConfig::default(),
            notifications: NotificationConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a numeric or enumerated variable is malformed
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a numeric or enumerated variable is malformed
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let http_port = match get("HTTP_PORT").or_else(|| get("PORT")) {
            Some(raw) => parse_var("HTTP_PORT", &raw)?,
            None => defaults.http_port,
        };

        let database = DatabaseConfig {
            url: get("DATABASE_URL")
                .map_or(defaults.database.url, |url| DatabaseUrl::parse_url(&url)),
            max_connections: get("DATABASE_MAX_CONNECTIONS")
                .map(|raw| parse_var("DATABASE_MAX_CONNECTIONS", &raw))
                .transpose()?
                .unwrap_or(defaults.database.max_connections),
        };

        let cors_allowed_origins = get("CORS_ALLOWED_ORIGINS").map_or(
            defaults.cors_allowed_origins,
            |raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_owned)
                    .collect()
            },
        );

        let request_timeout = get("REQUEST_TIMEOUT_SECS")
            .map(|raw| parse_var::<u64>("REQUEST_TIMEOUT_SECS", &raw))
            .transpose()?
            .map_or(defaults.request_timeout, Duration::from_secs);

        let logging = LoggingConfig {
            filter: get("RUST_LOG").unwrap_or(defaults.logging.filter),
            format: get("LOG_FORMAT")
                .map(|raw| raw.parse::<LogFormat>())
                .transpose()?
                .unwrap_or(defaults.logging.format),
        };

        let notifications = NotificationConfig {
            hub_url: get("NOTIFICATION_HUB_URL"),
            hub_token: get("NOTIFICATION_HUB_TOKEN"),
            timeout: get("NOTIFICATION_TIMEOUT_SECS")
                .map(|raw| parse_var::<u64>("NOTIFICATION_TIMEOUT_SECS", &raw))
                .transpose()?
                .map_or(defaults.notifications.timeout, Duration::from_secs),
        };

        Ok(Self {
            host: get("HOST").unwrap_or(defaults.host),
            http_port,
            database,
            cors_allowed_origins,
            request_timeout,
            logging,
            notifications,
        })
    }
}

fn parse_var<T: FromStr>(key: &str, raw: &str) -> AppResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::config(format!("Invalid value for {key}: {raw}")))
}
