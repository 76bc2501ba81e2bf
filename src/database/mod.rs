// ABOUTME: SQLite connection management, embedded migrations and shared row helpers
// ABOUTME: Explicitly constructed store handle injected into services and routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Daily aggregate records and the atomic merge update
pub mod daily_records;
/// Device registration storage
pub mod devices;
/// Exercise log storage
pub mod exercises;
/// Goal storage
pub mod goals;
/// Location activity storage
pub mod locations;
/// Push notification history
pub mod notifications;
/// Repository traits at the service seam
pub mod repositories;
/// User profile storage
pub mod users;

pub use daily_records::{DailyRecordManager, DateRange};
pub use devices::DeviceManager;
pub use exercises::ExerciseManager;
pub use goals::GoalManager;
pub use locations::LocationManager;
pub use notifications::NotificationManager;
pub use users::UserManager;

use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::errors::{AppError, AppResult};

/// Calendar date storage format
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Database connection pool
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect, then run all pending migrations
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if:
    /// - Database URL is invalid or malformed
    /// - Database connection fails
    /// - Migration process fails
    pub async fn new(config: &DatabaseConfig) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.url.to_connection_string())
            .map_err(|e| AppError::database(format!("Invalid database URL: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true);

        // Every connection to `sqlite::memory:` opens its own empty database,
        // so the pool must pin exactly one connection for its whole lifetime.
        let pool_options = if config.url.is_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(config.max_connections.max(1))
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to database: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Get a reference to the database pool for managers
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run all database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any migration fails
    pub async fn migrate(&self) -> AppResult<()> {
        info!("Running database migrations...");

        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Migration failed: {e}")))?;

        info!("Database migrations completed successfully");
        Ok(())
    }

    /// Round-trip a trivial statement to prove the store is reachable
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` when the query fails
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Database ping failed: {e}")))?;
        Ok(())
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Translate a sqlx failure into the error taxonomy
///
/// Constraint violations are caller mistakes; everything else means the
/// store is unavailable.
pub(crate) fn map_sqlx_error(context: &str, error: &sqlx::Error) -> AppError {
    if let Some(db_error) = error.as_database_error() {
        if db_error.is_unique_violation() {
            return AppError::conflict(format!("{context}: record already exists"));
        }
        if db_error.is_foreign_key_violation() {
            return AppError::not_found(format!("{context}: referenced user does not exist"));
        }
        if db_error.is_check_violation() {
            return AppError::invalid_input(format!("{context}: value out of range"));
        }
    }
    AppError::database(format!("{context}: {error}"))
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn parse_date(column: &str, raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| AppError::internal(format!("Invalid date in column {column}: {e}")))
}

/// Fixed-width RFC 3339 so stored timestamps sort lexicographically
pub(crate) fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(column: &str, raw: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::internal(format!("Invalid timestamp in column {column}: {e}")))
}

pub(crate) fn parse_uuid(column: &str, raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|e| AppError::internal(format!("Invalid UUID in column {column}: {e}")))
}

pub(crate) fn column_error(column: &str, error: &sqlx::Error) -> AppError {
    AppError::internal(format!("Failed to read column {column}: {error}"))
}
