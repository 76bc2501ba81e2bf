// ABOUTME: Database operations for push notification history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

use super::{column_error, format_timestamp, map_sqlx_error, parse_timestamp, parse_uuid};
use crate::errors::AppResult;
use crate::models::{Notification, NotificationStatus};

const NOTIFICATION_COLUMNS: &str =
    "id, owner_id, title, body, status, provider_message_id, created_at";

/// Notification history database operations manager
#[derive(Clone)]
pub struct NotificationManager {
    pool: SqlitePool,
}

impl NotificationManager {
    /// Create a new notification manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a delivery attempt
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown owner
    pub async fn record(
        &self,
        owner_id: Uuid,
        title: &str,
        body: &str,
        status: NotificationStatus,
        provider_message_id: Option<&str>,
    ) -> AppResult<Notification> {
        let row = sqlx::query(&format!(
            r"
            INSERT INTO notifications
                (id, owner_id, title, body, status, provider_message_id, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            RETURNING {NOTIFICATION_COLUMNS}
            "
        ))
        .bind(Uuid::new_v4().to_string())
        .bind(owner_id.to_string())
        .bind(title)
        .bind(body)
        .bind(status.as_str())
        .bind(provider_message_id)
        .bind(format_timestamp(Utc::now()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to record notification", &e))?;

        row_to_notification(&row)
    }

    /// A user's notification history, newest first
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` on store failure
    pub async fn list_for_owner(&self, owner_id: Uuid) -> AppResult<Vec<Notification>> {
        let rows = sqlx::query(&format!(
            r"
            SELECT {NOTIFICATION_COLUMNS} FROM notifications
            WHERE owner_id = ?1
            ORDER BY created_at DESC
            "
        ))
        .bind(owner_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to list notifications", &e))?;

        rows.iter().map(row_to_notification).collect()
    }
}

fn row_to_notification(row: &SqliteRow) -> AppResult<Notification> {
    let id: String = row.try_get("id").map_err(|e| column_error("id", &e))?;
    let owner_id: String = row
        .try_get("owner_id")
        .map_err(|e| column_error("owner_id", &e))?;
    let status: String = row
        .try_get("status")
        .map_err(|e| column_error("status", &e))?;
    let created_at: String = row
        .try_get("created_at")
        .map_err(|e| column_error("created_at", &e))?;

    Ok(Notification {
        id: parse_uuid("id", &id)?,
        owner_id: parse_uuid("owner_id", &owner_id)?,
        title: row.try_get("title").map_err(|e| column_error("title", &e))?,
        body: row.try_get("body").map_err(|e| column_error("body", &e))?,
        status: status.parse()?,
        provider_message_id: row
            .try_get("provider_message_id")
            .map_err(|e| column_error("provider_message_id", &e))?,
        created_at: parse_timestamp("created_at", &created_at)?,
    })
}
