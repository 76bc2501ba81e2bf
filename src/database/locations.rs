// ABOUTME: Database operations for location activity samples
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

use super::{column_error, format_timestamp, map_sqlx_error, parse_timestamp, parse_uuid};
use crate::errors::AppResult;
use crate::models::{LocationActivity, RecordLocationRequest};

const LOCATION_COLUMNS: &str = "id, owner_id, latitude, longitude, recorded_at, activity_type";

/// Default and maximum number of samples returned by a listing
pub const DEFAULT_LOCATION_LIMIT: u32 = 100;
/// Hard cap on samples returned by a listing
pub const MAX_LOCATION_LIMIT: u32 = 1000;

/// Location activity database operations manager
#[derive(Clone)]
pub struct LocationManager {
    pool: SqlitePool,
}

impl LocationManager {
    /// Create a new location manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a location sample
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown owner
    pub async fn record(
        &self,
        owner_id: Uuid,
        request: &RecordLocationRequest,
    ) -> AppResult<LocationActivity> {
        let row = sqlx::query(&format!(
            r"
            INSERT INTO location_activities
                (id, owner_id, latitude, longitude, recorded_at, activity_type)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            RETURNING {LOCATION_COLUMNS}
            "
        ))
        .bind(Uuid::new_v4().to_string())
        .bind(owner_id.to_string())
        .bind(request.latitude)
        .bind(request.longitude)
        .bind(format_timestamp(request.recorded_at))
        .bind(request.activity_type.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to record location", &e))?;

        row_to_location(&row)
    }

    /// Most recent samples for a user, newest first
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` on store failure
    pub async fn list_recent(
        &self,
        owner_id: Uuid,
        limit: u32,
    ) -> AppResult<Vec<LocationActivity>> {
        let limit = limit.clamp(1, MAX_LOCATION_LIMIT);
        let rows = sqlx::query(&format!(
            r"
            SELECT {LOCATION_COLUMNS} FROM location_activities
            WHERE owner_id = ?1
            ORDER BY recorded_at DESC
            LIMIT ?2
            "
        ))
        .bind(owner_id.to_string())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to list locations", &e))?;

        rows.iter().map(row_to_location).collect()
    }
}

fn row_to_location(row: &SqliteRow) -> AppResult<LocationActivity> {
    let id: String = row.try_get("id").map_err(|e| column_error("id", &e))?;
    let owner_id: String = row
        .try_get("owner_id")
        .map_err(|e| column_error("owner_id", &e))?;
    let recorded_at: String = row
        .try_get("recorded_at")
        .map_err(|e| column_error("recorded_at", &e))?;

    Ok(LocationActivity {
        id: parse_uuid("id", &id)?,
        owner_id: parse_uuid("owner_id", &owner_id)?,
        latitude: row
            .try_get("latitude")
            .map_err(|e| column_error("latitude", &e))?,
        longitude: row
            .try_get("longitude")
            .map_err(|e| column_error("longitude", &e))?,
        recorded_at: parse_timestamp("recorded_at", &recorded_at)?,
        activity_type: row
            .try_get("activity_type")
            .map_err(|e| column_error("activity_type", &e))?,
    })
}
