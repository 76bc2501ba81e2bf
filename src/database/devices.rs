// ABOUTME: Database operations for IoT devices registered to users
// ABOUTME: Registration, listing, partial update and removal of devices
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

use super::{column_error, format_timestamp, map_sqlx_error, parse_timestamp, parse_uuid};
use crate::errors::{AppError, AppResult};
use crate::models::{Device, RegisterDeviceRequest, UpdateDeviceRequest};

const DEVICE_COLUMNS: &str =
    "id, owner_id, name, device_type, serial_number, last_synced_at, created_at";

/// Device database operations manager
#[derive(Clone)]
pub struct DeviceManager {
    pool: SqlitePool,
}

impl DeviceManager {
    /// Create a new device manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a device for a user
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown owner, `Conflict` for a duplicate serial number
    pub async fn register(
        &self,
        owner_id: Uuid,
        request: &RegisterDeviceRequest,
    ) -> AppResult<Device> {
        let row = sqlx::query(&format!(
            r"
            INSERT INTO devices (id, owner_id, name, device_type, serial_number, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            RETURNING {DEVICE_COLUMNS}
            "
        ))
        .bind(Uuid::new_v4().to_string())
        .bind(owner_id.to_string())
        .bind(request.name.trim())
        .bind(request.device_type.as_str())
        .bind(request.serial_number.trim())
        .bind(format_timestamp(Utc::now()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to register device", &e))?;

        row_to_device(&row)
    }

    /// Get a device by ID
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` on store failure
    pub async fn get(&self, device_id: Uuid) -> AppResult<Option<Device>> {
        let row = sqlx::query(&format!("SELECT {DEVICE_COLUMNS} FROM devices WHERE id = ?1"))
            .bind(device_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to get device", &e))?;

        row.as_ref().map(row_to_device).transpose()
    }

    /// List a user's devices, oldest registration first
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` on store failure
    pub async fn list_for_owner(&self, owner_id: Uuid) -> AppResult<Vec<Device>> {
        let rows = sqlx::query(&format!(
            "SELECT {DEVICE_COLUMNS} FROM devices WHERE owner_id = ?1 ORDER BY created_at ASC"
        ))
        .bind(owner_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to list devices", &e))?;

        rows.iter().map(row_to_device).collect()
    }

    /// Apply a partial update
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the device does not exist
    pub async fn update(
        &self,
        device_id: Uuid,
        request: &UpdateDeviceRequest,
    ) -> AppResult<Device> {
        let row = sqlx::query(&format!(
            r"
            UPDATE devices SET
                name = COALESCE(?1, name),
                last_synced_at = COALESCE(?2, last_synced_at)
            WHERE id = ?3
            RETURNING {DEVICE_COLUMNS}
            "
        ))
        .bind(request.name.as_deref().map(str::trim))
        .bind(request.last_synced_at.map(format_timestamp))
        .bind(device_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to update device", &e))?;

        row.as_ref()
            .map(row_to_device)
            .transpose()?
            .ok_or_else(|| AppError::not_found(format!("Device {device_id} not found")))
    }

    /// Remove a device
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the device does not exist
    pub async fn delete(&self, device_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM devices WHERE id = ?1")
            .bind(device_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to delete device", &e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Device {device_id} not found")));
        }
        Ok(())
    }
}

fn row_to_device(row: &SqliteRow) -> AppResult<Device> {
    let id: String = row.try_get("id").map_err(|e| column_error("id", &e))?;
    let owner_id: String = row
        .try_get("owner_id")
        .map_err(|e| column_error("owner_id", &e))?;
    let device_type: String = row
        .try_get("device_type")
        .map_err(|e| column_error("device_type", &e))?;
    let last_synced_at: Option<String> = row
        .try_get("last_synced_at")
        .map_err(|e| column_error("last_synced_at", &e))?;
    let created_at: String = row
        .try_get("created_at")
        .map_err(|e| column_error("created_at", &e))?;

    Ok(Device {
        id: parse_uuid("id", &id)?,
        owner_id: parse_uuid("owner_id", &owner_id)?,
        name: row.try_get("name").map_err(|e| column_error("name", &e))?,
        device_type: device_type.parse().map_err(|_| {
            AppError::internal(format!("Invalid device type in store: {device_type}"))
        })?,
        serial_number: row
            .try_get("serial_number")
            .map_err(|e| column_error("serial_number", &e))?,
        last_synced_at: last_synced_at
            .as_deref()
            .map(|raw| parse_timestamp("last_synced_at", raw))
            .transpose()?,
        created_at: parse_timestamp("created_at", &created_at)?,
    })
}
