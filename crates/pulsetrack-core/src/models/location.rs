// ABOUTME: Location activity samples reported by the mobile app
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// GPS sample tagged with an optional activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationActivity {
    /// Unique identifier
    pub id: Uuid,
    /// Owning user
    pub owner_id: Uuid,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Capture time on the device
    pub recorded_at: DateTime<Utc>,
    /// Activity the user was doing ("walking", "cycling", ...)
    pub activity_type: Option<String>,
}

/// Payload for recording a location sample
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordLocationRequest {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Capture time on the device
    pub recorded_at: DateTime<Utc>,
    /// Activity label
    #[serde(default)]
    pub activity_type: Option<String>,
}

impl RecordLocationRequest {
    /// Validate coordinate ranges
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when a coordinate is out of range
    pub fn validate(&self) -> AppResult<()> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(AppError::invalid_input(
                "latitude must be between -90 and 90",
            ));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(AppError::invalid_input(
                "longitude must be between -180 and 180",
            ));
        }
        Ok(())
    }
}
