// ABOUTME: IoT device model (wearables, smart scales, phones) owned by a user
// ABOUTME: Device type enum with string conversion for storage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ensure_not_blank;
use crate::errors::{AppError, AppResult};

/// Kind of connected device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
    /// Watch or fitness band
    Wearable,
    /// Smart body scale
    Scale,
    /// Phone acting as a step counter
    Phone,
    /// Anything else
    Other,
}

impl DeviceType {
    /// Storage representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wearable => "wearable",
            Self::Scale => "scale",
            Self::Phone => "phone",
            Self::Other => "other",
        }
    }
}

impl FromStr for DeviceType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wearable" => Ok(Self::Wearable),
            "scale" => Ok(Self::Scale),
            "phone" => Ok(Self::Phone),
            "other" => Ok(Self::Other),
            other => Err(AppError::invalid_input(format!(
                "Unknown device type: {other}"
            ))),
        }
    }
}

/// Device registered to a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    /// Unique identifier
    pub id: Uuid,
    /// Owning user
    pub owner_id: Uuid,
    /// User-facing name
    pub name: String,
    /// Kind of device
    pub device_type: DeviceType,
    /// Manufacturer serial number, unique across devices
    pub serial_number: String,
    /// Last time the device pushed data
    pub last_synced_at: Option<DateTime<Utc>>,
    /// Registration timestamp
    pub created_at: DateTime<Utc>,
}

/// Payload for registering a device
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDeviceRequest {
    /// User-facing name
    pub name: String,
    /// Kind of device
    pub device_type: DeviceType,
    /// Manufacturer serial number
    pub serial_number: String,
}

impl RegisterDeviceRequest {
    /// Validate the payload
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank name or serial number
    pub fn validate(&self) -> AppResult<()> {
        ensure_not_blank("name", &self.name)?;
        ensure_not_blank("serialNumber", &self.serial_number)
    }
}

/// Partial update of a device
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateDeviceRequest {
    /// New name
    pub name: Option<String>,
    /// New sync timestamp
    pub last_synced_at: Option<DateTime<Utc>>,
}

impl UpdateDeviceRequest {
    /// Validate the supplied fields
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank name
    pub fn validate(&self) -> AppResult<()> {
        if let Some(name) = &self.name {
            ensure_not_blank("name", name)?;
        }
        Ok(())
    }
}
