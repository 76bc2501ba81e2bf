// ABOUTME: Push notification history model and send request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ensure_not_blank;
use crate::errors::{AppError, AppResult};

/// Delivery outcome of a push notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    /// Accepted by the notification hub
    Sent,
    /// Rejected by, or unreachable at, the notification hub
    Failed,
}

impl NotificationStatus {
    /// Storage representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Failed => "failed",
        }
    }
}

impl FromStr for NotificationStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sent" => Ok(Self::Sent),
            "failed" => Ok(Self::Failed),
            other => Err(AppError::internal(format!(
                "Unknown notification status: {other}"
            ))),
        }
    }
}

/// Recorded push notification attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Unique identifier
    pub id: Uuid,
    /// Recipient user
    pub owner_id: Uuid,
    /// Notification title
    pub title: String,
    /// Notification body
    pub body: String,
    /// Delivery outcome
    pub status: NotificationStatus,
    /// Identifier assigned by the hub on success
    pub provider_message_id: Option<String>,
    /// Attempt timestamp
    pub created_at: DateTime<Utc>,
}

/// Payload for sending a push notification to a user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationRequest {
    /// Notification title
    pub title: String,
    /// Notification body
    pub body: String,
}

impl SendNotificationRequest {
    /// Validate the payload
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank title or body
    pub fn validate(&self) -> AppResult<()> {
        ensure_not_blank("title", &self.title)?;
        ensure_not_blank("body", &self.body)
    }
}
