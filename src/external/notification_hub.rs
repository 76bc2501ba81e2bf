// ABOUTME: HTTP client for the push notification hub
// ABOUTME: Delivers tag-addressed pushes with bearer authentication and a request timeout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Push notification hub client
//!
//! Messages are addressed by tag. A user's devices subscribe to the
//! `user:<id>` tag, so one push reaches every device that user registered
//! with the hub.
//!
//! # Example
//! ```rust,no_run
//! use std::time::Duration;
//! use pulsetrack_server::external::{NotificationHubClient, PushMessage, PushSender};
//! use uuid::Uuid;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = NotificationHubClient::new(
//!     "https://hub.example.com/messages",
//!     Some("token".to_owned()),
//!     Duration::from_secs(10),
//! )?;
//! let message = PushMessage::for_user(Uuid::new_v4(), "Goal reached", "10,000 steps today");
//! let receipt = client.send(&message).await?;
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::NotificationConfig;
use crate::errors::{AppError, AppResult};

const SERVICE_NAME: &str = "notification hub";

/// Push payload sent to the hub
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushMessage {
    /// Subscription tags the push is addressed to
    pub tags: Vec<String>,
    /// Notification title
    pub title: String,
    /// Notification body
    pub body: String,
}

impl PushMessage {
    /// Message addressed to every device of `user_id`
    #[must_use]
    pub fn for_user(user_id: Uuid, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            tags: vec![format!("user:{user_id}")],
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Acknowledgement returned by the hub
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushReceipt {
    /// Provider-side message identifier, when the hub returns one
    pub message_id: Option<String>,
}

/// Delivery seam for push notifications
#[async_trait]
pub trait PushSender: Send + Sync {
    /// Deliver `message`
    ///
    /// # Errors
    ///
    /// Returns `ExternalServiceError` when the hub is unreachable or rejects the push
    async fn send(&self, message: &PushMessage) -> AppResult<PushReceipt>;
}

#[derive(Debug, Deserialize)]
struct HubResponse {
    #[serde(default, alias = "messageId")]
    id: Option<String>,
}

/// Notification hub HTTP client
#[derive(Debug, Clone)]
pub struct NotificationHubClient {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl NotificationHubClient {
    /// Create a client posting to `endpoint`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the HTTP client cannot be built
    pub fn new(
        endpoint: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                AppError::config(format!("Failed to build notification hub client: {e}"))
            })?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            token,
        })
    }

    /// Build a client from configuration; `None` when no hub URL is set
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the HTTP client cannot be built
    pub fn from_config(config: &NotificationConfig) -> AppResult<Option<Self>> {
        config
            .hub_url
            .as_ref()
            .map(|url| Self::new(url.clone(), config.hub_token.clone(), config.timeout))
            .transpose()
    }
}

#[async_trait]
impl PushSender for NotificationHubClient {
    async fn send(&self, message: &PushMessage) -> AppResult<PushReceipt> {
        let mut request = self.client.post(&self.endpoint).json(message);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::external_service(SERVICE_NAME, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Notification hub rejected push");
            return Err(AppError::external_service(
                SERVICE_NAME,
                format!("Hub returned status {status}"),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::external_service(SERVICE_NAME, e.to_string()))?;

        // Hubs that accept a push without an id answer with an empty body.
        let message_id = if body.trim().is_empty() {
            None
        } else {
            serde_json::from_str::<HubResponse>(&body)
                .map_err(|e| {
                    AppError::external_service(SERVICE_NAME, format!("JSON parse error: {e}"))
                })?
                .id
        };

        debug!(?message_id, "Push delivered");
        Ok(PushReceipt { message_id })
    }
}
