// ABOUTME: Push notification relay recording every delivery attempt
// ABOUTME: Sends through an optional PushSender and stores the outcome per user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::database::{NotificationManager, UserManager};
use crate::errors::{AppError, AppResult};
use crate::external::{PushMessage, PushSender};
use crate::models::{Notification, NotificationStatus, SendNotificationRequest};

/// Relay between the API and the push hub
#[derive(Clone)]
pub struct NotificationService {
    sender: Option<Arc<dyn PushSender>>,
    users: UserManager,
    history: NotificationManager,
}

impl NotificationService {
    /// Create the relay; a `None` sender disables delivery
    #[must_use]
    pub fn new(
        sender: Option<Arc<dyn PushSender>>,
        users: UserManager,
        history: NotificationManager,
    ) -> Self {
        Self {
            sender,
            users,
            history,
        }
    }

    /// Whether a push hub is configured
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }

    /// Push a notification to every device of `user_id` and record the attempt
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when no hub is configured, `NotFound` for an
    /// unknown user, `ExternalServiceError` when delivery fails (the failed
    /// attempt is still recorded)
    pub async fn send(
        &self,
        user_id: Uuid,
        request: &SendNotificationRequest,
    ) -> AppResult<Notification> {
        request.validate()?;
        let sender = self
            .sender
            .as_ref()
            .ok_or_else(|| AppError::config("Push notifications are not configured"))?;
        self.users.get_required(user_id).await?;

        let message = PushMessage::for_user(user_id, request.title.trim(), request.body.trim());
        match sender.send(&message).await {
            Ok(receipt) => {
                let notification = self
                    .history
                    .record(
                        user_id,
                        &message.title,
                        &message.body,
                        NotificationStatus::Sent,
                        receipt.message_id.as_deref(),
                    )
                    .await?;
                info!(user_id = %user_id, notification_id = %notification.id, "Push sent");
                Ok(notification)
            }
            Err(delivery_error) => {
                self.history
                    .record(
                        user_id,
                        &message.title,
                        &message.body,
                        NotificationStatus::Failed,
                        None,
                    )
                    .await?;
                warn!(user_id = %user_id, error = %delivery_error, "Push delivery failed");
                Err(delivery_error)
            }
        }
    }

    /// Delivery history for `user_id`, newest first
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown user
    pub async fn history(&self, user_id: Uuid) -> AppResult<Vec<Notification>> {
        self.users.get_required(user_id).await?;
        self.history.list_for_owner(user_id).await
    }
}
