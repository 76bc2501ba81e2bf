// ABOUTME: Clients for external services called by the server
// ABOUTME: Currently the push notification hub used by the notification relay
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Push notification hub client and the `PushSender` seam
pub mod notification_hub;

pub use notification_hub::{NotificationHubClient, PushMessage, PushReceipt, PushSender};
