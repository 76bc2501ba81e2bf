// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory databases, wired resources, users and a scripted push sender
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `pulsetrack_server`

use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use pulsetrack_server::{
    config::{DatabaseConfig, DatabaseUrl, ServerConfig},
    database::{Database, UserManager},
    errors::{AppError, AppResult},
    external::{PushMessage, PushReceipt, PushSender},
    logging::init_test_logging,
    models::{CreateUserRequest, User},
    resources::ServerResources,
};
use uuid::Uuid;

/// Fresh, migrated in-memory database
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    let config = DatabaseConfig {
        url: DatabaseUrl::Memory,
        max_connections: 1,
    };
    Ok(Database::new(&config).await?)
}

/// Test configuration pointing at an in-memory store
pub fn test_config() -> Arc<ServerConfig> {
    Arc::new(ServerConfig {
        database: DatabaseConfig {
            url: DatabaseUrl::Memory,
            max_connections: 1,
        },
        ..ServerConfig::default()
    })
}

/// Resources with the push relay disabled
pub async fn create_test_server_resources() -> Result<Arc<ServerResources>> {
    create_test_server_resources_with_sender(None).await
}

/// Resources around an explicit push sender
pub async fn create_test_server_resources_with_sender(
    sender: Option<Arc<dyn PushSender>>,
) -> Result<Arc<ServerResources>> {
    let database = create_test_database().await?;
    Ok(Arc::new(ServerResources::with_push_sender(
        database,
        test_config(),
        sender,
    )))
}

/// Create a user with a unique email
pub async fn create_test_user(database: &Database) -> Result<User> {
    create_test_user_with_email(database, &format!("user-{}@example.com", Uuid::new_v4())).await
}

pub async fn create_test_user_with_email(database: &Database, email: &str) -> Result<User> {
    let users = UserManager::new(database.pool().clone());
    Ok(users
        .create(&CreateUserRequest {
            email: email.to_owned(),
            display_name: "Test Athlete".to_owned(),
            date_of_birth: None,
            height_cm: Some(175.0),
        })
        .await?)
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Push sender that records messages and answers with a scripted outcome
pub struct RecordingPushSender {
    pub sent: Mutex<Vec<PushMessage>>,
    fail: bool,
}

impl RecordingPushSender {
    pub fn succeeding() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail: false,
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl PushSender for RecordingPushSender {
    async fn send(&self, message: &PushMessage) -> AppResult<PushReceipt> {
        self.sent.lock().unwrap().push(message.clone());
        if self.fail {
            return Err(AppError::external_service(
                "notification hub",
                "Hub returned status 500 Internal Server Error",
            ));
        }
        Ok(PushReceipt {
            message_id: Some(format!("msg-{}", self.sent_count())),
        })
    }
}
