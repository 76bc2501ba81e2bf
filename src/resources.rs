// ABOUTME: Shared server resources handed to every route module
// ABOUTME: Built once at startup from the database handle and configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::database::{DailyRecordManager, Database, NotificationManager, UserManager};
use crate::errors::AppResult;
use crate::external::{NotificationHubClient, PushSender};
use crate::services::{DailyRecordService, NotificationService};

/// Dependencies shared by all request handlers
#[derive(Clone)]
pub struct ServerResources {
    /// Store handle
    pub database: Database,
    /// Daily record service over the SQLite repository
    pub daily_records: DailyRecordService,
    /// Push notification relay
    pub notifications: NotificationService,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Wire resources, connecting the push relay when a hub URL is configured
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the notification hub client cannot be built
    pub fn new(database: Database, config: Arc<ServerConfig>) -> AppResult<Self> {
        let sender = NotificationHubClient::from_config(&config.notifications)?
            .map(|client| Arc::new(client) as Arc<dyn PushSender>);
        Ok(Self::with_push_sender(database, config, sender))
    }

    /// Wire resources around an explicit push sender
    #[must_use]
    pub fn with_push_sender(
        database: Database,
        config: Arc<ServerConfig>,
        sender: Option<Arc<dyn PushSender>>,
    ) -> Self {
        let pool = database.pool().clone();
        let daily_records =
            DailyRecordService::new(Arc::new(DailyRecordManager::new(pool.clone())));
        let notifications = NotificationService::new(
            sender,
            UserManager::new(pool.clone()),
            NotificationManager::new(pool),
        );

        Self {
            database,
            daily_records,
            notifications,
            config,
        }
    }
}
