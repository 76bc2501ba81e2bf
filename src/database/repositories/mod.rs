// ABOUTME: Repository trait definitions for the service layer
// ABOUTME: Lets services depend on an injected store handle instead of a concrete pool
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;

use crate::database::DateRange;
use crate::errors::AppResult;
use crate::models::{DailyRecord, DailyRecordKey, DailyRecordPatch};

/// Daily aggregate record storage
#[async_trait]
pub trait DailyRecordRepository: Send + Sync {
    /// Insert a new record; fails with `Conflict` when the key is taken
    async fn insert(&self, record: &DailyRecord) -> AppResult<DailyRecord>;

    /// Fetch the record stored under `key`
    async fn fetch_by_key(&self, key: &DailyRecordKey) -> AppResult<Option<DailyRecord>>;

    /// List an owner's records in ascending date order
    async fn list_for_owner(&self, owner_id: &str, range: DateRange)
        -> AppResult<Vec<DailyRecord>>;

    /// Apply `patch` to the record under `key` in one atomic statement
    ///
    /// Returns the merged record, or `None` when no row matched.
    async fn merge_by_key(
        &self,
        key: &DailyRecordKey,
        patch: &DailyRecordPatch,
    ) -> AppResult<Option<DailyRecord>>;

    /// Delete the record under `key`; `false` when nothing was deleted
    async fn delete_by_key(&self, key: &DailyRecordKey) -> AppResult<bool>;
}
