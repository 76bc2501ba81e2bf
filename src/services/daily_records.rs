// ABOUTME: Daily record service with the partial-update merge resolver
// ABOUTME: Validates keys and payloads, then delegates to the injected repository
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Daily record service
//!
//! A merge update resolves a partial payload against the persisted record for
//! `(owner_id, record_date)`. Fields present in the payload win, including an
//! explicit zero. Absent fields keep their stored values. The repository
//! performs read, merge and write in a single statement, so concurrent merges
//! on the same key cannot drop each other's fields.

use std::sync::Arc;

use tracing::{debug, info};

use crate::database::repositories::DailyRecordRepository;
use crate::database::DateRange;
use crate::errors::{AppError, AppResult};
use crate::models::{DailyRecord, DailyRecordKey, DailyRecordPatch, NewDailyRecord};

/// Daily record operations over an injected store handle
#[derive(Clone)]
pub struct DailyRecordService {
    repository: Arc<dyn DailyRecordRepository>,
}

impl DailyRecordService {
    /// Create a service over `repository`
    #[must_use]
    pub fn new(repository: Arc<dyn DailyRecordRepository>) -> Self {
        Self { repository }
    }

    /// Insert a new record for `owner_id`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank owner or out-of-range values,
    /// `Conflict` if a record already exists for the date
    pub async fn create(
        &self,
        owner_id: &str,
        new_record: NewDailyRecord,
    ) -> AppResult<DailyRecord> {
        new_record.validate()?;
        let record = new_record.into_record(owner_id.to_owned());
        record.key().validate()?;

        let stored = self.repository.insert(&record).await?;
        info!(
            owner_id = %stored.owner_id,
            record_date = %stored.record_date,
            "Daily record created"
        );
        Ok(stored)
    }

    /// Fetch the record for `key`
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no record exists for the key
    pub async fn get(&self, key: &DailyRecordKey) -> AppResult<DailyRecord> {
        key.validate()?;
        self.repository
            .fetch_by_key(key)
            .await?
            .ok_or_else(|| not_found(key))
    }

    /// List an owner's records in ascending date order
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when `range.from` is after `range.to`
    pub async fn list(&self, owner_id: &str, range: DateRange) -> AppResult<Vec<DailyRecord>> {
        if let (Some(from), Some(to)) = (range.from, range.to) {
            if from > to {
                return Err(AppError::invalid_input(format!(
                    "Range start {from} is after range end {to}"
                )));
            }
        }
        self.repository.list_for_owner(owner_id, range).await
    }

    /// Merge `patch` into the persisted record for `key`
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no record exists for the key, `InvalidInput`
    /// for a malformed patch, `StoreUnavailable` when the store fails
    pub async fn merge_update(
        &self,
        key: &DailyRecordKey,
        patch: &DailyRecordPatch,
    ) -> AppResult<DailyRecord> {
        key.validate()?;
        patch.validate()?;

        if patch.is_empty() {
            debug!(owner_id = %key.owner_id, record_date = %key.record_date, "Empty patch");
        }

        let merged = self
            .repository
            .merge_by_key(key, patch)
            .await?
            .ok_or_else(|| not_found(key))?;

        info!(
            owner_id = %key.owner_id,
            record_date = %key.record_date,
            "Daily record merged"
        );
        Ok(merged)
    }

    /// Delete the record for `key`
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no record exists for the key
    pub async fn delete(&self, key: &DailyRecordKey) -> AppResult<()> {
        key.validate()?;
        if !self.repository.delete_by_key(key).await? {
            return Err(not_found(key));
        }
        info!(owner_id = %key.owner_id, record_date = %key.record_date, "Daily record deleted");
        Ok(())
    }
}

fn not_found(key: &DailyRecordKey) -> AppError {
    AppError::not_found(format!("Daily record {key} not found"))
}
