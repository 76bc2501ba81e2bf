// ABOUTME: Daily aggregate record keyed by owner and calendar date
// ABOUTME: Presence-based partial update merge used by the record merge resolver
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ensure_non_negative, ensure_not_blank};
use crate::errors::AppResult;

/// Composite key of a daily record; unique per owner and day
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecordKey {
    /// Owning user identifier
    pub owner_id: String,
    /// Calendar day the aggregates belong to
    pub record_date: NaiveDate,
}

impl DailyRecordKey {
    /// Build a key from its parts
    pub fn new(owner_id: impl Into<String>, record_date: NaiveDate) -> Self {
        Self {
            owner_id: owner_id.into(),
            record_date,
        }
    }

    /// Ensure the key can address a record
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the owner id is blank
    pub fn validate(&self) -> AppResult<()> {
        ensure_not_blank("ownerId", &self.owner_id)
    }
}

impl fmt::Display for DailyRecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.owner_id, self.record_date)
    }
}

/// Persisted daily aggregates for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    /// Owning user identifier
    pub owner_id: String,
    /// Calendar day
    pub record_date: NaiveDate,
    /// Steps walked during the day
    pub total_steps: u32,
    /// Calories burned during the day
    pub total_calories_burned: f64,
    /// Minutes of exercise during the day
    pub exercise_duration_minutes: u32,
    /// Body weight measured that day
    pub weight: Option<f64>,
}

impl DailyRecord {
    /// Composite key of this record
    #[must_use]
    pub fn key(&self) -> DailyRecordKey {
        DailyRecordKey::new(self.owner_id.clone(), self.record_date)
    }
}

/// Insert payload; the owner comes from the request path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDailyRecord {
    /// Calendar day
    pub record_date: NaiveDate,
    /// Steps walked during the day
    #[serde(default)]
    pub total_steps: u32,
    /// Calories burned during the day
    #[serde(default)]
    pub total_calories_burned: f64,
    /// Minutes of exercise during the day
    #[serde(default)]
    pub exercise_duration_minutes: u32,
    /// Body weight measured that day
    #[serde(default)]
    pub weight: Option<f64>,
}

impl NewDailyRecord {
    /// Validate decimal fields; integer fields are non-negative by type
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for negative or non-finite decimals
    pub fn validate(&self) -> AppResult<()> {
        ensure_non_negative("totalCaloriesBurned", self.total_calories_burned)?;
        if let Some(weight) = self.weight {
            ensure_non_negative("weight", weight)?;
        }
        Ok(())
    }

    /// Attach the owner to produce the record that will be stored
    #[must_use]
    pub fn into_record(self, owner_id: impl Into<String>) -> DailyRecord {
        DailyRecord {
            owner_id: owner_id.into(),
            record_date: self.record_date,
            total_steps: self.total_steps,
            total_calories_burned: self.total_calories_burned,
            exercise_duration_minutes: self.exercise_duration_minutes,
            weight: self.weight,
        }
    }
}

/// Partial update; `Some` means the caller supplied the field
///
/// A field omitted from the JSON body, or sent as `null`, decodes to `None`
/// and keeps the stored value. An explicit `0` decodes to `Some(0)` and
/// overwrites. Any other key, including a snake_case spelling, is rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct DailyRecordPatch {
    /// New step count
    pub total_steps: Option<u32>,
    /// New calorie total
    pub total_calories_burned: Option<f64>,
    /// New exercise duration
    pub exercise_duration_minutes: Option<u32>,
    /// New weight
    pub weight: Option<f64>,
}

impl DailyRecordPatch {
    /// True when no field was supplied
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_steps.is_none()
            && self.total_calories_burned.is_none()
            && self.exercise_duration_minutes.is_none()
            && self.weight.is_none()
    }

    /// Validate the supplied decimal fields
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for negative or non-finite decimals
    pub fn validate(&self) -> AppResult<()> {
        if let Some(calories) = self.total_calories_burned {
            ensure_non_negative("totalCaloriesBurned", calories)?;
        }
        if let Some(weight) = self.weight {
            ensure_non_negative("weight", weight)?;
        }
        Ok(())
    }

    /// Merge this patch over `existing`, field by field
    #[must_use]
    pub fn apply_to(&self, existing: &DailyRecord) -> DailyRecord {
        DailyRecord {
            owner_id: existing.owner_id.clone(),
            record_date: existing.record_date,
            total_steps: self.total_steps.unwrap_or(existing.total_steps),
            total_calories_burned: self
                .total_calories_burned
                .unwrap_or(existing.total_calories_burned),
            exercise_duration_minutes: self
                .exercise_duration_minutes
                .unwrap_or(existing.exercise_duration_minutes),
            weight: self.weight.or(existing.weight),
        }
    }
}
