// ABOUTME: Logged exercise session model with create and partial update requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ensure_non_negative, ensure_not_blank};
use crate::errors::AppResult;

/// One exercise session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    /// Unique identifier
    pub id: Uuid,
    /// Owning user
    pub owner_id: Uuid,
    /// Free-form name ("Morning run")
    pub name: String,
    /// Category ("running", "cycling", ...)
    pub exercise_type: String,
    /// Duration in minutes
    pub duration_minutes: u32,
    /// Calories burned
    pub calories_burned: f64,
    /// When the session took place
    pub performed_at: DateTime<Utc>,
}

/// Payload for logging an exercise
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExerciseRequest {
    /// Free-form name
    pub name: String,
    /// Category
    pub exercise_type: String,
    /// Duration in minutes
    #[serde(default)]
    pub duration_minutes: u32,
    /// Calories burned
    #[serde(default)]
    pub calories_burned: f64,
    /// When the session took place
    pub performed_at: DateTime<Utc>,
}

impl CreateExerciseRequest {
    /// Validate the payload
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for blank text or negative calories
    pub fn validate(&self) -> AppResult<()> {
        ensure_not_blank("name", &self.name)?;
        ensure_not_blank("exerciseType", &self.exercise_type)?;
        ensure_non_negative("caloriesBurned", self.calories_burned)
    }
}

/// Partial update of an exercise
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateExerciseRequest {
    /// New name
    pub name: Option<String>,
    /// New category
    pub exercise_type: Option<String>,
    /// New duration
    pub duration_minutes: Option<u32>,
    /// New calorie count
    pub calories_burned: Option<f64>,
    /// New session time
    pub performed_at: Option<DateTime<Utc>>,
}

impl UpdateExerciseRequest {
    /// Validate the supplied fields
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for blank text or negative calories
    pub fn validate(&self) -> AppResult<()> {
        if let Some(name) = &self.name {
            ensure_not_blank("name", name)?;
        }
        if let Some(kind) = &self.exercise_type {
            ensure_not_blank("exerciseType", kind)?;
        }
        if let Some(calories) = self.calories_burned {
            ensure_non_negative("caloriesBurned", calories)?;
        }
        Ok(())
    }
}
