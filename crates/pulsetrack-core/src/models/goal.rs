// ABOUTME: Fitness goal model covering steps, calories, exercise minutes and weight
// ABOUTME: Goal type enum and date-range validation for goal requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ensure_positive;
use crate::errors::{AppError, AppResult};

/// Metric a goal tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    /// Daily step count
    Steps,
    /// Daily calories burned
    Calories,
    /// Daily exercise minutes
    ExerciseMinutes,
    /// Target body weight
    Weight,
}

impl GoalType {
    /// Storage representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Steps => "steps",
            Self::Calories => "calories",
            Self::ExerciseMinutes => "exercise_minutes",
            Self::Weight => "weight",
        }
    }
}

impl FromStr for GoalType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "steps" => Ok(Self::Steps),
            "calories" => Ok(Self::Calories),
            "exercise_minutes" => Ok(Self::ExerciseMinutes),
            "weight" => Ok(Self::Weight),
            other => Err(AppError::invalid_input(format!("Unknown goal type: {other}"))),
        }
    }
}

/// Goal set by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    /// Unique identifier
    pub id: Uuid,
    /// Owning user
    pub owner_id: Uuid,
    /// Tracked metric
    pub goal_type: GoalType,
    /// Target value in the metric's unit
    pub target_value: f64,
    /// First day the goal applies
    pub start_date: NaiveDate,
    /// Last day the goal applies; open-ended when absent
    pub end_date: Option<NaiveDate>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a goal
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGoalRequest {
    /// Tracked metric
    pub goal_type: GoalType,
    /// Target value
    pub target_value: f64,
    /// First day the goal applies
    pub start_date: NaiveDate,
    /// Last day the goal applies
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl CreateGoalRequest {
    /// Validate the payload
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a non-positive target or an inverted range
    pub fn validate(&self) -> AppResult<()> {
        ensure_positive("targetValue", self.target_value)?;
        match self.end_date {
            Some(end) if end < self.start_date => Err(AppError::invalid_input(
                "endDate must not be before startDate",
            )),
            _ => Ok(()),
        }
    }
}

/// Partial update of a goal
///
/// The date range is re-checked by the store after merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateGoalRequest {
    /// New target value
    pub target_value: Option<f64>,
    /// New end date
    pub end_date: Option<NaiveDate>,
}

impl UpdateGoalRequest {
    /// Validate the supplied fields
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a non-positive target
    pub fn validate(&self) -> AppResult<()> {
        if let Some(target) = self.target_value {
            ensure_positive("targetValue", target)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn inverted_date_range_is_rejected() {
        let request = CreateGoalRequest {
            goal_type: GoalType::Steps,
            target_value: 10_000.0,
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 2, 1),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn goal_type_round_trips_through_storage_string() {
        for kind in [
            GoalType::Steps,
            GoalType::Calories,
            GoalType::ExerciseMinutes,
            GoalType::Weight,
        ] {
            assert_eq!(kind.as_str().parse::<GoalType>().unwrap(), kind);
        }
    }
}
