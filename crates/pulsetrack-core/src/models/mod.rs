// ABOUTME: Domain models for users, devices, goals, exercises and daily records
// ABOUTME: Shared validation helpers used by create and update requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Daily aggregate records and the partial-update merge
pub mod daily_record;
/// IoT devices attached to a user
pub mod device;
/// Logged exercise sessions
pub mod exercise;
/// Fitness goals
pub mod goal;
/// Location activity samples
pub mod location;
/// Push notification history
pub mod notification;
/// User profiles
pub mod user;

pub use daily_record::{DailyRecord, DailyRecordKey, DailyRecordPatch, NewDailyRecord};
pub use device::{Device, DeviceType, RegisterDeviceRequest, UpdateDeviceRequest};
pub use exercise::{CreateExerciseRequest, Exercise, UpdateExerciseRequest};
pub use goal::{CreateGoalRequest, Goal, GoalType, UpdateGoalRequest};
pub use location::{LocationActivity, RecordLocationRequest};
pub use notification::{Notification, NotificationStatus, SendNotificationRequest};
pub use user::{CreateUserRequest, UpdateUserRequest, User};

use crate::errors::{AppError, AppResult};

/// Reject negative, NaN and infinite decimals
pub(crate) fn ensure_non_negative(field: &str, value: f64) -> AppResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(AppError::invalid_input(format!(
            "{field} must be a non-negative number"
        )))
    }
}

/// Reject zero, negative, NaN and infinite decimals
pub(crate) fn ensure_positive(field: &str, value: f64) -> AppResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(AppError::invalid_input(format!(
            "{field} must be a positive number"
        )))
    }
}

pub(crate) fn ensure_not_blank(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        Err(AppError::invalid_input(format!("{field} must not be empty")))
    } else {
        Ok(())
    }
}
