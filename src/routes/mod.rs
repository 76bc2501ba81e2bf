// ABOUTME: Route module organization for the PulseTrack HTTP API
// ABOUTME: One router per domain plus shared extraction helpers mapping rejections to AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route modules
//!
//! Each domain module exposes a `XxxRoutes::routes(resources)` constructor and
//! thin handlers that validate input and delegate to managers or services.
//! Every failure leaves the API as an `AppError` JSON body, including path,
//! query and body extraction failures.

// ═══════════════════════════════════════════════════════════════
// CORE INFRASTRUCTURE
// ═══════════════════════════════════════════════════════════════

/// Liveness and store health checks
pub mod health;

// ═══════════════════════════════════════════════════════════════
// FITNESS DOMAIN
// ═══════════════════════════════════════════════════════════════

/// Daily aggregate records and merge updates
pub mod daily_records;
/// Device registration
pub mod devices;
/// Exercise log
pub mod exercises;
/// Fitness goals
pub mod goals;
/// Location activity samples
pub mod locations;
/// Push notification relay
pub mod notifications;
/// User profiles
pub mod users;

pub use daily_records::DailyRecordRoutes;
pub use devices::DeviceRoutes;
pub use exercises::ExerciseRoutes;
pub use goals::GoalRoutes;
pub use health::HealthRoutes;
pub use locations::LocationRoutes;
pub use notifications::NotificationRoutes;
pub use users::UserRoutes;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Json, Query};
use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Parse a path segment as a resource id
pub(crate) fn parse_id(kind: &str, raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::invalid_input(format!("Invalid {kind} id: {raw}")))
}

/// Parse a `YYYY-MM-DD` path segment
pub(crate) fn parse_path_date(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::invalid_input(format!("Invalid date {raw}, expected YYYY-MM-DD")))
}

/// Unwrap a JSON body, turning rejections into `InvalidInput`
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| {
            AppError::invalid_input(format!("Invalid request body: {}", rejection.body_text()))
        })
}

/// Unwrap query parameters, turning rejections into `InvalidInput`
pub(crate) fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> AppResult<T> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| {
            AppError::invalid_input(format!("Invalid query: {}", rejection.body_text()))
        })
}
