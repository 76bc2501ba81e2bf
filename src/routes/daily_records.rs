// ABOUTME: Daily record route handlers including the partial-update merge endpoint
// ABOUTME: Records are keyed by owner and calendar date; PUT is accepted as an alias of PATCH
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Daily record routes
//!
//! `PATCH /api/users/:user_id/daily-records/:date` merges the supplied fields
//! into the stored record. Omitted fields and fields sent as `null` keep
//! their stored values; an explicit `0` overwrites.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;

use super::{json_body, parse_path_date, query_params};
use crate::database::DateRange;
use crate::errors::AppError;
use crate::models::{DailyRecordKey, DailyRecordPatch, NewDailyRecord};
use crate::resources::ServerResources;

/// Optional inclusive date range for listings
#[derive(Debug, Default, Deserialize)]
pub struct DailyRecordRangeQuery {
    /// Earliest date to include
    pub from: Option<NaiveDate>,
    /// Latest date to include
    pub to: Option<NaiveDate>,
}

/// Daily record routes
pub struct DailyRecordRoutes;

impl DailyRecordRoutes {
    /// Create all daily record routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/users/:user_id/daily-records",
                post(Self::handle_create).get(Self::handle_list),
            )
            .route(
                "/api/users/:user_id/daily-records/:date",
                get(Self::handle_get)
                    .patch(Self::handle_merge)
                    .put(Self::handle_merge)
                    .delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    /// Handle POST /api/users/:user_id/daily-records
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
        payload: Result<Json<NewDailyRecord>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let new_record = json_body(payload)?;
        let record = resources.daily_records.create(&user_id, new_record).await?;
        Ok((StatusCode::CREATED, Json(record)).into_response())
    }

    /// Handle GET /api/users/:user_id/daily-records
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
        query: Result<Query<DailyRecordRangeQuery>, QueryRejection>,
    ) -> Result<Response, AppError> {
        let range = query_params(query)?;
        let records = resources
            .daily_records
            .list(
                &user_id,
                DateRange {
                    from: range.from,
                    to: range.to,
                },
            )
            .await?;
        Ok((StatusCode::OK, Json(records)).into_response())
    }

    /// Handle GET /api/users/:user_id/daily-records/:date
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path((user_id, date)): Path<(String, String)>,
    ) -> Result<Response, AppError> {
        let key = DailyRecordKey::new(user_id, parse_path_date(&date)?);
        let record = resources.daily_records.get(&key).await?;
        Ok((StatusCode::OK, Json(record)).into_response())
    }

    /// Handle PATCH or PUT /api/users/:user_id/daily-records/:date
    async fn handle_merge(
        State(resources): State<Arc<ServerResources>>,
        Path((user_id, date)): Path<(String, String)>,
        payload: Result<Json<DailyRecordPatch>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let key = DailyRecordKey::new(user_id, parse_path_date(&date)?);
        let patch = json_body(payload)?;
        let merged = resources.daily_records.merge_update(&key, &patch).await?;
        Ok((StatusCode::OK, Json(merged)).into_response())
    }

    /// Handle DELETE /api/users/:user_id/daily-records/:date
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path((user_id, date)): Path<(String, String)>,
    ) -> Result<Response, AppError> {
        let key = DailyRecordKey::new(user_id, parse_path_date(&date)?);
        resources.daily_records.delete(&key).await?;
        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}
