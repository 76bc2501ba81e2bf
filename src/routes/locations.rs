// ABOUTME: Location activity route handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Deserialize;

use super::{json_body, parse_id, query_params};
use crate::database::locations::DEFAULT_LOCATION_LIMIT;
use crate::database::{LocationManager, UserManager};
use crate::errors::AppError;
use crate::models::RecordLocationRequest;
use crate::resources::ServerResources;

/// Listing parameters for location samples
#[derive(Debug, Default, Deserialize)]
pub struct LocationListQuery {
    /// Maximum number of samples, newest first
    pub limit: Option<u32>,
}

/// Location routes
pub struct LocationRoutes;

impl LocationRoutes {
    /// Create all location routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/users/:user_id/locations",
                post(Self::handle_record).get(Self::handle_list),
            )
            .with_state(resources)
    }

    async fn handle_record(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
        payload: Result<Json<RecordLocationRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let user_id = parse_id("user", &user_id)?;
        let request = json_body(payload)?;
        request.validate()?;

        let sample = LocationManager::new(resources.database.pool().clone())
            .record(user_id, &request)
            .await?;
        Ok((StatusCode::CREATED, Json(sample)).into_response())
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
        query: Result<Query<LocationListQuery>, QueryRejection>,
    ) -> Result<Response, AppError> {
        let user_id = parse_id("user", &user_id)?;
        let query = query_params(query)?;
        UserManager::new(resources.database.pool().clone())
            .get_required(user_id)
            .await?;

        let samples = LocationManager::new(resources.database.pool().clone())
            .list_recent(user_id, query.limit.unwrap_or(DEFAULT_LOCATION_LIMIT))
            .await?;
        Ok((StatusCode::OK, Json(samples)).into_response())
    }
}
