// ABOUTME: User profile route handlers
// ABOUTME: Create, read, partial update and delete of users with cascading cleanup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tracing::info;

use super::{json_body, parse_id};
use crate::database::UserManager;
use crate::errors::AppError;
use crate::models::{CreateUserRequest, UpdateUserRequest};
use crate::resources::ServerResources;

/// User routes
pub struct UserRoutes;

impl UserRoutes {
    /// Create all user routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/users", post(Self::handle_create))
            .route(
                "/api/users/:user_id",
                get(Self::handle_get)
                    .patch(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    fn manager(resources: &ServerResources) -> UserManager {
        UserManager::new(resources.database.pool().clone())
    }

    /// Handle POST /api/users
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<CreateUserRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let request = json_body(payload)?;
        request.validate()?;

        let user = Self::manager(&resources).create(&request).await?;
        info!(user_id = %user.id, "User created");
        Ok((StatusCode::CREATED, Json(user)).into_response())
    }

    /// Handle GET /api/users/:user_id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = parse_id("user", &user_id)?;
        let user = Self::manager(&resources).get_required(user_id).await?;
        Ok((StatusCode::OK, Json(user)).into_response())
    }

    /// Handle PATCH /api/users/:user_id
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
        payload: Result<Json<UpdateUserRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let user_id = parse_id("user", &user_id)?;
        let request = json_body(payload)?;
        request.validate()?;

        let user = Self::manager(&resources).update(user_id, &request).await?;
        Ok((StatusCode::OK, Json(user)).into_response())
    }

    /// Handle DELETE /api/users/:user_id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = parse_id("user", &user_id)?;
        Self::manager(&resources).delete(user_id).await?;
        info!(user_id = %user_id, "User deleted");
        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}
