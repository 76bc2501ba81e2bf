// ABOUTME: Fitness goal route handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{patch, post},
    Json, Router,
};

use super::{json_body, parse_id};
use crate::database::{GoalManager, UserManager};
use crate::errors::AppError;
use crate::models::{CreateGoalRequest, UpdateGoalRequest};
use crate::resources::ServerResources;

/// Goal routes
pub struct GoalRoutes;

impl GoalRoutes {
    /// Create all goal routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/users/:user_id/goals",
                post(Self::handle_create).get(Self::handle_list),
            )
            .route(
                "/api/goals/:goal_id",
                patch(Self::handle_update).delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    fn manager(resources: &ServerResources) -> GoalManager {
        GoalManager::new(resources.database.pool().clone())
    }

    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
        payload: Result<Json<CreateGoalRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let user_id = parse_id("user", &user_id)?;
        let request = json_body(payload)?;
        request.validate()?;

        let goal = Self::manager(&resources).create(user_id, &request).await?;
        Ok((StatusCode::CREATED, Json(goal)).into_response())
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = parse_id("user", &user_id)?;
        UserManager::new(resources.database.pool().clone())
            .get_required(user_id)
            .await?;

        let goals = Self::manager(&resources).list_for_owner(user_id).await?;
        Ok((StatusCode::OK, Json(goals)).into_response())
    }

    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path(goal_id): Path<String>,
        payload: Result<Json<UpdateGoalRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let goal_id = parse_id("goal", &goal_id)?;
        let request = json_body(payload)?;
        request.validate()?;

        let goal = Self::manager(&resources).update(goal_id, &request).await?;
        Ok((StatusCode::OK, Json(goal)).into_response())
    }

    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(goal_id): Path<String>,
    ) -> Result<Response, AppError> {
        let goal_id = parse_id("goal", &goal_id)?;
        Self::manager(&resources).delete(goal_id).await?;
        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}
