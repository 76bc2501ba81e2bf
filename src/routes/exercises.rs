// ABOUTME: Exercise log route handlers
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
use crate::database::{ExerciseManager, UserManager};
use crate::errors::AppError;
use crate::models::{CreateExerciseRequest, UpdateExerciseRequest};
use crate::resources::ServerResources;

/// Exercise routes
pub struct ExerciseRoutes;

impl ExerciseRoutes {
    /// Create all exercise routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/users/:user_id/exercises",
                post(Self::handle_create).get(Self::handle_list),
            )
            .route(
                "/api/exercises/:exercise_id",
                patch(Self::handle_update).delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    fn manager(resources: &ServerResources) -> ExerciseManager {
        ExerciseManager::new(resources.database.pool().clone())
    }

    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
        payload: Result<Json<CreateExerciseRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let user_id = parse_id("user", &user_id)?;
        let request = json_body(payload)?;
        request.validate()?;

        let exercise = Self::manager(&resources).create(user_id, &request).await?;
        Ok((StatusCode::CREATED, Json(exercise)).into_response())
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = parse_id("user", &user_id)?;
        UserManager::new(resources.database.pool().clone())
            .get_required(user_id)
            .await?;

        let exercises = Self::manager(&resources).list_for_owner(user_id).await?;
        Ok((StatusCode::OK, Json(exercises)).into_response())
    }

    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path(exercise_id): Path<String>,
        payload: Result<Json<UpdateExerciseRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let exercise_id = parse_id("exercise", &exercise_id)?;
        let request = json_body(payload)?;
        request.validate()?;

        let exercise = Self::manager(&resources).update(exercise_id, &request).await?;
        Ok((StatusCode::OK, Json(exercise)).into_response())
    }

    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(exercise_id): Path<String>,
    ) -> Result<Response, AppError> {
        let exercise_id = parse_id("exercise", &exercise_id)?;
        Self::manager(&resources).delete(exercise_id).await?;
        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}
