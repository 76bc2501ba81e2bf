// ABOUTME: Push notification relay route handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};

use super::{json_body, parse_id};
use crate::errors::AppError;
use crate::models::SendNotificationRequest;
use crate::resources::ServerResources;

/// Notification routes
pub struct NotificationRoutes;

impl NotificationRoutes {
    /// Create all notification routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/users/:user_id/notifications",
                post(Self::handle_send).get(Self::handle_history),
            )
            .with_state(resources)
    }

    /// Handle POST /api/users/:user_id/notifications
    async fn handle_send(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
        payload: Result<Json<SendNotificationRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let user_id = parse_id("user", &user_id)?;
        let request = json_body(payload)?;
        let notification = resources.notifications.send(user_id, &request).await?;
        Ok((StatusCode::CREATED, Json(notification)).into_response())
    }

    /// Handle GET /api/users/:user_id/notifications
    async fn handle_history(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = parse_id("user", &user_id)?;
        let history = resources.notifications.history(user_id).await?;
        Ok((StatusCode::OK, Json(history)).into_response())
    }
}
