// ABOUTME: Health check routes: process liveness and store connectivity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use crate::errors::AppError;
use crate::resources::ServerResources;

/// Service name reported by health endpoints
pub const SERVICE_NAME: &str = "pulsetrack-server";

/// Health routes
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::handle_health))
            .route("/health/database", get(Self::handle_database))
            .with_state(resources)
    }

    async fn handle_health() -> Response {
        (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "service": SERVICE_NAME,
                "version": env!("CARGO_PKG_VERSION"),
            })),
        )
            .into_response()
    }

    async fn handle_database(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        resources.database.ping().await?;
        Ok((
            StatusCode::OK,
            Json(json!({ "status": "ok", "database": "reachable" })),
        )
            .into_response())
    }
}
