// ABOUTME: Device registration route handlers
// ABOUTME: Devices are registered under a user and addressed by their own id afterwards
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
use crate::database::{DeviceManager, UserManager};
use crate::errors::AppError;
use crate::models::{RegisterDeviceRequest, UpdateDeviceRequest};
use crate::resources::ServerResources;

/// Device routes
pub struct DeviceRoutes;

impl DeviceRoutes {
    /// Create all device routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/users/:user_id/devices",
                post(Self::handle_register).get(Self::handle_list),
            )
            .route(
                "/api/devices/:device_id",
                get(Self::handle_get)
                    .patch(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    fn manager(resources: &ServerResources) -> DeviceManager {
        DeviceManager::new(resources.database.pool().clone())
    }

    /// Handle POST /api/users/:user_id/devices
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
        payload: Result<Json<RegisterDeviceRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let user_id = parse_id("user", &user_id)?;
        let request = json_body(payload)?;
        request.validate()?;

        let device = Self::manager(&resources).register(user_id, &request).await?;
        info!(user_id = %user_id, device_id = %device.id, "Device registered");
        Ok((StatusCode::CREATED, Json(device)).into_response())
    }

    /// Handle GET /api/users/:user_id/devices
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = parse_id("user", &user_id)?;
        UserManager::new(resources.database.pool().clone())
            .get_required(user_id)
            .await?;

        let devices = Self::manager(&resources).list_for_owner(user_id).await?;
        Ok((StatusCode::OK, Json(devices)).into_response())
    }

    /// Handle GET /api/devices/:device_id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(device_id): Path<String>,
    ) -> Result<Response, AppError> {
        let device_id = parse_id("device", &device_id)?;
        let device = Self::manager(&resources)
            .get(device_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Device {device_id} not found")))?;
        Ok((StatusCode::OK, Json(device)).into_response())
    }

    /// Handle PATCH /api/devices/:device_id
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path(device_id): Path<String>,
        payload: Result<Json<UpdateDeviceRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let device_id = parse_id("device", &device_id)?;
        let request = json_body(payload)?;
        request.validate()?;

        let device = Self::manager(&resources).update(device_id, &request).await?;
        Ok((StatusCode::OK, Json(device)).into_response())
    }

    /// Handle DELETE /api/devices/:device_id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(device_id): Path<String>,
    ) -> Result<Response, AppError> {
        let device_id = parse_id("device", &device_id)?;
        Self::manager(&resources).delete(device_id).await?;
        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}
