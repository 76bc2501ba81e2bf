// ABOUTME: HTTP server assembly: router composition, middleware layers and serve loop
// ABOUTME: Binds the configured address and shuts down gracefully on SIGINT or SIGTERM
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use http::{HeaderValue, Method, StatusCode};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::{error, info, Level};

use crate::config::ServerConfig;
use crate::errors::{AppError, AppResult};
use crate::resources::ServerResources;
use crate::routes::{
    DailyRecordRoutes, DeviceRoutes, ExerciseRoutes, GoalRoutes, HealthRoutes, LocationRoutes,
    NotificationRoutes, UserRoutes,
};

/// Compose every route module under one router, without middleware
pub fn build_router(resources: &Arc<ServerResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(resources)))
        .merge(UserRoutes::routes(Arc::clone(resources)))
        .merge(DeviceRoutes::routes(Arc::clone(resources)))
        .merge(GoalRoutes::routes(Arc::clone(resources)))
        .merge(ExerciseRoutes::routes(Arc::clone(resources)))
        .merge(DailyRecordRoutes::routes(Arc::clone(resources)))
        .merge(LocationRoutes::routes(Arc::clone(resources)))
        .merge(NotificationRoutes::routes(Arc::clone(resources)))
}

/// Full application: routes plus tracing, CORS and timeout layers
///
/// # Errors
///
/// Returns `ConfigError` when a configured CORS origin is not a valid header value
pub fn build_app(resources: &Arc<ServerResources>) -> AppResult<Router> {
    with_middleware(build_router(resources), &resources.config)
}

/// Wrap a router in the server middleware stack
///
/// Requests that outlive `request_timeout` are answered with 408 Request Timeout.
///
/// # Errors
///
/// Returns `ConfigError` when a configured CORS origin is not a valid header value
pub fn with_middleware(router: Router, config: &ServerConfig) -> AppResult<Router> {
    let cors = setup_cors(config)?;

    Ok(router
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
        .layer(cors))
}

fn setup_cors(config: &ServerConfig) -> AppResult<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    if config.cors_allowed_origins.iter().any(|origin| origin == "*") {
        return Ok(layer.allow_origin(Any));
    }

    let origins = config
        .cors_allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|e| AppError::config(format!("Invalid CORS origin {origin}: {e}")))
        })
        .collect::<AppResult<Vec<_>>>()?;
    Ok(layer.allow_origin(origins))
}

/// Serve until a shutdown signal arrives
///
/// # Errors
///
/// Returns `ConfigError` for an unusable bind address and `InternalError`
/// when the listener fails
pub async fn run(resources: Arc<ServerResources>) -> AppResult<()> {
    let app = build_app(&resources)?;

    let host = &resources.config.host;
    let port = resources.config.http_port;
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| AppError::config(format!("Invalid bind address {host}:{port}: {e}")))?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::internal(format!("Transport error: {e}")))?;
    info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Transport error: {e}")))?;

    resources.database.close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}
