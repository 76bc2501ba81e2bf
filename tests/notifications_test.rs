// ABOUTME: Integration tests for the push notification relay
// ABOUTME: Verifies delivery recording for success and failure and the disabled relay
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use std::sync::Arc;

use anyhow::Result;
use axum::http::StatusCode;
use common::{
    create_test_server_resources, create_test_server_resources_with_sender, create_test_user,
    RecordingPushSender,
};
use helpers::axum_test::AxumTestRequest;
use pulsetrack_server::{
    errors::ErrorCode,
    external::PushSender,
    models::{Notification, NotificationStatus, SendNotificationRequest},
    server::build_router,
};
use serde_json::{json, Value};
use uuid::Uuid;

fn request() -> SendNotificationRequest {
    SendNotificationRequest {
        title: "Goal reached".to_owned(),
        body: "You walked 10,000 steps today".to_owned(),
    }
}

#[tokio::test]
async fn test_successful_push_is_recorded_as_sent() -> Result<()> {
    let sender = RecordingPushSender::succeeding();
    let resources =
        create_test_server_resources_with_sender(Some(sender.clone() as Arc<dyn PushSender>))
            .await?;
    let user = create_test_user(&resources.database).await?;

    let notification = resources.notifications.send(user.id, &request()).await?;
    assert_eq!(notification.status, NotificationStatus::Sent);
    assert_eq!(notification.provider_message_id.as_deref(), Some("msg-1"));

    let sent = sender.sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].tags, vec![format!("user:{}", user.id)]);

    let history = resources.notifications.history(user.id).await?;
    assert_eq!(history, vec![notification]);
    Ok(())
}

#[tokio::test]
async fn test_failed_push_is_recorded_and_reported() -> Result<()> {
    let sender = RecordingPushSender::failing();
    let resources =
        create_test_server_resources_with_sender(Some(sender.clone() as Arc<dyn PushSender>))
            .await?;
    let user = create_test_user(&resources.database).await?;

    let err = resources
        .notifications
        .send(user.id, &request())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceError);

    let history = resources.notifications.history(user.id).await?;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status, NotificationStatus::Failed);
    assert!(history[0].provider_message_id.is_none());
    Ok(())
}

#[tokio::test]
async fn test_unknown_user_is_not_pushed() -> Result<()> {
    let sender = RecordingPushSender::succeeding();
    let resources =
        create_test_server_resources_with_sender(Some(sender.clone() as Arc<dyn PushSender>))
            .await?;

    let err = resources
        .notifications
        .send(Uuid::new_v4(), &request())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    assert_eq!(sender.sent_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_routes_map_relay_outcomes() {
    let resources = create_test_server_resources_with_sender(Some(
        RecordingPushSender::failing() as Arc<dyn PushSender>
    ))
    .await
    .unwrap();
    let user = create_test_user(&resources.database).await.unwrap();
    let router = build_router(&resources);
    let uri = format!("/api/users/{}/notifications", user.id);

    let failed = AxumTestRequest::post(&uri)
        .json(&json!({ "title": "Hi", "body": "There" }))
        .send(router.clone())
        .await;
    assert_eq!(failed.status_code(), StatusCode::BAD_GATEWAY);
    let body: Value = failed.json();
    assert_eq!(body["error"]["code"], "external_service_error");

    let blank = AxumTestRequest::post(&uri)
        .json(&json!({ "title": " ", "body": "There" }))
        .send(router.clone())
        .await;
    assert_eq!(blank.status_code(), StatusCode::BAD_REQUEST);

    let history = AxumTestRequest::get(&uri).send(router).await;
    assert_eq!(history.status_code(), StatusCode::OK);
    let history: Vec<Notification> = history.json();
    assert_eq!(history.len(), 1);
}

#[tokio::test]
async fn test_disabled_relay_returns_503() {
    let resources = create_test_server_resources().await.unwrap();
    assert!(!resources.notifications.is_enabled());
    let user = create_test_user(&resources.database).await.unwrap();
    let router = build_router(&resources);

    let response = AxumTestRequest::post(&format!("/api/users/{}/notifications", user.id))
        .json(&json!({ "title": "Hi", "body": "There" }))
        .send(router)
        .await;
    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "config_error");
}
