// ABOUTME: Integration tests for devices, goals, exercises and location samples
// ABOUTME: Covers partial updates, constraint mapping and listing order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use anyhow::Result;
use axum::http::StatusCode;
use chrono::{Duration, TimeZone, Utc};
use common::{create_test_database, create_test_server_resources, create_test_user, date};
use helpers::axum_test::AxumTestRequest;
use pulsetrack_server::{
    database::{DeviceManager, ExerciseManager, GoalManager, LocationManager},
    errors::ErrorCode,
    models::{
        CreateExerciseRequest, CreateGoalRequest, Device, DeviceType, GoalType,
        LocationActivity, RecordLocationRequest, RegisterDeviceRequest, UpdateDeviceRequest,
        UpdateExerciseRequest, UpdateGoalRequest,
    },
    server::build_router,
};
use serde_json::json;
use uuid::Uuid;

// ============================================================================
// Devices
// ============================================================================

fn wearable(serial: &str) -> RegisterDeviceRequest {
    RegisterDeviceRequest {
        name: "Band".to_owned(),
        device_type: DeviceType::Wearable,
        serial_number: serial.to_owned(),
    }
}

#[tokio::test]
async fn test_device_registration_and_sync_update() -> Result<()> {
    let database = create_test_database().await?;
    let user = create_test_user(&database).await?;
    let devices = DeviceManager::new(database.pool().clone());

    let device = devices.register(user.id, &wearable("SN-100")).await?;
    assert!(device.last_synced_at.is_none());

    let synced_at = Utc.with_ymd_and_hms(2024, 3, 1, 6, 30, 0).unwrap();
    let updated = devices
        .update(
            device.id,
            &UpdateDeviceRequest {
                last_synced_at: Some(synced_at),
                ..UpdateDeviceRequest::default()
            },
        )
        .await?;
    assert_eq!(updated.last_synced_at, Some(synced_at));
    assert_eq!(updated.name, "Band");

    let listed = devices.list_for_owner(user.id).await?;
    assert_eq!(listed, vec![updated]);
    Ok(())
}

#[tokio::test]
async fn test_device_constraints_map_to_error_codes() -> Result<()> {
    let database = create_test_database().await?;
    let user = create_test_user(&database).await?;
    let devices = DeviceManager::new(database.pool().clone());
    devices.register(user.id, &wearable("SN-1")).await?;

    let duplicate = devices.register(user.id, &wearable("SN-1")).await.unwrap_err();
    assert_eq!(duplicate.code, ErrorCode::ResourceConflict);

    let orphan = devices
        .register(Uuid::new_v4(), &wearable("SN-2"))
        .await
        .unwrap_err();
    assert_eq!(orphan.code, ErrorCode::ResourceNotFound);

    let missing = devices.delete(Uuid::new_v4()).await.unwrap_err();
    assert_eq!(missing.code, ErrorCode::ResourceNotFound);
    Ok(())
}

#[tokio::test]
async fn test_device_routes() {
    let resources = create_test_server_resources().await.unwrap();
    let user = create_test_user(&resources.database).await.unwrap();
    let router = build_router(&resources);

    let created = AxumTestRequest::post(&format!("/api/users/{}/devices", user.id))
        .json(&json!({ "name": "Scale", "deviceType": "scale", "serialNumber": "SC-9" }))
        .send(router.clone())
        .await;
    assert_eq!(created.status_code(), StatusCode::CREATED);
    let device: Device = created.json();
    assert_eq!(device.device_type, DeviceType::Scale);

    let fetched = AxumTestRequest::get(&format!("/api/devices/{}", device.id))
        .send(router.clone())
        .await;
    assert_eq!(fetched.status_code(), StatusCode::OK);

    let unknown_type = AxumTestRequest::post(&format!("/api/users/{}/devices", user.id))
        .json(&json!({ "name": "X", "deviceType": "toaster", "serialNumber": "T-1" }))
        .send(router.clone())
        .await;
    assert_eq!(unknown_type.status_code(), StatusCode::BAD_REQUEST);

    let unknown_user = AxumTestRequest::get(&format!("/api/users/{}/devices", Uuid::new_v4()))
        .send(router.clone())
        .await;
    assert_eq!(unknown_user.status_code(), StatusCode::NOT_FOUND);

    let deleted = AxumTestRequest::delete(&format!("/api/devices/{}", device.id))
        .send(router)
        .await;
    assert_eq!(deleted.status_code(), StatusCode::NO_CONTENT);
}

// ============================================================================
// Goals
// ============================================================================

#[tokio::test]
async fn test_goal_update_respects_date_range() -> Result<()> {
    let database = create_test_database().await?;
    let user = create_test_user(&database).await?;
    let goals = GoalManager::new(database.pool().clone());

    let goal = goals
        .create(
            user.id,
            &CreateGoalRequest {
                goal_type: GoalType::Steps,
                target_value: 10_000.0,
                start_date: date(2024, 2, 1),
                end_date: None,
            },
        )
        .await?;

    let raised = goals
        .update(
            goal.id,
            &UpdateGoalRequest {
                target_value: Some(12_000.0),
                ..UpdateGoalRequest::default()
            },
        )
        .await?;
    assert!((raised.target_value - 12_000.0).abs() < f64::EPSILON);
    assert_eq!(raised.start_date, date(2024, 2, 1));

    let before_start = goals
        .update(
            goal.id,
            &UpdateGoalRequest {
                end_date: Some(date(2024, 1, 15)),
                ..UpdateGoalRequest::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(before_start.code, ErrorCode::InvalidInput);

    assert_eq!(goals.list_for_owner(user.id).await?, vec![raised]);
    goals.delete(goal.id).await?;
    assert!(goals.list_for_owner(user.id).await?.is_empty());
    Ok(())
}

// ============================================================================
// Exercises
// ============================================================================

#[tokio::test]
async fn test_exercises_list_newest_first_and_patch() -> Result<()> {
    let database = create_test_database().await?;
    let user = create_test_user(&database).await?;
    let exercises = ExerciseManager::new(database.pool().clone());
    let morning = Utc.with_ymd_and_hms(2024, 4, 2, 7, 0, 0).unwrap();

    let first = exercises
        .create(
            user.id,
            &CreateExerciseRequest {
                name: "Easy run".to_owned(),
                exercise_type: "running".to_owned(),
                duration_minutes: 30,
                calories_burned: 310.0,
                performed_at: morning,
            },
        )
        .await?;
    let second = exercises
        .create(
            user.id,
            &CreateExerciseRequest {
                name: "Rowing".to_owned(),
                exercise_type: "rowing".to_owned(),
                duration_minutes: 20,
                calories_burned: 180.0,
                performed_at: morning + Duration::hours(10),
            },
        )
        .await?;

    let listed = exercises.list_for_owner(user.id).await?;
    assert_eq!(listed.iter().map(|e| e.id).collect::<Vec<_>>(), vec![second.id, first.id]);

    let patched = exercises
        .update(
            first.id,
            &UpdateExerciseRequest {
                duration_minutes: Some(0),
                ..UpdateExerciseRequest::default()
            },
        )
        .await?;
    assert_eq!(patched.duration_minutes, 0);
    assert_eq!(patched.name, "Easy run");
    Ok(())
}

// ============================================================================
// Locations
// ============================================================================

#[tokio::test]
async fn test_locations_newest_first_with_limit() -> Result<()> {
    let database = create_test_database().await?;
    let user = create_test_user(&database).await?;
    let locations = LocationManager::new(database.pool().clone());
    let start = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

    for minute in 0..5 {
        locations
            .record(
                user.id,
                &RecordLocationRequest {
                    latitude: 47.6 + f64::from(minute) * 0.001,
                    longitude: -122.3,
                    recorded_at: start + Duration::minutes(i64::from(minute)),
                    activity_type: Some("walking".to_owned()),
                },
            )
            .await?;
    }

    let recent = locations.list_recent(user.id, 2).await?;
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].recorded_at, start + Duration::minutes(4));
    assert_eq!(recent[1].recorded_at, start + Duration::minutes(3));
    Ok(())
}

#[tokio::test]
async fn test_location_routes_validate_coordinates() {
    let resources = create_test_server_resources().await.unwrap();
    let user = create_test_user(&resources.database).await.unwrap();
    let router = build_router(&resources);
    let uri = format!("/api/users/{}/locations", user.id);

    let out_of_range = AxumTestRequest::post(&uri)
        .json(&json!({ "latitude": 91.0, "longitude": 0.0, "recordedAt": "2024-05-01T12:00:00Z" }))
        .send(router.clone())
        .await;
    assert_eq!(out_of_range.status_code(), StatusCode::BAD_REQUEST);

    let recorded = AxumTestRequest::post(&uri)
        .json(&json!({ "latitude": 10.0, "longitude": 20.0, "recordedAt": "2024-05-01T12:00:00Z" }))
        .send(router.clone())
        .await;
    assert_eq!(recorded.status_code(), StatusCode::CREATED);

    let listed = AxumTestRequest::get(&format!("{uri}?limit=10"))
        .send(router)
        .await;
    assert_eq!(listed.status_code(), StatusCode::OK);
    let samples: Vec<LocationActivity> = listed.json();
    assert_eq!(samples.len(), 1);
    assert!(samples[0].activity_type.is_none());
}
