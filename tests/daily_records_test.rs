// ABOUTME: Integration tests for the daily record service and its merge resolver
// ABOUTME: Covers presence semantics, not-found handling, conflicts, concurrency and store failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use common::{create_test_database, date};
use pulsetrack_server::{
    database::{repositories::DailyRecordRepository, DailyRecordManager, DateRange},
    errors::{AppError, AppResult, ErrorCode},
    models::{DailyRecord, DailyRecordKey, DailyRecordPatch, NewDailyRecord},
    services::DailyRecordService,
};

async fn setup_service() -> Result<DailyRecordService> {
    let database = create_test_database().await?;
    let repository = Arc::new(DailyRecordManager::new(database.pool().clone()));
    Ok(DailyRecordService::new(repository))
}

fn seed(steps: u32, calories: f64, minutes: u32, weight: Option<f64>) -> NewDailyRecord {
    NewDailyRecord {
        record_date: date(2024, 1, 1),
        total_steps: steps,
        total_calories_burned: calories,
        exercise_duration_minutes: minutes,
        weight,
    }
}

fn key(owner: &str) -> DailyRecordKey {
    DailyRecordKey::new(owner, date(2024, 1, 1))
}

// ============================================================================
// Merge semantics
// ============================================================================

#[tokio::test]
async fn test_calories_only_patch_keeps_other_fields() -> Result<()> {
    let service = setup_service().await?;
    service.create("A", seed(100, 200.0, 30, Some(70.0))).await?;

    let patch = DailyRecordPatch {
        total_calories_burned: Some(250.5),
        ..DailyRecordPatch::default()
    };
    let merged = service.merge_update(&key("A"), &patch).await?;

    assert_eq!(merged.total_steps, 100);
    assert!((merged.total_calories_burned - 250.5).abs() < f64::EPSILON);
    assert_eq!(merged.exercise_duration_minutes, 30);
    assert_eq!(merged.weight, Some(70.0));

    let stored = service.get(&key("A")).await?;
    assert_eq!(stored, merged);
    Ok(())
}

#[tokio::test]
async fn test_explicit_zero_weight_overwrites() -> Result<()> {
    let service = setup_service().await?;
    service.create("A", seed(100, 200.0, 30, Some(70.0))).await?;

    let patch: DailyRecordPatch = serde_json::from_str(r#"{"weight": 0}"#)?;
    let merged = service.merge_update(&key("A"), &patch).await?;

    assert_eq!(merged.weight, Some(0.0));
    assert_eq!(merged.total_steps, 100);
    assert_eq!(merged.exercise_duration_minutes, 30);
    Ok(())
}

#[tokio::test]
async fn test_explicit_zero_steps_overwrites() -> Result<()> {
    let service = setup_service().await?;
    service.create("A", seed(100, 200.0, 30, Some(70.0))).await?;

    let patch = DailyRecordPatch {
        total_steps: Some(0),
        ..DailyRecordPatch::default()
    };
    let merged = service.merge_update(&key("A"), &patch).await?;
    assert_eq!(merged.total_steps, 0);
    Ok(())
}

#[tokio::test]
async fn test_empty_patch_returns_existing_record() -> Result<()> {
    let service = setup_service().await?;
    let created = service.create("A", seed(100, 200.0, 30, Some(70.0))).await?;

    let merged = service
        .merge_update(&key("A"), &DailyRecordPatch::default())
        .await?;
    assert_eq!(merged, created);
    Ok(())
}

#[tokio::test]
async fn test_full_patch_replaces_every_field() -> Result<()> {
    let service = setup_service().await?;
    service.create("A", seed(100, 200.0, 30, Some(70.0))).await?;

    let patch = DailyRecordPatch {
        total_steps: Some(12_000),
        total_calories_burned: Some(480.0),
        exercise_duration_minutes: Some(75),
        weight: Some(69.4),
    };
    let merged = service.merge_update(&key("A"), &patch).await?;

    assert_eq!(merged.total_steps, 12_000);
    assert!((merged.total_calories_burned - 480.0).abs() < f64::EPSILON);
    assert_eq!(merged.exercise_duration_minutes, 75);
    assert_eq!(merged.weight, Some(69.4));
    Ok(())
}

#[tokio::test]
async fn test_null_weight_keeps_stored_value() -> Result<()> {
    let service = setup_service().await?;
    service.create("A", seed(100, 200.0, 30, Some(70.0))).await?;

    let patch: DailyRecordPatch = serde_json::from_str(r#"{"weight": null, "totalSteps": 150}"#)?;
    let merged = service.merge_update(&key("A"), &patch).await?;

    assert_eq!(merged.weight, Some(70.0));
    assert_eq!(merged.total_steps, 150);
    Ok(())
}

#[tokio::test]
async fn test_merge_matches_pure_apply() -> Result<()> {
    let service = setup_service().await?;
    let created = service.create("A", seed(100, 200.0, 30, None)).await?;

    let patch = DailyRecordPatch {
        exercise_duration_minutes: Some(45),
        weight: Some(81.2),
        ..DailyRecordPatch::default()
    };
    let merged = service.merge_update(&key("A"), &patch).await?;
    assert_eq!(merged, patch.apply_to(&created));
    Ok(())
}

// ============================================================================
// Keys and lookups
// ============================================================================

#[tokio::test]
async fn test_merge_on_missing_key_is_not_found() -> Result<()> {
    let service = setup_service().await?;
    service.create("A", seed(100, 200.0, 30, None)).await?;

    let patch = DailyRecordPatch {
        total_steps: Some(1),
        ..DailyRecordPatch::default()
    };

    let other_owner = service.merge_update(&key("B"), &patch).await.unwrap_err();
    assert_eq!(other_owner.code, ErrorCode::ResourceNotFound);

    let other_date = DailyRecordKey::new("A", date(2024, 1, 2));
    let err = service.merge_update(&other_date, &patch).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    let empty = service
        .merge_update(&key("B"), &DailyRecordPatch::default())
        .await
        .unwrap_err();
    assert_eq!(empty.code, ErrorCode::ResourceNotFound);
    Ok(())
}

#[tokio::test]
async fn test_records_are_isolated_per_owner_and_date() -> Result<()> {
    let service = setup_service().await?;
    service.create("A", seed(100, 200.0, 30, None)).await?;
    service.create("B", seed(5, 1.0, 0, None)).await?;

    let patch = DailyRecordPatch {
        total_steps: Some(999),
        ..DailyRecordPatch::default()
    };
    service.merge_update(&key("A"), &patch).await?;

    assert_eq!(service.get(&key("B")).await?.total_steps, 5);
    Ok(())
}

#[tokio::test]
async fn test_insert_then_fetch_round_trips() -> Result<()> {
    let service = setup_service().await?;
    let created = service
        .create("owner-7", seed(8_765, 432.25, 61, Some(72.5)))
        .await?;

    let fetched = service.get(&created.key()).await?;
    assert_eq!(fetched, created);
    assert_eq!(fetched.owner_id, "owner-7");
    assert_eq!(fetched.record_date, date(2024, 1, 1));
    Ok(())
}

#[tokio::test]
async fn test_duplicate_insert_is_conflict() -> Result<()> {
    let service = setup_service().await?;
    service.create("A", seed(100, 200.0, 30, None)).await?;

    let err = service
        .create("A", seed(1, 1.0, 1, None))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceConflict);
    assert_eq!(service.get(&key("A")).await?.total_steps, 100);
    Ok(())
}

#[tokio::test]
async fn test_invalid_inputs_are_rejected() -> Result<()> {
    let service = setup_service().await?;
    service.create("A", seed(100, 200.0, 30, None)).await?;

    let negative = DailyRecordPatch {
        total_calories_burned: Some(-1.0),
        ..DailyRecordPatch::default()
    };
    let err = service.merge_update(&key("A"), &negative).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);

    let blank = service
        .merge_update(&key("  "), &DailyRecordPatch::default())
        .await
        .unwrap_err();
    assert_eq!(blank.code, ErrorCode::InvalidInput);

    let err = service
        .create("A", seed(1, f64::NAN, 1, None))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    Ok(())
}

#[tokio::test]
async fn test_list_orders_by_date_and_filters_range() -> Result<()> {
    let service = setup_service().await?;
    for day in [3, 1, 2, 5] {
        service
            .create(
                "A",
                NewDailyRecord {
                    record_date: date(2024, 1, day),
                    ..seed(day * 100, 0.0, 0, None)
                },
            )
            .await?;
    }
    service.create("B", seed(1, 0.0, 0, None)).await?;

    let all = service.list("A", DateRange::default()).await?;
    let days: Vec<_> = all.iter().map(|r| r.record_date).collect();
    assert_eq!(
        days,
        vec![date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 3), date(2024, 1, 5)]
    );

    let window = service
        .list(
            "A",
            DateRange {
                from: Some(date(2024, 1, 2)),
                to: Some(date(2024, 1, 3)),
            },
        )
        .await?;
    assert_eq!(window.len(), 2);

    let inverted = service
        .list(
            "A",
            DateRange {
                from: Some(date(2024, 1, 5)),
                to: Some(date(2024, 1, 1)),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(inverted.code, ErrorCode::InvalidInput);
    Ok(())
}

#[tokio::test]
async fn test_delete_then_merge_is_not_found() -> Result<()> {
    let service = setup_service().await?;
    service.create("A", seed(100, 200.0, 30, None)).await?;

    service.delete(&key("A")).await?;
    let err = service
        .merge_update(&key("A"), &DailyRecordPatch::default())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    let again = service.delete(&key("A")).await.unwrap_err();
    assert_eq!(again.code, ErrorCode::ResourceNotFound);
    Ok(())
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test]
async fn test_concurrent_merges_keep_both_fields() -> Result<()> {
    let service = setup_service().await?;
    service.create("A", seed(100, 200.0, 30, Some(70.0))).await?;

    let steps = DailyRecordPatch {
        total_steps: Some(5_000),
        ..DailyRecordPatch::default()
    };
    let weight = DailyRecordPatch {
        weight: Some(68.0),
        ..DailyRecordPatch::default()
    };

    let first = service.clone();
    let second = service.clone();
    let key_a = key("A");
    let key_b = key("A");
    let (left, right) = tokio::join!(
        first.merge_update(&key_a, &steps),
        second.merge_update(&key_b, &weight),
    );
    left?;
    right?;

    let stored = service.get(&key("A")).await?;
    assert_eq!(stored.total_steps, 5_000);
    assert_eq!(stored.weight, Some(68.0));
    assert!((stored.total_calories_burned - 200.0).abs() < f64::EPSILON);
    Ok(())
}

// ============================================================================
// Store failures
// ============================================================================

struct UnavailableRepository;

#[async_trait]
impl DailyRecordRepository for UnavailableRepository {
    async fn insert(&self, _record: &DailyRecord) -> AppResult<DailyRecord> {
        Err(AppError::database("connection refused"))
    }

    async fn fetch_by_key(&self, _key: &DailyRecordKey) -> AppResult<Option<DailyRecord>> {
        Err(AppError::database("connection refused"))
    }

    async fn list_for_owner(
        &self,
        _owner_id: &str,
        _range: DateRange,
    ) -> AppResult<Vec<DailyRecord>> {
        Err(AppError::database("connection refused"))
    }

    async fn merge_by_key(
        &self,
        _key: &DailyRecordKey,
        _patch: &DailyRecordPatch,
    ) -> AppResult<Option<DailyRecord>> {
        Err(AppError::database("connection refused"))
    }

    async fn delete_by_key(&self, _key: &DailyRecordKey) -> AppResult<bool> {
        Err(AppError::database("connection refused"))
    }
}

#[tokio::test]
async fn test_store_failure_propagates_as_unavailable() {
    let service = DailyRecordService::new(Arc::new(UnavailableRepository));

    let err = service
        .merge_update(&key("A"), &DailyRecordPatch::default())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::StoreUnavailable);
    assert_eq!(err.message, "connection refused");
    assert_eq!(err.http_status(), 503);
}

#[tokio::test]
async fn test_closed_pool_reports_store_unavailable() -> Result<()> {
    let database = create_test_database().await?;
    let service = DailyRecordService::new(Arc::new(DailyRecordManager::new(
        database.pool().clone(),
    )));
    database.close().await;

    let err = service.get(&key("A")).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::StoreUnavailable);
    Ok(())
}
