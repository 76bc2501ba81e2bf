// ABOUTME: Database operations for daily aggregate records keyed by (owner_id, record_date)
// ABOUTME: Partial updates are merged server-side by a single COALESCE ... RETURNING statement
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use super::repositories::DailyRecordRepository;
use super::{column_error, format_date, format_timestamp, map_sqlx_error, parse_date};
use crate::errors::AppResult;
use crate::models::{DailyRecord, DailyRecordKey, DailyRecordPatch};

const DAILY_RECORD_COLUMNS: &str =
    "owner_id, record_date, total_steps, total_calories_burned, exercise_duration_minutes, weight";

/// Inclusive date bounds for listing records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    /// Earliest date to include
    pub from: Option<NaiveDate>,
    /// Latest date to include
    pub to: Option<NaiveDate>,
}

/// Daily record database operations manager
#[derive(Clone)]
pub struct DailyRecordManager {
    pool: SqlitePool,
}

impl DailyRecordManager {
    /// Create a new daily record manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DailyRecordRepository for DailyRecordManager {
    async fn insert(&self, record: &DailyRecord) -> AppResult<DailyRecord> {
        let row = sqlx::query(&format!(
            r"
            INSERT INTO daily_records (
                owner_id, record_date, total_steps, total_calories_burned,
                exercise_duration_minutes, weight, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            RETURNING {DAILY_RECORD_COLUMNS}
            "
        ))
        .bind(&record.owner_id)
        .bind(format_date(record.record_date))
        .bind(record.total_steps)
        .bind(record.total_calories_burned)
        .bind(record.exercise_duration_minutes)
        .bind(record.weight)
        .bind(format_timestamp(Utc::now()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to insert daily record", &e))?;

        row_to_daily_record(&row)
    }

    async fn fetch_by_key(&self, key: &DailyRecordKey) -> AppResult<Option<DailyRecord>> {
        let row = sqlx::query(&format!(
            r"
            SELECT {DAILY_RECORD_COLUMNS} FROM daily_records
            WHERE owner_id = ?1 AND record_date = ?2
            "
        ))
        .bind(&key.owner_id)
        .bind(format_date(key.record_date))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to fetch daily record", &e))?;

        row.as_ref().map(row_to_daily_record).transpose()
    }

    async fn list_for_owner(
        &self,
        owner_id: &str,
        range: DateRange,
    ) -> AppResult<Vec<DailyRecord>> {
        let rows = sqlx::query(&format!(
            r"
            SELECT {DAILY_RECORD_COLUMNS} FROM daily_records
            WHERE owner_id = ?1
              AND (?2 IS NULL OR record_date >= ?2)
              AND (?3 IS NULL OR record_date <= ?3)
            ORDER BY record_date ASC
            "
        ))
        .bind(owner_id)
        .bind(range.from.map(format_date))
        .bind(range.to.map(format_date))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to list daily records", &e))?;

        rows.iter().map(row_to_daily_record).collect()
    }

    async fn merge_by_key(
        &self,
        key: &DailyRecordKey,
        patch: &DailyRecordPatch,
    ) -> AppResult<Option<DailyRecord>> {
        // The store evaluates fetch, merge and write as one statement, so a
        // concurrent merge on the same key cannot interleave with this one.
        let row = sqlx::query(&format!(
            r"
            UPDATE daily_records SET
                total_steps = COALESCE(?1, total_steps),
                total_calories_burned = COALESCE(?2, total_calories_burned),
                exercise_duration_minutes = COALESCE(?3, exercise_duration_minutes),
                weight = COALESCE(?4, weight),
                updated_at = ?5
            WHERE owner_id = ?6 AND record_date = ?7
            RETURNING {DAILY_RECORD_COLUMNS}
            "
        ))
        .bind(patch.total_steps)
        .bind(patch.total_calories_burned)
        .bind(patch.exercise_duration_minutes)
        .bind(patch.weight)
        .bind(format_timestamp(Utc::now()))
        .bind(&key.owner_id)
        .bind(format_date(key.record_date))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to update daily record", &e))?;

        row.as_ref().map(row_to_daily_record).transpose()
    }

    async fn delete_by_key(&self, key: &DailyRecordKey) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM daily_records WHERE owner_id = ?1 AND record_date = ?2")
                .bind(&key.owner_id)
                .bind(format_date(key.record_date))
                .execute(&self.pool)
                .await
                .map_err(|e| map_sqlx_error("Failed to delete daily record", &e))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_daily_record(row: &SqliteRow) -> AppResult<DailyRecord> {
    let record_date: String = row
        .try_get("record_date")
        .map_err(|e| column_error("record_date", &e))?;

    Ok(DailyRecord {
        owner_id: row
            .try_get("owner_id")
            .map_err(|e| column_error("owner_id", &e))?,
        record_date: parse_date("record_date", &record_date)?,
        total_steps: row
            .try_get("total_steps")
            .map_err(|e| column_error("total_steps", &e))?,
        total_calories_burned: row
            .try_get("total_calories_burned")
            .map_err(|e| column_error("total_calories_burned", &e))?,
        exercise_duration_minutes: row
            .try_get("exercise_duration_minutes")
            .map_err(|e| column_error("exercise_duration_minutes", &e))?,
        weight: row.try_get("weight").map_err(|e| column_error("weight", &e))?,
    })
}
