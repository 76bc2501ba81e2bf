// ABOUTME: Database operations for logged exercise sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

use super::{column_error, format_timestamp, map_sqlx_error, parse_timestamp, parse_uuid};
use crate::errors::{AppError, AppResult};
use crate::models::{CreateExerciseRequest, Exercise, UpdateExerciseRequest};

const EXERCISE_COLUMNS: &str =
    "id, owner_id, name, exercise_type, duration_minutes, calories_burned, performed_at";

/// Exercise database operations manager
#[derive(Clone)]
pub struct ExerciseManager {
    pool: SqlitePool,
}

impl ExerciseManager {
    /// Create a new exercise manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Log an exercise session
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown owner
    pub async fn create(
        &self,
        owner_id: Uuid,
        request: &CreateExerciseRequest,
    ) -> AppResult<Exercise> {
        let row = sqlx::query(&format!(
            r"
            INSERT INTO exercises
                (id, owner_id, name, exercise_type, duration_minutes, calories_burned, performed_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            RETURNING {EXERCISE_COLUMNS}
            "
        ))
        .bind(Uuid::new_v4().to_string())
        .bind(owner_id.to_string())
        .bind(request.name.trim())
        .bind(request.exercise_type.trim())
        .bind(request.duration_minutes)
        .bind(request.calories_burned)
        .bind(format_timestamp(request.performed_at))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to create exercise", &e))?;

        row_to_exercise(&row)
    }

    /// List a user's sessions, most recent first
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` on store failure
    pub async fn list_for_owner(&self, owner_id: Uuid) -> AppResult<Vec<Exercise>> {
        let rows = sqlx::query(&format!(
            r"
            SELECT {EXERCISE_COLUMNS} FROM exercises
            WHERE owner_id = ?1
            ORDER BY performed_at DESC
            "
        ))
        .bind(owner_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to list exercises", &e))?;

        rows.iter().map(row_to_exercise).collect()
    }

    /// Apply a partial update
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the exercise does not exist
    pub async fn update(
        &self,
        exercise_id: Uuid,
        request: &UpdateExerciseRequest,
    ) -> AppResult<Exercise> {
        let row = sqlx::query(&format!(
            r"
            UPDATE exercises SET
                name = COALESCE(?1, name),
                exercise_type = COALESCE(?2, exercise_type),
                duration_minutes = COALESCE(?3, duration_minutes),
                calories_burned = COALESCE(?4, calories_burned),
                performed_at = COALESCE(?5, performed_at)
            WHERE id = ?6
            RETURNING {EXERCISE_COLUMNS}
            "
        ))
        .bind(request.name.as_deref().map(str::trim))
        .bind(request.exercise_type.as_deref().map(str::trim))
        .bind(request.duration_minutes)
        .bind(request.calories_burned)
        .bind(request.performed_at.map(format_timestamp))
        .bind(exercise_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to update exercise", &e))?;

        row.as_ref()
            .map(row_to_exercise)
            .transpose()?
            .ok_or_else(|| AppError::not_found(format!("Exercise {exercise_id} not found")))
    }

    /// Delete an exercise
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the exercise does not exist
    pub async fn delete(&self, exercise_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM exercises WHERE id = ?1")
            .bind(exercise_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to delete exercise", &e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Exercise {exercise_id} not found")));
        }
        Ok(())
    }
}

fn row_to_exercise(row: &SqliteRow) -> AppResult<Exercise> {
    let id: String = row.try_get("id").map_err(|e| column_error("id", &e))?;
    let owner_id: String = row
        .try_get("owner_id")
        .map_err(|e| column_error("owner_id", &e))?;
    let performed_at: String = row
        .try_get("performed_at")
        .map_err(|e| column_error("performed_at", &e))?;

    Ok(Exercise {
        id: parse_uuid("id", &id)?,
        owner_id: parse_uuid("owner_id", &owner_id)?,
        name: row.try_get("name").map_err(|e| column_error("name", &e))?,
        exercise_type: row
            .try_get("exercise_type")
            .map_err(|e| column_error("exercise_type", &e))?,
        duration_minutes: row
            .try_get("duration_minutes")
            .map_err(|e| column_error("duration_minutes", &e))?,
        calories_burned: row
            .try_get("calories_burned")
            .map_err(|e| column_error("calories_burned", &e))?,
        performed_at: parse_timestamp("performed_at", &performed_at)?,
    })
}
