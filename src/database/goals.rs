// ABOUTME: Database operations for user fitness goals
// ABOUTME: The end >= start invariant is re-checked by a table CHECK after partial updates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

use super::{
    column_error, format_date, format_timestamp, map_sqlx_error, parse_date, parse_timestamp,
    parse_uuid,
};
use crate::errors::{AppError, AppResult};
use crate::models::{CreateGoalRequest, Goal, UpdateGoalRequest};

const GOAL_COLUMNS: &str =
    "id, owner_id, goal_type, target_value, start_date, end_date, created_at";

/// Goal database operations manager
#[derive(Clone)]
pub struct GoalManager {
    pool: SqlitePool,
}

impl GoalManager {
    /// Create a new goal manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a goal for a user
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown owner
    pub async fn create(&self, owner_id: Uuid, request: &CreateGoalRequest) -> AppResult<Goal> {
        let row = sqlx::query(&format!(
            r"
            INSERT INTO goals
                (id, owner_id, goal_type, target_value, start_date, end_date, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            RETURNING {GOAL_COLUMNS}
            "
        ))
        .bind(Uuid::new_v4().to_string())
        .bind(owner_id.to_string())
        .bind(request.goal_type.as_str())
        .bind(request.target_value)
        .bind(format_date(request.start_date))
        .bind(request.end_date.map(format_date))
        .bind(format_timestamp(Utc::now()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to create goal", &e))?;

        row_to_goal(&row)
    }

    /// List a user's goals ordered by start date
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` on store failure
    pub async fn list_for_owner(&self, owner_id: Uuid) -> AppResult<Vec<Goal>> {
        let rows = sqlx::query(&format!(
            r"
            SELECT {GOAL_COLUMNS} FROM goals
            WHERE owner_id = ?1
            ORDER BY start_date ASC, created_at ASC
            "
        ))
        .bind(owner_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to list goals", &e))?;

        rows.iter().map(row_to_goal).collect()
    }

    /// Apply a partial update
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the goal does not exist, `InvalidInput` if the
    /// merged range ends before it starts
    pub async fn update(&self, goal_id: Uuid, request: &UpdateGoalRequest) -> AppResult<Goal> {
        let row = sqlx::query(&format!(
            r"
            UPDATE goals SET
                target_value = COALESCE(?1, target_value),
                end_date = COALESCE(?2, end_date)
            WHERE id = ?3
            RETURNING {GOAL_COLUMNS}
            "
        ))
        .bind(request.target_value)
        .bind(request.end_date.map(format_date))
        .bind(goal_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to update goal", &e))?;

        row.as_ref()
            .map(row_to_goal)
            .transpose()?
            .ok_or_else(|| AppError::not_found(format!("Goal {goal_id} not found")))
    }

    /// Delete a goal
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the goal does not exist
    pub async fn delete(&self, goal_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM goals WHERE id = ?1")
            .bind(goal_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to delete goal", &e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Goal {goal_id} not found")));
        }
        Ok(())
    }
}

fn row_to_goal(row: &SqliteRow) -> AppResult<Goal> {
    let id: String = row.try_get("id").map_err(|e| column_error("id", &e))?;
    let owner_id: String = row
        .try_get("owner_id")
        .map_err(|e| column_error("owner_id", &e))?;
    let goal_type: String = row
        .try_get("goal_type")
        .map_err(|e| column_error("goal_type", &e))?;
    let start_date: String = row
        .try_get("start_date")
        .map_err(|e| column_error("start_date", &e))?;
    let end_date: Option<String> = row
        .try_get("end_date")
        .map_err(|e| column_error("end_date", &e))?;
    let created_at: String = row
        .try_get("created_at")
        .map_err(|e| column_error("created_at", &e))?;

    Ok(Goal {
        id: parse_uuid("id", &id)?,
        owner_id: parse_uuid("owner_id", &owner_id)?,
        goal_type: goal_type
            .parse()
            .map_err(|_| AppError::internal(format!("Invalid goal type in store: {goal_type}")))?,
        target_value: row
            .try_get("target_value")
            .map_err(|e| column_error("target_value", &e))?,
        start_date: parse_date("start_date", &start_date)?,
        end_date: end_date
            .as_deref()
            .map(|raw| parse_date("end_date", raw))
            .transpose()?,
        created_at: parse_timestamp("created_at", &created_at)?,
    })
}
