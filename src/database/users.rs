// ABOUTME: Database operations for user profiles
// ABOUTME: Create, fetch, partial update and cascading delete of users
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
use crate::models::{CreateUserRequest, UpdateUserRequest, User};

const USER_COLUMNS: &str =
    "id, email, display_name, date_of_birth, height_cm, created_at, updated_at";

/// User database operations manager
#[derive(Clone)]
pub struct UserManager {
    pool: SqlitePool,
}

impl UserManager {
    /// Create a new user manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a user
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if the email is taken, `StoreUnavailable` on store failure
    pub async fn create(&self, request: &CreateUserRequest) -> AppResult<User> {
        let now = format_timestamp(Utc::now());
        let row = sqlx::query(&format!(
            r"
            INSERT INTO users
                (id, email, display_name, date_of_birth, height_cm, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
            RETURNING {USER_COLUMNS}
            "
        ))
        .bind(Uuid::new_v4().to_string())
        .bind(request.email.trim().to_lowercase())
        .bind(request.display_name.trim())
        .bind(request.date_of_birth.map(format_date))
        .bind(request.height_cm)
        .bind(&now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to create user", &e))?;

        row_to_user(&row)
    }

    /// Get a user by ID
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` on store failure
    pub async fn get(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"))
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to get user", &e))?;

        row.as_ref().map(row_to_user).transpose()
    }

    /// Get a user by ID, failing when absent
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the user does not exist
    pub async fn get_required(&self, user_id: Uuid) -> AppResult<User> {
        self.get(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))
    }

    /// Apply a partial update
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the user does not exist, `Conflict` if the new email is taken
    pub async fn update(&self, user_id: Uuid, request: &UpdateUserRequest) -> AppResult<User> {
        let row = sqlx::query(&format!(
            r"
            UPDATE users SET
                email = COALESCE(?1, email),
                display_name = COALESCE(?2, display_name),
                date_of_birth = COALESCE(?3, date_of_birth),
                height_cm = COALESCE(?4, height_cm),
                updated_at = ?5
            WHERE id = ?6
            RETURNING {USER_COLUMNS}
            "
        ))
        .bind(request.email.as_deref().map(|e| e.trim().to_lowercase()))
        .bind(request.display_name.as_deref().map(str::trim))
        .bind(request.date_of_birth.map(format_date))
        .bind(request.height_cm)
        .bind(format_timestamp(Utc::now()))
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to update user", &e))?;

        row.as_ref()
            .map(row_to_user)
            .transpose()?
            .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))
    }

    /// Delete a user together with everything they own
    ///
    /// Child tables cascade through foreign keys; daily records carry a plain
    /// owner id and are removed explicitly in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the user does not exist
    pub async fn delete(&self, user_id: Uuid) -> AppResult<()> {
        let id = user_id.to_string();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("Failed to begin transaction", &e))?;

        sqlx::query("DELETE FROM daily_records WHERE owner_id = ?1")
            .bind(&id)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("Failed to delete daily records", &e))?;

        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(&id)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("Failed to delete user", &e))?;

        if result.rows_affected() == 0 {
            // Dropping `tx` rolls back the daily record delete
            return Err(AppError::not_found(format!("User {user_id} not found")));
        }

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("Failed to commit user deletion", &e))?;
        Ok(())
    }

    /// Count registered users
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` on store failure
    pub async fn count(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to count users", &e))
    }
}

fn row_to_user(row: &SqliteRow) -> AppResult<User> {
    let id: String = row.try_get("id").map_err(|e| column_error("id", &e))?;
    let date_of_birth: Option<String> = row
        .try_get("date_of_birth")
        .map_err(|e| column_error("date_of_birth", &e))?;
    let created_at: String = row
        .try_get("created_at")
        .map_err(|e| column_error("created_at", &e))?;
    let updated_at: String = row
        .try_get("updated_at")
        .map_err(|e| column_error("updated_at", &e))?;

    Ok(User {
        id: parse_uuid("id", &id)?,
        email: row.try_get("email").map_err(|e| column_error("email", &e))?,
        display_name: row
            .try_get("display_name")
            .map_err(|e| column_error("display_name", &e))?,
        date_of_birth: date_of_birth
            .as_deref()
            .map(|raw| parse_date("date_of_birth", raw))
            .transpose()?,
        height_cm: row
            .try_get("height_cm")
            .map_err(|e| column_error("height_cm", &e))?,
        created_at: parse_timestamp("created_at", &created_at)?,
        updated_at: parse_timestamp("updated_at", &updated_at)?,
    })
}
