// ABOUTME: User profile model with create and partial update requests
// ABOUTME: Validates email shape, display names and optional body metrics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ensure_not_blank, ensure_positive};
use crate::errors::{AppError, AppResult};

/// Registered application user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Login email, unique across users
    pub email: String,
    /// Name shown in the app
    pub display_name: String,
    /// Date of birth
    pub date_of_birth: Option<NaiveDate>,
    /// Height in centimeters
    pub height_cm: Option<f64>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    /// Login email
    pub email: String,
    /// Name shown in the app
    pub display_name: String,
    /// Date of birth
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    /// Height in centimeters
    #[serde(default)]
    pub height_cm: Option<f64>,
}

impl CreateUserRequest {
    /// Validate the payload
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a malformed email, blank name or bad height
    pub fn validate(&self) -> AppResult<()> {
        validate_email(&self.email)?;
        ensure_not_blank("displayName", &self.display_name)?;
        if let Some(height) = self.height_cm {
            ensure_positive("heightCm", height)?;
        }
        Ok(())
    }
}

/// Partial update of a user profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateUserRequest {
    /// New email
    pub email: Option<String>,
    /// New display name
    pub display_name: Option<String>,
    /// New date of birth
    pub date_of_birth: Option<NaiveDate>,
    /// New height
    pub height_cm: Option<f64>,
}

impl UpdateUserRequest {
    /// Validate the supplied fields
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a malformed email, blank name or bad height
    pub fn validate(&self) -> AppResult<()> {
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(name) = &self.display_name {
            ensure_not_blank("displayName", name)?;
        }
        if let Some(height) = self.height_cm {
            ensure_positive("heightCm", height)?;
        }
        Ok(())
    }
}

fn validate_email(email: &str) -> AppResult<()> {
    let trimmed = email.trim();
    match trimmed.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(AppError::invalid_input(format!(
            "Invalid email address: {trimmed}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::{CreateUserRequest, UpdateUserRequest};

    fn request(email: &str) -> CreateUserRequest {
        CreateUserRequest {
            email: email.to_owned(),
            display_name: "Ada".to_owned(),
            date_of_birth: None,
            height_cm: Some(170.0),
        }
    }

    #[test]
    fn accepts_well_formed_email() {
        assert!(request("ada@example.com").validate().is_ok());
    }

    #[test]
    fn rejects_email_without_domain() {
        assert!(request("ada@").validate().is_err());
        assert!(request("ada").validate().is_err());
    }

    #[test]
    fn update_rejects_blank_display_name() {
        let update = UpdateUserRequest {
            display_name: Some("   ".to_owned()),
            ..UpdateUserRequest::default()
        };
        assert!(update.validate().is_err());
    }
}
