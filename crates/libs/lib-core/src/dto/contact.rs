//! # Contact DTOs

use lib_utils::{validate_email, validate_not_empty};
use serde::{Deserialize, Serialize};

use super::non_blank;
use crate::error::{AppError, Result};
use crate::model::store::models::{ContactForCreate, ContactStatus};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub message: String,
}

impl ContactRequest {
    pub fn validate(&self) -> Result<()> {
        validate_not_empty(&self.name, "Name").map_err(AppError::InvalidInput)?;
        validate_email(&self.email).map_err(AppError::InvalidInput)?;
        validate_not_empty(&self.message, "Message").map_err(AppError::InvalidInput)?;
        Ok(())
    }

    pub fn into_create(self) -> ContactForCreate {
        ContactForCreate {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: non_blank(self.phone),
            message: self.message,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactStatusRequest {
    pub status: ContactStatus,
}
