//! # Catalog DTOs
//!
//! Artwork and exhibition request bodies.

use lib_utils::{parse_date, validate_not_empty, validate_positive};
use serde::{Deserialize, Serialize};

use super::non_blank;
use crate::error::{AppError, Result};
use crate::model::store::models::{
    ArtworkForUpdate, ArtworkStatus, ExhibitionForSave, ExhibitionStatus,
};

/// Artwork create/update body.
///
/// `artist` is only read when an admin creates or edits an artwork; for
/// artists the display name comes from their token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtworkRequest {
    pub title: String,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub dimensions: Option<String>,
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub status: Option<ArtworkStatus>,
}

impl ArtworkRequest {
    pub fn validate(&self) -> Result<()> {
        validate_not_empty(&self.title, "Title").map_err(AppError::InvalidInput)?;
        validate_positive(self.price, "Price").map_err(AppError::InvalidInput)?;
        Ok(())
    }

    /// Editable fields, attributed to `artist_name`.
    ///
    /// A missing `status` becomes `current_status`: `Available` on create, the
    /// stored status on update.
    pub fn into_fields(
        self,
        artist_name: String,
        current_status: ArtworkStatus,
    ) -> ArtworkForUpdate {
        ArtworkForUpdate {
            title: self.title.trim().to_string(),
            artist: artist_name,
            description: self.description.unwrap_or_default(),
            price: self.price,
            image_url: non_blank(self.image_url),
            dimensions: non_blank(self.dimensions),
            medium: non_blank(self.medium),
            year: self.year,
            status: self.status.unwrap_or(current_status),
        }
    }
}

/// Exhibition create/update body. Dates are `YYYY-MM-DD`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExhibitionRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub ticket_price: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    pub total_slots: i64,
    /// Only read on create, where it defaults to `total_slots`. Updates keep
    /// the seats already booked.
    #[serde(default)]
    pub available_slots: Option<i64>,
    #[serde(default)]
    pub status: Option<ExhibitionStatus>,
}

impl ExhibitionRequest {
    pub fn validate(&self) -> Result<()> {
        validate_not_empty(&self.title, "Title").map_err(AppError::InvalidInput)?;
        validate_not_empty(&self.location, "Location").map_err(AppError::InvalidInput)?;

        let start = parse_date(&self.start_date)
            .map_err(|_| AppError::InvalidInput("start_date must be YYYY-MM-DD".to_string()))?;
        let end = parse_date(&self.end_date)
            .map_err(|_| AppError::InvalidInput("end_date must be YYYY-MM-DD".to_string()))?;
        if end < start {
            return Err(AppError::InvalidInput(
                "end_date cannot be before start_date".to_string(),
            ));
        }

        if !self.ticket_price.is_finite() || self.ticket_price < 0.0 {
            return Err(AppError::InvalidInput("Ticket price cannot be negative".to_string()));
        }

        if self.total_slots < 1 {
            return Err(AppError::InvalidInput("Total slots must be at least 1".to_string()));
        }

        if let Some(available) = self.available_slots {
            if available < 0 || available > self.total_slots {
                return Err(AppError::InvalidInput(
                    "Available slots must be between 0 and total slots".to_string(),
                ));
            }
        }

        Ok(())
    }

    pub fn into_save(self) -> ExhibitionForSave {
        ExhibitionForSave {
            title: self.title.trim().to_string(),
            description: self.description.unwrap_or_default(),
            location: self.location.trim().to_string(),
            start_date: self.start_date.trim().to_string(),
            end_date: self.end_date.trim().to_string(),
            ticket_price: self.ticket_price,
            image_url: non_blank(self.image_url),
            total_slots: self.total_slots,
            available_slots: self.available_slots.unwrap_or(self.total_slots),
            status: self.status.unwrap_or(ExhibitionStatus::Upcoming),
        }
    }
}
