//! # Order DTOs
//!
//! `POST /api/orders` takes an [`OrderRequest`] and creates either an artwork
//! order or an exhibition booking depending on `order_type`.

use lib_utils::validate_positive;
use serde::{Deserialize, Serialize};

use super::non_blank;
use crate::error::{AppError, Result};
use crate::model::store::models::{ArtworkOrder, ExhibitionBooking, PaymentStatus};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    Artwork,
    Exhibition,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    pub order_type: OrderType,
    /// Artwork id or exhibition id
    pub reference_id: i64,
    pub amount: f64,
    #[serde(default)]
    pub delivery_address: Option<String>,
    /// Exhibition seats, defaults to 1
    #[serde(default)]
    pub slots: Option<i64>,
}

impl OrderRequest {
    pub fn validate(&self) -> Result<()> {
        validate_positive(self.amount, "Amount").map_err(AppError::InvalidInput)?;

        if self.slots.is_some_and(|s| s < 1) {
            return Err(AppError::InvalidInput("Slots must be at least 1".to_string()));
        }

        Ok(())
    }

    pub fn slots(&self) -> i64 {
        self.slots.unwrap_or(1)
    }

    pub fn delivery_address(&self) -> Option<String> {
        non_blank(self.delivery_address.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub message: String,
    pub order_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_code: Option<String>,
}

/// The caller's artwork orders and exhibition bookings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MyOrdersResponse {
    pub orders: Vec<ArtworkOrder>,
    pub bookings: Vec<ExhibitionBooking>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentStatusRequest {
    pub payment_status: PaymentStatus,
}
