use chrono::{DateTime, Utc};
use lib_auth::Role;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// region: --- Status enums

/// Declares a lowercase string-backed status enum stored as TEXT.
///
/// Unknown database values fall back to `$fallback`.
macro_rules! text_status {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? } fallback $fallback:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($text => Ok($name::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($name), s)),
                }
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                use std::str::FromStr;
                $name::from_str(&s).unwrap_or($name::$fallback)
            }
        }
    };
}

text_status!(
    /// Sale state of an artwork.
    ArtworkStatus { Available => "available", Sold => "sold" } fallback Available
);

text_status!(
    ExhibitionStatus { Upcoming => "upcoming", Ongoing => "ongoing", Past => "past" } fallback Upcoming
);

text_status!(
    /// Payment state of an order or booking. Set by admins; no gateway integration.
    PaymentStatus { Pending => "pending", Completed => "completed", Failed => "failed" } fallback Pending
);

text_status!(
    ContactStatus { New => "new", Read => "read", Replied => "replied" } fallback New
);

// endregion: --- Status enums

// region: --- Principals

/// Fields common to every principal table, used for login.
#[derive(Debug, Clone, FromRow)]
pub struct CredentialRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct CorporateUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub company_name: String,
    pub business_type: String,
    pub tax_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub profile_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct Admin {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Artist directory row for the admin view.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ArtistSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub profile_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub artwork_count: i64,
}

/// Data for creating an individual user. Password must already be hashed.
#[derive(Debug, Clone)]
pub struct UserForCreate {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CorporateUserForCreate {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub company_name: String,
    pub business_type: String,
    pub tax_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ArtistForCreate {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AdminForCreate {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

// endregion: --- Principals

// region: --- Catalog

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Artwork {
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub artist_id: Option<i64>,
    pub description: String,
    pub price: f64,
    pub image_url: Option<String>,
    pub dimensions: Option<String>,
    pub medium: Option<String>,
    pub year: Option<i32>,
    #[sqlx(try_from = "String")]
    pub status: ArtworkStatus,
    pub created_at: DateTime<Utc>,
}

/// An artist's artwork together with how many orders it has received.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ArtworkWithOrders {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub artwork: Artwork,
    pub order_count: i64,
}

/// Editable artwork fields. Ownership (`artist_id`) is set on create only.
#[derive(Debug, Clone)]
pub struct ArtworkForUpdate {
    pub title: String,
    pub artist: String,
    pub description: String,
    pub price: f64,
    pub image_url: Option<String>,
    pub dimensions: Option<String>,
    pub medium: Option<String>,
    pub year: Option<i32>,
    pub status: ArtworkStatus,
}

#[derive(Debug, Clone)]
pub struct ArtworkForCreate {
    pub fields: ArtworkForUpdate,
    pub artist_id: Option<i64>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Exhibition {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub ticket_price: f64,
    pub image_url: Option<String>,
    pub total_slots: i64,
    pub available_slots: i64,
    #[sqlx(try_from = "String")]
    pub status: ExhibitionStatus,
    pub created_at: DateTime<Utc>,
}

/// Exhibition fields for create and full update.
#[derive(Debug, Clone)]
pub struct ExhibitionForSave {
    pub title: String,
    pub description: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub ticket_price: f64,
    pub image_url: Option<String>,
    pub total_slots: i64,
    pub available_slots: i64,
    pub status: ExhibitionStatus,
}

// endregion: --- Catalog

// region: --- Orders

/// Who placed an order, taken from verified claims.
#[derive(Debug, Clone)]
pub struct Buyer {
    pub id: i64,
    pub role: Role,
    pub name: String,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ArtworkOrder {
    pub id: i64,
    pub buyer_id: i64,
    pub buyer_role: String,
    pub buyer_name: String,
    pub artwork_id: i64,
    pub artwork_title: Option<String>,
    pub total_amount: f64,
    pub delivery_address: Option<String>,
    #[sqlx(try_from = "String")]
    pub payment_status: PaymentStatus,
    pub order_date: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ExhibitionBooking {
    pub id: i64,
    pub buyer_id: i64,
    pub buyer_role: String,
    pub buyer_name: String,
    pub exhibition_id: i64,
    pub exhibition_title: Option<String>,
    pub ticket_code: String,
    pub slots: i64,
    pub total_amount: f64,
    #[sqlx(try_from = "String")]
    pub payment_status: PaymentStatus,
    pub status: String,
    pub booking_date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ArtworkOrderForCreate {
    pub buyer: Buyer,
    pub artwork_id: i64,
    pub total_amount: f64,
    pub delivery_address: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BookingForCreate {
    pub buyer: Buyer,
    pub exhibition_id: i64,
    pub slots: i64,
    pub total_amount: f64,
}

// endregion: --- Orders

// region: --- Contact

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    #[sqlx(try_from = "String")]
    pub status: ContactStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ContactForCreate {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

// endregion: --- Contact
