//! # Order Repository
//!
//! Artwork orders and exhibition bookings. Both start with payment status
//! `pending`; payment status changes are made by admins.

use lib_auth::Role;
use rand::Rng;
use sqlx::query_as;

use super::models::{
    ArtworkOrder, ArtworkOrderForCreate, BookingForCreate, ExhibitionBooking, PaymentStatus,
};
use super::DbPool;

const TICKET_PREFIX: &str = "TKT";
const TICKET_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const TICKET_LEN: usize = 8;

const ORDER_SELECT: &str = "SELECT o.*, w.title AS artwork_title \
                            FROM artwork_orders o \
                            LEFT JOIN artworks w ON w.id = o.artwork_id";

const BOOKING_SELECT: &str = "SELECT b.*, e.title AS exhibition_title \
                              FROM exhibition_bookings b \
                              LEFT JOIN exhibitions e ON e.id = b.exhibition_id";

/// Random ticket code of the form `TKT-XXXXXXXX` (upper-case alphanumerics).
pub fn generate_ticket_code() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..TICKET_LEN)
        .map(|_| TICKET_CHARSET[rng.gen_range(0..TICKET_CHARSET.len())] as char)
        .collect();

    format!("{}-{}", TICKET_PREFIX, suffix)
}

pub struct OrderRepository;

impl OrderRepository {
    // region: --- Artwork orders

    pub async fn create_order(
        pool: &DbPool,
        data: ArtworkOrderForCreate,
    ) -> Result<ArtworkOrder, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO artwork_orders \
             (buyer_id, buyer_role, buyer_name, artwork_id, total_amount, delivery_address, payment_status) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(data.buyer.id)
        .bind(data.buyer.role.as_str())
        .bind(&data.buyer.name)
        .bind(data.artwork_id)
        .bind(data.total_amount)
        .bind(&data.delivery_address)
        .bind(PaymentStatus::Pending.as_str())
        .execute(pool)
        .await?;

        query_as::<_, ArtworkOrder>(&format!("{} WHERE o.id = ?", ORDER_SELECT))
            .bind(result.last_insert_rowid())
            .fetch_one(pool)
            .await
    }

    pub async fn orders_for_buyer(
        pool: &DbPool,
        buyer_id: i64,
        role: Role,
    ) -> Result<Vec<ArtworkOrder>, sqlx::Error> {
        query_as::<_, ArtworkOrder>(&format!(
            "{} WHERE o.buyer_id = ? AND o.buyer_role = ? ORDER BY o.order_date DESC, o.id DESC",
            ORDER_SELECT
        ))
        .bind(buyer_id)
        .bind(role.as_str())
        .fetch_all(pool)
        .await
    }

    /// Orders placed on artworks owned by `artist_id`.
    pub async fn orders_for_artist(
        pool: &DbPool,
        artist_id: i64,
    ) -> Result<Vec<ArtworkOrder>, sqlx::Error> {
        query_as::<_, ArtworkOrder>(&format!(
            "{} WHERE w.artist_id = ? ORDER BY o.order_date DESC, o.id DESC",
            ORDER_SELECT
        ))
        .bind(artist_id)
        .fetch_all(pool)
        .await
    }

    pub async fn all_orders(pool: &DbPool) -> Result<Vec<ArtworkOrder>, sqlx::Error> {
        query_as::<_, ArtworkOrder>(&format!(
            "{} ORDER BY o.order_date DESC, o.id DESC",
            ORDER_SELECT
        ))
        .fetch_all(pool)
        .await
    }

    /// Returns `false` if no order has this id.
    pub async fn set_order_payment(
        pool: &DbPool,
        id: i64,
        status: PaymentStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE artwork_orders SET payment_status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // endregion: --- Artwork orders

    // region: --- Exhibition bookings

    /// Book `slots` seats, decrementing the exhibition's available slots.
    ///
    /// Returns `Ok(None)` when the exhibition does not have enough slots left
    /// (or does not exist). Both writes happen in one transaction.
    pub async fn create_booking(
        pool: &DbPool,
        data: BookingForCreate,
    ) -> Result<Option<ExhibitionBooking>, sqlx::Error> {
        let ticket_code = generate_ticket_code();
        let mut tx = pool.begin().await?;

        let reserved = sqlx::query(
            "UPDATE exhibitions SET available_slots = available_slots - ? \
             WHERE id = ? AND available_slots >= ?",
        )
        .bind(data.slots)
        .bind(data.exhibition_id)
        .bind(data.slots)
        .execute(&mut *tx)
        .await?;

        if reserved.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let result = sqlx::query(
            "INSERT INTO exhibition_bookings \
             (buyer_id, buyer_role, buyer_name, exhibition_id, ticket_code, slots, total_amount, payment_status) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(data.buyer.id)
        .bind(data.buyer.role.as_str())
        .bind(&data.buyer.name)
        .bind(data.exhibition_id)
        .bind(&ticket_code)
        .bind(data.slots)
        .bind(data.total_amount)
        .bind(PaymentStatus::Pending.as_str())
        .execute(&mut *tx)
        .await?;

        let booking =
            query_as::<_, ExhibitionBooking>(&format!("{} WHERE b.id = ?", BOOKING_SELECT))
                .bind(result.last_insert_rowid())
                .fetch_one(&mut *tx)
                .await?;

        tx.commit().await?;

        Ok(Some(booking))
    }

    pub async fn bookings_for_buyer(
        pool: &DbPool,
        buyer_id: i64,
        role: Role,
    ) -> Result<Vec<ExhibitionBooking>, sqlx::Error> {
        query_as::<_, ExhibitionBooking>(&format!(
            "{} WHERE b.buyer_id = ? AND b.buyer_role = ? ORDER BY b.booking_date DESC, b.id DESC",
            BOOKING_SELECT
        ))
        .bind(buyer_id)
        .bind(role.as_str())
        .fetch_all(pool)
        .await
    }

    pub async fn all_bookings(pool: &DbPool) -> Result<Vec<ExhibitionBooking>, sqlx::Error> {
        query_as::<_, ExhibitionBooking>(&format!(
            "{} ORDER BY b.booking_date DESC, b.id DESC",
            BOOKING_SELECT
        ))
        .fetch_all(pool)
        .await
    }

    pub async fn set_booking_payment(
        pool: &DbPool,
        id: i64,
        status: PaymentStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE exhibition_bookings SET payment_status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // endregion: --- Exhibition bookings
}
