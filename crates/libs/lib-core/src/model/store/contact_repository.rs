//! # Contact Repository
//!
//! Messages submitted through the public contact form.

use sqlx::query_as;

use super::models::{ContactForCreate, ContactMessage, ContactStatus};
use super::DbPool;

pub struct ContactRepository;

impl ContactRepository {
    pub async fn create(pool: &DbPool, data: ContactForCreate) -> Result<ContactMessage, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO contact_messages (name, email, phone, message, status) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.message)
        .bind(ContactStatus::New.as_str())
        .execute(pool)
        .await?;

        query_as::<_, ContactMessage>("SELECT * FROM contact_messages WHERE id = ?")
            .bind(result.last_insert_rowid())
            .fetch_one(pool)
            .await
    }

    /// All messages, newest first.
    pub async fn list(pool: &DbPool) -> Result<Vec<ContactMessage>, sqlx::Error> {
        query_as::<_, ContactMessage>("SELECT * FROM contact_messages ORDER BY created_at DESC, id DESC")
            .fetch_all(pool)
            .await
    }

    /// Returns `false` if no message has this id.
    pub async fn set_status(
        pool: &DbPool,
        id: i64,
        status: ContactStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE contact_messages SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
