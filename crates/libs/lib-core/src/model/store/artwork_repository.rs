//! # Artwork Repository
//!
//! Catalog access for artworks. Ownership is tracked through `artist_id`;
//! admin-created artworks have no owner.

use sqlx::query_as;

use super::models::{Artwork, ArtworkForCreate, ArtworkForUpdate, ArtworkWithOrders};
use super::DbPool;

pub struct ArtworkRepository;

impl ArtworkRepository {
    /// All artworks, newest first.
    pub async fn list(pool: &DbPool) -> Result<Vec<Artwork>, sqlx::Error> {
        query_as::<_, Artwork>("SELECT * FROM artworks ORDER BY created_at DESC, id DESC")
            .fetch_all(pool)
            .await
    }

    pub async fn find(pool: &DbPool, id: i64) -> Result<Option<Artwork>, sqlx::Error> {
        query_as::<_, Artwork>("SELECT * FROM artworks WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &DbPool, data: ArtworkForCreate) -> Result<Artwork, sqlx::Error> {
        let f = &data.fields;
        let result = sqlx::query(
            "INSERT INTO artworks \
             (title, artist, artist_id, description, price, image_url, dimensions, medium, year, status) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&f.title)
        .bind(&f.artist)
        .bind(data.artist_id)
        .bind(&f.description)
        .bind(f.price)
        .bind(&f.image_url)
        .bind(&f.dimensions)
        .bind(&f.medium)
        .bind(f.year)
        .bind(f.status.as_str())
        .execute(pool)
        .await?;

        query_as::<_, Artwork>("SELECT * FROM artworks WHERE id = ?")
            .bind(result.last_insert_rowid())
            .fetch_one(pool)
            .await
    }

    /// Replace the editable fields of an artwork.
    ///
    /// Returns `Ok(None)` if no artwork has this id.
    pub async fn update(
        pool: &DbPool,
        id: i64,
        data: ArtworkForUpdate,
    ) -> Result<Option<Artwork>, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE artworks SET title = ?, artist = ?, description = ?, price = ?, image_url = ?, \
             dimensions = ?, medium = ?, year = ?, status = ? WHERE id = ?",
        )
        .bind(&data.title)
        .bind(&data.artist)
        .bind(&data.description)
        .bind(data.price)
        .bind(&data.image_url)
        .bind(&data.dimensions)
        .bind(&data.medium)
        .bind(data.year)
        .bind(data.status.as_str())
        .bind(id)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Self::find(pool, id).await
    }

    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &DbPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM artworks WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Artworks owned by `artist_id` with their order counts.
    pub async fn list_by_artist(
        pool: &DbPool,
        artist_id: i64,
    ) -> Result<Vec<ArtworkWithOrders>, sqlx::Error> {
        query_as::<_, ArtworkWithOrders>(
            "SELECT w.*, COUNT(o.id) AS order_count \
             FROM artworks w \
             LEFT JOIN artwork_orders o ON o.artwork_id = w.id \
             WHERE w.artist_id = ? \
             GROUP BY w.id \
             ORDER BY w.created_at DESC, w.id DESC",
        )
        .bind(artist_id)
        .fetch_all(pool)
        .await
    }
}
