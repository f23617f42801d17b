//! # Exhibition Repository

use sqlx::query_as;

use super::models::{Exhibition, ExhibitionForSave};
use super::DbPool;

pub struct ExhibitionRepository;

impl ExhibitionRepository {
    /// All exhibitions ordered by start date.
    pub async fn list(pool: &DbPool) -> Result<Vec<Exhibition>, sqlx::Error> {
        query_as::<_, Exhibition>("SELECT * FROM exhibitions ORDER BY start_date ASC, id ASC")
            .fetch_all(pool)
            .await
    }

    pub async fn find(pool: &DbPool, id: i64) -> Result<Option<Exhibition>, sqlx::Error> {
        query_as::<_, Exhibition>("SELECT * FROM exhibitions WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &DbPool, data: ExhibitionForSave) -> Result<Exhibition, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO exhibitions \
             (title, description, location, start_date, end_date, ticket_price, image_url, \
              total_slots, available_slots, status) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.location)
        .bind(&data.start_date)
        .bind(&data.end_date)
        .bind(data.ticket_price)
        .bind(&data.image_url)
        .bind(data.total_slots)
        .bind(data.available_slots)
        .bind(data.status.as_str())
        .execute(pool)
        .await?;

        query_as::<_, Exhibition>("SELECT * FROM exhibitions WHERE id = ?")
            .bind(result.last_insert_rowid())
            .fetch_one(pool)
            .await
    }

    /// Replace the editable fields of an exhibition.
    ///
    /// Seats already booked stay booked: available slots become the new total
    /// minus the booked count, and `data.available_slots` is ignored. Returns
    /// `Ok(None)` if the exhibition does not exist or the new total is below
    /// the booked count.
    pub async fn update(
        pool: &DbPool,
        id: i64,
        data: ExhibitionForSave,
    ) -> Result<Option<Exhibition>, sqlx::Error> {
        // SQLite evaluates the SET expressions against the old row
        let result = sqlx::query(
            "UPDATE exhibitions SET title = ?, description = ?, location = ?, start_date = ?, \
             end_date = ?, ticket_price = ?, image_url = ?, \
             available_slots = ? - (total_slots - available_slots), total_slots = ?, \
             status = ? WHERE id = ? AND total_slots - available_slots <= ?",
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.location)
        .bind(&data.start_date)
        .bind(&data.end_date)
        .bind(data.ticket_price)
        .bind(&data.image_url)
        .bind(data.total_slots)
        .bind(data.total_slots)
        .bind(data.status.as_str())
        .bind(id)
        .bind(data.total_slots)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Self::find(pool, id).await
    }

    pub async fn delete(pool: &DbPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM exhibitions WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::store::models::ExhibitionStatus;
    use crate::model::store::test_pool;

    fn exhibition(title: &str, start: &str) -> ExhibitionForSave {
        ExhibitionForSave {
            title: title.to_string(),
            description: "Contemporary works".to_string(),
            location: "Nairobi".to_string(),
            start_date: start.to_string(),
            end_date: "2026-12-31".to_string(),
            ticket_price: 15.0,
            image_url: None,
            total_slots: 50,
            available_slots: 50,
            status: ExhibitionStatus::Upcoming,
        }
    }

    #[tokio::test]
    async fn test_list_orders_by_start_date() {
        let pool = test_pool().await;
        ExhibitionRepository::create(&pool, exhibition("Later", "2026-11-01"))
            .await
            .unwrap();
        ExhibitionRepository::create(&pool, exhibition("Sooner", "2026-10-01"))
            .await
            .unwrap();

        let titles: Vec<String> = ExhibitionRepository::list(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["Sooner", "Later"]);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let pool = test_pool().await;
        let created = ExhibitionRepository::create(&pool, exhibition("Light", "2026-10-01"))
            .await
            .unwrap();

        let mut changed = exhibition("Light", "2026-10-01");
        changed.status = ExhibitionStatus::Ongoing;
        changed.total_slots = 60;
        let updated = ExhibitionRepository::update(&pool, created.id, changed)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, ExhibitionStatus::Ongoing);
        assert_eq!(updated.total_slots, 60);
        assert_eq!(updated.available_slots, 60);

        assert!(ExhibitionRepository::delete(&pool, created.id).await.unwrap());
        assert!(ExhibitionRepository::update(&pool, created.id, exhibition("x", "2026-10-01"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_update_keeps_booked_seats() {
        let pool = test_pool().await;
        let created = ExhibitionRepository::create(&pool, exhibition("Light", "2026-10-01"))
            .await
            .unwrap();
        // 30 of 50 seats taken
        sqlx::query("UPDATE exhibitions SET available_slots = 20 WHERE id = ?")
            .bind(created.id)
            .execute(&pool)
            .await
            .unwrap();

        let mut changed = exhibition("Light", "2026-10-01");
        changed.description = "Now with audio guides".to_string();
        let updated = ExhibitionRepository::update(&pool, created.id, changed)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.available_slots, 20);

        let mut shrunk = exhibition("Light", "2026-10-01");
        shrunk.total_slots = 40;
        let updated = ExhibitionRepository::update(&pool, created.id, shrunk)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.available_slots, 10);

        let mut too_small = exhibition("Light", "2026-10-01");
        too_small.total_slots = 29;
        assert!(ExhibitionRepository::update(&pool, created.id, too_small)
            .await
            .unwrap()
            .is_none());
        let unchanged = ExhibitionRepository::find(&pool, created.id).await.unwrap().unwrap();
        assert_eq!(unchanged.total_slots, 40);
        assert_eq!(unchanged.available_slots, 10);
    }
}
