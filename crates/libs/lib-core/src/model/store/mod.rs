//! # Database Store
//!
//! Database connection pool and repository implementations.

// region: --- Modules
pub mod artwork_repository;
pub mod contact_repository;
pub mod exhibition_repository;
pub mod models;
pub mod order_repository;
pub mod principal_repository;
// endregion: --- Modules

// region: --- Re-exports
pub use artwork_repository::ArtworkRepository;
pub use contact_repository::ContactRepository;
pub use exhibition_repository::ExhibitionRepository;
pub use order_repository::OrderRepository;
pub use principal_repository::PrincipalRepository;
// endregion: --- Re-exports

// region: --- Types and Functions
use sqlx::{sqlite::SqliteConnectOptions, SqlitePool};

/// Type alias for SQLite connection pool.
pub type DbPool = SqlitePool;

/// Create a new SQLite connection pool, creating the database file if needed.
pub async fn create_pool(database_url: &str) -> anyhow::Result<DbPool> {
    let options = database_url
        .parse::<SqliteConnectOptions>()?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePool::connect_with(options).await?;

    Ok(pool)
}

/// Apply the embedded schema migrations.
pub async fn run_migrations(pool: &DbPool) -> anyhow::Result<()> {
    sqlx::migrate!("../../../migrations").run(pool).await?;
    Ok(())
}

/// In-memory database with the schema applied, for repository tests.
#[cfg(test)]
pub(crate) async fn test_pool() -> DbPool {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    run_migrations(&pool).await.expect("Failed to run migrations");
    pool
}
// endregion: --- Types and Functions
