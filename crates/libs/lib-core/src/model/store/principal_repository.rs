//! # Principal Repository
//!
//! Credential lookup and insertion for the four principal tables
//! (`users`, `corporate_users`, `artists`, `admins`).
//!
//! ## Example
//!
//! ```rust,no_run
//! # use lib_auth::Role;
//! # use lib_core::model::store::{create_pool, PrincipalRepository};
//! # async fn example() -> anyhow::Result<()> {
//! let pool = create_pool("sqlite::memory:").await?;
//!
//! let found = PrincipalRepository::find_credential(&pool, Role::Artist, "imani@example.com").await?;
//! assert!(found.is_none());
//! # Ok(())
//! # }
//! ```

use lib_auth::Role;
use sqlx::query_as;

use super::models::{
    Admin, AdminForCreate, Artist, ArtistForCreate, ArtistSummary, CorporateUser,
    CorporateUserForCreate, CredentialRecord, User, UserForCreate,
};
use super::DbPool;
use crate::config::EmailUniqueness;

/// Table holding principals of `role`.
fn table_for(role: Role) -> &'static str {
    match role {
        Role::IndividualUser => "users",
        Role::Corporate => "corporate_users",
        Role::Artist => "artists",
        Role::Admin => "admins",
    }
}

/// Principal repository for database operations.
pub struct PrincipalRepository;

impl PrincipalRepository {
    /// Find the login credential of a principal of `role` by email.
    pub async fn find_credential(
        pool: &DbPool,
        role: Role,
        email: &str,
    ) -> Result<Option<CredentialRecord>, sqlx::Error> {
        let sql = format!(
            "SELECT id, name, email, password_hash FROM {} WHERE email = ?",
            table_for(role)
        );

        query_as::<_, CredentialRecord>(&sql)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Whether `email` is already registered for `role` under the given uniqueness scope.
    ///
    /// With [`EmailUniqueness::Global`] every principal table is checked; with
    /// [`EmailUniqueness::PerKind`] only the table of `role`.
    pub async fn email_taken(
        pool: &DbPool,
        email: &str,
        role: Role,
        scope: EmailUniqueness,
    ) -> Result<bool, sqlx::Error> {
        let roles: &[Role] = match scope {
            EmailUniqueness::Global => &Role::ALL,
            EmailUniqueness::PerKind => std::slice::from_ref(&role),
        };

        for kind in roles {
            if Self::find_credential(pool, *kind, email).await?.is_some() {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Create an individual user.
    pub async fn create_user(pool: &DbPool, data: UserForCreate) -> Result<User, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO users (name, email, password_hash, phone) VALUES (?, ?, ?, ?)",
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(&data.phone)
        .execute(pool)
        .await?;

        query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(result.last_insert_rowid())
            .fetch_one(pool)
            .await
    }

    /// Create a corporate account.
    pub async fn create_corporate_user(
        pool: &DbPool,
        data: CorporateUserForCreate,
    ) -> Result<CorporateUser, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO corporate_users \
             (name, email, password_hash, phone, company_name, business_type, tax_id) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(&data.phone)
        .bind(&data.company_name)
        .bind(&data.business_type)
        .bind(&data.tax_id)
        .execute(pool)
        .await?;

        query_as::<_, CorporateUser>("SELECT * FROM corporate_users WHERE id = ?")
            .bind(result.last_insert_rowid())
            .fetch_one(pool)
            .await
    }

    /// Create an artist account.
    pub async fn create_artist(pool: &DbPool, data: ArtistForCreate) -> Result<Artist, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO artists (name, email, password_hash, phone, bio) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(&data.phone)
        .bind(&data.bio)
        .execute(pool)
        .await?;

        query_as::<_, Artist>("SELECT * FROM artists WHERE id = ?")
            .bind(result.last_insert_rowid())
            .fetch_one(pool)
            .await
    }

    /// Create an admin account.
    pub async fn create_admin(pool: &DbPool, data: AdminForCreate) -> Result<Admin, sqlx::Error> {
        let result =
            sqlx::query("INSERT INTO admins (name, email, password_hash) VALUES (?, ?, ?)")
                .bind(&data.name)
                .bind(&data.email)
                .bind(&data.password_hash)
                .execute(pool)
                .await?;

        query_as::<_, Admin>("SELECT * FROM admins WHERE id = ?")
            .bind(result.last_insert_rowid())
            .fetch_one(pool)
            .await
    }

    pub async fn count_admins(pool: &DbPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM admins")
            .fetch_one(pool)
            .await
    }

    /// All artists with the number of artworks they own, newest first.
    pub async fn list_artists(pool: &DbPool) -> Result<Vec<ArtistSummary>, sqlx::Error> {
        query_as::<_, ArtistSummary>(
            "SELECT a.id, a.name, a.email, a.phone, a.bio, a.profile_image_url, a.created_at, \
                    COUNT(w.id) AS artwork_count \
             FROM artists a \
             LEFT JOIN artworks w ON w.artist_id = a.id \
             GROUP BY a.id \
             ORDER BY a.created_at DESC, a.id DESC",
        )
        .fetch_all(pool)
        .await
    }
}
