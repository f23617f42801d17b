//! # Artist Directory Handler

use axum::extract::{Extension, Json, State};
use lib_auth::{authorize, Claims, Policy};
use lib_core::model::store::models::ArtistSummary;
use lib_core::model::store::PrincipalRepository;
use lib_core::{DbPool, Result};

/// `GET /api/admin/artists` - every artist with their artwork count.
pub async fn list_artists(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<ArtistSummary>>> {
    authorize(&claims, &Policy::AdminOnly)?;
    Ok(Json(PrincipalRepository::list_artists(&pool).await?))
}
