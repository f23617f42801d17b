//! # Artwork Handlers
//!
//! - `GET /api/artworks`, `GET /api/artworks/{id}` - public
//! - `POST /api/artworks` - artist or admin
//! - `PUT|DELETE /api/artworks/{id}` - the owning artist or an admin
//! - `GET /api/artist/artworks` - an artist's own artworks with order counts
//!
//! Artists always publish under their own name and id, taken from the token.
//! Admin-created artworks have no owner and only admins can modify them.

use axum::{
    extract::{Extension, Json, Path, Query, State},
    http::StatusCode,
};
use lib_auth::{authorize, Claims, Policy, Role};
use lib_core::dto::{non_blank, ArtworkRequest, MessageResponse};
use lib_core::model::store::models::{
    Artwork, ArtworkForCreate, ArtworkStatus, ArtworkWithOrders,
};
use lib_core::model::store::ArtworkRepository;
use lib_core::{AppError, DbPool, Result};
use tracing::{info, instrument};

use super::ArtistScope;

async fn find_or_404(pool: &DbPool, id: i64) -> Result<Artwork> {
    ArtworkRepository::find(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Artwork not found".to_string()))
}

/// Display name to store on the artwork.
///
/// Artists use their own name; admins must supply one (or keep `fallback` on update).
fn attributed_artist(claims: &Claims, requested: Option<String>, fallback: Option<&str>) -> Result<String> {
    if claims.role == Role::Artist {
        return Ok(claims.name.clone());
    }

    non_blank(requested)
        .or_else(|| fallback.map(str::to_string))
        .ok_or_else(|| AppError::InvalidInput("Artist name is required".to_string()))
}

pub async fn list_artworks(State(pool): State<DbPool>) -> Result<Json<Vec<Artwork>>> {
    Ok(Json(ArtworkRepository::list(&pool).await?))
}

pub async fn get_artwork(State(pool): State<DbPool>, Path(id): Path<i64>) -> Result<Json<Artwork>> {
    Ok(Json(find_or_404(&pool, id).await?))
}

#[instrument(skip_all, fields(caller = %claims.sub, role = %claims.role))]
pub async fn create_artwork(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<ArtworkRequest>,
) -> Result<(StatusCode, Json<Artwork>)> {
    authorize(&claims, &Policy::ArtistOrAdmin)?;
    req.validate()?;

    let artist_id = match claims.role {
        Role::Artist => Some(claims.principal_id()?),
        _ => None,
    };
    let artist = attributed_artist(&claims, req.artist.clone(), None)?;

    let artwork = ArtworkRepository::create(
        &pool,
        ArtworkForCreate {
            fields: req.into_fields(artist, ArtworkStatus::Available),
            artist_id,
        },
    )
    .await?;

    info!("[ARTWORK] Created {} (id: {})", artwork.title, artwork.id);
    Ok((StatusCode::CREATED, Json(artwork)))
}

#[instrument(skip_all, fields(caller = %claims.sub, artwork_id = id))]
pub async fn update_artwork(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    Json(req): Json<ArtworkRequest>,
) -> Result<Json<Artwork>> {
    let existing = find_or_404(&pool, id).await?;
    authorize(&claims, &Policy::owned_by(existing.artist_id))?;
    req.validate()?;

    let artist = attributed_artist(&claims, req.artist.clone(), Some(&existing.artist))?;

    let fields = req.into_fields(artist, existing.status);
    let updated = ArtworkRepository::update(&pool, id, fields)
        .await?
        .ok_or_else(|| AppError::NotFound("Artwork not found".to_string()))?;

    info!("[ARTWORK] Updated id {}", id);
    Ok(Json(updated))
}

#[instrument(skip_all, fields(caller = %claims.sub, artwork_id = id))]
pub async fn delete_artwork(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>> {
    let existing = find_or_404(&pool, id).await?;
    authorize(&claims, &Policy::owned_by(existing.artist_id))?;

    if !ArtworkRepository::delete(&pool, id).await? {
        return Err(AppError::NotFound("Artwork not found".to_string()));
    }

    info!("[ARTWORK] Deleted id {}", id);
    Ok(Json(MessageResponse::new("Artwork deleted")))
}

/// `GET /api/artist/artworks[?artist_id=]`
pub async fn my_artworks(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
    Query(scope): Query<ArtistScope>,
) -> Result<Json<Vec<ArtworkWithOrders>>> {
    authorize(&claims, &Policy::ArtistOrAdmin)?;
    let artist_id = scope.resolve(&claims)?;

    Ok(Json(ArtworkRepository::list_by_artist(&pool, artist_id).await?))
}

#[cfg(test)]
mod tests;
