//! # Contact Handlers
//!
//! Public contact form and the admin inbox.

use axum::{
    extract::{Extension, Json, Path, State},
    http::StatusCode,
};
use lib_auth::{authorize, Claims, Policy};
use lib_core::dto::{ContactRequest, ContactStatusRequest, MessageResponse};
use lib_core::model::store::models::ContactMessage;
use lib_core::model::store::ContactRepository;
use lib_core::{AppError, DbPool, Result};
use tracing::{info, instrument};

/// `POST /api/contact`
#[instrument(skip_all)]
pub async fn submit_contact(
    State(pool): State<DbPool>,
    Json(req): Json<ContactRequest>,
) -> Result<(StatusCode, Json<ContactMessage>)> {
    req.validate()?;

    let message = ContactRepository::create(&pool, req.into_create()).await?;

    info!("[CONTACT] Message received (id: {})", message.id);
    Ok((StatusCode::CREATED, Json(message)))
}

/// `GET /api/admin/contacts`
pub async fn list_contacts(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<ContactMessage>>> {
    authorize(&claims, &Policy::AdminOnly)?;
    Ok(Json(ContactRepository::list(&pool).await?))
}

/// `PUT /api/admin/contacts/{id}/status`
pub async fn set_contact_status(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    Json(req): Json<ContactStatusRequest>,
) -> Result<Json<MessageResponse>> {
    authorize(&claims, &Policy::AdminOnly)?;

    if !ContactRepository::set_status(&pool, id, req.status).await? {
        return Err(AppError::NotFound("Message not found".to_string()));
    }

    Ok(Json(MessageResponse::new(format!("Message marked as {}", req.status))))
}
