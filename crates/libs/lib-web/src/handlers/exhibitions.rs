//! # Exhibition Handlers
//!
//! Public listing; create, update and delete are admin-only.

use axum::{
    extract::{Extension, Json, Path, State},
    http::StatusCode,
};
use lib_auth::{authorize, Claims, Policy};
use lib_core::dto::{ExhibitionRequest, MessageResponse};
use lib_core::model::store::models::Exhibition;
use lib_core::model::store::ExhibitionRepository;
use lib_core::{AppError, DbPool, Result};
use tracing::{info, instrument};

fn not_found() -> AppError {
    AppError::NotFound("Exhibition not found".to_string())
}

pub async fn list_exhibitions(State(pool): State<DbPool>) -> Result<Json<Vec<Exhibition>>> {
    Ok(Json(ExhibitionRepository::list(&pool).await?))
}

pub async fn get_exhibition(
    State(pool): State<DbPool>,
    Path(id): Path<i64>,
) -> Result<Json<Exhibition>> {
    ExhibitionRepository::find(&pool, id)
        .await?
        .map(Json)
        .ok_or_else(not_found)
}

#[instrument(skip_all, fields(caller = %claims.sub))]
pub async fn create_exhibition(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<ExhibitionRequest>,
) -> Result<(StatusCode, Json<Exhibition>)> {
    authorize(&claims, &Policy::AdminOnly)?;
    req.validate()?;

    let exhibition = ExhibitionRepository::create(&pool, req.into_save()).await?;

    info!("[EXHIBITION] Created {} (id: {})", exhibition.title, exhibition.id);
    Ok((StatusCode::CREATED, Json(exhibition)))
}

#[instrument(skip_all, fields(caller = %claims.sub, exhibition_id = id))]
pub async fn update_exhibition(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    Json(req): Json<ExhibitionRequest>,
) -> Result<Json<Exhibition>> {
    authorize(&claims, &Policy::AdminOnly)?;
    req.validate()?;

    let existing = ExhibitionRepository::find(&pool, id)
        .await?
        .ok_or_else(not_found)?;
    let booked = existing.total_slots - existing.available_slots;
    let below_booked = || {
        AppError::InvalidInput(format!(
            "Total slots cannot be below the {} seats already booked",
            booked
        ))
    };
    if req.total_slots < booked {
        return Err(below_booked());
    }

    // A booking can land between the check and the update
    let exhibition = ExhibitionRepository::update(&pool, id, req.into_save())
        .await?
        .ok_or_else(below_booked)?;

    info!("[EXHIBITION] Updated id {}", id);
    Ok(Json(exhibition))
}

#[instrument(skip_all, fields(caller = %claims.sub, exhibition_id = id))]
pub async fn delete_exhibition(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>> {
    authorize(&claims, &Policy::AdminOnly)?;

    if !ExhibitionRepository::delete(&pool, id).await? {
        return Err(not_found());
    }

    info!("[EXHIBITION] Deleted id {}", id);
    Ok(Json(MessageResponse::new("Exhibition deleted")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_utils::{send, test_app, test_state, token_for};
    use lib_auth::Role;
    use serde_json::json;

    fn body() -> serde_json::Value {
        json!({
            "title": "Light & Form",
            "location": "Nairobi National Museum",
            "start_date": "2026-11-01",
            "end_date": "2026-11-30",
            "ticket_price": 12.5,
            "total_slots": 80
        })
    }

    #[tokio::test]
    async fn test_admin_manages_exhibitions() {
        let state = test_state().await;
        let admin = token_for(&state, 1, "Root", Role::Admin);
        let app = test_app(state);

        let (status, created) = send(&app, "POST", "/api/exhibitions", Some(&admin), Some(body())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["available_slots"], 80);
        assert_eq!(created["status"], "upcoming");

        let uri = format!("/api/exhibitions/{}", created["id"]);
        let mut changed = body();
        changed["status"] = json!("ongoing");
        let (status, updated) = send(&app, "PUT", &uri, Some(&admin), Some(changed)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["status"], "ongoing");

        let (status, listed) = send(&app, "GET", "/api/exhibitions", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed.as_array().unwrap().len(), 1);

        let (status, _) = send(&app, "DELETE", &uri, Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, "GET", &uri, None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_edit_keeps_booked_seats() {
        let state = test_state().await;
        let admin = token_for(&state, 1, "Root", Role::Admin);
        let user = token_for(&state, 7, "Wanjiku", Role::IndividualUser);
        let app = test_app(state);

        let mut small = body();
        small["total_slots"] = json!(3);
        let (_, created) = send(&app, "POST", "/api/exhibitions", Some(&admin), Some(small.clone())).await;
        let uri = format!("/api/exhibitions/{}", created["id"]);
        let booking = json!({ "order_type": "exhibition", "reference_id": created["id"], "amount": 30.0, "slots": 3 });

        let (status, _) = send(&app, "POST", "/api/orders", Some(&user), Some(booking.clone())).await;
        assert_eq!(status, StatusCode::CREATED);

        // Description-only edit
        small["description"] = json!("Now with audio guides");
        let (status, updated) = send(&app, "PUT", &uri, Some(&admin), Some(small.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["available_slots"], 0);
        assert_eq!(updated["total_slots"], 3);

        let (status, _) = send(&app, "POST", "/api/orders", Some(&user), Some(booking)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        small["total_slots"] = json!(2);
        let (status, body) = send(&app, "PUT", &uri, Some(&admin), Some(small.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Total slots cannot be below the 3 seats already booked");

        small["total_slots"] = json!(5);
        let (status, updated) = send(&app, "PUT", &uri, Some(&admin), Some(small)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["available_slots"], 2);
    }

    #[tokio::test]
    async fn test_artists_cannot_manage_exhibitions() {
        let state = test_state().await;
        let artist = token_for(&state, 2, "Imani", Role::Artist);
        let app = test_app(state);

        let (status, body) = send(&app, "POST", "/api/exhibitions", Some(&artist), Some(body())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Admin privileges required");
    }

    #[tokio::test]
    async fn test_invalid_dates_are_rejected() {
        let state = test_state().await;
        let admin = token_for(&state, 1, "Root", Role::Admin);
        let app = test_app(state);

        let mut payload = body();
        payload["end_date"] = json!("2026-10-01");
        let (status, body) = send(&app, "POST", "/api/exhibitions", Some(&admin), Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "end_date cannot be before start_date");
    }
}
