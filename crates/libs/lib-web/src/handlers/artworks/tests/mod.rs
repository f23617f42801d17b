//! # Artwork Handler Tests

mod ownership;
mod status;

use crate::handlers::test_utils::{send, test_app, test_state, token_for};
use axum::http::StatusCode;
use lib_auth::Role;
use serde_json::{json, Value};

/// Register an artist through the API and return `(id, token)`.
pub async fn register_artist(app: &axum::Router, name: &str, email: &str) -> (i64, String) {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/register-artist",
        None,
        Some(json!({ "name": name, "email": email, "password": "ArtistPassword123!" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let id = body["principal"]["id"].as_i64().unwrap();
    let token = body["token"].as_str().unwrap().to_string();
    (id, token)
}

pub fn artwork_body(title: &str) -> Value {
    json!({
        "title": title,
        "description": "Acrylic on canvas",
        "price": 450.0,
        "medium": "Acrylic",
        "year": 2024
    })
}
