//! # Auth Handler Tests
//!
//! Test suite for registration, login and the token lifecycle on protected routes.

mod register;

use super::*;
use crate::handlers::test_utils::{send, test_app, test_config, test_state, test_state_with, token_for};
use crate::server::AppState;
use axum::http::StatusCode;
use serde_json::{json, Value};

/// Register an individual user through the API and return the response body.
pub async fn register_user(app: &axum::Router, email: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "name": "Wanjiku", "email": email, "password": password })),
    )
    .await
}

/// Insert an admin directly, the way the startup seed does.
pub async fn seed_admin(state: &AppState, email: &str, password: &str) -> i64 {
    use lib_core::model::store::models::AdminForCreate;

    PrincipalRepository::create_admin(
        &state.db,
        AdminForCreate {
            name: "Root".to_string(),
            email: email.to_string(),
            password_hash: hash_password(password).expect("Password hashing should succeed in test"),
        },
    )
    .await
    .expect("Admin creation should succeed in test")
    .id
}
