//! Shared fixtures for handler tests: in-memory database, state, router and
//! a small request helper.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use lib_auth::Role;
use lib_core::{run_migrations, Config, DbPool, EmailUniqueness};
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use crate::server::{create_router, AppState};

pub const TEST_SECRET: &str = "test-secret-key-must-be-at-least-32-characters-long!";

/// Setup test database with schema
pub async fn setup_test_db() -> DbPool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    run_migrations(&pool).await.expect("Failed to run migrations");

    pool
}

/// Create test config
pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: TEST_SECRET.to_string(),
        jwt_expiration_hours: 24,
        email_uniqueness: EmailUniqueness::Global,
        admin_seed: None,
    }
}

pub async fn test_state_with(config: Config) -> AppState {
    let pool = setup_test_db().await;
    AppState::new(pool, config).expect("valid test config")
}

pub async fn test_state() -> AppState {
    test_state_with(test_config()).await
}

/// The full application router, as served.
pub fn test_app(state: AppState) -> Router {
    create_router(state, &[])
}

/// Token for a principal that does not need to exist in the database.
pub fn token_for(state: &AppState, id: i64, name: &str, role: Role) -> String {
    state
        .issuer
        .issue(id, name, role)
        .expect("Token issuing should succeed in test")
}

/// Send one request through `app` and return status and JSON body.
///
/// Non-JSON bodies come back as `Value::String`, empty bodies as `Value::Null`.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    (status, value)
}
