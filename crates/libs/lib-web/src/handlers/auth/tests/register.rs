//! # Registration Tests

use super::*;

#[tokio::test]
async fn test_register_user_success() {
    // Arrange
    let app = test_app(test_state().await);

    // Act
    let (status, body) = register_user(&app, "Wanjiku@Example.com ", "TestPassword123!").await;

    // Assert
    assert_eq!(status, StatusCode::CREATED);
    let auth: AuthResponse = serde_json::from_value(body).unwrap();
    assert_eq!(auth.principal.email, "wanjiku@example.com");
    assert_eq!(auth.principal.role, Role::IndividualUser);
    assert_eq!(auth.message, "Registration successful");
    assert!(!auth.token.is_empty());
}

#[tokio::test]
async fn test_register_token_carries_role_flags() {
    let state = test_state().await;
    let verifier = state.verifier.clone();
    let app = test_app(state);

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/register-artist",
        None,
        Some(json!({
            "name": "Imani",
            "email": "imani@example.com",
            "password": "TestPassword123!",
            "bio": "Oil and charcoal"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let auth: AuthResponse = serde_json::from_value(body).unwrap();
    let claims = verifier.verify(&auth.token).expect("issued token verifies");
    assert_eq!(claims.role, Role::Artist);
    assert_eq!(claims.sub, auth.principal.id.to_string());
    assert!(claims.grants().artist);
    assert!(!claims.grants().admin);
}

#[tokio::test]
async fn test_register_corporate_requires_company() {
    let app = test_app(test_state().await);

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/register-corporate",
        None,
        Some(json!({
            "name": "Achieng",
            "email": "achieng@acme.co.ke",
            "password": "TestPassword123!",
            "company_name": "",
            "business_type": "Hospitality"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "InvalidInput");
    assert_eq!(body["error"], "Company name cannot be empty");
}

#[tokio::test]
async fn test_register_validation_errors() {
    let app = test_app(test_state().await);

    let cases = [
        (json!({ "name": "", "email": "a@x.com", "password": "TestPassword123!" }), "Name cannot be empty"),
        (json!({ "name": "A", "email": "a-at-x.com", "password": "TestPassword123!" }), "Invalid email format"),
        (json!({ "name": "A", "email": "a@x.com", "password": "short" }), "Password must be at least 8 characters"),
    ];

    for (payload, expected) in cases {
        let (status, body) = send(&app, "POST", "/api/auth/register", None, Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], expected);
    }
}

#[tokio::test]
async fn test_register_duplicate_email_same_kind() {
    let app = test_app(test_state().await);

    let (first, _) = register_user(&app, "dup@example.com", "TestPassword123!").await;
    assert_eq!(first, StatusCode::CREATED);

    let (second, body) = register_user(&app, "dup@example.com", "OtherPassword123!").await;
    assert_eq!(second, StatusCode::CONFLICT);
    assert_eq!(body["code"], "DuplicateEmail");
}

#[tokio::test]
async fn test_email_uniqueness_global_rejects_other_kind() {
    // Arrange: admin already holds a@x.com
    let state = test_state().await;
    seed_admin(&state, "a@x.com", "AdminPassword123!").await;
    let app = test_app(state);

    // Act
    let (status, body) = register_user(&app, "a@x.com", "TestPassword123!").await;

    // Assert
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "DuplicateEmail");
}

#[tokio::test]
async fn test_email_uniqueness_per_kind_allows_other_kind() {
    let mut config = test_config();
    config.email_uniqueness = lib_core::EmailUniqueness::PerKind;
    let state = test_state_with(config).await;
    seed_admin(&state, "a@x.com", "AdminPassword123!").await;
    let app = test_app(state);

    let (status, _) = register_user(&app, "a@x.com", "TestPassword123!").await;
    assert_eq!(status, StatusCode::CREATED);

    // Both accounts keep working through their own login endpoints
    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/admin/login",
        None,
        Some(json!({ "email": "a@x.com", "password": "AdminPassword123!" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["principal"]["role"], "admin");
}
