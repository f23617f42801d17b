//! # Status Tests
//!
//! Edits that leave `status` out keep the stored status.

use super::*;

#[tokio::test]
async fn test_edit_without_status_keeps_sold() {
    // Arrange
    let state = test_state().await;
    let buyer = token_for(&state, 7, "Wanjiku", Role::IndividualUser);
    let app = test_app(state);

    let (_, artist) = register_artist(&app, "Imani", "imani@example.com").await;

    let mut sold = artwork_body("Dawn");
    sold["status"] = json!("sold");
    let (status, created) = send(&app, "POST", "/api/artworks", Some(&artist), Some(sold)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "sold");
    let uri = format!("/api/artworks/{}", created["id"]);

    // Act: description-only edit
    let mut edit = artwork_body("Dawn");
    edit["description"] = json!("Acrylic and gold leaf on canvas");
    let (status, updated) = send(&app, "PUT", &uri, Some(&artist), Some(edit)).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "sold");
    assert_eq!(updated["description"], "Acrylic and gold leaf on canvas");

    let (status, _) = send(
        &app,
        "POST",
        "/api/orders",
        Some(&buyer),
        Some(json!({ "order_type": "artwork", "reference_id": created["id"], "amount": 450.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_explicit_status_is_applied() {
    let app = test_app(test_state().await);
    let (_, artist) = register_artist(&app, "Imani", "imani@example.com").await;

    let (_, created) = send(&app, "POST", "/api/artworks", Some(&artist), Some(artwork_body("Dusk"))).await;
    assert_eq!(created["status"], "available");
    let uri = format!("/api/artworks/{}", created["id"]);

    let mut edit = artwork_body("Dusk");
    edit["status"] = json!("sold");
    let (status, updated) = send(&app, "PUT", &uri, Some(&artist), Some(edit)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "sold");

    let mut relist = artwork_body("Dusk");
    relist["status"] = json!("available");
    let (_, updated) = send(&app, "PUT", &uri, Some(&artist), Some(relist)).await;
    assert_eq!(updated["status"], "available");
}
