//! # Ownership Tests
//!
//! Artist A owns an artwork; artist B, a plain user and an admin try to change it.

use super::*;

#[tokio::test]
async fn test_owner_or_admin_scenario() {
    // Arrange
    let state = test_state().await;
    let admin = token_for(&state, 1, "Root", Role::Admin);
    let app = test_app(state);

    let (a_id, a_token) = register_artist(&app, "Imani", "imani@example.com").await;
    let (_, b_token) = register_artist(&app, "Baraka", "baraka@example.com").await;

    let (status, created) = send(&app, "POST", "/api/artworks", Some(&a_token), Some(artwork_body("Dawn"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["artist_id"], a_id);
    assert_eq!(created["artist"], "Imani");
    let uri = format!("/api/artworks/{}", created["id"]);

    // Act + Assert: artist B is denied
    let (status, body) = send(&app, "PUT", &uri, Some(&b_token), Some(artwork_body("Stolen"))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "You can only modify your own artworks");

    let (status, _) = send(&app, "DELETE", &uri, Some(&b_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Owner is allowed
    let (status, updated) = send(&app, "PUT", &uri, Some(&a_token), Some(artwork_body("Dawn II"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Dawn II");

    // Admin is allowed, and keeps the artist attribution
    let (status, updated) = send(&app, "PUT", &uri, Some(&admin), Some(artwork_body("Dawn III"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["artist"], "Imani");
    assert_eq!(updated["artist_id"], a_id);

    let (status, _) = send(&app, "DELETE", &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_users_cannot_create_artworks() {
    let state = test_state().await;
    let user = token_for(&state, 3, "Wanjiku", Role::IndividualUser);
    let corporate = token_for(&state, 4, "Acme", Role::Corporate);
    let app = test_app(state);

    for token in [&user, &corporate] {
        let (status, body) = send(&app, "POST", "/api/artworks", Some(token), Some(artwork_body("Nope"))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Admin or artist privileges required");
    }

    let (status, _) = send(&app, "POST", "/api/artworks", None, Some(artwork_body("Nope"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_artworks_need_artist_name_and_stay_admin_only() {
    let state = test_state().await;
    let admin = token_for(&state, 1, "Root", Role::Admin);
    let app = test_app(state);
    let (_, artist_token) = register_artist(&app, "Imani", "imani@example.com").await;

    let (status, body) = send(&app, "POST", "/api/artworks", Some(&admin), Some(artwork_body("Anon"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Artist name is required");

    let mut payload = artwork_body("Heritage");
    payload["artist"] = json!("Unknown Master");
    let (status, created) = send(&app, "POST", "/api/artworks", Some(&admin), Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created["artist_id"].is_null());

    // No owner: an artist cannot claim it
    let uri = format!("/api/artworks/{}", created["id"]);
    let (status, _) = send(&app, "DELETE", &uri, Some(&artist_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_public_listing_and_artist_dashboard() {
    let state = test_state().await;
    let admin = token_for(&state, 1, "Root", Role::Admin);
    let app = test_app(state);
    let (a_id, a_token) = register_artist(&app, "Imani", "imani@example.com").await;
    let (_, b_token) = register_artist(&app, "Baraka", "baraka@example.com").await;

    send(&app, "POST", "/api/artworks", Some(&a_token), Some(artwork_body("One"))).await;
    send(&app, "POST", "/api/artworks", Some(&a_token), Some(artwork_body("Two"))).await;
    send(&app, "POST", "/api/artworks", Some(&b_token), Some(artwork_body("Three"))).await;

    let (status, all) = send(&app, "GET", "/api/artworks", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 3);

    let (status, mine) = send(&app, "GET", "/api/artist/artworks", Some(&a_token), None).await;
    assert_eq!(status, StatusCode::OK);
    let mine = mine.as_array().unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|w| w["artist_id"] == a_id && w["order_count"] == 0));

    // Admins must say which artist
    let (status, _) = send(&app, "GET", "/api/artist/artworks", Some(&admin), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, listed) = send(
        &app,
        "GET",
        &format!("/api/artist/artworks?artist_id={a_id}"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 2);
}
