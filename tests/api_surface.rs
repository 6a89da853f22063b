//! Pre-database surface: authentication, payload and query validation.
//! These run against a pool that never connects, so they need no database.

mod common;

use axum::http::StatusCode;
use barter_api::auth::issue_token;
use serde_json::json;

fn valid_ad_body() -> serde_json::Value {
    json!({
        "title": "Winter coat",
        "description": "Warm coat, barely worn, size medium",
        "category": "clothing",
        "condition": "used",
    })
}

#[tokio::test]
async fn test_write_without_token_is_401() {
    let app = common::offline_app();

    let (status, body) =
        common::send(&app, common::post_json("/api/ads", None, valid_ad_body())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(common::error_code(&body), "MISSING_TOKEN");

    let (status, _) = common::send(
        &app,
        common::patch_json("/api/ads/1", None, json!({"title": "Other title"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = common::send(&app, common::delete("/api/ads/1", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = common::send(&app, common::post_json("/api/proposals", None, json!({}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = common::send(
        &app,
        common::patch_json("/api/proposals/1", None, json!({"status": "accepted"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = common::send(&app, common::get("/api/my-proposals", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = common::send(&app, common::get("/api/admin/entities", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbage_token_is_401() {
    let app = common::offline_app();

    let (status, body) = common::send(
        &app,
        common::post_json(
            "/api/ads",
            Some("Bearer not-a-real-token"),
            valid_ad_body(),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(common::error_code(&body), "INVALID_TOKEN");
}

#[tokio::test]
async fn test_foreign_signature_is_401() {
    let app = common::offline_app();
    let forged = issue_token(1, "eve", "eve@example.com", "some-other-secret", 3600).unwrap();

    let (status, body) = common::send(
        &app,
        common::post_json("/api/ads", Some(&format!("Bearer {forged}")), valid_ad_body()),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(common::error_code(&body), "INVALID_TOKEN");
}

#[tokio::test]
async fn test_expired_token_is_401() {
    let app = common::offline_app();
    let expired = issue_token(
        1,
        "late",
        "late@example.com",
        common::TEST_JWT_SECRET,
        -3600,
    )
    .unwrap();

    let (status, body) = common::send(
        &app,
        common::post_json(
            "/api/ads",
            Some(&format!("Bearer {expired}")),
            valid_ad_body(),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(common::error_code(&body), "TOKEN_EXPIRED");
}

#[tokio::test]
async fn test_malformed_json_body_is_400() {
    let app = common::offline_app();
    let auth = common::bearer(common::unique_user_id(), "surface");

    let (status, body) = common::send(
        &app,
        common::post_raw("/api/ads", Some(&auth), "{\"title\": \"Winter coat\","),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(common::error_code(&body), "BAD_REQUEST");
}

#[tokio::test]
async fn test_create_ad_validation_runs_before_storage() {
    let app = common::offline_app();
    let auth = common::bearer(common::unique_user_id(), "surface");

    let mut body = valid_ad_body();
    body["title"] = json!("Coat");
    let (status, response) = common::send(
        &app,
        common::post_json("/api/ads", Some(&auth), body),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(common::error_code(&response), "VALIDATION_ERROR");
    assert_eq!(
        response["error"]["message"],
        "title must be at least 5 characters"
    );

    let mut body = valid_ad_body();
    body["description"] = json!("Too short");
    let (status, _) = common::send(&app, common::post_json("/api/ads", Some(&auth), body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut body = valid_ad_body();
    body["category"] = json!("vehicles");
    let (status, response) =
        common::send(&app, common::post_json("/api/ads", Some(&auth), body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["error"]["message"]
        .as_str()
        .unwrap()
        .contains("unknown category 'vehicles'"));

    let (status, response) = common::send(
        &app,
        common::post_json("/api/ads", Some(&auth), json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"]["message"], "title is required");
}

#[tokio::test]
async fn test_list_query_validation_runs_before_storage() {
    let app = common::offline_app();

    let (status, body) = common::send(&app, common::get("/api/ads?user=alice", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(common::error_code(&body), "VALIDATION_ERROR");

    let (status, _) = common::send(&app, common::get("/api/ads?min_date=01-02-2026", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = common::send(&app, common::get("/api/ads?category=vehicles", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_non_numeric_listing_id_is_400() {
    let app = common::offline_app();

    let (status, _) = common::send(&app, common::get("/api/ads/abc", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_proposal_requires_listing_ids() {
    let app = common::offline_app();
    let auth = common::bearer(common::unique_user_id(), "surface");

    let (status, body) = common::send(
        &app,
        common::post_json("/api/proposals", Some(&auth), json!({"comment": "swap?"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "ad_sender_id is required");
}

#[tokio::test]
async fn test_my_proposals_rejects_unknown_status() {
    let app = common::offline_app();
    let auth = common::bearer(common::unique_user_id(), "surface");

    let (status, body) = common::send(
        &app,
        common::get("/api/my-proposals?status=bogus", Some(&auth)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("unknown status 'bogus'"));
}

#[tokio::test]
async fn test_root_and_security_headers() {
    let app = common::offline_app();

    let response = tower::ServiceExt::oneshot(app, common::get("/", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("x-content-type-options")
            .and_then(|v| v.to_str().ok()),
        Some("nosniff")
    );
    assert_eq!(
        response
            .headers()
            .get("x-frame-options")
            .and_then(|v| v.to_str().ok()),
        Some("DENY")
    );
}
