//! Admin overview endpoint tests against a real database.

mod common;

use axum::http::StatusCode;

#[tokio::test]
#[ignore] // Requires database setup
async fn test_admin_lists_registered_entities() {
    let app = common::test_app().await;
    let auth = common::bearer(common::unique_user_id(), "admin");

    let (status, body) = common::send(&app, common::get("/api/admin/entities", Some(&auth))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["empty_value_display"], "No information");

    let entities = body["entities"].as_array().unwrap();
    let slugs: Vec<&str> = entities
        .iter()
        .map(|e| e["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec!["ads", "proposals"]);
    for entity in entities {
        assert!(entity["total_rows"].as_i64().unwrap() >= 0);
        assert!(entity["verbose_name"].is_string());
    }
}

#[tokio::test]
#[ignore] // Requires database setup
async fn test_admin_counts_include_soft_deleted() {
    let app = common::test_app().await;
    let user = common::unique_user_id();
    let auth = common::bearer(user, &format!("user{user}"));

    let created = common::create_ad(&app, &auth, "Short-lived listing", "other", "used").await;
    let id = created["id"].as_i64().unwrap();

    let (_, before) = common::send(&app, common::get("/api/admin/entities", Some(&auth))).await;
    let ads_count = |body: &serde_json::Value| {
        body["entities"]
            .as_array()
            .unwrap()
            .iter()
            .find(|e| e["slug"] == "ads")
            .unwrap()["total_rows"]
            .as_i64()
            .unwrap()
    };

    let (status, _) = common::send(&app, common::delete(&format!("/api/ads/{id}"), Some(&auth))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // Soft deletion keeps the row; with parallel tests creating ads the
    // unfiltered count can only have grown.
    let (_, after) = common::send(&app, common::get("/api/admin/entities", Some(&auth))).await;
    assert!(ads_count(&after) >= ads_count(&before));
}
