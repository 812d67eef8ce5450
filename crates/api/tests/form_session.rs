mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, officer_payload, send, TestApp};
use serde_json::json;

#[tokio::test]
async fn starting_a_session_sets_cookie_and_blank_draft() {
    let app = TestApp::new();
    let response = send(
        &app.router,
        Method::POST,
        "/api/v1/forms/simple/session",
        None,
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let set_cookie = response
        .headers()
        .get("set-cookie")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("survey_session="));
    assert!(set_cookie.contains("HttpOnly"));

    let data = body_json(response).await["data"].clone();
    assert_eq!(data["variant"], "simple");
    assert_eq!(data["unlocked"], true);
    assert_eq!(data["line_count"], 1);
    assert_eq!(data["point_counts"], json!([0]));
    assert_eq!(data["draft"]["geo"]["division"], json!({ "kind": "unset" }));
}

#[tokio::test]
async fn unknown_variant_is_rejected() {
    let app = TestApp::new();
    let response = send(
        &app.router,
        Method::POST,
        "/api/v1/forms/detailed/session",
        None,
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn form_routes_need_a_session_cookie() {
    let app = TestApp::new();

    let response = send(&app.router, Method::GET, "/api/v1/form", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(
        &app.router,
        Method::GET,
        "/api/v1/form",
        Some("survey_session=not-a-uuid"),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(
        &app.router,
        Method::GET,
        "/api/v1/form",
        Some("survey_session=6f1c2a8e-3b4d-4e5f-8a9b-0c1d2e3f4a5b"),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Two sessions never see each other's drafts.
#[tokio::test]
async fn sessions_are_isolated() {
    let app = TestApp::new();
    let first = app.start("simple").await;
    let second = app.start("simple").await;

    let (status, _) = first.put_json("/api/v1/form/officer", officer_payload()).await;
    assert_eq!(status, StatusCode::OK);
    first.post("/api/v1/form/lines").await;

    let (_, view) = second.get("/api/v1/form").await;
    assert_eq!(view["data"]["draft"]["officer"]["name"], "");
    assert_eq!(view["data"]["line_count"], 1);

    let (_, view) = first.get("/api/v1/form").await;
    assert_eq!(view["data"]["line_count"], 2);
}

// ---------------------------------------------------------------------------
// Repeater
// ---------------------------------------------------------------------------

#[tokio::test]
async fn lines_never_drop_below_one() {
    let app = TestApp::new();
    let client = app.start("simple").await;

    let (status, view) = client.delete("/api/v1/form/lines").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["data"]["line_count"], 1);

    client.post("/api/v1/form/lines").await;
    let (_, view) = client.post("/api/v1/form/lines").await;
    assert_eq!(view["data"]["line_count"], 3);

    let (_, view) = client.delete("/api/v1/form/lines").await;
    assert_eq!(view["data"]["line_count"], 2);
}

/// Removing a line discards its values; re-adding starts blank.
#[tokio::test]
async fn removed_line_comes_back_blank() {
    let app = TestApp::new();
    let client = app.start("simple").await;

    client.post("/api/v1/form/lines").await;
    let (status, _) = client
        .put_json("/api/v1/form/lines/1", common::simple_line("উৎস", "গন্তব্য"))
        .await;
    assert_eq!(status, StatusCode::OK);

    client.delete("/api/v1/form/lines").await;
    let (_, view) = client.post("/api/v1/form/lines").await;
    assert_eq!(view["data"]["draft"]["lines"][1]["source"]["name"], "");
    assert_eq!(view["data"]["draft"]["lines"][1]["company"], json!(null));
}

#[tokio::test]
async fn out_of_range_line_returns_404() {
    let app = TestApp::new();
    let client = app.start("simple").await;

    let (status, body) = client
        .put_json("/api/v1/form/lines/3", common::simple_line("ক", "খ"))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn points_follow_their_line() {
    let app = TestApp::with_password();
    let client = app.start("extended").await;
    client
        .post_json("/api/v1/form/unlock", json!({ "password": common::TEST_PASSWORD }))
        .await;

    client.post("/api/v1/form/lines").await;
    client.post("/api/v1/form/lines/1/points").await;
    let (status, view) = client.post("/api/v1/form/lines/1/points").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["data"]["point_counts"], json!([0, 2]));

    let (_, view) = client.delete("/api/v1/form/lines/1/points").await;
    assert_eq!(view["data"]["point_counts"], json!([0, 1]));

    // Removing from an empty list is a no-op.
    let (status, view) = client.delete("/api/v1/form/lines/0/points").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["data"]["point_counts"], json!([0, 1]));

    let (status, _) = client
        .put_json(
            "/api/v1/form/lines/1/points/1",
            json!({ "name": "জাংশন", "distance_km": 1.0 }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = client.post("/api/v1/form/lines/5/points").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Variant rules
// ---------------------------------------------------------------------------

#[tokio::test]
async fn simple_form_has_no_points() {
    let app = TestApp::new();
    let client = app.start("simple").await;

    let (status, body) = client.post("/api/v1/form/lines/0/points").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn extended_form_has_no_shared_geo() {
    let app = TestApp::with_password();
    let client = app.start("extended").await;
    client
        .post_json("/api/v1/form/unlock", json!({ "password": common::TEST_PASSWORD }))
        .await;

    let (status, _) = client
        .put_json("/api/v1/form/geo", common::geo_payload())
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn simple_form_needs_no_password() {
    let app = TestApp::with_password();
    let client = app.start("simple").await;

    let (status, _) = client
        .post_json("/api/v1/form/unlock", json!({ "password": "anything" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Password gate
// ---------------------------------------------------------------------------

#[tokio::test]
async fn extended_form_is_locked_until_unlocked() {
    let app = TestApp::with_password();
    let client = app.start("extended").await;

    let (_, view) = client.get("/api/v1/form").await;
    assert_eq!(view["data"]["unlocked"], false);

    let (status, body) = client.put_json("/api/v1/form/officer", officer_payload()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");

    let (status, _) = client.post("/api/v1/form/submit").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = client
        .post_json("/api/v1/form/unlock", json!({ "password": "wrong" }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "ভুল পাসওয়ার্ড");

    let (status, view) = client
        .post_json("/api/v1/form/unlock", json!({ "password": common::TEST_PASSWORD }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["data"]["unlocked"], true);

    let (status, _) = client.put_json("/api/v1/form/officer", officer_payload()).await;
    assert_eq!(status, StatusCode::OK);
}

/// Without a configured password nobody can open the extended form.
#[tokio::test]
async fn extended_form_stays_locked_without_password_config() {
    let app = TestApp::new();
    let client = app.start("extended").await;

    let (status, body) = client
        .post_json("/api/v1/form/unlock", json!({ "password": "" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
}
