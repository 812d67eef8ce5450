#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use fiber_survey_api::auth::password::FormPassword;
use fiber_survey_api::config::{GeoSourceConfig, ServerConfig, SheetConfig};
use fiber_survey_api::geo::GeoTreeCache;
use fiber_survey_api::router::build_app_router;
use fiber_survey_api::session::{SessionStore, SESSION_COOKIE};
use fiber_survey_api::state::{AppState, SheetTargets};
use fiber_survey_core::geo::{extract_records, GeoSources, GeoTree};
use fiber_survey_store::MemorySheetStore;

/// Password accepted by apps built with [`TestApp::with_password`].
pub const TEST_PASSWORD: &str = "fiber-test-pass";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(form_password: Option<FormPassword>) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        session_ttl_secs: 3600,
        form_password,
        geo: GeoSourceConfig::default(),
        sheet: SheetConfig::Csv {
            dir: std::env::temp_dir(),
        },
    }
}

/// Small tree: one division, one district, two upazilas, two unions.
pub fn sample_tree() -> GeoTree {
    let sources = GeoSources {
        divisions: extract_records(&json!([
            { "type": "header", "version": "4.7.7" },
            { "type": "table", "name": "divisions", "data": [
                { "id": "3", "name": "Dhaka", "bn_name": "ঢাকা" }
            ]}
        ])),
        districts: extract_records(&json!([
            { "type": "table", "name": "districts", "data": [
                { "id": "41", "division_id": "3", "name": "Gazipur", "bn_name": "গাজীপুর" },
                { "id": "42", "division_id": "3", "name": "Narsingdi", "bn_name": "নরসিংদী" }
            ]}
        ])),
        upazilas: extract_records(&json!([
            { "type": "table", "name": "upazilas", "data": [
                { "id": "301", "district_id": "41", "name": "Kaliganj", "bn_name": "কালীগঞ্জ" },
                { "id": "302", "district_id": "41", "name": "Kapasia", "bn_name": "কাপাসিয়া" }
            ]}
        ])),
        unions: extract_records(&json!([
            { "type": "table", "name": "unions", "data": [
                { "id": "9001", "upazilla_id": "301", "name": "Jamalpur", "bn_name": "জামালপুর" },
                { "id": "9002", "upazilla_id": "301", "name": "Bahadursadi", "bn_name": "বাহাদুরসাদী" }
            ]}
        ])),
    };
    GeoTree::build(&sources)
}

/// The application under test plus handles on its in-memory sheets.
pub struct TestApp {
    pub router: Router,
    pub simple: Arc<MemorySheetStore>,
    pub extended: Arc<MemorySheetStore>,
}

impl TestApp {
    /// App with the sample tree and no extended-form password.
    pub fn new() -> Self {
        Self::build(sample_tree(), None)
    }

    /// App whose extended form unlocks with [`TEST_PASSWORD`].
    pub fn with_password() -> Self {
        let password = FormPassword::from_plain(TEST_PASSWORD).expect("hash test password");
        Self::build(sample_tree(), Some(password))
    }

    /// App whose geo sources were unreachable.
    pub fn with_empty_tree() -> Self {
        Self::build(GeoTree::default(), None)
    }

    /// Build the full application router, mirroring `main.rs` so tests
    /// exercise the same middleware stack production uses.
    pub fn build(tree: GeoTree, form_password: Option<FormPassword>) -> Self {
        let config = test_config(form_password);
        let simple = Arc::new(MemorySheetStore::new());
        let extended = Arc::new(MemorySheetStore::new());

        let state = AppState {
            config: Arc::new(config.clone()),
            geo: Arc::new(GeoTreeCache::seeded(tree)),
            sessions: Arc::new(SessionStore::new(Duration::from_secs(
                config.session_ttl_secs,
            ))),
            sheets: Arc::new(SheetTargets::new(simple.clone(), extended.clone())),
        };

        Self {
            router: build_app_router(state, &config),
            simple,
            extended,
        }
    }

    /// Start a form session and return a client carrying its cookie.
    pub async fn start(&self, variant: &str) -> FormClient {
        let response = send(
            &self.router,
            Method::POST,
            &format!("/api/v1/forms/{variant}/session"),
            None,
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let cookie = session_cookie(&response).expect("session cookie set");
        FormClient {
            router: self.router.clone(),
            cookie,
        }
    }
}

/// Issues requests within one form session.
pub struct FormClient {
    router: Router,
    pub cookie: String,
}

impl FormClient {
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.call(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str) -> (StatusCode, Value) {
        self.call(Method::POST, uri, None).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.call(Method::POST, uri, Some(body)).await
    }

    pub async fn put_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.call(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.call(Method::DELETE, uri, None).await
    }

    async fn call(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let response = send(&self.router, method, uri, Some(&self.cookie), body).await;
        let status = response.status();
        (status, body_json(response).await)
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).unwrap()
}

/// `name=value` of the session cookie set by the response, if any.
pub fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .find(|pair| pair.starts_with(&format!("{SESSION_COOKIE}=")))
        .map(str::to_string)
}

// ---------------------------------------------------------------------------
// Form payloads
// ---------------------------------------------------------------------------

pub fn listed(value: &str) -> Value {
    json!({ "kind": "listed", "value": value })
}

pub fn other(value: &str) -> Value {
    json!({ "kind": "other", "value": value })
}

pub fn officer_payload() -> Value {
    json!({
        "name": "  মোঃ রহিম  ",
        "contact": "01712345678",
        "designation": listed("প্রোগ্রামার"),
        "workplace": "উপজেলা আইসিটি অফিস",
    })
}

pub fn geo_payload() -> Value {
    json!({
        "division": listed("ঢাকা"),
        "district": listed("গাজীপুর"),
        "upazila": listed("কালীগঞ্জ"),
        "union": other("নতুন ইউনিয়ন"),
    })
}

/// A complete simple-form line.
pub fn simple_line(source: &str, destination: &str) -> Value {
    json!({
        "company": "Summit",
        "dependency_km": 2.5,
        "source": { "name": source, "core_type": "48", "distance_km": 1.0 },
        "destination": { "name": destination, "core_type": "24", "distance_km": 3.25 },
    })
}

/// A complete extended-form line with geography on both ends.
pub fn extended_line(source: &str, destination: &str) -> Value {
    json!({
        "dependency_km": 4.0,
        "source": {
            "geo": geo_payload(),
            "name": source,
            "core_type": "24",
            "distance_km": 0.5,
        },
        "destination": {
            "geo": {
                "division": listed("ঢাকা"),
                "district": listed("গাজীপুর"),
                "upazila": listed("কাপাসিয়া"),
                "union": other("সদর"),
            },
            "name": destination,
            "core_type": "12",
            "distance_km": 6.0,
        },
    })
}
