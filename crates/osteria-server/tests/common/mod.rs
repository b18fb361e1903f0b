// Not every integration binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;

use osteria_core::config::Config;
use osteria_server::app::build_app;
use osteria_server::state::AppState;
use osteria_tracker::{TrackerOptions, VisitorTracker};

/// Build a test Config pointing the visitor store into `dir`.
pub fn test_config(dir: &TempDir) -> Config {
    Config {
        port: 0,
        data_dir: dir.path().to_string_lossy().into_owned(),
        visitor_secret: Some("test-secret".to_string()),
        visitor_retention_days: 30,
        visitor_max_records: 10_000,
        visitor_store: dir
            .path()
            .join("visitors.json")
            .to_string_lossy()
            .into_owned(),
        visitor_store_legacy: None,
    }
}

/// Create a fresh on-disk tracker + state + app for each test.
///
/// The returned `TempDir` must be held for the test's lifetime, else the
/// store directory vanishes under the tracker.
pub async fn setup() -> (Arc<AppState>, axum::Router, TempDir) {
    let dir = TempDir::new().expect("tempdir");
    let config = test_config(&dir);
    let tracker = VisitorTracker::open(TrackerOptions::from_config(&config))
        .await
        .expect("open tracker");
    let state = Arc::new(AppState::new(tracker, config));
    let app = build_app(Arc::clone(&state));
    (state, app, dir)
}

/// Helper: a GET request with browser-ish tracking headers.
pub fn page_request(path: &str, ip: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(path)
        .header("x-forwarded-for", ip)
        .header("user-agent", "Mozilla/5.0 Chrome/120")
        .body(Body::empty())
        .expect("build request")
}

/// Helper: extract JSON body from response.
pub async fn json_body(response: axum::http::Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("parse body as JSON")
}
