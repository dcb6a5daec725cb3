//! Health endpoint smoke test.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, get, StubAds};

#[tokio::test]
async fn test_health_reports_version_and_snapshot_state() {
    let (app, _store) = common::build_test_app(Arc::new(StubAds::new()));

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["snapshot_loaded"], false);
    assert!(json["status"].is_string());
}
