//! HTTP-level integration tests for the entity list endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener. Upstream data comes from the stub ads
//! client; the first list request triggers the snapshot load.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, get, StubAds};

use adboard_core::model::{Ad, AdAccount, AdSetSummary, AdSummary, Campaign};

fn active_account() -> AdAccount {
    AdAccount {
        id: "123".to_string(),
        name: "Test Account".to_string(),
        currency: "USD".to_string(),
        account_status: 1,
        ..Default::default()
    }
}

fn campaign(id: &str, name: &str, effective_status: &str) -> Campaign {
    Campaign {
        id: id.to_string(),
        name: name.to_string(),
        status: effective_status.to_string(),
        effective_status: effective_status.to_string(),
        configured_status: effective_status.to_string(),
        account_id: "123".to_string(),
        ad_sets: vec![AdSetSummary {
            effective_status: "ACTIVE".to_string(),
            ads: vec![AdSummary {
                effective_status: "ACTIVE".to_string(),
            }],
        }],
        ..Default::default()
    }
}

fn seeded_stub() -> Arc<StubAds> {
    let stub = StubAds::new();
    *stub.account.lock().unwrap() = active_account();
    *stub.campaigns.lock().unwrap() = vec![
        campaign("c1", "Summer Sale", "ACTIVE"),
        campaign("c2", "Winter Launch", "PAUSED"),
        campaign("c3", "Autumn Promo", "WITH_ISSUES"),
    ];
    Arc::new(stub)
}

#[tokio::test]
async fn test_list_campaigns_resolves_status() {
    let (app, _store) = common::build_test_app(seeded_stub());

    let response = get(app, "/api/v1/accounts/123/campaigns").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 3);

    let by_id = |id: &str| {
        rows.iter()
            .find(|r| r["id"] == id)
            .unwrap_or_else(|| panic!("row {id} missing"))
    };
    assert_eq!(by_id("c1")["status_info"]["class"], "active");
    assert_eq!(by_id("c2")["status_info"]["class"], "paused");
    assert_eq!(by_id("c3")["status_info"]["class"], "with_issues");
}

#[tokio::test]
async fn test_list_campaigns_status_filter() {
    let (app, _store) = common::build_test_app(seeded_stub());

    let response = get(app, "/api/v1/accounts/123/campaigns?status=paused").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], "c2");
}

#[tokio::test]
async fn test_list_campaigns_search_is_case_insensitive() {
    let (app, _store) = common::build_test_app(seeded_stub());

    let response = get(app, "/api/v1/accounts/123/campaigns?search=SUMMER").await;
    let json = body_json(response).await;
    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Summer Sale");
}

#[tokio::test]
async fn test_list_campaigns_sorted_by_name_desc() {
    let (app, _store) = common::build_test_app(seeded_stub());

    let response = get(
        app,
        "/api/v1/accounts/123/campaigns?sort=name&direction=desc",
    )
    .await;
    let json = body_json(response).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Winter Launch", "Summer Sale", "Autumn Promo"]);
}

#[tokio::test]
async fn test_list_campaigns_rejects_unknown_sort_key() {
    let (app, _store) = common::build_test_app(seeded_stub());

    let response = get(app, "/api/v1/accounts/123/campaigns?sort=cleverness").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_list_campaigns_rejects_half_open_date_range() {
    let (app, _store) = common::build_test_app(seeded_stub());

    let response = get(app, "/api/v1/accounts/123/campaigns?since=2026-01-01").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_ads_searches_creative_text() {
    let stub = seeded_stub();
    *stub.ads.lock().unwrap() = vec![
        Ad {
            id: "a1".to_string(),
            name: "Ad One".to_string(),
            title: "Free shipping today".to_string(),
            effective_status: "ACTIVE".to_string(),
            account_id: "123".to_string(),
            ..Default::default()
        },
        Ad {
            id: "a2".to_string(),
            name: "Ad Two".to_string(),
            body: "Limited time offer".to_string(),
            effective_status: "ACTIVE".to_string(),
            account_id: "123".to_string(),
            ..Default::default()
        },
    ];
    let (app, _store) = common::build_test_app(stub);

    let response = get(app, "/api/v1/accounts/123/ads?search=shipping").await;
    let json = body_json(response).await;
    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], "a1");
}

#[tokio::test]
async fn test_account_disabled_overrides_entity_status() {
    let stub = seeded_stub();
    stub.account.lock().unwrap().account_status = 2;
    let (app, _store) = common::build_test_app(stub);

    let response = get(app, "/api/v1/accounts/123/campaigns").await;
    let json = body_json(response).await;
    for row in json["data"].as_array().unwrap() {
        assert_eq!(row["status_info"]["class"], "rejected");
        assert_eq!(row["status_info"]["label"], "Account disabled");
    }
}

#[tokio::test]
async fn test_date_range_change_triggers_reload() {
    let stub = seeded_stub();
    let (app, _store) = common::build_test_app(Arc::clone(&stub));

    // First request loads the snapshot with the seeded campaigns.
    get(app.clone(), "/api/v1/accounts/123/campaigns").await;

    // Upstream now reports different rows for the newly selected range.
    *stub.campaigns.lock().unwrap() = vec![campaign("c9", "February Push", "ACTIVE")];

    let response = get(
        app.clone(),
        "/api/v1/accounts/123/campaigns?since=2026-02-01&until=2026-02-28",
    )
    .await;
    let json = body_json(response).await;
    let ids: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["c9"]);

    // The same range again serves the snapshot without re-fetching.
    *stub.campaigns.lock().unwrap() = vec![campaign("c10", "March Push", "ACTIVE")];
    let response = get(
        app,
        "/api/v1/accounts/123/campaigns?since=2026-02-01&until=2026-02-28",
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["id"], "c9");
}

#[tokio::test]
async fn test_act_prefixed_account_id_is_accepted() {
    let (app, _store) = common::build_test_app(seeded_stub());

    let response = get(app, "/api/v1/accounts/act_123/campaigns").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 3);
}
