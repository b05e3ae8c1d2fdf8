//! Integration tests for roster-web HTTP endpoints
//!
//! Tests cover:
//! - Health endpoint across loading, ready and failed states
//! - Roster page before load, after load, and on selection change
//! - Year list and per-year roster JSON
//! - Fetch sequencing and failure handling of the initial load
//!
//! The content API is replaced by an in-memory record source.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use roster_common::config::RosterConfig;
use roster_common::model::QueryResponse;
use roster_common::{Error, RawGroupPhoto, RawMember, Result};
use roster_web::source::RecordSource;
use roster_web::{build_router, spawn_initial_load, AppState};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot` method

/// In-memory record source that logs fetch order
struct FixtureSource {
    members: Value,
    photos: Value,
    fail_photos: bool,
    calls: Mutex<Vec<&'static str>>,
}

impl FixtureSource {
    fn new(members: Value, photos: Value) -> Self {
        Self {
            members,
            photos,
            fail_photos: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn failing_photos(mut self) -> Self {
        self.fail_photos = true;
        self
    }
}

#[async_trait]
impl RecordSource for FixtureSource {
    async fn fetch_members(&self) -> Result<Vec<RawMember>> {
        self.calls.lock().unwrap().push("members");
        let envelope: QueryResponse<RawMember> = serde_json::from_value(json!({ "result": self.members }))
            .map_err(|e| Error::Decode(e.to_string()))?;
        Ok(envelope.result)
    }

    async fn fetch_group_photos(&self) -> Result<Vec<RawGroupPhoto>> {
        self.calls.lock().unwrap().push("photos");
        if self.fail_photos {
            return Err(Error::Http {
                url: "https://example.invalid/query".to_string(),
                status: 502,
            });
        }
        let envelope: QueryResponse<RawGroupPhoto> = serde_json::from_value(json!({ "result": self.photos }))
            .map_err(|e| Error::Decode(e.to_string()))?;
        Ok(envelope.result)
    }
}

fn image(id: &str) -> Value {
    json!({"_type": "image", "asset": {"_ref": format!("image-{}-1500x1000-jpg", id), "_type": "reference"}})
}

fn fixture() -> FixtureSource {
    FixtureSource::new(
        json!([
            {"name": "Olive Outreach", "year": 2022, "officer": true, "role": "Outreach Manager"},
            {"name": "Gina General", "year": 2022, "officer": true, "role": "General Manager", "linkedin": "https://www.linkedin.com/in/gina"},
            {"name": "Norm Member", "year": 2022, "officer": false},
            {"name": "Ivy Image", "year": 2022, "officer": false, "image": image("ivy")},
            {"name": "Dan Design", "year": 2021, "officer": true, "role": "Design Manager"},
            {"name": "Pat Plain", "year": 2021, "officer": false, "role": null, "image": null},
            {"name": "Old Timer", "year": 2019}
        ]),
        json!([
            {"year": 2022, "image": image("group2022")},
            {"year": 2019, "image": image("group2019")}
        ]),
    )
}

/// Test helper: App state with the fixture already loaded
async fn loaded_state(source: FixtureSource) -> AppState {
    let state = AppState::from_config(&RosterConfig::default());
    spawn_initial_load(state.clone(), Arc::new(source))
        .await
        .expect("load task should not panic");
    state
}

/// Test helper: Create GET request
fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_bytes(body: Body) -> Vec<u8> {
    axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body")
        .to_vec()
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    serde_json::from_slice(&body_bytes(body).await).expect("Should parse JSON")
}

async fn extract_text(body: Body) -> String {
    String::from_utf8(body_bytes(body).await).expect("Should be UTF-8")
}

// =============================================================================
// Health Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_health_before_load() {
    let app = build_router(AppState::from_config(&RosterConfig::default()));

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "loading");
    assert_eq!(body["module"], "roster-web");
    assert_eq!(body["members"], 0);
    assert!(body.get("last_error").is_none());
}

#[tokio::test]
async fn test_health_after_load() {
    let app = build_router(loaded_state(fixture()).await);

    let response = app.oneshot(get("/health")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["members"], 7);
}

// =============================================================================
// Initial Load Tests
// =============================================================================

#[tokio::test]
async fn test_photos_fetched_after_members() {
    let source = Arc::new(fixture());
    let state = AppState::from_config(&RosterConfig::default());
    spawn_initial_load(state.clone(), source.clone()).await.unwrap();

    assert_eq!(*source.calls.lock().unwrap(), vec!["members", "photos"]);
    assert!(state.controller.read().await.is_ready());
}

#[tokio::test]
async fn test_failed_photo_fetch_stays_uninitialized() {
    let state = loaded_state(fixture().failing_photos()).await;
    assert!(!state.controller.read().await.is_ready());

    let app = build_router(state);

    let response = app.clone().oneshot(get("/health")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "error");
    assert!(body["last_error"].as_str().unwrap().contains("502"));

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let html = extract_text(response.into_body()).await;
    assert!(html.contains("502"));
}

#[tokio::test]
async fn test_malformed_member_batch_stays_uninitialized() {
    let source = FixtureSource::new(
        json!([{"name": "No Year"}]),
        json!([{"year": 2022, "image": image("g")}]),
    );
    let state = loaded_state(source).await;

    let controller = state.controller.read().await;
    assert!(!controller.is_ready());
    assert!(controller.last_error().unwrap().contains("missing `year`"));
}

#[tokio::test]
async fn test_missing_default_photo_stays_uninitialized() {
    let source = FixtureSource::new(
        json!([{"name": "A", "year": 2020, "officer": false}]),
        json!([{"year": 2020, "image": image("g")}]),
    );
    let state = loaded_state(source).await;

    let controller = state.controller.read().await;
    assert!(!controller.is_ready());
    assert!(controller.last_error().unwrap().contains("2022"));
}

// =============================================================================
// Roster Page Tests
// =============================================================================

#[tokio::test]
async fn test_page_before_load_is_unavailable() {
    let app = build_router(AppState::from_config(&RosterConfig::default()));

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let html = extract_text(response.into_body()).await;
    assert!(html.contains("still loading"));
}

#[tokio::test]
async fn test_page_defaults_to_latest_year() {
    let app = build_router(loaded_state(fixture()).await);

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = extract_text(response.into_body()).await;

    assert!(html.contains("<option value=\"2022\" selected>2022 - 2023</option>"));
    assert!(html.contains("<option value=\"2019\">2019 - 2020</option>"));

    // Officers by role priority, members by bucket
    let general = html.find("Gina General").unwrap();
    let outreach = html.find("Olive Outreach").unwrap();
    let ivy = html.find("Ivy Image").unwrap();
    let norm = html.find("Norm Member").unwrap();
    assert!(general < outreach);
    assert!(ivy < norm);

    assert!(html.contains("<a href=\"https://www.linkedin.com/in/gina\">Gina General</a>"));
    assert!(html.contains("group2022-1500x1000.jpg?w=1500&amp;h=1000&amp;q=55"));
    assert!(html.contains("id=\"admintitle\" style=\"display: block\""));
    assert!(html.contains("id=\"memberstitle\" style=\"display: block\""));
}

#[tokio::test]
async fn test_year_query_rerenders_for_that_request_only() {
    let state = loaded_state(fixture()).await;
    let app = build_router(state.clone());

    let response = app.clone().oneshot(get("/?year=2021")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = extract_text(response.into_body()).await;

    assert!(html.contains("Dan Design"));
    assert!(!html.contains("Gina General"));
    // 2021 has no photo of its own; 2020 has no members; 2019 has both
    assert!(html.contains("group2019-1500x1000.jpg"));
    assert!(html.contains("<option value=\"2021\" selected>"));
    assert_eq!(state.controller.read().await.selected_year(), Some(2022));

    // Another visitor without a query still lands on the latest year
    let response = app.oneshot(get("/")).await.unwrap();
    let html = extract_text(response.into_body()).await;
    assert!(html.contains("<option value=\"2022\" selected>"));
    assert!(!html.contains("<option value=\"2021\" selected>"));
    assert!(html.contains("Gina General"));
}

#[tokio::test]
async fn test_concurrent_visitors_see_their_own_year() {
    let state = loaded_state(fixture()).await;
    let app = build_router(state);

    let (older, latest) = tokio::join!(
        app.clone().oneshot(get("/?year=2019")),
        app.clone().oneshot(get("/")),
    );
    let older = extract_text(older.unwrap().into_body()).await;
    let latest = extract_text(latest.unwrap().into_body()).await;

    assert!(older.contains("Old Timer"));
    assert!(!older.contains("Gina General"));
    assert!(latest.contains("Gina General"));
    assert!(!latest.contains("Old Timer"));
}

#[tokio::test]
async fn test_year_with_undefined_officer_flags_hides_titles() {
    let app = build_router(loaded_state(fixture()).await);

    let response = app.oneshot(get("/?year=2019")).await.unwrap();
    let html = extract_text(response.into_body()).await;

    assert!(html.contains("Old Timer"));
    assert!(html.contains("id=\"admintitle\" style=\"display: none\""));
    assert!(html.contains("id=\"memberstitle\" style=\"display: none\""));
}

#[tokio::test]
async fn test_select_unknown_year_is_not_found() {
    let app = build_router(loaded_state(fixture()).await);

    let response = app.oneshot(get("/?year=2020")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// JSON API Tests
// =============================================================================

#[tokio::test]
async fn test_years_endpoint() {
    let app = build_router(loaded_state(fixture()).await);

    let response = app.oneshot(get("/api/years")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["selected"], 2022);
    let years: Vec<i64> = body["years"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["year"].as_i64().unwrap())
        .collect();
    assert_eq!(years, vec![2022, 2021, 2019]);
    assert_eq!(body["years"][1]["label"], "2021 - 2022");
}

#[tokio::test]
async fn test_years_endpoint_before_load() {
    let app = build_router(AppState::from_config(&RosterConfig::default()));

    let response = app.oneshot(get("/api/years")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "NOT_READY");
}

#[tokio::test]
async fn test_roster_endpoint() {
    let state = loaded_state(fixture()).await;
    let app = build_router(state.clone());

    let response = app.oneshot(get("/api/roster/2021")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["year"], 2021);
    assert_eq!(body["photo_year"], 2019);
    assert_eq!(body["officers"][0]["name"], "Dan Design");
    assert_eq!(body["members"][0]["name"], "Pat Plain");
    assert_eq!(body["visibility"]["officers"], true);
    assert_eq!(body["visibility"]["members"], true);

    // Read-only endpoint leaves the selection alone
    assert_eq!(state.controller.read().await.selected_year(), Some(2022));
}

#[tokio::test]
async fn test_roster_endpoint_unknown_year() {
    let app = build_router(loaded_state(fixture()).await);

    let response = app.oneshot(get("/api/roster/1999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "UNKNOWN_YEAR");
}

#[tokio::test]
async fn test_buildinfo_endpoint() {
    let app = build_router(AppState::from_config(&RosterConfig::default()));

    let response = app.oneshot(get("/api/buildinfo")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["module"], "roster-web");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["git_hash"].is_string());
    assert!(body["build_profile"].is_string());
}
