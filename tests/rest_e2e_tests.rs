//! End-to-end tests through a real axum router
//!
//! Builds a small read-only API on top of the controller - a listing
//! endpoint, a lookup endpoint and a directive echo - and drives it over
//! HTTP with `axum-test`. The "query layer" is a static in-memory slice;
//! everything between the query string and the response body goes through
//! the crate.

use axum::Json;
use axum::extract::{Path, State};
use axum::routing::get;
use axum_test::TestServer;
use serde_json::{Value, json};
use shaper::prelude::*;

struct ItemResource;

impl Resource for ItemResource {
    fn transform(&self, item: &Value) -> Value {
        json!({
            "id": item.get("id").cloned().unwrap_or(Value::Null),
            "name": item.get("name").cloned().unwrap_or(Value::Null),
        })
    }

    fn raw(&self, item: &Value) -> Value {
        item.clone()
    }
}

#[derive(Clone)]
struct AppState {
    controller: Controller,
    items: Arc<Vec<Value>>,
}

fn field_matches(field: &Value, raw: &str) -> bool {
    match field {
        Value::String(s) => s == raw,
        other => other.to_string() == raw,
    }
}

/// Listing endpoint: criteria-filtered, paginated, shaped.
async fn list_items(
    State(state): State<AppState>,
    query: RequestQuery,
) -> Result<Json<PaginatedEnvelope>, ApiError> {
    let transform = query.get("transform") != Some("false");
    let pagination = state.controller.get_pagination(&query);
    let criteria = state.controller.get_criteria(&query, None);
    let options = state.controller.get_listing_options();

    // Stand-in query layer: filter, count, window.
    let matched: Vec<Value> = state
        .items
        .iter()
        .filter(|item| {
            criteria
                .iter()
                .all(|(key, value)| item.get(key).is_some_and(|field| field_matches(field, value)))
        })
        .cloned()
        .collect();
    let count = matched.len() as u64;
    let rows: Vec<Value> = matched
        .into_iter()
        .skip(pagination.offset as usize)
        .take(pagination.limit as usize)
        .collect();

    let envelope = state
        .controller
        .to_pagination(
            ListResult {
                rows,
                count,
                count_is_estimate: options.estimate_total_count,
            },
            "item",
            transform,
        )
        .await?;
    Ok(Json(envelope))
}

/// Lookup endpoint: missing ids surface as 404.
async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    query: RequestQuery,
) -> Result<Json<ResourceEnvelope>, ApiError> {
    let transform = query.get("transform") != Some("false");
    let item = state
        .items
        .iter()
        .find(|item| item.get("id").and_then(Value::as_u64) == Some(id))
        .cloned();
    let envelope = state
        .controller
        .respond_with_resource(item, "item", transform)
        .await?;
    Ok(Json(envelope))
}

/// Echoes every extracted directive, for asserting on the raw translation.
async fn echo_directives(State(state): State<AppState>, query: RequestQuery) -> Json<Value> {
    Json(json!({
        "pagination": state.controller.get_pagination(&query),
        "ordering": state.controller.get_ordering(&query),
        "listingOrder": state.controller.get_listing_order(&query),
        "criteria": state.controller.get_criteria(&query, None),
    }))
}

fn create_test_server() -> TestServer {
    // RUST_LOG=debug surfaces the controller's tracing output when a test fails.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init()
        .ok();

    let registry = ResourceRegistry::new().register("item", Arc::new(ItemResource));
    let controller = Controller::new(Arc::new(registry), Arc::new(ApiConfiguration::empty()));

    let items: Vec<Value> = (1..=30)
        .map(|id| {
            json!({
                "id": id,
                "name": format!("item-{id}"),
                "status": if id % 2 == 0 { "active" } else { "archived" },
                "internal_note": "hidden",
            })
        })
        .collect();

    let state = AppState {
        controller,
        items: Arc::new(items),
    };

    let app = axum::Router::new()
        .route("/items", get(list_items))
        .route("/items/{id}", get(get_item))
        .route("/directives", get(echo_directives))
        .with_state(state);

    TestServer::new(app)
}

// =============================================================================
// Listing Tests
// =============================================================================

#[tokio::test]
async fn test_list_defaults_return_everything_under_limit() {
    let server = create_test_server();

    let response = server.get("/items").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["totalCount"], 30);
    assert_eq!(body["results"].as_array().expect("array").len(), 30);
    assert_eq!(body["meta"]["totalCountIsEstimate"], true);
}

#[tokio::test]
async fn test_list_page_window() {
    let server = create_test_server();

    let response = server.get("/items?page=2&limit=10").await;
    response.assert_status_ok();

    let body: Value = response.json();
    let results = body["results"].as_array().expect("array");
    assert_eq!(results.len(), 10);
    assert_eq!(results[0]["id"], 11);
    assert_eq!(body["totalCount"], 30);
}

#[tokio::test]
async fn test_list_criteria_filtering() {
    let server = create_test_server();

    let response = server.get("/items?status=active").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["totalCount"], 15);
}

#[tokio::test]
async fn test_list_transform_strips_internal_fields() {
    let server = create_test_server();

    let body: Value = server.get("/items?limit=1").await.json();
    let first = &body["results"][0];
    assert!(first.get("internal_note").is_none());

    let body: Value = server.get("/items?limit=1&transform=false").await.json();
    let first = &body["results"][0];
    assert_eq!(first["internal_note"], "hidden");
}

// =============================================================================
// Lookup Tests
// =============================================================================

#[tokio::test]
async fn test_get_item_wraps_in_data() {
    let server = create_test_server();

    let response = server.get("/items/3").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"]["id"], 3);
    assert_eq!(body["data"]["name"], "item-3");
    assert!(body["data"].get("internal_note").is_none());
}

#[tokio::test]
async fn test_get_missing_item_is_404() {
    let server = create_test_server();

    let response = server.get("/items/999").await;
    response.assert_status_not_found();

    let body: Value = response.json();
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_get_item_raw_mode() {
    let server = create_test_server();

    let body: Value = server.get("/items/4?transform=false").await.json();
    assert_eq!(body["data"]["internal_note"], "hidden");
}

// =============================================================================
// Directive Extraction Over The Wire
// =============================================================================

#[tokio::test]
async fn test_directives_roundtrip() {
    let server = create_test_server();

    let body: Value = server
        .get("/directives?page=3&limit=10&orderBy=name:desc,id&status=active")
        .await
        .json();

    assert_eq!(body["pagination"], json!({ "offset": 20, "limit": 10 }));
    assert_eq!(body["ordering"], json!(["name:desc", "id"]));
    assert_eq!(
        body["listingOrder"],
        json!([
            { "property": "name", "direction": "desc" },
            { "property": "id", "direction": "asc" }
        ])
    );
    assert_eq!(body["criteria"], json!({ "status": "active" }));
}

#[tokio::test]
async fn test_directives_empty_query() {
    let server = create_test_server();

    let body: Value = server.get("/directives").await.json();
    assert_eq!(body["pagination"], json!({ "offset": 0, "limit": 100 }));
    assert_eq!(body["ordering"], json!([]));
    assert_eq!(body["listingOrder"], json!([]));
    assert_eq!(body["criteria"], json!({}));
}

#[tokio::test]
async fn test_directives_explicit_offset_wins() {
    let server = create_test_server();

    let body: Value = server.get("/directives?page=3&limit=10&offset=5").await.json();
    assert_eq!(body["pagination"], json!({ "offset": 5, "limit": 10 }));
}
