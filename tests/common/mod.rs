#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use reqwest::Client;
use serde_json::{json, Value};

use insights_bridge::config::Config;
use insights_bridge::hub::metrics::{CountRule, SubResource, SUB_RESOURCES};
use insights_bridge::hub::ASSETS_PATH;
use insights_bridge::models::MetricLabel;

/// Nothing listens here, so every outbound call fails to connect.
pub const UNREACHABLE_HUB: &str = "http://127.0.0.1:1";

/// A running test server instance.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// POST a JSON body to the submit route, return (body, status).
    pub async fn submit(&self, data: &Value) -> (Value, StatusCode) {
        self.submit_at("/api/submit", data).await
    }

    pub async fn submit_at(&self, path: &str, data: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .json(data)
            .send()
            .await
            .expect("submit request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// POST a raw body to the submit route.
    pub async fn submit_raw(&self, raw: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/submit"))
            .header("content-type", "application/json")
            .body(raw.to_string())
            .send()
            .await
            .expect("submit request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn get(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// GET with an `Authorization` header passed through as-is.
    pub async fn get_auth(&self, path: &str, authorization: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .header("authorization", authorization)
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

pub fn test_config(hub_url: &str) -> Config {
    Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        base_path: String::new(),
        insights_hub_url: hub_url.to_string(),
        upstream_timeout: Duration::from_secs(5),
        max_body_size: 1_048_576,
        log_level: "warn".to_string(),
    }
}

/// Spawn the app pointed at an unreachable Insights Hub.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(test_config(UNREACHABLE_HUB)).await
}

pub async fn spawn_app_with(config: Config) -> TestApp {
    let app = insights_bridge::build_app(config).expect("Failed to build app");

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
    }
}

// ── Stub Insights Hub ───────────────────────────────────────────

/// How the stub answers. Legs not listed answer 200 with `stub_count`.
#[derive(Default)]
pub struct StubBehaviour {
    pub failing: HashMap<MetricLabel, StatusCode>,
    pub hanging: HashSet<MetricLabel>,
    /// Legs that answer 200 with a body that is not JSON.
    pub malformed: HashSet<MetricLabel>,
    /// Status for plain asset listing calls made by the assets proxy.
    pub assets_status: Option<StatusCode>,
    pub assets_hang: bool,
    pub assets_malformed: bool,
    pub hang_for: Duration,
}

struct StubState {
    behaviour: StubBehaviour,
    hits: AtomicUsize,
    authorizations: Mutex<Vec<String>>,
    asset_queries: Mutex<Vec<HashMap<String, String>>>,
}

pub struct StubHub {
    pub url: String,
    state: Arc<StubState>,
}

impl StubHub {
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn authorizations(&self) -> Vec<String> {
        self.state.authorizations.lock().unwrap().clone()
    }

    pub fn asset_queries(&self) -> Vec<HashMap<String, String>> {
        self.state.asset_queries.lock().unwrap().clone()
    }
}

/// Distinct, recognizable totals per sub-resource.
pub fn stub_count(label: MetricLabel) -> u64 {
    match label {
        MetricLabel::Assets => 42,
        MetricLabel::Agents => 7,
        MetricLabel::Datalake => 128,
        MetricLabel::Events => 1500,
        MetricLabel::VfcFlows => 3,
        MetricLabel::Dashboards => 5,
        MetricLabel::Rules => 11,
        MetricLabel::Cases => 2,
        MetricLabel::Predictions => 4,
        MetricLabel::AnomalyDetections => 6,
    }
}

pub fn stub_asset_listing() -> Value {
    json!({
        "_embedded": {
            "assets": [
                { "assetId": "a1", "name": "Pump 1", "typeId": "core.basicasset" },
                { "assetId": "a2", "name": "Edge box", "typeId": "core.mclib" }
            ]
        },
        "page": { "size": 10, "totalElements": 2, "totalPages": 1, "number": 0 }
    })
}

/// The sub-resource whose path and params the request matches most specifically.
fn match_leg(path: &str, query: &HashMap<String, String>) -> Option<&'static SubResource> {
    SUB_RESOURCES
        .iter()
        .filter(|r| r.path == path)
        .filter(|r| {
            r.params
                .iter()
                .all(|(k, v)| query.get(*k).map(String::as_str) == Some(*v))
        })
        .max_by_key(|r| r.params.len())
}

async fn stub_handler(
    State(state): State<Arc<StubState>>,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    if let Some(auth) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
        state.authorizations.lock().unwrap().push(auth.to_string());
    }

    let behaviour = &state.behaviour;

    let Some(leg) = match_leg(uri.path(), &query) else {
        if uri.path() != ASSETS_PATH {
            return (StatusCode::NOT_FOUND, Json(json!({ "error": "unknown path" })))
                .into_response();
        }
        state.asset_queries.lock().unwrap().push(query);
        if behaviour.assets_hang {
            tokio::time::sleep(behaviour.hang_for).await;
        }
        if behaviour.assets_malformed {
            return (StatusCode::OK, "<html>maintenance</html>").into_response();
        }
        if let Some(status) = behaviour.assets_status {
            if status.is_success() {
                return (status, Json(stub_asset_listing())).into_response();
            }
            return (status, Json(json!({ "errors": [{ "message": "denied by stub" }] })))
                .into_response();
        }
        return Json(stub_asset_listing()).into_response();
    };

    if behaviour.hanging.contains(&leg.label) {
        tokio::time::sleep(behaviour.hang_for).await;
    }
    if behaviour.malformed.contains(&leg.label) {
        return (StatusCode::OK, "not json").into_response();
    }
    if let Some(status) = behaviour.failing.get(&leg.label) {
        return (*status, Json(json!({ "error": "stub failure" }))).into_response();
    }

    let count = stub_count(leg.label);
    let body = match leg.count_rule {
        CountRule::PageTotalElements => json!({
            "page": { "size": 1, "totalElements": count, "number": 0 }
        }),
        CountRule::TopLevelTotalElements => json!({ "totalElements": count }),
    };
    Json(body).into_response()
}

pub async fn spawn_stub_hub(behaviour: StubBehaviour) -> StubHub {
    let state = Arc::new(StubState {
        behaviour,
        hits: AtomicUsize::new(0),
        authorizations: Mutex::new(Vec::new()),
        asset_queries: Mutex::new(Vec::new()),
    });

    let router = Router::new()
        .fallback(stub_handler)
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub hub");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Stub hub failed");
    });

    StubHub {
        url: format!("http://{addr}"),
        state,
    }
}
