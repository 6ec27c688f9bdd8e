use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use reqwest::Client;
use serde_json::{json, Value};

use submission_portal::config::{Config, Environment};

/// A running portal instance wired to an in-process mock upstream.
pub struct TestApp {
    pub addr: SocketAddr,
    pub upstream: MockUpstream,
    pub client: Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Fetch a page, returning (body, status).
    pub async fn get_page(&self, path: &str) -> (String, reqwest::StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        (resp.text().await.unwrap_or_default(), status)
    }

    /// Post the portal form (urlencoded, as a browser would).
    pub async fn post_form(&self, action: &str, fields: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(action))
            .form(fields)
            .send()
            .await
            .expect("form post failed")
    }

    /// Follow one redirect by hand, carrying the flash cookie like a
    /// browser would. Returns the body of the target page.
    pub async fn follow(&self, resp: reqwest::Response) -> String {
        let location = resp
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok())
            .expect("redirect without location header")
            .to_string();
        let cookie = resp
            .headers()
            .get("set-cookie")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .unwrap_or_default()
            .to_string();

        let mut req = self.client.get(self.url(&location));
        if !cookie.is_empty() {
            req = req.header("cookie", cookie);
        }
        let resp = req.send().await.expect("redirect follow failed");
        resp.text().await.unwrap_or_default()
    }
}

/// In-memory stand-in for the upstream submissions API.
pub struct MockUpstream {
    pub addr: SocketAddr,
    state: Arc<UpstreamState>,
}

struct UpstreamState {
    records: Mutex<Vec<Value>>,
    next_id: AtomicI64,
    hits: AtomicUsize,
    // Canned responses for GET /submissions/:id, used to simulate
    // malformed upstream bodies.
    overrides: Mutex<HashMap<i64, (u16, Value)>>,
}

impl MockUpstream {
    /// Total requests the upstream has seen, any route.
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn records(&self) -> Vec<Value> {
        self.state.records.lock().unwrap().clone()
    }

    /// Seed one record straight into the store, returning its id.
    pub fn seed(&self, full_name: &str, email: &str) -> i64 {
        let id = self.state.next_id.fetch_add(1, Ordering::SeqCst);
        self.state.records.lock().unwrap().push(json!({
            "id": id,
            "full_name": full_name,
            "email": email,
            "phone_number": "555-0100",
            "age": "34",
            "address": "12 Main St",
            "preferred_contact": "Email",
            "created_at": Utc::now().to_rfc3339(),
        }));
        id
    }

    /// Make GET /submissions/:id answer with a fixed status and body.
    pub fn override_get(&self, id: i64, status: u16, body: Value) {
        self.state
            .overrides
            .lock()
            .unwrap()
            .insert(id, (status, body));
    }
}

async fn spawn_upstream() -> MockUpstream {
    let state = Arc::new(UpstreamState {
        records: Mutex::new(Vec::new()),
        next_id: AtomicI64::new(1),
        hits: AtomicUsize::new(0),
        overrides: Mutex::new(HashMap::new()),
    });

    let router = Router::new()
        .route("/submissions", get(upstream_list).post(upstream_create))
        .route(
            "/submissions/{id}",
            get(upstream_get)
                .put(upstream_update)
                .delete(upstream_delete),
        )
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock upstream");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Mock upstream failed");
    });

    MockUpstream { addr, state }
}

async fn upstream_list(State(state): State<Arc<UpstreamState>>) -> Json<Value> {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let records = state.records.lock().unwrap().clone();
    Json(Value::Array(records))
}

async fn upstream_create(
    State(state): State<Arc<UpstreamState>>,
    Json(mut body): Json<Value>,
) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let id = state.next_id.fetch_add(1, Ordering::SeqCst);
    body["id"] = json!(id);
    body["created_at"] = json!(Utc::now().to_rfc3339());
    state.records.lock().unwrap().push(body.clone());
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn upstream_get(
    State(state): State<Arc<UpstreamState>>,
    Path(id): Path<i64>,
) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    if let Some((status, body)) = state.overrides.lock().unwrap().get(&id).cloned() {
        let status = StatusCode::from_u16(status).expect("invalid override status");
        return (status, Json(body)).into_response();
    }

    let records = state.records.lock().unwrap();
    match records.iter().find(|r| r["id"] == json!(id)) {
        Some(record) => Json(record.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" }))).into_response(),
    }
}

async fn upstream_update(
    State(state): State<Arc<UpstreamState>>,
    Path(id): Path<i64>,
    Json(mut body): Json<Value>,
) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let mut records = state.records.lock().unwrap();
    match records.iter_mut().find(|r| r["id"] == json!(id)) {
        Some(record) => {
            body["id"] = json!(id);
            if body.get("created_at").is_none() {
                body["created_at"] = record["created_at"].clone();
            }
            *record = body.clone();
            Json(body).into_response()
        }
        None => (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" }))).into_response(),
    }
}

async fn upstream_delete(
    State(state): State<Arc<UpstreamState>>,
    Path(id): Path<i64>,
) -> StatusCode {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let mut records = state.records.lock().unwrap();
    let before = records.len();
    records.retain(|r| r["id"] != json!(id));
    if records.len() < before {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

/// Spawn the portal on a random port, talking to a fresh mock upstream.
pub async fn spawn_app() -> TestApp {
    let upstream = spawn_upstream().await;
    let api_base = format!("http://{}", upstream.addr);
    spawn_portal(api_base, upstream).await
}

/// Portal wired to an address nothing listens on, for transport-failure
/// tests. The mock upstream still exists but is never reachable.
pub async fn spawn_app_with_dead_upstream() -> TestApp {
    let upstream = spawn_upstream().await;

    // Grab a port that is free right now and leave it unbound.
    let throwaway = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind throwaway port");
    let dead = throwaway.local_addr().unwrap();
    drop(throwaway);

    spawn_portal(format!("http://{dead}"), upstream).await
}

async fn spawn_portal(api_base: String, upstream: MockUpstream) -> TestApp {
    let config = Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        environment: Environment::Development,
        api_base_dev: api_base,
        api_base_prod: String::new(),
        log_level: "warn".to_string(),
    };

    let app = submission_portal::build_app(config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Portal failed");
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        addr,
        upstream,
        client,
    }
}
