use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use chrono::{TimeZone, Utc};
use evently_client::types::{
    CreateEvent, CreateOrganization, EventFilters, EventStatus, RegistrationRequest,
    RegistrationStatus, UpdateEvent,
};
use evently_client::{with_retry, ApiClient, ApiError, ClientConfig, Envelope, RequestOptions};
use evently_core::{EventId, EventSlug, OrganizationId};
use serde_json::{json, Value};

const KNOWN_EVENT: &str = "0190c2a4-8a3e-7c1d-9f00-000000000001";
const KNOWN_ORG: &str = "0190c2a4-8a3e-7c1d-9f00-0000000000aa";

#[derive(Default)]
struct Counters {
    flaky_calls: AtomicU32,
}

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        evently_observability::init();

        let app = stub_api(Arc::new(Counters::default()));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}/api", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn client(&self) -> ApiClient {
        ApiClient::new(ClientConfig::new(self.base_url.clone())).unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn event_json(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "organizationId": KNOWN_ORG,
        "title": title,
        "slug": "rustconf-2026",
        "status": "published",
        "startsAt": "2026-09-01T09:00:00Z",
        "capacity": 300
    })
}

fn stub_api(counters: Arc<Counters>) -> Router {
    Router::new()
        .route("/api/events/list", get(list_events))
        .route("/api/events/create", post(create_event))
        .route("/api/events/:id", get(get_event).delete(delete_event))
        .route("/api/events/:id/update", patch(update_event))
        .route("/api/orgs/create", post(create_org))
        .route("/api/public/events/:slug", get(public_event))
        .route("/api/public/events/:slug/register", post(register))
        .route("/api/echo-headers", get(echo_headers))
        .route("/api/malformed", get(|| async { (StatusCode::OK, "this is not json") }))
        .route(
            "/api/wrong-shape",
            get(|| async { Json(json!({ "success": true, "data": { "unexpected": 1 } })) }),
        )
        .route(
            "/api/server-error",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "<html>boom</html>") }),
        )
        .route("/api/flaky", get(flaky))
        .with_state(counters)
}

async fn list_events(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let title = format!(
        "status={} page={}",
        params.get("status").map(String::as_str).unwrap_or("-"),
        params.get("page").map(String::as_str).unwrap_or("-")
    );
    Json(json!({
        "success": true,
        "data": [event_json(KNOWN_EVENT, &title)],
        "pagination": { "page": 2, "limit": 10, "total": 11, "totalPages": 2 }
    }))
}

async fn get_event(Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    if id == KNOWN_EVENT {
        (StatusCode::OK, Json(json!({ "success": true, "data": event_json(&id, "RustConf") })))
    } else {
        (StatusCode::NOT_FOUND, Json(json!({ "success": false, "error": "not found" })))
    }
}

async fn create_event(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let title = body["title"].as_str().unwrap_or_default().to_string();
    (
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": event_json(KNOWN_EVENT, &title), "message": "Event created" })),
    )
}

async fn update_event(Path(id): Path<String>, Json(body): Json<Value>) -> Json<Value> {
    // Report which fields arrived so tests can check the patch is partial.
    let mut keys: Vec<&str> = body.as_object().map(|o| o.keys().map(String::as_str).collect()).unwrap_or_default();
    keys.sort();
    let title = body["title"].as_str().unwrap_or("unchanged");
    Json(json!({ "success": true, "data": event_json(&id, title), "message": keys.join(",") }))
}

async fn delete_event(Path(_id): Path<String>) -> Json<Value> {
    Json(json!({ "success": true, "message": "Event deleted" }))
}

async fn create_org(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "success": true,
        "data": { "id": KNOWN_ORG, "name": body["name"], "slug": "acme-events" }
    }))
}

async fn public_event(Path(slug): Path<String>) -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "slug": slug,
            "title": "Public RustConf",
            "startsAt": "2026-09-01T09:00:00Z",
            "spotsRemaining": 12
        }
    }))
}

async fn register(Path(slug): Path<String>, Json(body): Json<Value>) -> Json<Value> {
    if slug == "sold-out" {
        return Json(json!({ "success": false, "error": "Event is full" }));
    }
    Json(json!({
        "success": true,
        "data": {
            "id": "0190c2a4-8a3e-7c1d-9f00-0000000000bb",
            "eventId": KNOWN_EVENT,
            "email": body["email"],
            "status": "confirmed",
            "createdAt": "2026-08-01T12:00:00Z"
        }
    }))
}

async fn echo_headers(headers: HeaderMap) -> Json<Value> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    Json(json!({
        "success": true,
        "data": {
            "contentType": header("content-type"),
            "authorization": header("authorization"),
            "custom": header("x-custom"),
        }
    }))
}

async fn flaky(State(counters): State<Arc<Counters>>) -> (StatusCode, Json<Value>) {
    let n = counters.flaky_calls.fetch_add(1, Ordering::SeqCst) + 1;
    if n < 3 {
        (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "success": false, "error": "try again" })))
    } else {
        (StatusCode::OK, Json(json!({ "success": true, "data": n })))
    }
}

fn known_event_id() -> EventId {
    KNOWN_EVENT.parse().unwrap()
}

#[tokio::test]
async fn get_event_returns_typed_payload() {
    let server = TestServer::spawn().await;
    let client = server.client();

    let event = client.events().get(known_event_id()).await.unwrap().into_data().unwrap();
    assert_eq!(event.id, known_event_id());
    assert_eq!(event.title, "RustConf");
    assert_eq!(event.status, EventStatus::Published);
    assert_eq!(event.capacity, Some(300));
}

#[tokio::test]
async fn not_found_becomes_failure_without_panicking() {
    let server = TestServer::spawn().await;
    let client = server.client();

    let result = client.events().get(EventId::new()).await;
    assert_eq!(
        result.clone().unwrap_err(),
        ApiError::Status { status: 404, message: "not found".to_string() }
    );

    let wire = serde_json::to_value(Envelope::from(result)).unwrap();
    assert_eq!(wire, json!({ "success": false, "error": "not found" }));
}

#[tokio::test]
async fn list_encodes_filters_and_keeps_pagination() {
    let server = TestServer::spawn().await;
    let client = server.client();

    let filters = EventFilters {
        page: Some(2),
        status: Some(EventStatus::Draft),
        ..Default::default()
    };
    let ok = client.events().list(&filters).await.unwrap();

    let pagination = ok.pagination.unwrap();
    assert_eq!(pagination.total, 11);
    assert_eq!(pagination.total_pages, 2);

    let events = ok.into_data().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].title, "status=draft page=2");
}

#[tokio::test]
async fn create_update_delete_event() {
    let server = TestServer::spawn().await;
    let client = server.client();

    let created = client
        .events()
        .create(&CreateEvent {
            organization_id: KNOWN_ORG.parse::<OrganizationId>().unwrap(),
            title: "Launch Party".to_string(),
            slug: EventSlug::new("launch-party").unwrap(),
            description: None,
            starts_at: Utc.with_ymd_and_hms(2026, 11, 5, 18, 0, 0).unwrap(),
            ends_at: None,
            venue: Some("Warehouse 9".to_string()),
            capacity: None,
        })
        .await
        .unwrap();
    assert_eq!(created.message.as_deref(), Some("Event created"));
    assert_eq!(created.into_data().unwrap().title, "Launch Party");

    let patch = UpdateEvent {
        title: Some("Launch Party 2".to_string()),
        ..Default::default()
    };
    let updated = client.events().update(known_event_id(), &patch).await.unwrap();
    assert_eq!(updated.message.as_deref(), Some("title"));
    assert_eq!(updated.into_data().unwrap().title, "Launch Party 2");

    let deleted = client.events().delete(known_event_id()).await.unwrap();
    assert!(deleted.data.is_none());
    assert_eq!(deleted.into_data(), Err(ApiError::MissingData));
}

#[tokio::test]
async fn create_organization() {
    let server = TestServer::spawn().await;
    let client = server.client();

    let org = client
        .organizations()
        .create(&CreateOrganization { name: "Acme Events".to_string(), slug: None })
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(org.name, "Acme Events");
    assert_eq!(org.slug, "acme-events");
}

#[tokio::test]
async fn public_event_and_registration() {
    let server = TestServer::spawn().await;
    let client = server.client();
    let slug = EventSlug::new("rustconf-2026").unwrap();

    let public = client.public().get_event(&slug).await.unwrap().into_data().unwrap();
    assert_eq!(public.slug, slug);
    assert_eq!(public.spots_remaining, Some(12));

    let request = RegistrationRequest {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        answers: Default::default(),
    };
    let registration = client.public().register(&slug, &request).await.unwrap().into_data().unwrap();
    assert_eq!(registration.email, "ada@example.com");
    assert_eq!(registration.status, RegistrationStatus::Confirmed);
}

#[tokio::test]
async fn application_failure_is_normalized() {
    let server = TestServer::spawn().await;
    let client = server.client();
    let slug = EventSlug::new("sold-out").unwrap();
    let request = RegistrationRequest {
        first_name: "Grace".to_string(),
        last_name: "Hopper".to_string(),
        email: "grace@example.com".to_string(),
        answers: Default::default(),
    };

    let err = client.public().register(&slug, &request).await.unwrap_err();
    assert_eq!(err, ApiError::Application("Event is full".to_string()));
    assert_eq!(err.message(), "Event is full");
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
    let server = TestServer::spawn().await;
    let client = server.client();

    let err = client.request::<Value>("/malformed", RequestOptions::get()).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));

    let err = client
        .request::<evently_client::types::Event>("/wrong-shape", RequestOptions::get())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn non_json_error_body_falls_back_to_status_text() {
    let server = TestServer::spawn().await;
    let client = server.client();

    let err = client.request::<Value>("/server-error", RequestOptions::get()).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.message(), "HTTP 500");
}

#[tokio::test]
async fn default_and_custom_headers_are_sent() {
    let server = TestServer::spawn().await;
    let client = ApiClient::new(ClientConfig::new(server.base_url.clone()).with_bearer_token("s3cret")).unwrap();

    let data = client
        .request::<Value>("/echo-headers", RequestOptions::get().header("X-Custom", "yes"))
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(data["contentType"], "application/json");
    assert_eq!(data["authorization"], "Bearer s3cret");
    assert_eq!(data["custom"], "yes");

    let data = client
        .request::<Value>(
            "/echo-headers",
            RequestOptions::get().header("Content-Type", "application/vnd.evently+json"),
        )
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(data["contentType"], "application/vnd.evently+json");
}

#[tokio::test]
async fn network_failure_is_returned_not_raised() {
    // Grab a free port, then close it so nothing is listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(
        ClientConfig::new(format!("http://{}/api", addr)).with_connect_timeout(Duration::from_secs(2)),
    )
    .unwrap();

    let err = client.events().get(known_event_id()).await.unwrap_err();
    let ApiError::Transport(message) = &err else {
        panic!("expected transport error, got {err:?}");
    };
    assert!(!message.is_empty());
}

#[tokio::test]
async fn retry_recovers_from_transient_server_errors() {
    let server = TestServer::spawn().await;
    let client = server.client();

    let value = with_retry(
        || client.request::<u32>("/flaky", RequestOptions::get()),
        3,
        Duration::from_millis(10),
    )
    .await
    .unwrap()
    .into_data()
    .unwrap();

    assert_eq!(value, 3);
}
