//! Integration tests for RestWaitlist against an in-process fake backend.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use innercircle_client::{BackendConfig, RestWaitlist};
use innercircle_core::{
    ChangeEvent, InsertError, ReferralCode, SignupController, SignupError, SignupForm,
    WaitlistClient,
};

const ANON_KEY: &str = "test-anon-key";

#[derive(Clone, Default)]
struct FakeBackend {
    rows: Arc<Mutex<Vec<Value>>>,
    issued: Arc<Mutex<u32>>,
}

impl FakeBackend {
    fn seed(&self, name: &str, email: &str, code: &str) {
        self.rows.lock().unwrap().push(json!({
            "full_name": name,
            "email": email,
            "city": "london",
            "referral_code": code,
            "referred_by": null,
        }));
    }

    fn rows(&self) -> Vec<Value> {
        self.rows.lock().unwrap().clone()
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers.get("apikey").and_then(|v| v.to_str().ok()) == Some(ANON_KEY)
        && headers.get("authorization").and_then(|v| v.to_str().ok())
            == Some(format!("Bearer {ANON_KEY}").as_str())
}

async fn select_rows(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let rows = backend.rows();
    let filtered: Vec<Value> = rows
        .iter()
        .filter(|row| {
            ["referral_code", "email"].iter().all(|column| match params.get(*column) {
                Some(filter) => {
                    let wanted = filter.strip_prefix("eq.").unwrap_or(filter);
                    row[*column].as_str() == Some(wanted)
                }
                None => true,
            })
        })
        .take(params.get("limit").and_then(|l| l.parse().ok()).unwrap_or(usize::MAX))
        .map(|row| match params.get("select").map(String::as_str) {
            Some("*") | None => row.clone(),
            Some(column) => {
                let mut projected = serde_json::Map::new();
                projected.insert(column.to_string(), row[column].clone());
                Value::Object(projected)
            }
        })
        .collect();

    let mut response_headers = HeaderMap::new();
    if headers.get("prefer").and_then(|v| v.to_str().ok()) == Some("count=exact") {
        let range = match rows.len() {
            0 => "*/0".to_string(),
            n => format!("0-{}/{}", n - 1, n),
        };
        response_headers.insert("content-range", HeaderValue::from_str(&range).unwrap());
    }
    (StatusCode::OK, response_headers, Json(filtered)).into_response()
}

async fn insert_row(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Json(row): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let mut rows = backend.rows.lock().unwrap();
    if rows.iter().any(|r| r["email"] == row["email"]) {
        let body = json!({
            "code": "23505",
            "message": "duplicate key value violates unique constraint \"waitlist_email_key\"",
            "details": format!("Key (email)=({}) already exists.", row["email"].as_str().unwrap_or_default()),
        });
        return (StatusCode::CONFLICT, Json(body)).into_response();
    }
    rows.push(row);
    StatusCode::CREATED.into_response()
}

async fn generate_code(State(backend): State<FakeBackend>) -> Json<String> {
    let mut issued = backend.issued.lock().unwrap();
    *issued += 1;
    Json(format!("CODE{:04}", *issued))
}

async fn spawn_backend(backend: FakeBackend) -> SocketAddr {
    let app = Router::new()
        .route("/rest/v1/waitlist", get(select_rows).post(insert_row))
        .route("/rest/v1/rpc/generate_referral_code", post(generate_code))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client_for(addr: SocketAddr) -> RestWaitlist {
    let mut config = BackendConfig::new(format!("http://{addr}"), ANON_KEY);
    config.poll_interval_ms = 20;
    config.request_timeout_ms = 2_000;
    RestWaitlist::new(config).unwrap()
}

#[tokio::test]
async fn test_lookup_and_email_check() {
    let backend = FakeBackend::default();
    backend.seed("Ada Lovelace", "ada@example.com", "ADA123");
    let client = client_for(spawn_backend(backend).await);

    let referrer = client
        .lookup_by_referral_code(&ReferralCode::new("ADA123"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(referrer.full_name, "Ada Lovelace");

    assert!(
        client
            .lookup_by_referral_code(&ReferralCode::new("NOPE99"))
            .await
            .unwrap()
            .is_none()
    );

    assert!(client.email_exists("ada@example.com").await.unwrap());
    assert!(!client.email_exists("grace@example.com").await.unwrap());
}

#[tokio::test]
async fn test_count_and_generate() {
    let backend = FakeBackend::default();
    let client = client_for(spawn_backend(backend.clone()).await);

    assert_eq!(client.count_entries().await.unwrap(), 0);
    backend.seed("Ada Lovelace", "ada@example.com", "ADA123");
    backend.seed("Grace Hopper", "grace@example.com", "GRACE1");
    assert_eq!(client.count_entries().await.unwrap(), 2);

    let first = client.generate_referral_code().await.unwrap();
    let second = client.generate_referral_code().await.unwrap();
    assert_ne!(first, second);
}

#[tokio::test]
async fn test_signup_through_rest_backend() {
    let backend = FakeBackend::default();
    backend.seed("Ada Lovelace", "ada@example.com", "ADA123");
    let client = Arc::new(client_for(spawn_backend(backend.clone()).await));
    let controller = SignupController::new(client);

    let form = SignupForm::new("Grace Hopper", " Grace@Example.com ", "Arlington").referred_by("ADA123");
    let signup = controller.submit(&form).await.unwrap();
    assert_eq!(signup.referrer_name.as_deref(), Some("Ada Lovelace"));

    let rows = backend.rows();
    let stored = rows.iter().find(|r| r["email"] == "grace@example.com").unwrap();
    assert_eq!(stored["referred_by"], "ADA123");
    assert_eq!(stored["referral_code"], signup.referral_code.as_str());

    let again = controller.submit(&form).await.unwrap_err();
    assert_eq!(again, SignupError::DuplicateEmail);
}

#[tokio::test]
async fn test_duplicate_insert_is_classified() {
    let backend = FakeBackend::default();
    backend.seed("Ada Lovelace", "ada@example.com", "ADA123");
    let client = client_for(spawn_backend(backend).await);

    let entry = SignupForm::new("Ada", "ada@example.com", "london")
        .to_entry(ReferralCode::new("NEW001"), None);
    assert_eq!(client.insert_entry(&entry).await, Err(InsertError::DuplicateEmail));
}

#[tokio::test]
async fn test_wrong_key_is_transient() {
    let addr = spawn_backend(FakeBackend::default()).await;
    let client = RestWaitlist::new(BackendConfig::new(format!("http://{addr}"), "wrong")).unwrap();

    assert!(client.count_entries().await.is_err());
    let entry = SignupForm::new("Ada", "ada@example.com", "london")
        .to_entry(ReferralCode::new("NEW001"), None);
    assert!(matches!(
        client.insert_entry(&entry).await,
        Err(InsertError::Transient(_))
    ));
}

#[tokio::test]
async fn test_unreachable_backend_maps_to_retry_message() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let controller = SignupController::new(Arc::new(client_for(addr)));
    let err = controller
        .submit(&SignupForm::new("Ada", "ada@example.com", "london"))
        .await
        .unwrap_err();
    assert!(matches!(err, SignupError::CodeGeneration(_)));
    assert_eq!(
        err.user_message(),
        "something went wrong generating your referral code. please try again!"
    );
}

#[tokio::test]
async fn test_subscription_reports_inserts_until_dropped() {
    let backend = FakeBackend::default();
    let client = client_for(spawn_backend(backend.clone()).await);

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let subscription = client.subscribe_to_changes(Arc::new(move |event| {
        let _ = tx.send(event);
    }));
    assert_eq!(subscription.channel(), "waitlist");

    // Let the poller establish its baseline before the insert.
    tokio::time::sleep(Duration::from_millis(100)).await;
    backend.seed("Ada Lovelace", "ada@example.com", "ADA123");

    let event = tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("insert should be reported")
        .unwrap();
    assert_eq!(event, ChangeEvent::Insert);

    drop(subscription);
    let drained = tokio::time::timeout(Duration::from_secs(1), async {
        while rx.recv().await.is_some() {}
    })
    .await;
    assert!(drained.is_ok());
}
