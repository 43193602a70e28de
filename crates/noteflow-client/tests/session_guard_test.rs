//! Integration tests for the session guard against a mock backend.
//!
//! These exercise the full path: authenticated request → 401 → token
//! refresh → replay with the fresh credential, including the single-flight
//! guarantee for concurrent failures of the same logical request.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use noteflow_client::{ApiClient, ApiClientBuilder, AuthStore, InMemoryAuthStore};
use noteflow_core::{Credential, Error};

fn credential(token: &str) -> Credential {
    Credential {
        user_id: Uuid::new_v4(),
        email: "ada@example.com".to_string(),
        display_name: None,
        access_token: token.to_string(),
    }
}

fn notes_body() -> serde_json::Value {
    serde_json::json!([{
        "id": Uuid::new_v4(),
        "title": "Weekend trip",
        "content": "<p>pack light</p>",
        "start_date": 1_700_000_000_000i64,
        "rating": 4.0
    }])
}

async fn client_for(server: &MockServer, auth: Arc<InMemoryAuthStore>) -> ApiClient {
    ApiClientBuilder::new()
        .base_url(server.uri())
        .build_with_auth(auth)
        .expect("client should build against the mock server URI")
}

async fn mount_refresh_ok(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "fresh"
            })),
        )
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_expired_token_refreshes_and_replays() {
    let server = MockServer::start().await;

    // The stale credential is rejected once.
    Mock::given(method("GET"))
        .and(path("/notes"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    mount_refresh_ok(&server, 1).await;

    // The replay with the refreshed token succeeds.
    Mock::given(method("GET"))
        .and(path("/notes"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(notes_body()))
        .expect(1)
        .mount(&server)
        .await;

    let auth = Arc::new(InMemoryAuthStore::with_credential(credential("stale")));
    let client = client_for(&server, Arc::clone(&auth)).await;

    let notes = client.list_notes().await.expect("recovered call succeeds");
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "Weekend trip");

    // The refreshed token was merged into the stored credential.
    let stored = auth.current().expect("credential survives refresh");
    assert_eq!(stored.access_token, "fresh");
    assert_eq!(stored.email, "ada@example.com");
}

#[tokio::test]
async fn test_concurrent_failures_share_a_single_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/notes"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;

    // Delay the refresh so the second failure arrives while the first
    // refresh is still in flight; expect(1) is the single-flight assertion.
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "access_token": "fresh" }))
                .set_delay(Duration::from_millis(150)),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/notes"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(notes_body()))
        .expect(2)
        .mount(&server)
        .await;

    let auth = Arc::new(InMemoryAuthStore::with_credential(credential("stale")));
    let client = client_for(&server, auth).await;

    let (first, second) = tokio::join!(client.list_notes(), client.list_notes());
    assert_eq!(first.expect("leader call succeeds").len(), 1);
    assert_eq!(second.expect("joined call succeeds").len(), 1);
}

#[tokio::test]
async fn test_refresh_failure_surfaces_the_original_unauthorized_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/notes"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let auth = Arc::new(InMemoryAuthStore::with_credential(credential("stale")));
    let client = client_for(&server, Arc::clone(&auth)).await;

    // The caller sees the original 401 class, not the refresh 500.
    match client.list_notes().await {
        Err(Error::Unauthorized { status: 401, .. }) => {}
        other => panic!("expected the original unauthorized error, got {other:?}"),
    }
    // The stale credential is left in place.
    assert_eq!(auth.current().unwrap().access_token, "stale");
}

#[tokio::test]
async fn test_non_auth_failure_passes_through_without_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/notes"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    // The refresh endpoint must never be touched for a 500.
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let auth = Arc::new(InMemoryAuthStore::with_credential(credential("stale")));
    let client = client_for(&server, auth).await;

    match client.list_notes().await {
        Err(Error::Api { status: 500, .. }) => {}
        other => panic!("expected a pass-through API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_credential_replays_best_effort_without_merge() {
    let server = MockServer::start().await;

    // First call (no bearer header) is rejected; mount order matters, the
    // one-shot 401 consumes the first request and the replay falls through
    // to the 200 mock below.
    Mock::given(method("GET"))
        .and(path("/notes"))
        .respond_with(ResponseTemplate::new(401))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    mount_refresh_ok(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/notes"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(notes_body()))
        .expect(1)
        .mount(&server)
        .await;

    let auth = Arc::new(InMemoryAuthStore::new());
    let client = client_for(&server, Arc::clone(&auth)).await;

    let notes = client.list_notes().await.expect("best-effort replay");
    assert_eq!(notes.len(), 1);
    // Nothing was written back into the empty store.
    assert!(auth.current().is_none());
}

#[tokio::test]
async fn test_login_stores_credential_and_logout_clears_it() {
    let server = MockServer::start().await;

    let user_id = Uuid::new_v4();
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "user_id": user_id,
            "email": "ada@example.com",
            "access_token": "first"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let auth = Arc::new(InMemoryAuthStore::new());
    let client = client_for(&server, Arc::clone(&auth)).await;

    let credential = client.login("ada@example.com", "hunter2").await.unwrap();
    assert_eq!(credential.user_id, user_id);
    assert_eq!(auth.current().unwrap().access_token, "first");

    client.logout();
    assert!(auth.current().is_none());
}

#[tokio::test]
async fn test_valid_token_fetches_labels_without_guard_involvement() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/labels"))
        .and(header("authorization", "Bearer good"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "id": Uuid::new_v4(),
            "name": "Travel",
            "color": "#FFB300",
            "kind": "category"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let auth = Arc::new(InMemoryAuthStore::with_credential(credential("good")));
    let client = client_for(&server, auth).await;

    let labels = client.list_labels().await.unwrap();
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].name, "Travel");
}
