//! HttpClient against a mock analytics backend.

#![cfg(feature = "native")]

use std::rc::Rc;
use std::time::Duration;

use chatlytics::api::{AnalyticsApi, ApiError, Credentials, Endpoints, HttpClient};
use chatlytics::{AppContext, AuthError, HistoryNavigator, LoadState, MemoryStorage, Route};
use serde_json::json;
use wiremock::matchers::{body_json, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpClient {
    let endpoints = Endpoints::new(&server.uri()).unwrap();
    HttpClient::new(endpoints, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_login_posts_credentials_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(header_exists("x-request-id"))
        .and(body_json(json!({ "email": "ops@example.com", "password": "secret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .login(&Credentials::new("ops@example.com", "secret"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_rejected_login_carries_error_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "error": "INVALID_PASSWORD" })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .login(&Credentials::new("ops@example.com", "wrong"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ApiError::Rejected {
            status: 401,
            code: Some("INVALID_PASSWORD".to_string()),
        }
    );
    assert!(!err.is_connectivity());
}

#[tokio::test]
async fn test_detail_envelope_is_read_as_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/signup"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "detail": "EMAIL_EXISTS" })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .signup(&Credentials::new("taken@example.com", "pw"))
        .await
        .unwrap_err();

    assert_eq!(err.code(), Some("EMAIL_EXISTS"));
}

#[tokio::test]
async fn test_json_rejection_without_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard/stats"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "boom" })))
        .mount(&server)
        .await;

    let err = client_for(&server).dashboard_stats().await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Rejected {
            status: 500,
            code: None,
        }
    );
}

#[tokio::test]
async fn test_non_json_rejection_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard/stats"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let err = client_for(&server).dashboard_stats().await.unwrap_err();
    assert!(matches!(err, ApiError::Parse(_)), "unexpected error: {:?}", err);
}

#[tokio::test]
async fn test_gateway_html_page_on_login_is_connectivity() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let ctx = AppContext::builder()
        .storage(Rc::new(MemoryStorage::new()))
        .navigator(Rc::new(HistoryNavigator::new()))
        .api(Rc::new(client_for(&server)))
        .build()
        .unwrap();

    let err = ctx
        .auth_form()
        .submit_login("ops@example.com", "secret")
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::Connectivity));
    assert_eq!(err.to_string(), "Error connecting to server. Please try again.");
    assert!(!ctx.session().is_authenticated());
}

#[tokio::test]
async fn test_stats_and_conversations_parse() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_calls": 120,
            "calls_connected": 100,
            "calls_dropped": 20,
            "avg_duration": 125.4,
            "success_rate": 83.3
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/conversations/recent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 42, "startTime": "2024-03-01T10:00:00Z" },
            { "id": "conv-7", "messages": [] }
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let stats = client.dashboard_stats().await.unwrap();
    assert_eq!(stats.total_conversations(), 120.0);
    assert_eq!(stats.average_duration_secs(), 125.4);

    let records = client.recent_conversations().await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id.to_string(), "42");
    assert_eq!(records[0].text_field("startTime"), Some("2024-03-01T10:00:00Z"));
    assert_eq!(records[1].id.to_string(), "conv-7");
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/conversations/recent"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server).recent_conversations().await.unwrap_err();
    assert!(matches!(err, ApiError::Parse(_)), "unexpected error: {:?}", err);
}

#[tokio::test]
async fn test_custom_paths_are_used() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "total_calls": 1 })))
        .expect(1)
        .mount(&server)
        .await;

    let endpoints =
        Endpoints::with_paths(&server.uri(), "/v2/login", "/v2/signup", "/v2/stats", "/v2/recent")
            .unwrap();
    let client = HttpClient::new(endpoints, Duration::from_secs(5)).unwrap();

    assert_eq!(client.dashboard_stats().await.unwrap().total_conversations(), 1.0);
}

#[tokio::test]
async fn test_full_login_and_dashboard_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_calls": 10,
            "calls_connected": 8,
            "calls_dropped": 2,
            "avg_duration": 61,
            "success_rate": 80
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/conversations/recent"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let nav = Rc::new(HistoryNavigator::new());
    let ctx = AppContext::builder()
        .storage(Rc::new(MemoryStorage::new()))
        .navigator(nav.clone())
        .api(Rc::new(client_for(&server)))
        .build()
        .unwrap();

    ctx.auth_form()
        .submit_login("ops@example.com", "secret")
        .await
        .unwrap();
    assert_eq!(nav.count(Route::Dashboard), 1);

    let state = ctx.dashboard_loader().activate(&ctx.guard()).await;
    match state {
        LoadState::Ready(snapshot) => {
            let tiles = snapshot.tiles();
            assert_eq!(tiles.average_length, "1m 1s");
            assert_eq!(tiles.completion_rate, "80%");
            assert!(snapshot.conversations.is_empty());
        }
        other => panic!("expected ready state, got {:?}", other),
    }
}

#[tokio::test]
async fn test_email_not_found_maps_to_form_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error": "EMAIL_NOT_FOUND" })),
        )
        .mount(&server)
        .await;

    let ctx = AppContext::builder()
        .storage(Rc::new(MemoryStorage::new()))
        .navigator(Rc::new(HistoryNavigator::new()))
        .api(Rc::new(client_for(&server)))
        .build()
        .unwrap();

    let err = ctx
        .auth_form()
        .submit_login("nobody@example.com", "pw")
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::EmailNotFound));
    assert_eq!(
        err.to_string(),
        "This email is not registered. Please sign up first."
    );
    assert!(!ctx.session().is_authenticated());
}
