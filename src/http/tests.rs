//! Tests for the HTTP client module

use super::*;
use crate::auth::AuthConfig;
use crate::error::Error;
use crate::pagination::RequestExecutor;
use crate::request::Request;
use crate::types::BackoffType;
use std::time::Duration;
use test_case::test_case;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> HttpClient {
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(1),
            Duration::from_millis(1),
        )
        .no_rate_limit()
        .build();
    HttpClient::with_config(config).unwrap()
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.max_retries, 3);
    assert!(config.base_url.is_none());
    assert!(config.rate_limit.is_some());
    assert_eq!(
        config.default_headers.get("Accept"),
        Some(&JSON_API_MEDIA_TYPE.to_string())
    );
    assert_eq!(config.auth, AuthConfig::None);
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://kitsu.io/api/edge")
        .timeout(Duration::from_secs(60))
        .max_retries(5)
        .backoff(
            BackoffType::Linear,
            Duration::from_millis(200),
            Duration::from_secs(30),
        )
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .auth(AuthConfig::bearer("token"))
        .build();

    assert_eq!(config.base_url, Some("https://kitsu.io/api/edge".to_string()));
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.max_retries, 5);
    assert_eq!(config.backoff_type, BackoffType::Linear);
    assert_eq!(config.initial_backoff, Duration::from_millis(200));
    assert_eq!(config.max_backoff, Duration::from_secs(30));
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
    assert!(matches!(config.auth, AuthConfig::Bearer { .. }));
}

#[test]
fn test_calculate_backoff() {
    let config = HttpClientConfig::builder()
        .backoff(
            BackoffType::Exponential,
            Duration::from_millis(100),
            Duration::from_millis(500),
        )
        .no_rate_limit()
        .build();
    let client = HttpClient::with_config(config).unwrap();

    assert_eq!(client.calculate_backoff(0), Duration::from_millis(100));
    assert_eq!(client.calculate_backoff(1), Duration::from_millis(200));
    assert_eq!(client.calculate_backoff(2), Duration::from_millis(400));
    assert_eq!(client.calculate_backoff(3), Duration::from_millis(500));
    assert_eq!(client.calculate_backoff(40), Duration::from_millis(500));
}

#[test_case(BackoffType::Linear ; "linear")]
#[test_case(BackoffType::Exponential ; "exponential")]
fn test_calculate_backoff_saturates(backoff: BackoffType) {
    let config = HttpClientConfig::builder()
        .backoff(backoff, Duration::MAX, Duration::from_secs(60))
        .no_rate_limit()
        .build();
    let client = HttpClient::with_config(config).unwrap();

    assert_eq!(client.calculate_backoff(u32::MAX), Duration::from_secs(60));
}

#[tokio::test]
async fn test_fetch_relative_path_with_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/library-entries"))
        .and(query_param("filter[userId]", "1"))
        .and(query_param("page[limit]", "2"))
        .and(header("Accept", JSON_API_MEDIA_TYPE))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"data": []}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let request = Request::get("/library-entries")
        .query("filter[userId]", "1")
        .query("page[limit]", "2");

    let body = client.fetch_text(&request).await.unwrap();
    assert_eq!(body, r#"{"data": []}"#);
}

#[tokio::test]
async fn test_absolute_link_sent_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/elsewhere/library-entries"))
        .and(query_param("page[offset]", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    // base URL would add an /api prefix to relative paths only
    let config = HttpClientConfig::builder()
        .base_url(format!("{}/api", server.uri()))
        .no_rate_limit()
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let link = format!(
        "{}/elsewhere/library-entries?page%5Boffset%5D=50",
        server.uri()
    );
    let body = client.execute(&Request::for_link(&link)).await.unwrap();
    assert_eq!(body, "{}");
}

#[tokio::test]
async fn test_bearer_auth_applied() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .and(header("Authorization", "Bearer secret123"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .auth(AuthConfig::bearer("secret123"))
        .no_rate_limit()
        .build();
    let client = HttpClient::with_config(config).unwrap();

    client.fetch_text(&Request::get("/users")).await.unwrap();
}

#[tokio::test]
async fn test_request_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/anime"))
        .and(header("X-Request-Id", "req-456"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let response = client
        .send(&Request::get("/anime").header("X-Request-Id", "req-456"))
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_retry_on_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let body = client.fetch_text(&Request::get("/flaky")).await.unwrap();
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_server_error_after_retries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(4)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.fetch_text(&Request::get("/down")).await.unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 500, .. }));
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_non_retryable_server_error_fails_fast() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/unsupported"))
        .respond_with(ResponseTemplate::new(501).set_body_string("nope"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .fetch_text(&Request::get("/unsupported"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 501, .. }));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_client_error_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.fetch_text(&Request::get("/missing")).await.unwrap_err();

    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "not found");
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limited_exhausts_retries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/busy"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .expect(2)
        .mount(&server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .max_retries(1)
        .no_rate_limit()
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let err = client.fetch_text(&Request::get("/busy")).await.unwrap_err();
    assert!(matches!(
        err,
        Error::RateLimited {
            retry_after_seconds: 0
        }
    ));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let config = HttpClientConfig::builder()
        .base_url("http://127.0.0.1:9")
        .max_retries(0)
        .no_rate_limit()
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let err = client.fetch_text(&Request::get("/anime")).await.unwrap_err();
    assert!(err.is_transport());
}
