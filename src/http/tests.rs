//! Tests for the HTTP client module

use super::*;
use crate::config::HttpConfig;
use crate::error::Error;
use crate::types::BackoffType;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_config() -> HttpConfig {
    HttpConfig::default()
        .without_rate_limit()
        .with_backoff(
            BackoffType::Constant,
            Duration::from_millis(10),
            Duration::from_millis(10),
        )
}

#[tokio::test]
async fn test_get_text_with_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/memberlist"))
        .and(query_param("page", "start"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new(fast_config()).unwrap();
    let body = client
        .get_text(
            &format!("{}/memberlist", mock_server.uri()),
            &[("page", "start")],
        )
        .await
        .unwrap();

    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_default_headers_are_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/list"))
        .and(header("X-Table", "members"))
        .respond_with(ResponseTemplate::new(200).set_body_string("7"))
        .mount(&mock_server)
        .await;

    let mut config = fast_config();
    config
        .headers
        .insert("X-Table".to_string(), "members".to_string());

    let client = HttpClient::new(config).unwrap();
    let body = client
        .get_text(&format!("{}/list", mock_server.uri()), &[])
        .await
        .unwrap();
    assert_eq!(body, "7");
}

#[tokio::test]
async fn test_404_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpClient::new(fast_config()).unwrap();
    let err = client
        .get_text(&format!("{}/missing", mock_server.uri()), &[])
        .await
        .unwrap_err();

    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "Not found");
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_retry_on_500() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_string("recovered"))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new(fast_config()).unwrap();
    let body = client
        .get_text(&format!("{}/flaky", mock_server.uri()), &[])
        .await
        .unwrap();
    assert_eq!(body, "recovered");
}

#[tokio::test]
async fn test_retries_exhausted_returns_last_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = HttpClient::new(fast_config().with_max_retries(2)).unwrap();
    let err = client
        .get_text(&format!("{}/down", mock_server.uri()), &[])
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 503, .. }));
    assert!(err.is_transport_failure());
}

#[tokio::test]
async fn test_timeout_is_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(2500)))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_body_string("fast now"))
        .mount(&mock_server)
        .await;

    let mut config = fast_config().with_max_retries(1);
    config.timeout_secs = 1;
    let client = HttpClient::new(config).unwrap();
    let body = client
        .get_text(&format!("{}/slow", mock_server.uri()), &[])
        .await
        .unwrap();
    assert_eq!(body, "fast now");
}

#[tokio::test]
async fn test_connection_refused_is_retried_then_reported() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpClient::new(fast_config().with_max_retries(2)).unwrap();
    let err = client
        .get_text(&format!("http://{addr}/list"), &[])
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Http(ref e) if e.is_connect()));
    assert!(err.is_retryable());
    assert!(err.is_transport_failure());
}

#[tokio::test]
async fn test_rate_limited_without_retries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/busy"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "3"))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new(fast_config().with_max_retries(0)).unwrap();
    let err = client
        .get_text(&format!("{}/busy", mock_server.uri()), &[])
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::RateLimited {
            retry_after_seconds: 3
        }
    ));
}

#[test]
fn test_calculate_backoff_linear() {
    let config = HttpConfig::default().with_backoff(
        BackoffType::Linear,
        Duration::from_millis(100),
        Duration::from_secs(10),
    );
    let client = HttpClient::new(config).unwrap();

    assert_eq!(client.calculate_backoff(0), Duration::from_millis(100));
    assert_eq!(client.calculate_backoff(2), Duration::from_millis(300));
}

#[test]
fn test_calculate_backoff_exponential_respects_max() {
    let config = HttpConfig::default().with_backoff(
        BackoffType::Exponential,
        Duration::from_millis(100),
        Duration::from_millis(500),
    );
    let client = HttpClient::new(config).unwrap();

    assert_eq!(client.calculate_backoff(1), Duration::from_millis(200));
    assert_eq!(client.calculate_backoff(2), Duration::from_millis(400));
    assert_eq!(client.calculate_backoff(10), Duration::from_millis(500));
}

#[test]
fn test_rate_limiter_follows_config() {
    let client = HttpClient::new(HttpConfig::default()).unwrap();
    assert!(client.has_rate_limiter());

    let client = HttpClient::new(HttpConfig::default().without_rate_limit()).unwrap();
    assert!(!client.has_rate_limiter());

    let debug = format!("{client:?}");
    assert!(debug.contains("HttpClient"));
}
