//! Tests for the HTTP module

use super::*;
use crate::config::StockConfig;
use crate::error::Error;
use crate::types::{BackoffType, HeaderMap};
use pretty_assertions::assert_eq;
use std::time::Duration;
use test_case::test_case;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{body_bytes, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client() -> HttpClient {
    let config = HttpClientConfig::builder()
        .max_retries(2)
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(10),
            Duration::from_secs(1),
        )
        .no_rate_limit()
        .build();
    HttpClient::with_config(config).unwrap()
}

fn stock_config() -> StockConfig {
    StockConfig::builder()
        .api_key("test-key")
        .product("Stock Client/1.0")
        .product_location("Desktop")
        .build()
        .unwrap()
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.max_retries, 3);
    assert!(config.rate_limit.is_some());
    assert!(config.user_agent.starts_with("stock-api-sdk/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .timeout(Duration::from_secs(60))
        .max_retries(5)
        .backoff(
            BackoffType::Linear,
            Duration::from_millis(200),
            Duration::from_secs(30),
        )
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .build();

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
}

// ============================================================================
// Headers
// ============================================================================

#[test]
fn test_api_headers() {
    let headers = ApiHeaders::build(&stock_config(), Some("token-1"));

    assert_eq!(headers.get(X_API_KEY).unwrap(), "test-key");
    assert_eq!(headers.get(X_PRODUCT).unwrap(), "Stock Client/1.0");
    assert_eq!(headers.get(X_PRODUCT_LOCATION).unwrap(), "Desktop");
    assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer token-1");
    assert_eq!(headers.get(X_REQUEST_ID).unwrap().len(), 36);
}

#[test]
fn test_api_headers_without_token() {
    let headers = ApiHeaders::build(&stock_config(), None);
    assert!(!headers.contains_key(AUTHORIZATION));
}

#[test]
fn test_request_id_is_fresh_per_call() {
    let config = stock_config();
    let first = ApiHeaders::build(&config, None);
    let second = ApiHeaders::build(&config, None);
    assert_ne!(first.get(X_REQUEST_ID), second.get(X_REQUEST_ID));
}

// ============================================================================
// Requests
// ============================================================================

#[tokio::test]
async fn test_get_returns_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Rest/Media/1/Search/Files"))
        .and(query_param("locale", "en_US"))
        .and(header("x-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"nb_results":1}"#))
        .mount(&mock_server)
        .await;

    let headers = ApiHeaders::build(&stock_config(), None);
    let url = format!("{}/Rest/Media/1/Search/Files?locale=en_US", mock_server.uri());
    let body = test_client().get(&url, &headers).await.unwrap();

    assert_eq!(body, r#"{"nb_results":1}"#);
}

#[tokio::test]
async fn test_no_content_returns_marker() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let body = test_client()
        .get(&mock_server.uri(), &HeaderMap::new())
        .await
        .unwrap();
    assert_eq!(body, NO_CONTENT_BODY);
}

#[tokio::test]
async fn test_post_sends_bytes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(header("content-type", "application/json"))
        .and(body_bytes(br#"{"a":1}"#.to_vec()))
        .respond_with(ResponseTemplate::new(201).set_body_string("created"))
        .mount(&mock_server)
        .await;

    let url = format!("{}/upload", mock_server.uri());
    let body = test_client()
        .post(
            &url,
            &HeaderMap::new(),
            br#"{"a":1}"#.to_vec(),
            "application/json",
        )
        .await
        .unwrap();
    assert_eq!(body, "created");
}

#[tokio::test]
async fn test_multipart_sends_file_part() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/similar"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&mock_server)
        .await;

    let url = format!("{}/similar", mock_server.uri());
    let image = b"\x89PNG fake image".to_vec();
    test_client()
        .multipart(&url, image.clone(), &HeaderMap::new())
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let content_type = requests[0]
        .headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.starts_with("multipart/form-data"));

    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains(r#"name="file""#));
    assert!(requests[0]
        .body
        .windows(image.len())
        .any(|window| window == image.as_slice()));
}

#[tokio::test]
async fn test_client_error_carries_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_string(r#"{"error":"forbidden"}"#))
        .mount(&mock_server)
        .await;

    let err = test_client()
        .get(&mock_server.uri(), &HeaderMap::new())
        .await
        .unwrap_err();
    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 403);
            assert_eq!(body, r#"{"error":"forbidden"}"#);
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_after_retries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down"))
        .expect(3)
        .mount(&mock_server)
        .await;

    let err = test_client()
        .get(&mock_server.uri(), &HeaderMap::new())
        .await
        .unwrap_err();
    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, SERVER_ERROR_MESSAGE);
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_retry_on_500_then_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&mock_server)
        .await;

    let url = format!("{}/flaky", mock_server.uri());
    let body = test_client().get(&url, &HeaderMap::new()).await.unwrap();
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_rate_limit_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "0"))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&mock_server)
        .await;

    let body = test_client()
        .get(&mock_server.uri(), &HeaderMap::new())
        .await
        .unwrap();
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_rate_limit_exhausted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "0"))
        .mount(&mock_server)
        .await;

    let err = test_client()
        .get(&mock_server.uri(), &HeaderMap::new())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::RateLimited {
            retry_after_seconds: 0
        }
    ));
}

#[test_case(429 ; "rate limited")]
#[test_case(503 ; "unavailable")]
#[test_case(520 ; "origin error")]
#[test_case(404 ; "not found")]
#[tokio::test]
async fn test_retry_decision_matches_error_classification(status: u16) {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(status).insert_header("retry-after", "0"))
        .mount(&mock_server)
        .await;

    let err = test_client()
        .get(&mock_server.uri(), &HeaderMap::new())
        .await
        .unwrap_err();
    let attempts = mock_server.received_requests().await.unwrap().len();
    let retried = attempts > 1;

    assert_eq!(err.is_retryable(), retried);
    assert_eq!(Error::http_status(status, "").is_retryable(), retried);
}

#[tokio::test]
async fn test_truncated_client_error_body_is_reported() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/truncated", listener.local_addr().unwrap());

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 1024];
        let _ = socket.read(&mut request).await;
        socket
            .write_all(b"HTTP/1.1 404 Not Found\r\nContent-Length: 100\r\n\r\npartial")
            .await
            .unwrap();
        socket.shutdown().await.unwrap();
    });

    let err = test_client().get(&url, &HeaderMap::new()).await.unwrap_err();
    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 404);
            assert!(body.starts_with("<unreadable body:"), "body was {body:?}");
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_url_is_validation_error() {
    let err = test_client().get("", &HeaderMap::new()).await.unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
}

#[tokio::test]
async fn test_malformed_url_is_rejected() {
    let err = test_client()
        .get("no scheme here", &HeaderMap::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidUrl(_)));
}

#[tokio::test]
async fn test_transport_through_arc() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("shared"))
        .mount(&mock_server)
        .await;

    let transport: std::sync::Arc<dyn Transport> = std::sync::Arc::new(test_client());
    let body = transport
        .get(&mock_server.uri(), &HeaderMap::new())
        .await
        .unwrap();
    assert_eq!(body, "shared");
}
