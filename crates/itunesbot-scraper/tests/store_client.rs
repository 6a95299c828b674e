//! Integration tests for `StoreClient::fetch_page`.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no
//! real network traffic is made.

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use itunesbot_scraper::{PageFetcher, ScraperError, StoreClient};

/// Builds a `StoreClient` suitable for tests: 5-second timeout, descriptive UA, no retries.
fn test_client() -> StoreClient {
    StoreClient::new(5, "itunesbot-test/0.1", 0, 0).expect("failed to build test StoreClient")
}

/// Builds a `StoreClient` with retries enabled for retry-specific tests.
fn test_client_with_retries(max_retries: u32) -> StoreClient {
    StoreClient::new(5, "itunesbot-test/0.1", max_retries, 0)
        .expect("failed to build test StoreClient")
}

// ---------------------------------------------------------------------------
// Successful responses
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_page_returns_body_and_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/us/app/shop-buddy/id1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&server)
        .await;

    let url = format!("{}/us/app/shop-buddy/id1", server.uri());
    let page = test_client().fetch_page(&url).await.unwrap();

    assert_eq!(page.status, 200);
    assert!(page.is_ok());
    assert_eq!(page.body, "<html>ok</html>");
    assert_eq!(page.url, url);
}

#[tokio::test]
async fn fetch_page_sends_configured_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("user-agent", "itunesbot-test/0.1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hi"))
        .expect(1)
        .mount(&server)
        .await;

    let page = test_client()
        .fetch(&format!("{}/us/genre/x/id1", server.uri()))
        .await
        .unwrap();
    assert_eq!(page.body, "hi");
}

// ---------------------------------------------------------------------------
// Non-2xx responses are pages, not errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_is_returned_as_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("gone"))
        .expect(1)
        .mount(&server)
        .await;

    let page = test_client_with_retries(3)
        .fetch_page(&format!("{}/us/app/x/id9", server.uri()))
        .await
        .unwrap();
    assert_eq!(page.status, 404);
    assert!(!page.is_ok());
}

#[tokio::test]
async fn server_error_is_returned_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let page = test_client_with_retries(3)
        .fetch_page(&format!("{}/us/app/x/id9", server.uri()))
        .await
        .unwrap();
    assert_eq!(page.status, 503);
}

// ---------------------------------------------------------------------------
// 429 handling
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rate_limited_without_retries_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .expect(1)
        .mount(&server)
        .await;

    let result = test_client()
        .fetch_page(&format!("{}/us/app/x/id9", server.uri()))
        .await;
    match result {
        Err(ScraperError::RateLimited {
            domain,
            retry_after_secs,
        }) => {
            assert_eq!(domain, "127.0.0.1");
            assert_eq!(retry_after_secs, 0);
        }
        other => panic!("expected RateLimited, got: {other:?}"),
    }
}

#[tokio::test]
async fn rate_limited_then_ok_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("finally"))
        .expect(1)
        .mount(&server)
        .await;

    let page = test_client_with_retries(3)
        .fetch_page(&format!("{}/us/app/x/id9", server.uri()))
        .await
        .unwrap();
    assert_eq!(page.body, "finally");
}

#[tokio::test]
async fn connection_refused_is_http_error() {
    let client = test_client();
    let result = client.fetch_page("http://127.0.0.1:1/us/app/x/id1").await;
    assert!(matches!(result, Err(ScraperError::Http(_))), "got: {result:?}");
}
