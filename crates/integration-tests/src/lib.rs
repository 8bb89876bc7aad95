//! Integration tests for Bookverse.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bookverse-integration-tests
//! ```
//!
//! Nothing external is needed: the catalog is a `wiremock` server and the
//! storefront router is driven in-process with `tower::ServiceExt::oneshot`.
//!
//! # Test Categories
//!
//! - `catalog` - Google Books client against a mock server
//! - `routes` - Pages, guard, login and cart flows through the full router

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use bookverse_storefront::config::{
    CatalogConfig, DemoAccountConfig, SimulatedLatency, StorefrontConfig,
};
use bookverse_storefront::state::AppState;
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::MockServer;

/// Path prefix the mock catalog is served under.
pub const API_PREFIX: &str = "/books/v1";

/// Catalog root URL on `server`.
#[must_use]
pub fn api_url(server: &MockServer) -> String {
    format!("{}{API_PREFIX}", server.uri())
}

/// Storefront configuration pointing at `api_url`, with no simulated delays.
#[must_use]
pub fn test_config(api_url: &str) -> StorefrontConfig {
    StorefrontConfig {
        host: std::net::Ipv4Addr::LOCALHOST.into(),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        catalog: CatalogConfig::with_api_url(api_url),
        demo_account: DemoAccountConfig::default(),
        latency: SimulatedLatency::NONE,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// The full storefront router backed by the mock catalog.
#[must_use]
pub fn test_app(server: &MockServer) -> Router {
    bookverse_storefront::app(AppState::new(test_config(&api_url(server))))
}

/// A Google Books volume with the given id and title.
#[must_use]
pub fn volume_json(id: &str, title: &str) -> Value {
    json!({
        "kind": "books#volume",
        "id": id,
        "volumeInfo": {
            "title": title,
            "authors": ["Test Author"],
            "publisher": "Test Press",
            "publishedDate": "2021",
            "description": "A book used in tests.",
            "industryIdentifiers": [{ "type": "ISBN_13", "identifier": "9780000000001" }],
            "pageCount": 321,
            "categories": ["Computers"],
            "averageRating": 4.5,
            "imageLinks": { "thumbnail": "http://books.google.com/cover?id=1" }
        },
        "saleInfo": {
            "retailPrice": { "amount": 20.0, "currencyCode": "USD" }
        }
    })
}

/// A search response listing `volumes`.
#[must_use]
pub fn volumes_json(volumes: Vec<Value>) -> Value {
    json!({
        "kind": "books#volumes",
        "totalItems": volumes.len(),
        "items": volumes
    })
}

/// Send one request through `app`.
///
/// # Panics
///
/// Panics if the router fails, which it never does for a valid request.
pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone()
        .oneshot(request)
        .await
        .expect("router is infallible")
}

/// Build a GET request, optionally carrying a session cookie.
///
/// # Panics
///
/// Panics if `uri` is not a valid request URI.
#[must_use]
pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("valid request")
}

/// Build a form POST, optionally carrying a session cookie.
///
/// # Panics
///
/// Panics if `uri` is not a valid request URI.
#[must_use]
pub fn post_form(uri: &str, form: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(form.to_string())).expect("valid request")
}

/// The `name=value` pair of the session cookie set by `response`, if any.
#[must_use]
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("bookverse_session="))
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}

/// The `Location` header of a redirect.
#[must_use]
pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

/// Read the whole body as text.
///
/// # Panics
///
/// Panics if the body cannot be read or is not UTF-8.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    String::from_utf8(bytes.to_vec()).expect("UTF-8 body")
}
