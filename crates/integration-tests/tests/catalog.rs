//! Integration tests for the Google Books client.
//!
//! Each test runs its own `wiremock` server, so request expectations are
//! verified when the server drops.

#![allow(clippy::unwrap_used)]

use bookverse_core::{BookId, Price};
use bookverse_integration_tests::{API_PREFIX, api_url, volume_json, volumes_json};
use bookverse_storefront::catalog::{CatalogClient, CatalogError};
use bookverse_storefront::config::CatalogConfig;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> CatalogClient {
    CatalogClient::new(&CatalogConfig::with_api_url(api_url(server)))
}

fn volumes_path() -> String {
    format!("{API_PREFIX}/volumes")
}

// =============================================================================
// Search
// =============================================================================

#[tokio::test]
async fn test_search_maps_volumes_to_books() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(volumes_path()))
        .and(query_param("q", "inauthor:knuth"))
        .and(query_param("maxResults", "5"))
        .and(query_param("printType", "books"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(volumes_json(vec![volume_json("taocp1", "Fundamental Algorithms")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let books = client(&server).search("inauthor:knuth", 5).await.unwrap();

    assert_eq!(books.len(), 1);
    let book = &books[0];
    assert_eq!(book.id.as_str(), "taocp1");
    assert_eq!(book.title, "Fundamental Algorithms");
    assert_eq!(book.author, "Test Author");
    assert_eq!(book.price, Price::from_cents(2000));
    assert_eq!(book.genre, "Computers");
    assert_eq!(book.isbn, "9780000000001");
    assert_eq!(book.pages, 321);
    assert_eq!(book.cover_image, "https://books.google.com/cover?id=1");
}

#[tokio::test]
async fn test_blank_search_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(volumes_json(vec![])))
        .expect(0)
        .mount(&server)
        .await;

    let books = client(&server).search("  \t ", 20).await.unwrap();

    assert!(books.is_empty());
}

#[tokio::test]
async fn test_search_drops_entries_without_volume_info() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(volumes_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(volumes_json(vec![
            volume_json("kept", "Kept"),
            json!({ "kind": "books#volume", "id": "bare" }),
        ])))
        .mount(&server)
        .await;

    let books = client(&server).search("anything", 20).await.unwrap();

    let ids: Vec<&str> = books.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["kept"]);
}

#[tokio::test]
async fn test_search_keeps_good_entries_beside_mistyped_ones() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(volumes_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(volumes_json(vec![
            volume_json("good", "Good"),
            json!({ "id": "odd", "volumeInfo": { "title": "Odd", "pageCount": 12.0 } }),
        ])))
        .mount(&server)
        .await;

    let books = client(&server).search("mixed", 20).await.unwrap();

    let ids: Vec<&str> = books.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["good"]);
}

#[tokio::test]
async fn test_search_without_items_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(volumes_path()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "kind": "books#volumes", "totalItems": 0 })),
        )
        .mount(&server)
        .await;

    assert!(client(&server).search("zzzz", 20).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_genre_uses_subject_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(volumes_path()))
        .and(query_param("q", "subject:fiction"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(volumes_json(vec![volume_json("f1", "Novel")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let books = client(&server).books_by_genre("fiction", 20).await.unwrap();
    assert_eq!(books.len(), 1);
}

#[tokio::test]
async fn test_repeated_search_is_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(volumes_path()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(volumes_json(vec![volume_json("c1", "Cached")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    client.search("cache me", 20).await.unwrap();
    client.search("cache me", 20).await.unwrap();

    // Listed books resolve by id without another request
    let book = client.book_by_id(&BookId::new("c1")).await.unwrap().unwrap();
    assert_eq!(book.title, "Cached");
}

#[tokio::test]
async fn test_api_key_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(volumes_path()))
        .and(query_param("key", "AIzaTestKey123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(volumes_json(vec![])))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = CatalogConfig::with_api_url(api_url(&server));
    config.api_key = Some("AIzaTestKey123".into());

    CatalogClient::new(&config).search("keyed", 20).await.unwrap();
}

// =============================================================================
// Error Classification
// =============================================================================

#[tokio::test]
async fn test_status_codes_map_to_messages() {
    let cases = [
        (404, "No books found matching your criteria."),
        (429, "Too many requests. Please try again later."),
        (503, "Google Books API is currently unavailable."),
        (418, "Server returned code 418: I'm a teapot"),
    ];

    for (status, message) in cases {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status).set_body_string("{}"))
            .mount(&server)
            .await;

        let err = client(&server).search("fails", 20).await.unwrap_err();
        assert_eq!(err.to_string(), message, "status {status}");
    }
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = client(&server).search("broken", 20).await.unwrap_err();
    assert!(matches!(err, CatalogError::Parse(_)));
    assert!(err.to_string().starts_with("Error: "));
}

// =============================================================================
// Lookup by Id
// =============================================================================

#[tokio::test]
async fn test_book_by_id_fetches_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{API_PREFIX}/volumes/vol42")))
        .respond_with(ResponseTemplate::new(200).set_body_json(volume_json("vol42", "Answer")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let first = client.book_by_id(&BookId::new("vol42")).await.unwrap();
    let second = client.book_by_id(&BookId::new("vol42")).await.unwrap();

    assert_eq!(first.unwrap().title, "Answer");
    assert_eq!(second.unwrap().title, "Answer");
}

#[tokio::test]
async fn test_book_by_id_without_volume_info_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{API_PREFIX}/volumes/empty")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "kind": "books#volume", "id": "empty" })),
        )
        .mount(&server)
        .await;

    assert!(client(&server).book_by_id(&BookId::new("empty")).await.unwrap().is_none());
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client(&server).book_by_id(&BookId::new("missing")).await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound));
}
