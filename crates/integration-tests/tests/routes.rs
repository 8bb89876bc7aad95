//! Integration tests for the storefront routes.
//!
//! Requests go through the complete router (session layer, guard, security
//! headers) with zero simulated latency. A visitor is tracked across
//! requests by replaying the session cookie.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use bookverse_integration_tests::{
    API_PREFIX, body_text, get, location, post_form, send, session_cookie, test_app, volume_json,
    volumes_json,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DEMO_LOGIN: &str = "email=demo%40bookverse.dev&password=bookverse";

async fn mock_volume(server: &MockServer, id: &str, title: &str) {
    Mock::given(method("GET"))
        .and(path(format!("{API_PREFIX}/volumes/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(volume_json(id, title)))
        .mount(server)
        .await;
}

/// Log in with the demo account and return the session cookie.
async fn login(app: &axum::Router) -> String {
    let response = send(app, post_form("/login", DEMO_LOGIN, None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/"));
    session_cookie(&response).expect("login sets the session cookie")
}

// =============================================================================
// Basics
// =============================================================================

#[tokio::test]
async fn test_health() {
    let server = MockServer::start().await;
    let app = test_app(&server);

    let response = send(&app, get("/health", None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn test_unknown_path_redirects_home() {
    let server = MockServer::start().await;
    let app = test_app(&server);

    let response = send(&app, get("/no/such/page", None)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/"));
}

#[tokio::test]
async fn test_pages_carry_security_headers() {
    let server = MockServer::start().await;
    let app = test_app(&server);

    let response = send(&app, get("/about", None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let csp = response
        .headers()
        .get("content-security-policy")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(csp.contains("https://books.google.com"));
    assert_eq!(response.headers().get("x-frame-options").unwrap(), "DENY");
}

// =============================================================================
// Listing and Search
// =============================================================================

#[tokio::test]
async fn test_home_lists_featured_books_and_filters_locally() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{API_PREFIX}/volumes")))
        .and(query_param("q", "subject:programming"))
        .respond_with(ResponseTemplate::new(200).set_body_json(volumes_json(vec![
            volume_json("r1", "Programming Rust"),
            volume_json("g1", "Learning Go"),
        ])))
        .expect(1)
        .mount(&server)
        .await;
    let app = test_app(&server);

    let all = body_text(send(&app, get("/", None)).await).await;
    assert!(all.contains("Programming Rust"));
    assert!(all.contains("Learning Go"));

    let filtered = body_text(send(&app, get("/?q=rust", None)).await).await;
    assert!(filtered.contains("Programming Rust"));
    assert!(!filtered.contains("Learning Go"));
}

#[tokio::test]
async fn test_home_shows_error_when_catalog_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let app = test_app(&server);

    let response = send(&app, get("/", None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Failed to load books."));
}

#[tokio::test]
async fn test_search_shows_not_found_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{API_PREFIX}/volumes")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let app = test_app(&server);

    let body = body_text(send(&app, get("/search?q=nothing", None)).await).await;

    assert!(body.contains("No books found matching your criteria."));
}

// =============================================================================
// Auth
// =============================================================================

#[tokio::test]
async fn test_cart_requires_login() {
    let server = MockServer::start().await;
    let app = test_app(&server);

    let response = send(&app, get("/cart", None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login"));

    let response = send(&app, post_form("/cart/checkout", "", None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login"));
}

#[tokio::test]
async fn test_login_with_demo_account_opens_cart() {
    let server = MockServer::start().await;
    let app = test_app(&server);

    let cookie = login(&app).await;
    let response = send(&app, get("/cart", Some(&cookie))).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Shopping cart"));
    assert!(body.contains("Hi, Demo"));
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let server = MockServer::start().await;
    let app = test_app(&server);

    let response = send(
        &app,
        post_form("/login", "email=demo%40bookverse.dev&password=wrong", None),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Invalid email or password"));
}

#[tokio::test]
async fn test_signup_validation_and_success() {
    let server = MockServer::start().await;
    let app = test_app(&server);

    let short = send(
        &app,
        post_form(
            "/signup",
            "name=Ada&email=ada%40example.com&password=123&confirm_password=123&agree_to_terms=on",
            None,
        ),
    )
    .await;
    assert!(
        body_text(short)
            .await
            .contains("Password must be at least 6 characters long")
    );

    let created = send(
        &app,
        post_form(
            "/signup",
            "name=Ada+Lovelace&email=ada%40example.com&password=secret1&confirm_password=secret1&agree_to_terms=on",
            None,
        ),
    )
    .await;
    let cookie = session_cookie(&created).unwrap();
    let body = body_text(created).await;
    assert!(body.contains("Account created successfully! Redirecting..."));
    assert!(body.contains("http-equiv=\"refresh\""));

    let cart = send(&app, get("/cart", Some(&cookie))).await;
    assert_eq!(cart.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_logout_closes_cart() {
    let server = MockServer::start().await;
    let app = test_app(&server);
    let cookie = login(&app).await;

    let response = send(&app, post_form("/logout", "", Some(&cookie))).await;
    assert_eq!(location(&response), Some("/"));

    let response = send(&app, get("/cart", Some(&cookie))).await;
    assert_eq!(location(&response), Some("/login"));
}

// =============================================================================
// Cart
// =============================================================================

#[tokio::test]
async fn test_add_to_cart_returns_to_listing() {
    let server = MockServer::start().await;
    mock_volume(&server, "vol1", "Rust in Action").await;
    let app = test_app(&server);

    let response = send(
        &app,
        post_form("/cart/add", "book_id=vol1&return_to=%2Fsearch%3Fq%3Drust", None),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        Some("/search?q=rust&added=Rust%20in%20Action")
    );
    assert!(session_cookie(&response).is_some());
}

#[tokio::test]
async fn test_add_with_blank_quantity_adds_one() {
    let server = MockServer::start().await;
    mock_volume(&server, "vol1", "Rust in Action").await;
    let app = test_app(&server);
    let cookie = login(&app).await;

    let response = send(
        &app,
        post_form("/cart/add", "book_id=vol1&quantity=", Some(&cookie)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let body = body_text(send(&app, get("/cart", Some(&cookie))).await).await;
    assert!(body.contains("value=\"1\""));
    assert!(body.contains("$20.00"));
}

#[tokio::test]
async fn test_home_cards_return_to_filtered_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{API_PREFIX}/volumes")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(volumes_json(vec![volume_json("r1", "Programming Rust")])),
        )
        .mount(&server)
        .await;
    let app = test_app(&server);

    let body = body_text(send(&app, get("/?q=rust", None)).await).await;

    assert!(body.contains("name=\"return_to\" value=\"/?q=rust\""));
}

#[tokio::test]
async fn test_add_unknown_book_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let app = test_app(&server);

    let response = send(&app, post_form("/cart/add", "book_id=ghost", None)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cart_merges_and_edits_lines() {
    let server = MockServer::start().await;
    mock_volume(&server, "vol1", "Rust in Action").await;
    let app = test_app(&server);
    let cookie = login(&app).await;

    send(&app, post_form("/cart/add", "book_id=vol1", Some(&cookie))).await;
    send(&app, post_form("/cart/add", "book_id=vol1&quantity=2", Some(&cookie))).await;

    let body = body_text(send(&app, get("/cart", Some(&cookie))).await).await;
    assert!(body.contains("value=\"3\""));
    assert!(body.contains("$60.00"));
    // 8% of $60.00
    assert!(body.contains("$4.80"));
    assert!(body.contains("$64.80"));

    send(&app, post_form("/cart/decrease", "book_id=vol1", Some(&cookie))).await;
    send(&app, post_form("/cart/update", "book_id=vol1&quantity=abc", Some(&cookie))).await;
    let body = body_text(send(&app, get("/cart", Some(&cookie))).await).await;
    assert!(body.contains("value=\"2\""));

    send(&app, post_form("/cart/remove", "book_id=vol1", Some(&cookie))).await;
    let body = body_text(send(&app, get("/cart", Some(&cookie))).await).await;
    assert!(body.contains("Your cart is empty."));
}

#[tokio::test]
async fn test_anonymous_cart_survives_login() {
    let server = MockServer::start().await;
    mock_volume(&server, "vol1", "Rust in Action").await;
    let app = test_app(&server);

    let added = send(&app, post_form("/cart/add", "book_id=vol1", None)).await;
    let anonymous = session_cookie(&added).unwrap();

    let response = send(&app, post_form("/login", DEMO_LOGIN, Some(&anonymous))).await;
    assert_eq!(location(&response), Some("/"));
    let cookie = session_cookie(&response).unwrap();

    let body = body_text(send(&app, get("/cart", Some(&cookie))).await).await;
    assert!(body.contains("Rust in Action"));
}

#[tokio::test]
async fn test_login_issues_new_session_id() {
    let server = MockServer::start().await;
    mock_volume(&server, "vol1", "Rust in Action").await;
    let app = test_app(&server);

    let added = send(&app, post_form("/cart/add", "book_id=vol1", None)).await;
    let anonymous = session_cookie(&added).unwrap();

    let response = send(&app, post_form("/login", DEMO_LOGIN, Some(&anonymous))).await;
    let signed_in = session_cookie(&response).unwrap();
    assert_ne!(signed_in, anonymous);

    let stale = send(&app, get("/cart", Some(&anonymous))).await;
    assert_eq!(location(&stale), Some("/login"));
}

#[tokio::test]
async fn test_logout_issues_new_session_id() {
    let server = MockServer::start().await;
    mock_volume(&server, "vol1", "Rust in Action").await;
    let app = test_app(&server);
    let cookie = login(&app).await;
    send(&app, post_form("/cart/add", "book_id=vol1", Some(&cookie))).await;

    let response = send(&app, post_form("/logout", "", Some(&cookie))).await;
    assert_eq!(location(&response), Some("/"));
    let after = session_cookie(&response).unwrap();
    assert_ne!(after, cookie);

    // The cart moved with the visitor; the old id is gone
    let relogged = send(&app, post_form("/login", DEMO_LOGIN, Some(&after))).await;
    let relogged = session_cookie(&relogged).unwrap();
    let body = body_text(send(&app, get("/cart", Some(&relogged))).await).await;
    assert!(body.contains("Rust in Action"));

    let stale = send(&app, post_form("/login", DEMO_LOGIN, Some(&cookie))).await;
    let stale = session_cookie(&stale).unwrap();
    let body = body_text(send(&app, get("/cart", Some(&stale))).await).await;
    assert!(!body.contains("Rust in Action"));
}

#[tokio::test]
async fn test_checkout_clears_cart() {
    let server = MockServer::start().await;
    mock_volume(&server, "vol1", "Rust in Action").await;
    let app = test_app(&server);
    let cookie = login(&app).await;
    send(&app, post_form("/cart/add", "book_id=vol1", Some(&cookie))).await;

    let response = send(&app, post_form("/cart/checkout", "", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Order placed successfully!"));
    assert!(body.contains("$21.60"));

    let body = body_text(send(&app, get("/cart", Some(&cookie))).await).await;
    assert!(body.contains("Your cart is empty."));
}

#[tokio::test]
async fn test_checkout_with_empty_cart_sends_back() {
    let server = MockServer::start().await;
    let app = test_app(&server);
    let cookie = login(&app).await;

    let response = send(&app, post_form("/cart/checkout", "", Some(&cookie))).await;
    assert_eq!(location(&response), Some("/cart?notice=empty"));

    let body = body_text(send(&app, get("/cart?notice=empty", Some(&cookie))).await).await;
    assert!(body.contains("Your cart is empty!"));
}

// =============================================================================
// Forms
// =============================================================================

#[tokio::test]
async fn test_contact_form_validation() {
    let server = MockServer::start().await;
    let app = test_app(&server);

    let missing = send(&app, post_form("/contact", "name=Ada&email=&subject=&message=", None)).await;
    assert!(body_text(missing).await.contains("Please fill in all fields"));

    let sent = send(
        &app,
        post_form(
            "/contact",
            "name=Ada&email=ada%40example.com&subject=Hi&message=Hello",
            None,
        ),
    )
    .await;
    assert!(body_text(sent).await.contains("Thank you for your message!"));
}

#[tokio::test]
async fn test_newsletter_acknowledges_email() {
    let server = MockServer::start().await;
    let app = test_app(&server);

    let response = send(&app, post_form("/newsletter", "email=reader%40books.io", None)).await;
    assert!(
        body_text(response)
            .await
            .contains("Thank you for subscribing with: reader@books.io")
    );

    let blank = send(&app, post_form("/newsletter", "email=", None)).await;
    assert_eq!(location(&blank), Some("/"));
}
