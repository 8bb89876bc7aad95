//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (featured books, local filter)
//! GET  /search                 - Catalog search
//! GET  /about                  - About page
//! GET  /contact                - Contact form
//! POST /contact                - Contact form submission
//! POST /newsletter             - Newsletter signup (footer form)
//!
//! # Auth
//! GET  /login                  - Login page
//! POST /login                  - Login action
//! GET  /signup                 - Signup page
//! POST /signup                 - Signup action
//! POST /logout                 - Logout action
//!
//! # Cart
//! POST /cart/add               - Add to cart, back to the listing
//!
//! # Cart (requires auth)
//! GET  /cart                   - Cart page
//! POST /cart/update            - Set quantity
//! POST /cart/increase          - Quantity + 1
//! POST /cart/decrease          - Quantity - 1 (not below 1)
//! POST /cart/remove            - Remove line
//! POST /cart/clear             - Empty cart
//! POST /cart/checkout          - Place order
//!
//! # Anything else
//! *                            - Redirect to /
//! ```

pub mod auth;
pub mod cart;
pub mod contact;
pub mod home;
pub mod layout;
pub mod newsletter;
pub mod pages;
pub mod search;

use axum::{
    Router, middleware,
    response::Redirect,
    routing::{get, post},
};

use crate::middleware::require_auth;
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route("/logout", post(auth::logout))
}

/// Create the cart routes router.
///
/// Everything except `/cart/add` runs behind [`require_auth`].
pub fn cart_routes(state: &AppState) -> Router<AppState> {
    let guarded = Router::new()
        .route("/", get(cart::show))
        .route("/update", post(cart::update))
        .route("/increase", post(cart::increase))
        .route("/decrease", post(cart::decrease))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/checkout", post(cart::checkout))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/add", post(cart::add))
        .merge(guarded)
}

/// Create all routes for the storefront.
pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/search", get(search::search))
        .route("/about", get(pages::about))
        .route("/contact", get(contact::contact_page).post(contact::submit))
        .route("/newsletter", post(newsletter::subscribe))
        .merge(auth_routes())
        .nest("/cart", cart_routes(state))
}

/// Liveness health check endpoint.
pub async fn health() -> &'static str {
    "ok"
}

/// Unknown paths go to the landing page.
pub async fn fallback() -> Redirect {
    Redirect::to("/")
}
