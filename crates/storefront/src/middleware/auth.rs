//! Route guard and per-request store extractor.
//!
//! Both read the visitor's session from the request extensions (set by
//! `SessionManagerLayer`) and build the stores over it.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use bookverse_core::User;
use tower_sessions::Session;
use tracing::debug;

use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::services::{CartStore, SessionStore};
use crate::state::AppState;
use crate::storage::BrowserStorage;

/// Where unauthenticated visitors are sent.
pub const LOGIN_PATH: &str = "/login";

/// The visitor's cart and session stores, built for this request.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(mut stores: Stores) -> Result<impl IntoResponse> {
///     stores.cart.clear().await?;
///     Ok(Redirect::to("/cart"))
/// }
/// ```
pub struct Stores {
    pub cart: CartStore<BrowserStorage>,
    pub session: SessionStore<BrowserStorage>,
}

impl Stores {
    /// Load both stores from the visitor's session.
    ///
    /// # Errors
    ///
    /// Returns `AppError` if the session storage cannot be read.
    pub async fn load(session: Session, state: &AppState) -> Result<Self, AppError> {
        let storage = BrowserStorage::new(session);
        let latency = state.config().latency;

        let mut cart = CartStore::load(storage.clone()).await?;
        cart.subscribe(|lines| debug!(lines = lines.len(), "Cart state"));

        let mut session = SessionStore::load(storage, state.config().demo_account.clone())
            .await?
            .with_delays(latency.login, latency.signup);
        session.subscribe(sync_sentry_user);

        Ok(Self { cart, session })
    }

    /// Whether the visitor is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }
}

impl FromRequestParts<AppState> for Stores {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer not installed".to_string()))?;

        Self::load(session, state).await
    }
}

/// Keep the Sentry user scope in step with the signed-in user.
fn sync_sentry_user(user: &Option<User>) {
    match user {
        Some(user) => set_sentry_user(&user.id, Some(user.email.as_str())),
        None => clear_sentry_user(),
    }
}

/// Guard for routes that need a signed-in visitor.
///
/// Runs before the handler; unauthenticated visitors are redirected to
/// [`LOGIN_PATH`].
///
/// # Example
///
/// ```rust,ignore
/// Router::new()
///     .route("/cart", get(cart::show))
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
/// ```
pub async fn require_auth(
    State(state): State<AppState>,
    session: Session,
    request: Request,
    next: Next,
) -> Response {
    let store = match SessionStore::load(
        BrowserStorage::new(session),
        state.config().demo_account.clone(),
    )
    .await
    {
        Ok(store) => store,
        Err(e) => return AppError::from(e).into_response(),
    };

    if !store.is_authenticated() {
        debug!(path = %request.uri().path(), "Redirecting unauthenticated visitor to login");
        return Redirect::to(LOGIN_PATH).into_response();
    }

    next.run(request).await
}
