//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. Request ID (add unique ID to each request)
//! 3. `TraceLayer` (request span carrying the request ID)
//! 4. Security headers (CSP, frame and isolation policies)
//! 5. Session layer (tower-sessions over a bounded moka cache)
//! 6. Route guard on the cart routes (`require_auth`)

pub mod auth;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::{Stores, require_auth};
pub use request_id::{RequestId, request_id_middleware};
pub use security_headers::security_headers_middleware;
pub use session::{CacheSessionStore, create_session_layer};
