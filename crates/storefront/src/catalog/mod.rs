//! Google Books catalog client.
//!
//! # Architecture
//!
//! - One `GET` against the `volumes` endpoint per user action, no retry
//! - The external volume schema is mapped to [`Book`] in `conversions`
//! - In-memory caching via `moka` for API responses (5 minute TTL by default)
//!
//! # Example
//!
//! ```rust,ignore
//! use bookverse_storefront::catalog::CatalogClient;
//!
//! let client = CatalogClient::new(&config.catalog);
//! let books = client.search("inauthor:tolkien", 20).await?;
//! let featured = client.featured_books(6).await?;
//! ```
//!
//! [`Book`]: bookverse_core::Book

mod cache;
mod client;
mod conversions;
pub mod types;

pub use client::{CatalogClient, DEFAULT_FEATURED_RESULTS, DEFAULT_SEARCH_RESULTS};
pub use conversions::{PLACEHOLDER_COVER, convert_response, convert_volume};

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when querying the catalog.
///
/// The `Display` text of each variant is the user-facing message shown on
/// the page.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP 400.
    #[error("Bad request. Please check your search query.")]
    BadRequest,

    /// HTTP 403.
    #[error("API key invalid or quota exceeded.")]
    Forbidden,

    /// HTTP 404.
    #[error("No books found matching your criteria.")]
    NotFound,

    /// HTTP 429.
    #[error("Too many requests. Please try again later.")]
    RateLimited,

    /// HTTP 500, 502, 503 or 504.
    #[error("Google Books API is currently unavailable.")]
    Unavailable(u16),

    /// Any other non-success status.
    #[error("Server returned code {status}: {reason}")]
    Status { status: u16, reason: String },

    /// The request never produced a response.
    #[error("Error: {0}")]
    Transport(String),

    /// The response body was not the expected JSON.
    #[error("Error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl CatalogError {
    /// Classify a non-success HTTP status.
    #[must_use]
    pub fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            429 => Self::RateLimited,
            code @ (500 | 502 | 503 | 504) => Self::Unavailable(code),
            code => Self::Status {
                status: code,
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            },
        }
    }

    /// Whether the failure is on the upstream side rather than in the request.
    #[must_use]
    pub const fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Unavailable(_) | Self::Status { .. } | Self::Transport(_) | Self::Parse(_)
        )
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the API key; keep it out of messages.
        Self::Transport(err.without_url().to_string())
    }
}
