//! Catalog search route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use super::layout::{BookCard, Nav};
use crate::catalog::DEFAULT_SEARCH_RESULTS;
use crate::filters;
use crate::middleware::Stores;
use crate::state::AppState;

/// Search query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    /// Free-text query; `intitle:`, `inauthor:` and `subject:` prefixes pass through.
    pub q: Option<String>,
    /// Title of a book just added to the cart.
    pub added: Option<String>,
}

/// Search results template.
#[derive(Template, WebTemplate)]
#[template(path = "search.html")]
pub struct SearchTemplate {
    pub nav: Nav,
    pub query: String,
    pub books: Vec<BookCard>,
    pub searched: bool,
    pub error: Option<String>,
    pub notice: Option<String>,
    pub current_path: String,
}

/// Search the whole catalog.
#[instrument(skip(state, stores))]
pub async fn search(
    State(state): State<AppState>,
    stores: Stores,
    Query(params): Query<SearchQuery>,
) -> impl IntoResponse {
    let query = params.q.unwrap_or_default().trim().to_string();

    let (books, error) = match state.catalog().search(&query, DEFAULT_SEARCH_RESULTS).await {
        Ok(books) => (books.iter().map(BookCard::from).collect(), None),
        Err(e) => {
            tracing::warn!(error = %e, "Catalog search failed");
            (Vec::new(), Some(e.to_string()))
        }
    };

    let current_path = if query.is_empty() {
        "/search".to_string()
    } else {
        format!("/search?q={}", urlencoding::encode(&query))
    };

    SearchTemplate {
        nav: Nav::new(&stores),
        searched: !query.is_empty(),
        query,
        books,
        error,
        notice: params.added.map(|title| format!("Added \"{title}\" to cart!")),
        current_path,
    }
}
