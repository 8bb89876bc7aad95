//! Google Books API client implementation.
//!
//! Uses `reqwest` 0.13 for HTTP and caches searches and volumes using `moka`.

use std::sync::Arc;

use bookverse_core::{Book, BookId};
use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::config::CatalogConfig;

use super::CatalogError;
use super::cache::{CacheKey, CacheValue};
use super::conversions::{convert_response, convert_volume};
use super::types::{Volume, VolumesResponse};

/// Default page size for searches and genre listings.
pub const DEFAULT_SEARCH_RESULTS: u32 = 20;

/// Default number of featured books.
pub const DEFAULT_FEATURED_RESULTS: u32 = 6;

const FEATURED_QUERY: &str = "subject:programming";

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the Google Books `volumes` API.
///
/// Cheap to clone; clones share the HTTP connection pool and the cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<SecretString>,
    cache: Cache<CacheKey, CacheValue>,
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("api_url", &self.inner.api_url)
            .finish_non_exhaustive()
    }
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(config.cache_ttl)
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                api_url: config.api_url.clone(),
                api_key: config.api_key.clone(),
                cache,
            }),
        }
    }

    /// Build a request URL under the API root, appending the API key if set.
    fn endpoint(&self, path: &[&str], params: &[(&str, &str)]) -> Result<Url, CatalogError> {
        let mut url = Url::parse(&self.inner.api_url)
            .map_err(|e| CatalogError::Transport(format!("invalid catalog URL: {e}")))?;

        url.path_segments_mut()
            .map_err(|()| CatalogError::Transport("catalog URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(path);

        if !params.is_empty() || self.inner.api_key.is_some() {
            let mut query = url.query_pairs_mut();
            for (key, value) in params {
                query.append_pair(key, value);
            }
            if let Some(api_key) = &self.inner.api_key {
                query.append_pair("key", api_key.expose_secret());
            }
        }

        Ok(url)
    }

    /// Execute a GET request and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, CatalogError> {
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(
                status = %status,
                body = %body.chars().take(200).collect::<String>(),
                "Google Books API returned non-success status"
            );
            return Err(CatalogError::from_status(status));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse Google Books response"
            );
            CatalogError::Parse(e)
        })
    }

    // =========================================================================
    // Search Methods
    // =========================================================================

    /// Search the catalog.
    ///
    /// `query` is passed through untouched, so field prefixes such as
    /// `intitle:`, `inauthor:` and `subject:` work. An empty or whitespace
    /// query returns an empty list without a request.
    ///
    /// # Errors
    ///
    /// Returns the classified error if the request fails or the API responds
    /// with a non-success status.
    #[instrument(skip(self), fields(query = %query))]
    pub async fn search(&self, query: &str, max_results: u32) -> Result<Vec<Book>, CatalogError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let cache_key = CacheKey::Search {
            query: query.to_string(),
            max_results,
        };

        if let Some(CacheValue::Books(books)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for search");
            return Ok(books);
        }

        let max_results = max_results.to_string();
        let url = self.endpoint(
            &["volumes"],
            &[
                ("q", query),
                ("maxResults", &max_results),
                ("printType", "books"),
            ],
        )?;

        let response: VolumesResponse = self.get_json(url).await?;
        let books = convert_response(response);
        debug!(count = books.len(), "Search returned books");

        // Listed books are cached by id so adding one to the cart needs no request
        for book in &books {
            self.inner
                .cache
                .insert(
                    CacheKey::Volume(book.id.clone()),
                    CacheValue::Book(Box::new(book.clone())),
                )
                .await;
        }
        self.inner
            .cache
            .insert(cache_key, CacheValue::Books(books.clone()))
            .await;

        Ok(books)
    }

    /// Books in a subject category (`subject:{genre}`).
    ///
    /// # Errors
    ///
    /// See [`CatalogClient::search`].
    pub async fn books_by_genre(
        &self,
        genre: &str,
        max_results: u32,
    ) -> Result<Vec<Book>, CatalogError> {
        if genre.trim().is_empty() {
            return Ok(Vec::new());
        }
        self.search(&format!("subject:{genre}"), max_results).await
    }

    /// Featured books shown on the landing page.
    ///
    /// # Errors
    ///
    /// See [`CatalogClient::search`].
    pub async fn featured_books(&self, max_results: u32) -> Result<Vec<Book>, CatalogError> {
        self.search(FEATURED_QUERY, max_results).await
    }

    // =========================================================================
    // Volume Methods
    // =========================================================================

    /// Get one volume by its catalog id.
    ///
    /// Returns `Ok(None)` if the volume exists but carries no `volumeInfo`.
    ///
    /// # Errors
    ///
    /// Returns the classified error if the request fails or the API responds
    /// with a non-success status (an unknown id is `CatalogError::NotFound`).
    #[instrument(skip(self), fields(book_id = %id))]
    pub async fn book_by_id(&self, id: &BookId) -> Result<Option<Book>, CatalogError> {
        let cache_key = CacheKey::Volume(id.clone());

        if let Some(CacheValue::Book(book)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for volume");
            return Ok(Some(*book));
        }

        let url = self.endpoint(&["volumes", id.as_str()], &[])?;
        let volume: Volume = self.get_json(url).await?;

        let Some(book) = convert_volume(volume) else {
            debug!("Volume has no volumeInfo");
            return Ok(None);
        };

        self.inner
            .cache
            .insert(cache_key, CacheValue::Book(Box::new(book.clone())))
            .await;

        Ok(Some(book))
    }
}
