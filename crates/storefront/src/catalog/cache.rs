//! Cache types for catalog responses.

use bookverse_core::{Book, BookId};

/// Cache key for searches and single volumes.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Search { query: String, max_results: u32 },
    Volume(BookId),
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Books(Vec<Book>),
    Book(Box<Book>),
}
