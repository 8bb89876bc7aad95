//! Catalog book record.

use serde::{Deserialize, Serialize};

use super::{BookId, Price};

/// A book as listed by the storefront.
///
/// Built once from a catalog response and never mutated afterwards; every field
/// has already been defaulted, so views can render it without further checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    /// Authors joined with `", "`.
    pub author: String,
    pub description: String,
    pub price: Price,
    /// First catalog category.
    pub genre: String,
    pub publication_date: String,
    pub isbn: String,
    pub cover_image: String,
    pub rating: f64,
    pub pages: u32,
    pub publisher: String,
}

impl Book {
    /// Case-insensitive match of `term` against the title or author.
    #[must_use]
    pub fn matches_term(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term) || self.author.to_lowercase().contains(&term)
    }
}
