//! Home page route handler.
//!
//! Lists the featured books. `?q=` and `?genre=` filter that list locally
//! (no extra catalog request); `/search` queries the whole catalog.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use bookverse_core::Book;
use serde::Deserialize;
use tracing::instrument;

use super::layout::{BookCard, Nav};
use crate::filters;
use crate::middleware::Stores;
use crate::state::AppState;

/// Number of featured books on the landing page.
pub const HOME_FEATURED_RESULTS: u32 = 12;

/// Home page query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    /// Title or author filter.
    pub q: Option<String>,
    /// Exact genre filter.
    pub genre: Option<String>,
    /// Title of a book just added to the cart.
    pub added: Option<String>,
}

/// One entry of the genre filter dropdown.
#[derive(Debug, Clone)]
pub struct GenreOption {
    pub name: String,
    pub selected: bool,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub nav: Nav,
    pub books: Vec<BookCard>,
    pub genres: Vec<GenreOption>,
    pub search_term: String,
    pub has_filter: bool,
    pub error: Option<String>,
    pub notice: Option<String>,
    pub current_path: String,
}

/// Display the home page.
#[instrument(skip(state, stores))]
pub async fn home(
    State(state): State<AppState>,
    stores: Stores,
    Query(query): Query<HomeQuery>,
) -> impl IntoResponse {
    let (featured, error) = match state.catalog().featured_books(HOME_FEATURED_RESULTS).await {
        Ok(books) => (books, None),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load featured books");
            (Vec::new(), Some("Failed to load books.".to_string()))
        }
    };

    let search_term = query.q.unwrap_or_default().trim().to_string();
    let selected_genre = query.genre.unwrap_or_default();

    let current_path = home_path(&search_term, &selected_genre);
    let genres = genre_options(&featured, &selected_genre);
    let books = filter_books(&featured, &search_term, &selected_genre)
        .into_iter()
        .map(BookCard::from)
        .collect();

    HomeTemplate {
        nav: Nav::new(&stores),
        books,
        genres,
        has_filter: !search_term.is_empty() || !selected_genre.is_empty(),
        search_term,
        error,
        notice: query.added.map(|title| format!("Added \"{title}\" to cart!")),
        current_path,
    }
}

/// Apply the title/author term and the exact genre filter.
///
/// A blank term or genre does not filter.
#[must_use]
pub fn filter_books<'a>(books: &'a [Book], term: &str, genre: &str) -> Vec<&'a Book> {
    let term = term.trim();
    books
        .iter()
        .filter(|book| term.is_empty() || book.matches_term(term))
        .filter(|book| genre.is_empty() || book.genre == genre)
        .collect()
}

/// The home URL with the active filters, so adding to the cart lands back
/// on the same filtered list.
fn home_path(term: &str, genre: &str) -> String {
    let params: Vec<String> = [("q", term), ("genre", genre)]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(name, value)| format!("{name}={}", urlencoding::encode(value)))
        .collect();

    if params.is_empty() {
        "/".to_string()
    } else {
        format!("/?{}", params.join("&"))
    }
}

/// Distinct genres of `books`, in first-seen order.
fn genre_options(books: &[Book], selected: &str) -> Vec<GenreOption> {
    let mut genres: Vec<GenreOption> = Vec::new();
    for book in books {
        if !genres.iter().any(|g| g.name == book.genre) {
            genres.push(GenreOption {
                name: book.genre.clone(),
                selected: book.genre == selected,
            });
        }
    }
    genres
}

#[cfg(test)]
mod tests {
    use bookverse_core::{BookId, Price};

    use super::*;

    fn book(id: &str, title: &str, author: &str, genre: &str) -> Book {
        Book {
            id: BookId::new(id),
            title: title.to_string(),
            author: author.to_string(),
            description: String::new(),
            price: Price::from_cents(999),
            genre: genre.to_string(),
            publication_date: "Unknown".to_string(),
            isbn: "N/A".to_string(),
            cover_image: String::new(),
            rating: 3.5,
            pages: 0,
            publisher: "Unknown Publisher".to_string(),
        }
    }

    fn shelf() -> Vec<Book> {
        vec![
            book("1", "Programming Rust", "Jim Blandy", "Computers"),
            book("2", "Clean Code", "Robert C. Martin", "Computers"),
            book("3", "Rust in Action", "Tim McNamara", "Programming"),
        ]
    }

    #[test]
    fn test_filter_by_term_matches_title_and_author() {
        let books = shelf();
        let ids: Vec<&str> = filter_books(&books, "rust", "")
            .iter()
            .map(|b| b.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "3"]);

        assert_eq!(filter_books(&books, "martin", "").len(), 1);
    }

    #[test]
    fn test_filter_by_genre_is_exact() {
        let books = shelf();
        assert_eq!(filter_books(&books, "", "Computers").len(), 2);
        assert!(filter_books(&books, "", "computers").is_empty());
        assert_eq!(filter_books(&books, "  ", "").len(), 3);
    }

    #[test]
    fn test_genre_options_are_distinct_in_order() {
        let genres = genre_options(&shelf(), "Programming");
        let names: Vec<&str> = genres.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Computers", "Programming"]);
        assert!(genres[1].selected);
        assert!(!genres[0].selected);
    }

    #[test]
    fn test_home_path_carries_active_filters() {
        assert_eq!(home_path("", ""), "/");
        assert_eq!(home_path("dune", ""), "/?q=dune");
        assert_eq!(home_path("", "Science Fiction"), "/?genre=Science%20Fiction");
        assert_eq!(
            home_path("le guin", "Fiction & Fantasy"),
            "/?q=le%20guin&genre=Fiction%20%26%20Fantasy"
        );
    }
}
