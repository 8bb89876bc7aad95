//! View data shared by every page.

use bookverse_core::{Book, CartLine};

use crate::middleware::Stores;

/// Navbar state: cart badge and greeting.
#[derive(Debug, Clone, Default)]
pub struct Nav {
    /// Total copies in the cart.
    pub cart_count: u32,
    /// First name of the signed-in user.
    pub user_name: Option<String>,
}

impl Nav {
    #[must_use]
    pub fn new(stores: &Stores) -> Self {
        Self {
            cart_count: stores.cart.total_items(),
            user_name: stores
                .session
                .current_user()
                .map(|user| user.first_name().to_string()),
        }
    }
}

/// A book as displayed in a listing.
#[derive(Debug, Clone)]
pub struct BookCard {
    pub id: String,
    pub title: String,
    pub author: String,
    pub description: String,
    pub price: String,
    pub genre: String,
    pub publication_date: String,
    pub publisher: String,
    pub isbn: String,
    pub pages: u32,
    pub cover_image: String,
    /// Rating with one decimal, e.g. `4.5`.
    pub rating: String,
    /// Rating as five filled or empty stars.
    pub stars: String,
}

/// Longest description shown on a card, in characters.
const CARD_DESCRIPTION_CHARS: usize = 160;

impl From<&Book> for BookCard {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.to_string(),
            title: book.title.clone(),
            author: book.author.clone(),
            description: truncate(&book.description, CARD_DESCRIPTION_CHARS),
            price: book.price.to_string(),
            genre: book.genre.clone(),
            publication_date: book.publication_date.clone(),
            publisher: book.publisher.clone(),
            isbn: book.isbn.clone(),
            pages: book.pages,
            cover_image: book.cover_image.clone(),
            rating: format!("{:.1}", book.rating),
            stars: stars(book.rating),
        }
    }
}

/// A cart line as displayed on the cart page.
#[derive(Debug, Clone)]
pub struct CartLineView {
    pub book: BookCard,
    pub quantity: u32,
    pub line_total: String,
    /// Whether the decrease button is enabled.
    pub can_decrease: bool,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            book: BookCard::from(&line.book),
            quantity: line.quantity,
            line_total: line.line_total().to_string(),
            can_decrease: line.quantity > 1,
        }
    }
}

/// Render a 0-5 rating as stars, rounding to the nearest whole star.
#[must_use]
pub fn stars(rating: f64) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to 0..=5
    let filled = rating.clamp(0.0, 5.0).round() as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}…", cut.trim_end())
}
