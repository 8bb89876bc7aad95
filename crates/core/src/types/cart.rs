//! Cart line record.

use serde::{Deserialize, Serialize};

use super::{Book, Price};

/// One book in the cart with its quantity.
///
/// The quantity is always at least one; lines that would drop to zero are
/// removed by the cart store instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub book: Book,
    pub quantity: u32,
}

impl CartLine {
    /// Create a line for `quantity` copies of `book`.
    #[must_use]
    pub const fn new(book: Book, quantity: u32) -> Self {
        Self { book, quantity }
    }

    /// Price of this line (unit price times quantity).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.book.price.times(self.quantity)
    }
}
