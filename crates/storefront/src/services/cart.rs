//! Cart store.
//!
//! Holds the ordered cart lines in a [`Subject`], writes the full line list to
//! storage under [`keys::CART`] after every mutation, and notifies observers
//! with the new list once the write has succeeded.

use bookverse_core::storage::{get_json, keys, set_json};
use bookverse_core::{
    Book, BookId, CartLine, KeyValueStore, Price, StorageError, Subject, SubscriptionId,
};
use tracing::{debug, warn};

/// The visitor's cart.
pub struct CartStore<S> {
    storage: S,
    lines: Subject<Vec<CartLine>>,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Build a store, hydrating the lines from storage.
    ///
    /// A stored value that is not a valid line list is discarded with a
    /// warning and the cart starts empty.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Backend` if the storage cannot be read.
    pub async fn load(storage: S) -> Result<Self, StorageError> {
        let lines = match get_json::<Vec<CartLine>, _>(&storage, keys::CART).await {
            Ok(lines) => lines.unwrap_or_default(),
            Err(StorageError::Serialization(e)) => {
                warn!(error = %e, "Discarding malformed stored cart");
                storage.remove(keys::CART).await?;
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            storage,
            lines: Subject::new(lines),
        })
    }

    /// Current lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        self.lines.value()
    }

    /// Register an observer; it is called with the current lines right away.
    pub fn subscribe(
        &mut self,
        observer: impl Fn(&Vec<CartLine>) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.lines.subscribe(observer)
    }

    /// Remove an observer.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.lines.unsubscribe(id)
    }

    /// Add `quantity` copies of `book`, merging with an existing line.
    ///
    /// Adding zero copies changes nothing.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the cart cannot be persisted.
    pub async fn add(&mut self, book: Book, quantity: u32) -> Result<(), StorageError> {
        if quantity == 0 {
            return Ok(());
        }

        let mut lines = self.lines.value().clone();
        if let Some(line) = lines.iter_mut().find(|line| line.book.id == book.id) {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            lines.push(CartLine::new(book, quantity));
        }

        self.commit(lines).await
    }

    /// Remove the line for `id`.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the cart cannot be persisted.
    pub async fn remove(&mut self, id: &BookId) -> Result<(), StorageError> {
        let lines = self
            .lines
            .value()
            .iter()
            .filter(|line| &line.book.id != id)
            .cloned()
            .collect();

        self.commit(lines).await
    }

    /// Set the quantity of the line for `id`. Zero or less removes the line.
    ///
    /// An `id` not in the cart is ignored.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the cart cannot be persisted.
    pub async fn update_quantity(&mut self, id: &BookId, quantity: i64) -> Result<(), StorageError> {
        if self.quantity_of(id).is_none() {
            debug!(book_id = %id, "Ignoring quantity update for book not in cart");
            return Ok(());
        }

        if quantity <= 0 {
            return self.remove(id).await;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        self.set_quantity(id, quantity).await
    }

    /// Empty the cart and erase the stored record.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the stored record cannot be erased.
    pub async fn clear(&mut self) -> Result<(), StorageError> {
        self.storage.remove(keys::CART).await?;
        self.lines.next(Vec::new());
        Ok(())
    }

    /// Sum of unit price times quantity over all lines.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.lines().iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.lines()
            .iter()
            .fold(0, |total, line| total.saturating_add(line.quantity))
    }

    /// Number of distinct books in the cart.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines().is_empty()
    }

    /// Quantity of `id` in the cart, if present.
    #[must_use]
    pub fn quantity_of(&self, id: &BookId) -> Option<u32> {
        self.lines()
            .iter()
            .find(|line| &line.book.id == id)
            .map(|line| line.quantity)
    }

    /// The backing storage.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    async fn set_quantity(&mut self, id: &BookId, quantity: u32) -> Result<(), StorageError> {
        let mut lines = self.lines.value().clone();
        if let Some(line) = lines.iter_mut().find(|line| &line.book.id == id) {
            line.quantity = quantity;
        }
        self.commit(lines).await
    }

    /// Persist `lines`, then publish them.
    async fn commit(&mut self, lines: Vec<CartLine>) -> Result<(), StorageError> {
        set_json(&self.storage, keys::CART, &lines).await?;
        self.lines.next(lines);
        Ok(())
    }
}

impl<S> std::fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.lines.value().len())
            .finish_non_exhaustive()
    }
}
