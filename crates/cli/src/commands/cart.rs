//! Local cart commands.
//!
//! The cart lives in the file store and uses the same [`CartStore`] as the
//! storefront, so merge and removal rules are identical.

use bookverse_core::{BookId, KeyValueStore};
use bookverse_storefront::services::CartStore;

use super::{CliError, catalog_client, summary};

/// Show the cart lines and totals.
pub async fn list<S: KeyValueStore>(store: S) -> Result<(), CliError> {
    let cart = CartStore::load(store).await?;
    print_cart(&cart);
    Ok(())
}

/// Fetch a volume from the catalog and add it.
pub async fn add<S: KeyValueStore>(store: S, id: &str, quantity: u32) -> Result<(), CliError> {
    let book = catalog_client()?
        .book_by_id(&BookId::new(id))
        .await?
        .ok_or_else(|| CliError::BookNotFound(id.to_string()))?;

    let mut cart = CartStore::load(store).await?;
    tracing::info!("Adding {quantity} x {}", book.title);
    cart.add(book, quantity).await?;
    print_cart(&cart);
    Ok(())
}

/// Set a line's quantity; zero or less removes it.
pub async fn update<S: KeyValueStore>(store: S, id: &str, quantity: i64) -> Result<(), CliError> {
    let mut cart = CartStore::load(store).await?;
    let id = BookId::new(id);
    if cart.quantity_of(&id).is_none() {
        tracing::warn!("{id} is not in the cart");
    }
    cart.update_quantity(&id, quantity).await?;
    print_cart(&cart);
    Ok(())
}

/// Remove a line.
pub async fn remove<S: KeyValueStore>(store: S, id: &str) -> Result<(), CliError> {
    let mut cart = CartStore::load(store).await?;
    cart.remove(&BookId::new(id)).await?;
    print_cart(&cart);
    Ok(())
}

/// Empty the cart.
pub async fn clear<S: KeyValueStore>(store: S) -> Result<(), CliError> {
    let mut cart = CartStore::load(store).await?;
    cart.clear().await?;
    tracing::info!("Cart cleared");
    Ok(())
}

fn print_cart<S: KeyValueStore>(cart: &CartStore<S>) {
    if cart.is_empty() {
        tracing::info!("Your cart is empty");
        return;
    }
    for line in cart.lines() {
        tracing::info!(
            "  {:>3} x {}  = {}",
            line.quantity,
            summary(&line.book),
            line.line_total()
        );
    }
    tracing::info!(
        "{} items in {} lines, total {}",
        cart.total_items(),
        cart.line_count(),
        cart.total_price()
    );
}
