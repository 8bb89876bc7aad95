//! CLI command implementations.

pub mod cart;
pub mod catalog;

use bookverse_core::{Book, StorageError};
use bookverse_storefront::catalog::{CatalogClient, CatalogError};
use bookverse_storefront::config::{CatalogConfig, ConfigError};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Cart storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("No book with id {0}")]
    BookNotFound(String),
}

/// Build a catalog client from the environment.
fn catalog_client() -> Result<CatalogClient, CliError> {
    Ok(CatalogClient::new(&CatalogConfig::from_env()?))
}

/// One-line summary of a book.
fn summary(book: &Book) -> String {
    format!(
        "{id}  {title} by {author}  {price}",
        id = book.id,
        title = book.title,
        author = book.author,
        price = book.price
    )
}
