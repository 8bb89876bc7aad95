//! Catalog query commands.

use bookverse_core::{Book, BookId};

use super::{CliError, catalog_client, summary};

/// Search the whole catalog.
pub async fn search(query: &str, max: u32) -> Result<(), CliError> {
    let books = catalog_client()?.search(query, max).await?;
    print_books(&books, &format!("for \"{query}\""));
    Ok(())
}

/// List books in a subject.
pub async fn genre(genre: &str, max: u32) -> Result<(), CliError> {
    let books = catalog_client()?.books_by_genre(genre, max).await?;
    print_books(&books, &format!("in {genre}"));
    Ok(())
}

/// List the featured books.
pub async fn featured(max: u32) -> Result<(), CliError> {
    let books = catalog_client()?.featured_books(max).await?;
    print_books(&books, "featured");
    Ok(())
}

/// Show every field of one volume.
pub async fn book(id: &str) -> Result<(), CliError> {
    let book = catalog_client()?
        .book_by_id(&BookId::new(id))
        .await?
        .ok_or_else(|| CliError::BookNotFound(id.to_string()))?;

    tracing::info!("{}", book.title);
    tracing::info!("  Author:     {}", book.author);
    tracing::info!("  Price:      {}", book.price);
    tracing::info!("  Genre:      {}", book.genre);
    tracing::info!("  Published:  {} ({})", book.publication_date, book.publisher);
    tracing::info!("  ISBN:       {}", book.isbn);
    tracing::info!("  Pages:      {}", book.pages);
    tracing::info!("  Rating:     {:.1}", book.rating);
    tracing::info!("  Cover:      {}", book.cover_image);
    tracing::info!("");
    tracing::info!("{}", book.description);
    Ok(())
}

fn print_books(books: &[Book], label: &str) {
    if books.is_empty() {
        tracing::info!("No books {label}");
        return;
    }
    tracing::info!("{} books {label}:", books.len());
    for book in books {
        tracing::info!("  {}", summary(book));
    }
}
