//! Volume to `Book` conversion functions.
//!
//! Absent, empty and zero values all fall through to the next source and
//! finally to a fixed default, so a converted `Book` never has a blank field.

use bookverse_core::{Book, BookId, Price};

use super::types::{ImageLinks, SaleInfo, Volume, VolumeInfo, VolumesResponse};

/// Cover shown when a volume has no image links.
pub const PLACEHOLDER_COVER: &str = "https://via.placeholder.com/128x196?text=No+Cover";

const DEFAULT_PRICE_CENTS: i64 = 999;
const DEFAULT_RATING: f64 = 3.5;

/// Convert every volume in a search response, dropping volumes without
/// `volumeInfo` and entries that do not parse as a volume. A response
/// without `items` converts to an empty list.
#[must_use]
pub fn convert_response(response: VolumesResponse) -> Vec<Book> {
    response
        .items
        .unwrap_or_default()
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<Volume>(item) {
            Ok(volume) => Some(volume),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed volume");
                None
            }
        })
        .filter_map(convert_volume)
        .collect()
}

/// Convert one volume. Returns `None` if it carries no `volumeInfo`.
#[must_use]
pub fn convert_volume(volume: Volume) -> Option<Book> {
    let info = volume.volume_info?;
    let price = convert_price(volume.sale_info.as_ref());
    let isbn = find_isbn(&info);
    let cover_image = info
        .image_links
        .as_ref()
        .and_then(first_cover)
        .map_or_else(|| PLACEHOLDER_COVER.to_string(), |url| force_https(&url));

    let VolumeInfo {
        title,
        authors,
        publisher,
        published_date,
        description,
        page_count,
        categories,
        average_rating,
        ..
    } = info;

    Some(Book {
        id: BookId::new(volume.id),
        title: non_empty(title).unwrap_or_else(|| "Unknown Title".to_string()),
        author: authors
            .map(|names| names.join(", "))
            .and_then(|joined| non_empty(Some(joined)))
            .unwrap_or_else(|| "Unknown Author".to_string()),
        description: non_empty(description)
            .unwrap_or_else(|| "No description available.".to_string()),
        price,
        genre: categories
            .and_then(|c| c.into_iter().next())
            .and_then(|c| non_empty(Some(c)))
            .unwrap_or_else(|| "Uncategorized".to_string()),
        publication_date: non_empty(published_date).unwrap_or_else(|| "Unknown".to_string()),
        isbn,
        cover_image,
        rating: average_rating
            .filter(|r| *r > 0.0)
            .unwrap_or(DEFAULT_RATING),
        pages: page_count.unwrap_or(0),
        publisher: non_empty(publisher).unwrap_or_else(|| "Unknown Publisher".to_string()),
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Retail price, then list price, then the default. Zero amounts are skipped.
fn convert_price(sale_info: Option<&SaleInfo>) -> Price {
    sale_info
        .and_then(|sale| {
            [sale.retail_price.as_ref(), sale.list_price.as_ref()]
                .into_iter()
                .flatten()
                .filter_map(|money| money.amount)
                .filter_map(Price::from_f64)
                .find(|price| !price.is_zero())
        })
        .unwrap_or_else(|| Price::from_cents(DEFAULT_PRICE_CENTS))
}

/// First `ISBN_13` or `ISBN_10` identifier, in response order.
fn find_isbn(info: &VolumeInfo) -> String {
    info.industry_identifiers
        .iter()
        .flatten()
        .find(|id| id.kind == "ISBN_13" || id.kind == "ISBN_10")
        .map(|id| id.identifier.clone())
        .filter(|isbn| !isbn.is_empty())
        .unwrap_or_else(|| "N/A".to_string())
}

fn first_cover(links: &ImageLinks) -> Option<String> {
    [
        &links.thumbnail,
        &links.small_thumbnail,
        &links.small,
        &links.medium,
        &links.large,
        &links.extra_large,
    ]
    .into_iter()
    .flatten()
    .find(|url| !url.is_empty())
    .cloned()
}

fn force_https(url: &str) -> String {
    url.strip_prefix("http://")
        .map_or_else(|| url.to_string(), |rest| format!("https://{rest}"))
}
