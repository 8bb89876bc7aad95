//! Wire types for the Google Books `volumes` API.
//!
//! Every field is optional; the API omits whatever it does not know about a
//! volume.

use serde::Deserialize;

/// Response of `GET /volumes`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VolumesResponse {
    pub kind: Option<String>,
    pub total_items: Option<u64>,
    /// Absent when the query matched nothing. Kept raw so that one
    /// malformed entry does not fail the whole page.
    pub items: Option<Vec<serde_json::Value>>,
}

/// One volume, as returned by search or `GET /volumes/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Volume {
    pub id: String,
    pub volume_info: Option<VolumeInfo>,
    pub sale_info: Option<SaleInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VolumeInfo {
    pub title: Option<String>,
    pub authors: Option<Vec<String>>,
    pub publisher: Option<String>,
    pub published_date: Option<String>,
    pub description: Option<String>,
    pub industry_identifiers: Option<Vec<IndustryIdentifier>>,
    pub page_count: Option<u32>,
    pub categories: Option<Vec<String>>,
    pub average_rating: Option<f64>,
    pub image_links: Option<ImageLinks>,
}

/// An ISBN or other identifier.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IndustryIdentifier {
    /// `ISBN_13`, `ISBN_10`, `ISSN` or `OTHER`.
    #[serde(rename = "type")]
    pub kind: String,
    pub identifier: String,
}

/// Cover image URLs, smallest first.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageLinks {
    pub small_thumbnail: Option<String>,
    pub thumbnail: Option<String>,
    pub small: Option<String>,
    pub medium: Option<String>,
    pub large: Option<String>,
    pub extra_large: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaleInfo {
    pub country: Option<String>,
    pub saleability: Option<String>,
    pub list_price: Option<Money>,
    pub retail_price: Option<Money>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Money {
    pub amount: Option<f64>,
    pub currency_code: Option<String>,
}
