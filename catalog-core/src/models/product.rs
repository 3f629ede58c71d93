use super::{Currency, Distribution, MediaFormat};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A product record combines a storage-assigned identifier with the product's data.
///
/// This is also the external view of a product: it serializes to the flat JSON
/// object returned by every product endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct ProductRecord<ProductId> {
    /// Unique identifier for the product
    pub id: ProductId,
    /// The descriptive data of the product
    #[serde(flatten)]
    pub data: ProductData,
}

/// The descriptive data of a media release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct ProductData {
    /// The title, unique across the whole catalog
    pub title: String,
    /// Whether the release is physical or digital
    pub distribution: Distribution,
    /// The medium of the release
    pub format: MediaFormat,
    /// The currency the price is quoted in
    pub currency: Currency,
    /// The exact, non-negative price
    #[cfg_attr(feature = "schemars", schemars(with = "String"))]
    pub price: Decimal,
    /// When the release came out
    #[cfg_attr(
        feature = "schemars",
        schemars(schema_with = "crate::models::datetime_schema")
    )]
    #[serde(with = "time::serde::rfc3339")]
    pub release_date: OffsetDateTime,
    /// The store selling the release
    pub store_name: String,
    /// The title of the group of releases this one belongs to
    pub product_group_title: String,
    /// When the group of releases came out
    #[cfg_attr(
        feature = "schemars",
        schemars(schema_with = "crate::models::datetime_schema")
    )]
    #[serde(with = "time::serde::rfc3339")]
    pub product_group_release_date: OffsetDateTime,
    /// The names of the tags carried by the release, without duplicates
    pub tags: Vec<String>,
}
