//! Type definitions for the SQLite implementation.
//!
//! This module contains both public types used throughout the crate and internal
//! types used for database row mapping. The public types are the strongly-typed
//! IDs and the datetime representation used in storage.

use catalog_core::models::{ProductData, ProductRecord};
use rust_decimal::Decimal;
use std::str::FromStr;

mod datetime;
pub use datetime::DateTime;

mod ids;
pub use ids::{ProductId, TagId};

/// A `product` row, with every column still in its stored representation.
#[derive(sqlx::FromRow)]
pub(crate) struct ProductRow {
    pub id: ProductId,
    pub title: String,
    pub distribution: String,
    pub format: String,
    pub currency: String,
    pub price: String,
    pub release_date: DateTime,
    pub store_name: String,
    pub product_group_title: String,
    pub product_group_release_date: DateTime,
}

fn decode<T>(value: &str) -> Result<T, sqlx::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.parse().map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

/// The stored form of a price: its exact decimal text, e.g. `15.50`.
pub(crate) fn price_text(price: &Decimal) -> String {
    price.to_string()
}

impl ProductRow {
    /// Combine the row with its tag names into a domain record.
    pub fn into_record(self, tags: Vec<String>) -> Result<ProductRecord<ProductId>, sqlx::Error> {
        Ok(ProductRecord {
            id: self.id,
            data: ProductData {
                distribution: decode(&self.distribution)?,
                format: decode(&self.format)?,
                currency: decode(&self.currency)?,
                price: decode::<Decimal>(&self.price)?,
                title: self.title,
                release_date: self.release_date.into(),
                store_name: self.store_name,
                product_group_title: self.product_group_title,
                product_group_release_date: self.product_group_release_date.into(),
                tags,
            },
        })
    }
}
