//! Request bodies and their validation.
//!
//! The `*Request` types mirror the JSON accepted by the API and tolerate any
//! shape serde can read. Converting them into [`NewProduct`] or
//! [`ProductUpdate`] checks every field and reports the first violation.

use super::{Currency, Distribution, MediaFormat, Patch, ProductData};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

const MUST_NOT_BE_NULL: &str = "must not be null";
const MUST_NOT_BE_EMPTY: &str = "must not be empty";
const CURRENCY_RULE: &str = "You can only choose currencies: GBP, EUR & USD";
const PRICE_RULE: &str = "value should only contain digits and 2 decimal place";

/// A request field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Error on field ({field}) : {rule}")]
pub struct ValidationError {
    /// The name of the offending field, as spelled on the wire
    pub field: &'static str,
    /// A description of the rule the field broke
    pub rule: String,
}

impl ValidationError {
    /// Create a validation error for `field`.
    pub fn new(field: &'static str, rule: impl Into<String>) -> Self {
        Self {
            field,
            rule: rule.into(),
        }
    }
}

fn required<T>(field: &'static str, value: Option<T>) -> Result<T, ValidationError> {
    value.ok_or_else(|| ValidationError::new(field, MUST_NOT_BE_NULL))
}

fn parse_currency(raw: &str) -> Result<Currency, ValidationError> {
    Currency::from_str(raw).map_err(|_| ValidationError::new("currency", CURRENCY_RULE))
}

fn parse_format(raw: &str) -> Result<MediaFormat, ValidationError> {
    MediaFormat::from_str(raw).map_err(|_| {
        let allowed = MediaFormat::ALL
            .iter()
            .map(MediaFormat::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        ValidationError::new("format", format!("must be one of: {allowed}"))
    })
}

/// Digits, optionally followed by a point and one or two more digits.
fn parse_price(raw: &str) -> Result<Decimal, ValidationError> {
    let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    let well_formed = match raw.split_once('.') {
        Some((whole, fraction)) => is_digits(whole) && is_digits(fraction) && fraction.len() <= 2,
        None => is_digits(raw),
    };
    if !well_formed {
        return Err(ValidationError::new("price", PRICE_RULE));
    }
    Decimal::from_str(raw).map_err(|_| ValidationError::new("price", PRICE_RULE))
}

/// The body of a create request, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    /// The title, which must not already exist
    #[serde(default)]
    pub title: Option<String>,
    /// `true` for a physical release, `false` for a digital one
    #[serde(default)]
    pub is_physical: Option<bool>,
    /// The medium, e.g. `"MP3"`
    #[serde(default)]
    pub format: Option<String>,
    /// One of `"GBP"`, `"EUR"` or `"USD"`
    #[serde(default)]
    pub currency: Option<String>,
    /// A decimal string with at most two fractional digits, e.g. `"15.50"`
    #[serde(default)]
    pub price: Option<String>,
    /// When the release came out
    #[cfg_attr(
        feature = "schemars",
        schemars(schema_with = "crate::models::optional_datetime_schema")
    )]
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub release_date: Option<OffsetDateTime>,
    /// The store selling the release
    #[serde(default)]
    pub store_name: Option<String>,
    /// The title of the release's group
    #[serde(default)]
    pub product_group_title: Option<String>,
    /// When the release's group came out
    #[cfg_attr(
        feature = "schemars",
        schemars(schema_with = "crate::models::optional_datetime_schema")
    )]
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub product_group_release_date: Option<OffsetDateTime>,
    /// The tag names, at least one
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// A fully validated product to be created.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    /// The title
    pub title: String,
    /// Whether the release is physical
    pub is_physical: bool,
    /// The medium
    pub format: MediaFormat,
    /// The currency of the price
    pub currency: Currency,
    /// The price
    pub price: Decimal,
    /// The release date
    pub release_date: OffsetDateTime,
    /// The store name
    pub store_name: String,
    /// The product group title
    pub product_group_title: String,
    /// The product group release date
    pub product_group_release_date: OffsetDateTime,
    /// The tag names
    pub tags: Vec<String>,
}

impl NewProduct {
    /// Derive the stored form of this product.
    ///
    /// The distribution follows from the physical flag and duplicate tag names
    /// collapse into one.
    pub fn into_data(self) -> ProductData {
        ProductData {
            title: self.title,
            distribution: Distribution::from(self.is_physical),
            format: self.format,
            currency: self.currency,
            price: self.price,
            release_date: self.release_date,
            store_name: self.store_name,
            product_group_title: self.product_group_title,
            product_group_release_date: self.product_group_release_date,
            tags: super::distinct_tags(self.tags),
        }
    }
}

impl TryFrom<CreateProductRequest> for NewProduct {
    type Error = ValidationError;

    fn try_from(value: CreateProductRequest) -> Result<Self, Self::Error> {
        let title = required("title", value.title)?;
        let is_physical = required("isPhysical", value.is_physical)?;
        let format = parse_format(&required("format", value.format)?)?;
        let currency = parse_currency(&required("currency", value.currency)?)?;
        let price = parse_price(&required("price", value.price)?)?;
        let release_date = required("releaseDate", value.release_date)?;
        let store_name = required("storeName", value.store_name)?;
        let product_group_title = required("productGroupTitle", value.product_group_title)?;
        let product_group_release_date =
            required("productGroupReleaseDate", value.product_group_release_date)?;
        let tags = required("tags", value.tags)?;
        if tags.is_empty() {
            return Err(ValidationError::new("tags", MUST_NOT_BE_EMPTY));
        }

        Ok(Self {
            title,
            is_physical,
            format,
            currency,
            price,
            release_date,
            store_name,
            product_group_title,
            product_group_release_date,
            tags,
        })
    }
}

/// The body of an update request, before validation.
///
/// Omitted (or `null`) fields leave the stored value unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    /// A new title
    #[serde(default)]
    pub title: Option<String>,
    /// A new physical flag, which also changes the distribution
    #[serde(default)]
    pub is_physical: Option<bool>,
    /// A new medium
    #[serde(default)]
    pub format: Option<String>,
    /// A new currency
    #[serde(default)]
    pub currency: Option<String>,
    /// A new price
    #[serde(default)]
    pub price: Option<String>,
    /// A new release date
    #[cfg_attr(
        feature = "schemars",
        schemars(schema_with = "crate::models::optional_datetime_schema")
    )]
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub release_date: Option<OffsetDateTime>,
    /// A new store name
    #[serde(default)]
    pub store_name: Option<String>,
    /// A new product group title
    #[serde(default)]
    pub product_group_title: Option<String>,
    /// A new product group release date
    #[cfg_attr(
        feature = "schemars",
        schemars(schema_with = "crate::models::optional_datetime_schema")
    )]
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub product_group_release_date: Option<OffsetDateTime>,
    /// A replacement tag list; the existing tags are dropped, not merged
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// A validated partial update of a product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    /// Replacement title
    pub title: Patch<String>,
    /// Replacement physical flag
    pub is_physical: Patch<bool>,
    /// Replacement medium
    pub format: Patch<MediaFormat>,
    /// Replacement currency
    pub currency: Patch<Currency>,
    /// Replacement price
    pub price: Patch<Decimal>,
    /// Replacement release date
    pub release_date: Patch<OffsetDateTime>,
    /// Replacement store name
    pub store_name: Patch<String>,
    /// Replacement product group title
    pub product_group_title: Patch<String>,
    /// Replacement product group release date
    pub product_group_release_date: Patch<OffsetDateTime>,
    /// Replacement tag list
    pub tags: Patch<Vec<String>>,
}

impl ProductUpdate {
    /// Returns true if applying this update changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge this update into `product`.
    ///
    /// Only present fields are written. The distribution is recomputed only when
    /// the physical flag is present, and a present tag list replaces the old one
    /// wholesale.
    pub fn apply(self, product: &mut ProductData) {
        self.title.apply_to(&mut product.title);
        self.is_physical
            .map(Distribution::from)
            .apply_to(&mut product.distribution);
        self.format.apply_to(&mut product.format);
        self.currency.apply_to(&mut product.currency);
        self.price.apply_to(&mut product.price);
        self.release_date.apply_to(&mut product.release_date);
        self.store_name.apply_to(&mut product.store_name);
        self.product_group_title
            .apply_to(&mut product.product_group_title);
        self.product_group_release_date
            .apply_to(&mut product.product_group_release_date);
        self.tags
            .map(super::distinct_tags)
            .apply_to(&mut product.tags);
    }
}

impl TryFrom<UpdateProductRequest> for ProductUpdate {
    type Error = ValidationError;

    fn try_from(value: UpdateProductRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            title: value.title.into(),
            is_physical: value.is_physical.into(),
            format: Patch::from(value.format).try_map(|raw| parse_format(&raw))?,
            currency: Patch::from(value.currency).try_map(|raw| parse_currency(&raw))?,
            price: Patch::from(value.price).try_map(|raw| parse_price(&raw))?,
            release_date: value.release_date.into(),
            store_name: value.store_name.into(),
            product_group_title: value.product_group_title.into(),
            product_group_release_date: value.product_group_release_date.into(),
            tags: value.tags.into(),
        })
    }
}
