use super::{Predicate, PredicateBuilder};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// The page returned when none is requested.
pub const DEFAULT_PAGE: u32 = 1;

/// The page size used when none is requested.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// A query for searching the catalog.
///
/// Every filter is optional; an absent filter places no constraint on the
/// corresponding attribute. Results are paginated by 1-based `page` and `size`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct ProductQuery {
    /// Only products whose store name contains this text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,
    /// Only products whose title contains this text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Only products whose group title contains this text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_title: Option<String>,
    /// Only products released on or after this instant
    #[cfg_attr(
        feature = "schemars",
        schemars(schema_with = "crate::models::optional_datetime_schema")
    )]
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub release_date_after: Option<OffsetDateTime>,
    /// Only products released on or before this instant
    #[cfg_attr(
        feature = "schemars",
        schemars(schema_with = "crate::models::optional_datetime_schema")
    )]
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub release_date_before: Option<OffsetDateTime>,
    /// Only products whose group was released on or after this instant
    #[cfg_attr(
        feature = "schemars",
        schemars(schema_with = "crate::models::optional_datetime_schema")
    )]
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub group_release_date_after: Option<OffsetDateTime>,
    /// Only products whose group was released on or before this instant
    #[cfg_attr(
        feature = "schemars",
        schemars(schema_with = "crate::models::optional_datetime_schema")
    )]
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub group_release_date_before: Option<OffsetDateTime>,
    /// Only products carrying at least one of these tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// The 1-based page number
    #[serde(default = "default_page")]
    pub page: u32,
    /// The maximum number of products per page
    #[serde(default = "default_size")]
    pub size: u32,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            store_name: None,
            title: None,
            group_title: None,
            release_date_after: None,
            release_date_before: None,
            group_release_date_after: None,
            group_release_date_before: None,
            tags: None,
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ProductQuery {
    /// Assemble the filter conditions of this query.
    pub fn predicate(&self) -> Predicate {
        PredicateBuilder::new()
            .store_name_contains(self.store_name.as_deref())
            .title_contains(self.title.as_deref())
            .group_title_contains(self.group_title.as_deref())
            .released_on_or_after(self.release_date_after)
            .released_on_or_before(self.release_date_before)
            .group_released_on_or_after(self.group_release_date_after)
            .group_released_on_or_before(self.group_release_date_before)
            .tagged_with_any(self.tags.as_deref())
            .build()
    }

    /// The number of products preceding the requested page.
    ///
    /// Assumes `page` and `size` are positive.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.size)
    }

    /// The maximum number of products on the requested page.
    pub fn limit(&self) -> u64 {
        u64::from(self.size)
    }
}
