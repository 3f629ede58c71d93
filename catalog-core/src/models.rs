mod classification;
mod patch;
mod predicate;
mod product;
mod query;
mod request;
mod tag;

pub use classification::{Currency, Distribution, MediaFormat, UnknownVariant};
pub use patch::Patch;
pub use predicate::{Condition, DateField, Predicate, PredicateBuilder, TextField};
pub use product::{ProductData, ProductRecord};
pub use query::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, ProductQuery};
pub use request::{
    CreateProductRequest, NewProduct, ProductUpdate, UpdateProductRequest, ValidationError,
};
pub use tag::TagRecord;

/// Collapse a list of tag names to its distinct entries, keeping first-seen order.
pub(crate) fn distinct_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .collect::<indexmap::IndexSet<_, rustc_hash::FxBuildHasher>>()
        .into_iter()
        .collect()
}

#[cfg(feature = "schemars")]
pub(crate) fn datetime_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
    schemars::json_schema!({
        "type": "string",
        "format": "date-time",
    })
}

#[cfg(feature = "schemars")]
pub(crate) fn optional_datetime_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
    schemars::json_schema!({
        "type": ["string", "null"],
        "format": "date-time",
    })
}
