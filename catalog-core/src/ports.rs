mod product;
mod tag;

pub use product::{ProductFailure, ProductRepository};
pub use tag::TagRepository;

/// Base trait for all repository operations, defining the storage-assigned
/// identifier types and the error type shared by the specialized repositories.
pub trait Repository: Clone + Sized + Send + Sync + 'static {
    /// Error type for storage operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Identifier type for products
    type ProductId: Clone
        + Eq
        + std::hash::Hash
        + std::fmt::Debug
        + std::fmt::Display
        + serde::Serialize
        + serde::de::DeserializeOwned
        + Send
        + Sync
        + 'static;

    /// Identifier type for tags
    type TagId: Clone
        + Eq
        + std::fmt::Debug
        + std::fmt::Display
        + serde::Serialize
        + serde::de::DeserializeOwned
        + Send
        + Sync
        + 'static;
}

/// The complete storage surface required by the product service.
pub trait CatalogRepository: ProductRepository + TagRepository {}

impl<T: ProductRepository + TagRepository> CatalogRepository for T {}
