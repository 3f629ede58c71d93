use crate::models::{ProductData, ProductQuery, ProductRecord, ProductUpdate};

/// Reasons a product write can be refused without a storage fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ProductFailure {
    /// The targeted product does not exist
    #[error("product does not exist")]
    DoesNotExist,
    /// Another product already uses the title
    #[error("product title already exists")]
    TitleConflict,
}

/// Repository interface for product storage and search.
///
/// Implementations own identifier assignment, tag association and the
/// translation of a [`Predicate`](crate::models::Predicate) into their own
/// query language. Writes are atomic: a refused or failed write leaves no trace.
pub trait ProductRepository: super::Repository {
    /// Store a new product, creating any tag it names that does not yet exist.
    ///
    /// # Returns
    ///
    /// - Ok(Ok(record)) with the assigned identifier on success
    /// - Ok(Err(ProductFailure::TitleConflict)) if the title is taken
    /// - Err otherwise
    ///
    /// `ProductFailure::DoesNotExist` is never a valid outcome of a create.
    fn create_product(
        &self,
        data: ProductData,
    ) -> impl Future<
        Output = Result<Result<ProductRecord<Self::ProductId>, ProductFailure>, Self::Error>,
    > + Send;

    /// Retrieve a product together with its tags.
    fn get_product(
        &self,
        product_id: Self::ProductId,
    ) -> impl Future<Output = Result<Option<ProductRecord<Self::ProductId>>, Self::Error>> + Send;

    /// Merge a partial update onto an existing product.
    ///
    /// Loading the stored product, applying `update` and writing the result
    /// happen in one atomic unit, so concurrent updates never act on stale
    /// state. A present tag list replaces the stored tags.
    ///
    /// # Returns
    ///
    /// - Ok(Ok(record)) on success
    /// - Ok(Err(ProductFailure::DoesNotExist)) if no such product exists
    /// - Ok(Err(ProductFailure::TitleConflict)) if the new title belongs to another product
    /// - Err otherwise
    fn update_product(
        &self,
        product_id: Self::ProductId,
        update: ProductUpdate,
    ) -> impl Future<
        Output = Result<Result<ProductRecord<Self::ProductId>, ProductFailure>, Self::Error>,
    > + Send;

    /// Return the requested page of products matching the query's predicate,
    /// ordered by identifier.
    fn query_products(
        &self,
        query: &ProductQuery,
    ) -> impl Future<Output = Result<Vec<ProductRecord<Self::ProductId>>, Self::Error>> + Send;

    /// Remove a product and its tag associations. Tags themselves are kept.
    ///
    /// # Returns
    ///
    /// - Ok(true) if a product was removed
    /// - Ok(false) if no such product exists
    /// - Err otherwise
    fn delete_product(
        &self,
        product_id: Self::ProductId,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;
}
