//! Product lifecycle orchestration.
//!
//! [`ProductService`] sits between the API layer and a [`CatalogRepository`].
//! It turns validated requests into stored products, merges partial updates
//! onto the stored state and maps repository outcomes onto [`CatalogError`].

use crate::models::{
    NewProduct, ProductQuery, ProductRecord, ProductUpdate, TagRecord, ValidationError,
};
use crate::ports::{CatalogRepository, ProductFailure};
use tracing::instrument;

/// Errors surfaced by the product service.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError<E> {
    /// No product has the given identifier
    #[error("Product: {0} does not exist")]
    NotFound(String),
    /// No tag has the given name
    #[error("Tag: {0} does not exist")]
    TagNotFound(String),
    /// The request collides with a stored entity, e.g. a duplicate title
    #[error("Request contains an existing entity")]
    Conflict,
    /// A request field is invalid
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The backend reported a state its own write should have made impossible
    #[error("storage returned an inconsistent result")]
    Inconsistent,
    /// The storage backend failed
    #[error("storage failure: {0}")]
    Storage(#[source] E),
}

type ServiceResult<T, R> = Result<T, CatalogError<<R as crate::ports::Repository>::Error>>;

/// Stateless orchestration of product create, read, update, delete and search.
#[derive(Clone)]
pub struct ProductService<R> {
    repository: R,
}

impl<R: CatalogRepository> ProductService<R> {
    /// Wrap a repository.
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// The underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Store a new product and return its view.
    ///
    /// Unknown tag names are created as part of the same write.
    #[instrument(skip_all, fields(title = %product.title))]
    pub async fn create_product(
        &self,
        product: NewProduct,
    ) -> ServiceResult<ProductRecord<R::ProductId>, R> {
        match self
            .repository
            .create_product(product.into_data())
            .await
            .map_err(CatalogError::Storage)?
        {
            Ok(record) => {
                tracing::debug!(id = %record.id, "created product");
                Ok(record)
            }
            Err(ProductFailure::TitleConflict) => Err(CatalogError::Conflict),
            Err(ProductFailure::DoesNotExist) => Err(CatalogError::Inconsistent),
        }
    }

    /// Retrieve a product by its identifier.
    #[instrument(skip(self))]
    pub async fn get_product(
        &self,
        product_id: R::ProductId,
    ) -> ServiceResult<ProductRecord<R::ProductId>, R> {
        self.repository
            .get_product(product_id.clone())
            .await
            .map_err(CatalogError::Storage)?
            .ok_or_else(|| CatalogError::NotFound(product_id.to_string()))
    }

    /// Merge `update` onto the stored product.
    ///
    /// Absent fields keep their stored value. An update without any present
    /// field returns the stored product untouched.
    #[instrument(skip(self, update))]
    pub async fn update_product(
        &self,
        product_id: R::ProductId,
        update: ProductUpdate,
    ) -> ServiceResult<ProductRecord<R::ProductId>, R> {
        if update.is_empty() {
            return self.get_product(product_id).await;
        }

        match self
            .repository
            .update_product(product_id.clone(), update)
            .await
            .map_err(CatalogError::Storage)?
        {
            Ok(record) => Ok(record),
            Err(ProductFailure::DoesNotExist) => {
                Err(CatalogError::NotFound(product_id.to_string()))
            }
            Err(ProductFailure::TitleConflict) => Err(CatalogError::Conflict),
        }
    }

    /// Return one page of the products matching `query`.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        query: ProductQuery,
    ) -> ServiceResult<Vec<ProductRecord<R::ProductId>>, R> {
        if query.page == 0 {
            return Err(ValidationError::new("page", "must be a positive integer").into());
        }
        if query.size == 0 {
            return Err(ValidationError::new("size", "must be a positive integer").into());
        }
        self.repository
            .query_products(&query)
            .await
            .map_err(CatalogError::Storage)
    }

    /// Remove a product. Its tags remain available to other products.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, product_id: R::ProductId) -> ServiceResult<(), R> {
        self.get_product(product_id.clone()).await?;
        if self
            .repository
            .delete_product(product_id.clone())
            .await
            .map_err(CatalogError::Storage)?
        {
            Ok(())
        } else {
            Err(CatalogError::NotFound(product_id.to_string()))
        }
    }

    /// Look up a tag by name.
    #[instrument(skip(self))]
    pub async fn get_tag(&self, name: &str) -> ServiceResult<TagRecord<R::TagId>, R> {
        self.repository
            .get_tag(name)
            .await
            .map_err(CatalogError::Storage)?
            .ok_or_else(|| CatalogError::TagNotFound(name.to_owned()))
    }

    /// Return one page of the products carrying the named tag.
    #[instrument(skip(self))]
    pub async fn products_by_tag(
        &self,
        name: &str,
        page: u32,
        size: u32,
    ) -> ServiceResult<Vec<ProductRecord<R::ProductId>>, R> {
        let tag = self.get_tag(name).await?;
        self.list_products(ProductQuery {
            tags: Some(vec![tag.name]),
            page,
            size,
            ..Default::default()
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CreateProductRequest, Distribution, Patch, ProductData, UpdateProductRequest,
    };
    use crate::ports::{ProductRepository, Repository, TagRepository};
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};
    use time::macros::datetime;

    #[derive(Default)]
    struct State {
        next_id: u64,
        products: BTreeMap<u64, ProductData>,
        tags: Vec<String>,
        // Report every create as vanished, as a broken backend might
        lose_creates: bool,
    }

    impl State {
        fn resolve_tags(&mut self, names: &[String]) {
            for name in names {
                if !self.tags.contains(name) {
                    self.tags.push(name.clone());
                }
            }
        }
    }

    /// An in-memory repository evaluating predicates with `Predicate::matches`.
    #[derive(Clone, Default)]
    struct MemoryRepository(Arc<Mutex<State>>);

    #[derive(Debug, thiserror::Error)]
    #[error("unreachable")]
    struct Never;

    impl Repository for MemoryRepository {
        type Error = Never;
        type ProductId = u64;
        type TagId = usize;
    }

    impl ProductRepository for MemoryRepository {
        async fn create_product(
            &self,
            data: ProductData,
        ) -> Result<Result<ProductRecord<u64>, ProductFailure>, Never> {
            let mut state = self.0.lock().unwrap();
            if state.lose_creates {
                return Ok(Err(ProductFailure::DoesNotExist));
            }
            if state.products.values().any(|p| p.title == data.title) {
                return Ok(Err(ProductFailure::TitleConflict));
            }
            state.resolve_tags(&data.tags);
            state.next_id += 1;
            let id = state.next_id;
            state.products.insert(id, data.clone());
            Ok(Ok(ProductRecord { id, data }))
        }

        async fn get_product(&self, product_id: u64) -> Result<Option<ProductRecord<u64>>, Never> {
            let state = self.0.lock().unwrap();
            Ok(state.products.get(&product_id).map(|data| ProductRecord {
                id: product_id,
                data: data.clone(),
            }))
        }

        async fn update_product(
            &self,
            product_id: u64,
            update: ProductUpdate,
        ) -> Result<Result<ProductRecord<u64>, ProductFailure>, Never> {
            let mut state = self.0.lock().unwrap();
            let Some(mut data) = state.products.get(&product_id).cloned() else {
                return Ok(Err(ProductFailure::DoesNotExist));
            };
            update.apply(&mut data);
            if state
                .products
                .iter()
                .any(|(id, p)| *id != product_id && p.title == data.title)
            {
                return Ok(Err(ProductFailure::TitleConflict));
            }
            state.resolve_tags(&data.tags);
            state.products.insert(product_id, data.clone());
            Ok(Ok(ProductRecord {
                id: product_id,
                data,
            }))
        }

        async fn query_products(
            &self,
            query: &ProductQuery,
        ) -> Result<Vec<ProductRecord<u64>>, Never> {
            let predicate = query.predicate();
            let state = self.0.lock().unwrap();
            Ok(state
                .products
                .iter()
                .filter(|(_, data)| predicate.matches(data))
                .skip(query.offset() as usize)
                .take(query.limit() as usize)
                .map(|(id, data)| ProductRecord {
                    id: *id,
                    data: data.clone(),
                })
                .collect())
        }

        async fn delete_product(&self, product_id: u64) -> Result<bool, Never> {
            Ok(self.0.lock().unwrap().products.remove(&product_id).is_some())
        }
    }

    impl TagRepository for MemoryRepository {
        async fn get_or_create_tag(&self, name: &str) -> Result<TagRecord<usize>, Never> {
            let mut state = self.0.lock().unwrap();
            state.resolve_tags(&[name.to_owned()]);
            let id = state.tags.iter().position(|t| t == name).unwrap();
            Ok(TagRecord {
                id,
                name: name.to_owned(),
            })
        }

        async fn get_tag(&self, name: &str) -> Result<Option<TagRecord<usize>>, Never> {
            let state = self.0.lock().unwrap();
            Ok(state
                .tags
                .iter()
                .position(|t| t == name)
                .map(|id| TagRecord {
                    id,
                    name: name.to_owned(),
                }))
        }
    }

    fn new_product(title: &str, tags: &[&str]) -> NewProduct {
        NewProduct::try_from(CreateProductRequest {
            title: Some(title.into()),
            is_physical: Some(false),
            format: Some("MP3".into()),
            currency: Some("USD".into()),
            price: Some("15.50".into()),
            release_date: Some(datetime!(1993-11-09 00:00 UTC)),
            store_name: Some("Wu shop".into()),
            product_group_title: Some("Wu tang records".into()),
            product_group_release_date: Some(datetime!(1993-01-01 00:00 UTC)),
            tags: Some(tags.iter().map(|t| t.to_string()).collect()),
        })
        .unwrap()
    }

    fn service() -> ProductService<MemoryRepository> {
        ProductService::new(MemoryRepository::default())
    }

    #[tokio::test]
    async fn test_create_then_read() {
        let service = service();
        let created = service
            .create_product(new_product(
                "A Tribe Called Quest - Midnight Marauders",
                &["Hip Hop"],
            ))
            .await
            .unwrap();
        assert_eq!(created.data.distribution, Distribution::Digital);

        let read = service.get_product(created.id).await.unwrap();
        assert_eq!(read, created);
    }

    #[tokio::test]
    async fn test_duplicate_title_conflicts() {
        let service = service();
        service
            .create_product(new_product("Wu Tang Clan - 36 Chambers", &["Hip Hop"]))
            .await
            .unwrap();
        let err = service
            .create_product(new_product("Wu Tang Clan - 36 Chambers", &["Jazz"]))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Conflict));
        assert_eq!(err.to_string(), "Request contains an existing entity");
        assert!(service.get_tag("Jazz").await.is_err());
    }

    #[tokio::test]
    async fn test_vanished_create_is_not_a_conflict() {
        let service = service();
        service.repository().0.lock().unwrap().lose_creates = true;
        let err = service
            .create_product(new_product("Wu Tang Clan - 36 Chambers", &["Hip Hop"]))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Inconsistent));
    }

    #[tokio::test]
    async fn test_partial_update_keeps_absent_fields() {
        let service = service();
        let created = service
            .create_product(new_product("De La Soul = 3 Foot High", &["Hip Hop"]))
            .await
            .unwrap();

        let update = ProductUpdate::try_from(UpdateProductRequest {
            title: Some("Adele - 30".into()),
            ..Default::default()
        })
        .unwrap();
        let updated = service.update_product(created.id, update).await.unwrap();

        assert_eq!(updated.data.title, "Adele - 30");
        let mut expected = created.data.clone();
        expected.title = "Adele - 30".into();
        assert_eq!(updated.data, expected);
    }

    #[tokio::test]
    async fn test_empty_update_is_noop() {
        let service = service();
        let created = service
            .create_product(new_product("Kanye West - Late Registration", &["Hip Hop"]))
            .await
            .unwrap();
        let updated = service
            .update_product(created.id, ProductUpdate::default())
            .await
            .unwrap();
        assert_eq!(updated, created);
    }

    #[tokio::test]
    async fn test_update_unknown_product() {
        let err = service()
            .update_product(
                42,
                ProductUpdate {
                    title: Patch::Present("Adele - 30".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Product: 42 does not exist");
    }

    #[tokio::test]
    async fn test_rename_onto_existing_title_conflicts() {
        let service = service();
        service
            .create_product(new_product("Wu Tang Clan - 36 Chambers", &["Hip Hop"]))
            .await
            .unwrap();
        let other = service
            .create_product(new_product("De La Soul = 3 Foot High", &["Hip Hop"]))
            .await
            .unwrap();
        let err = service
            .update_product(
                other.id,
                ProductUpdate {
                    title: Patch::Present("Wu Tang Clan - 36 Chambers".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Conflict));
    }

    #[tokio::test]
    async fn test_delete_unknown_product() {
        let err = service().delete_product(7).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(ref id) if id == "7"));
    }

    #[tokio::test]
    async fn test_delete_keeps_tags() {
        let service = service();
        let created = service
            .create_product(new_product("Wu Tang Clan - 36 Chambers", &["Hip Hop"]))
            .await
            .unwrap();
        service.delete_product(created.id).await.unwrap();
        assert!(service.get_product(created.id).await.is_err());
        assert_eq!(service.get_tag("Hip Hop").await.unwrap().name, "Hip Hop");
    }

    #[tokio::test]
    async fn test_list_filters_and_paginates() {
        let service = service();
        for title in [
            "A Tribe Called Quest - Midnight Marauders",
            "Wu Tang Clan - 36 Chambers",
            "De La Soul = 3 Foot High",
        ] {
            service
                .create_product(new_product(title, &["Hip Hop"]))
                .await
                .unwrap();
        }
        service
            .create_product(new_product(
                "Kanye West - Late Registration",
                &["Hip Hop", "Classical"],
            ))
            .await
            .unwrap();

        let all = service.list_products(ProductQuery::default()).await.unwrap();
        assert_eq!(all.len(), 4);

        let second_page = service
            .list_products(ProductQuery {
                page: 2,
                size: 3,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(second_page.len(), 1);

        let classical = service
            .products_by_tag("Classical", 1, 10)
            .await
            .unwrap();
        assert_eq!(classical.len(), 1);
        assert_eq!(classical[0].data.tags, vec!["Hip Hop", "Classical"]);

        let marauders = service
            .list_products(ProductQuery {
                title: Some("Midnight Marauders".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(marauders.len(), 1);
    }

    #[tokio::test]
    async fn test_zero_page_rejected() {
        let err = service()
            .list_products(ProductQuery {
                page: 0,
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error on field (page) : must be a positive integer"
        );
    }

    #[tokio::test]
    async fn test_unknown_tag() {
        let err = service()
            .products_by_tag("Grime", 1, 10)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Tag: Grime does not exist");
    }
}
