//! REST API endpoints for product operations.
//!
//! This module provides the product lifecycle (create, read, partial update,
//! delete) together with the filtered, paginated product listing.

use crate::{
    ApiRepository,
    config::AxumConfig,
    error::{ApiError, ErrorResponse, api_error, invalid},
    extract::{Rejection, WithRejection},
};
use aide::{
    axum::{
        ApiRouter,
        routing::{delete_with, get_with, post_with},
    },
    transform::TransformOperation,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::Query;
use catalog_core::{
    models::{
        CreateProductRequest, NewProduct, ProductQuery, ProductRecord, ProductUpdate,
        UpdateProductRequest,
    },
    service::ProductService,
};
use std::sync::Arc;

/// Path parameter for product-specific endpoints.
#[derive(serde::Deserialize, schemars::JsonSchema)]
#[schemars(inline)]
struct Id<T> {
    /// The unique identifier of the product
    product_id: T,
}

/// Creates a router with product-related endpoints.
pub fn router<R: ApiRepository>() -> ApiRouter<ProductService<R>> {
    ApiRouter::new()
        .api_route_with(
            "/product/create",
            post_with(create_product::<R>, create_product_docs),
            |route| route.tag("product"),
        )
        .api_route_with(
            "/product/{product_id}",
            get_with(read_product::<R>, read_product_docs)
                .put_with(update_product::<R>, update_product_docs),
            |route| route.tag("product"),
        )
        .api_route_with(
            "/product/{product_id}/delete",
            delete_with(delete_product::<R>, delete_product_docs),
            |route| route.tag("product"),
        )
        .api_route_with(
            "/products",
            get_with(list_products::<R>, list_products_docs),
            |route| route.tag("product").tag("search"),
        )
}

/// Create a new product.
///
/// Tags that do not exist yet are created alongside the product.
///
/// # Returns
///
/// - `200 OK`: The stored product
/// - `400 Bad Request`: A field is invalid, or the title is already in use
/// - `500 Internal Server Error`: Database operation failed
async fn create_product<R: ApiRepository>(
    State(service): State<ProductService<R>>,
    WithRejection(Json(request), _): WithRejection<Json<CreateProductRequest>, Rejection>,
) -> Result<Json<ProductRecord<R::ProductId>>, ApiError> {
    let product = NewProduct::try_from(request).map_err(invalid)?;
    service
        .create_product(product)
        .await
        .map(Json)
        .map_err(api_error)
}

fn create_product_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("Create product")
        .description(
            r#"
            Store a new product. Every field is required and the tag list must
            not be empty. The distribution is derived from `isPhysical`.
            "#,
        )
        .response_with::<400, Json<ErrorResponse>, _>(|res| {
            res.description("Invalid field or duplicate title")
        })
        .response_with::<500, Json<ErrorResponse>, _>(|res| {
            res.description("Database operation failed")
        })
}

/// Retrieve a product.
///
/// # Returns
///
/// - `200 OK`: The product
/// - `404 Not Found`: Product does not exist
/// - `500 Internal Server Error`: Database query failed
async fn read_product<R: ApiRepository>(
    State(service): State<ProductService<R>>,
    WithRejection(Path(Id { product_id }), _): WithRejection<Path<Id<R::ProductId>>, Rejection>,
) -> Result<Json<ProductRecord<R::ProductId>>, ApiError> {
    service
        .get_product(product_id)
        .await
        .map(Json)
        .map_err(api_error)
}

fn read_product_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("Read product")
        .response_with::<404, Json<ErrorResponse>, _>(|res| {
            res.description("Product does not exist")
        })
        .response_with::<500, Json<ErrorResponse>, _>(|res| {
            res.description("Database query failed")
        })
}

/// Partially update a product.
///
/// Only the fields present in the body are changed. A present tag list
/// replaces the product's tags wholesale.
///
/// # Returns
///
/// - `200 OK`: The updated product
/// - `400 Bad Request`: A field is invalid, or the new title is already in use
/// - `404 Not Found`: Product does not exist
/// - `500 Internal Server Error`: Database operation failed
async fn update_product<R: ApiRepository>(
    State(service): State<ProductService<R>>,
    WithRejection(Path(Id { product_id }), _): WithRejection<Path<Id<R::ProductId>>, Rejection>,
    WithRejection(Json(request), _): WithRejection<Json<UpdateProductRequest>, Rejection>,
) -> Result<Json<ProductRecord<R::ProductId>>, ApiError> {
    let update = ProductUpdate::try_from(request).map_err(invalid)?;
    service
        .update_product(product_id, update)
        .await
        .map(Json)
        .map_err(api_error)
}

fn update_product_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("Update product")
        .description(
            r#"
            Merge the supplied fields onto the stored product. Omitted fields
            keep their value; an empty body changes nothing.
            "#,
        )
        .response_with::<400, Json<ErrorResponse>, _>(|res| {
            res.description("Invalid field or duplicate title")
        })
        .response_with::<404, Json<ErrorResponse>, _>(|res| {
            res.description("Product does not exist")
        })
        .response_with::<500, Json<ErrorResponse>, _>(|res| {
            res.description("Database operation failed")
        })
}

/// Delete a product.
///
/// The product's tags remain available to other products.
///
/// # Returns
///
/// - `204 No Content`: Product deleted
/// - `404 Not Found`: Product does not exist
/// - `500 Internal Server Error`: Database operation failed
async fn delete_product<R: ApiRepository>(
    State(service): State<ProductService<R>>,
    WithRejection(Path(Id { product_id }), _): WithRejection<Path<Id<R::ProductId>>, Rejection>,
) -> Result<StatusCode, ApiError> {
    service
        .delete_product(product_id)
        .await
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(api_error)
}

fn delete_product_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("Delete product")
        .response_with::<404, Json<ErrorResponse>, _>(|res| {
            res.description("Product does not exist")
        })
        .response_with::<500, Json<ErrorResponse>, _>(|res| {
            res.description("Database operation failed")
        })
}

/// Filter and paginate products.
///
/// Every query parameter is optional and an absent parameter places no
/// constraint. `tags` may be repeated; a product matches if it carries any of
/// them. The page size is capped by the server's configured page limit.
///
/// # Returns
///
/// - `200 OK`: The requested page, ordered by product id
/// - `400 Bad Request`: `page` or `size` is zero
/// - `500 Internal Server Error`: Database query failed
async fn list_products<R: ApiRepository>(
    State(service): State<ProductService<R>>,
    Extension(config): Extension<Arc<AxumConfig>>,
    WithRejection(Query(mut query), _): WithRejection<Query<ProductQuery>, Rejection>,
) -> Result<Json<Vec<ProductRecord<R::ProductId>>>, ApiError> {
    query.size = query.size.min(config.page_limit);
    service
        .list_products(query)
        .await
        .map(Json)
        .map_err(api_error)
}

fn list_products_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("Search products")
        .description(
            r#"
            Substring filters (`store_name`, `title`, `group_title`) are case
            sensitive. Date bounds are inclusive RFC 3339 instants: `*_after`
            is the lower bound and `*_before` the upper bound.
            "#,
        )
        .response_with::<400, Json<ErrorResponse>, _>(|res| {
            res.description("Invalid pagination")
        })
        .response_with::<500, Json<ErrorResponse>, _>(|res| {
            res.description("Database query failed")
        })
}
