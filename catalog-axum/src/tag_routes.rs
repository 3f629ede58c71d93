//! REST API endpoints for tag operations.

use crate::{
    ApiRepository,
    config::AxumConfig,
    error::{ApiError, ErrorResponse, api_error},
    extract::{Rejection, WithRejection},
};
use aide::{
    axum::{ApiRouter, routing::get_with},
    transform::TransformOperation,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
};
use axum_extra::extract::Query;
use catalog_core::{
    models::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, ProductRecord},
    service::ProductService,
};
use std::sync::Arc;

/// Path parameter for tag-specific endpoints.
#[derive(serde::Deserialize, schemars::JsonSchema)]
#[schemars(inline)]
struct TagName {
    /// The exact, case-sensitive name of the tag
    name: String,
}

/// Pagination of a product listing.
#[derive(serde::Deserialize, schemars::JsonSchema)]
#[schemars(inline)]
struct Page {
    /// The 1-based page number
    #[serde(default = "default_page")]
    page: u32,
    /// The maximum number of products per page
    #[serde(default = "default_size")]
    size: u32,
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// Creates a router with tag-related endpoints.
pub fn router<R: ApiRepository>() -> ApiRouter<ProductService<R>> {
    ApiRouter::new().api_route_with(
        "/tag/{name}/products",
        get_with(tagged_products::<R>, tagged_products_docs),
        |route| route.tag("tag").tag("search"),
    )
}

/// List the products carrying a tag.
///
/// # Returns
///
/// - `200 OK`: The requested page, ordered by product id
/// - `400 Bad Request`: `page` or `size` is zero
/// - `404 Not Found`: Tag does not exist
/// - `500 Internal Server Error`: Database query failed
async fn tagged_products<R: ApiRepository>(
    State(service): State<ProductService<R>>,
    Extension(config): Extension<Arc<AxumConfig>>,
    WithRejection(Path(TagName { name }), _): WithRejection<Path<TagName>, Rejection>,
    WithRejection(Query(Page { page, size }), _): WithRejection<Query<Page>, Rejection>,
) -> Result<Json<Vec<ProductRecord<R::ProductId>>>, ApiError> {
    service
        .products_by_tag(&name, page, size.min(config.page_limit))
        .await
        .map(Json)
        .map_err(api_error)
}

fn tagged_products_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("Products by tag")
        .response_with::<400, Json<ErrorResponse>, _>(|res| {
            res.description("Invalid pagination")
        })
        .response_with::<404, Json<ErrorResponse>, _>(|res| res.description("Tag does not exist"))
        .response_with::<500, Json<ErrorResponse>, _>(|res| {
            res.description("Database query failed")
        })
}
