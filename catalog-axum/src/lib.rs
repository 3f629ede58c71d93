#![warn(missing_docs)]
// Note: this overwrites the link in the README to point to the rust docs of the catalog-core crate.
//! [catalog_core]: https://docs.rs/catalog_core/latest/catalog_core/index.html
#![doc = include_str!("../README.md")]

mod error;
mod extract;
mod product_routes;
mod tag_routes;

use aide::{
    axum::{ApiRouter, routing::get},
    openapi::OpenApi,
};
use axum::{Extension, Json};
use catalog_core::{
    ports::{CatalogRepository, Repository},
    service::ProductService,
};
use schemars::JsonSchema;
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

mod openapi;
use openapi::{api_docs, docs_routes};

pub mod config;
use config::AxumConfig;

pub use error::ErrorResponse;

/// Response for the health check endpoint
#[derive(Serialize, JsonSchema)]
#[schemars(inline)]
struct HealthResponse {
    status: String,
}

/// Simple health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Construct a full API router serving the given service, together with the
/// OpenAPI document describing it.
pub fn router<R: ApiRepository>(
    service: ProductService<R>,
    config: AxumConfig,
) -> (axum::Router, Arc<OpenApi>) {
    let mut api = OpenApi::default();
    let routes = ApiRouter::new()
        .merge(product_routes::router::<R>())
        .merge(tag_routes::router::<R>());

    let router = ApiRouter::new()
        .api_route("/health", get(health_check))
        .nest("/api", routes)
        .nest_api_service("/docs", docs_routes())
        .finish_api_with(&mut api, api_docs);

    // Arc is very important here or you will face massive memory and performance issues
    let api = Arc::new(api);
    let router = router
        .layer(Extension(api.clone()))
        .layer(Extension(Arc::new(config)))
        .layer(TraceLayer::new_for_http())
        .with_state(service);

    (router, api)
}

/// Starts the HTTP server with the provided configuration
pub async fn start_server<R: ApiRepository>(
    config: AxumConfig,
    service: ProductService<R>,
) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    tracing::info!("Listening for requests on {}", listener.local_addr()?);

    let (service, _) = router(service, config);
    axum::serve(listener, service).await
}

/// Axum and aide impose constraints on everything that flows through a
/// handler. This trait, coupled with a blanket implementation, specifies them
/// upfront and in one place: any repository whose identifiers can be
/// documented can back the API.
pub trait ApiRepository:
    CatalogRepository + Repository<ProductId: JsonSchema, TagId: JsonSchema>
{
}

// this is the blanket implementation
impl<T> ApiRepository for T where
    T: CatalogRepository + Repository<ProductId: JsonSchema, TagId: JsonSchema>
{
}
