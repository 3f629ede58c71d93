use axum::{Json, http::StatusCode};
use catalog_core::{models::ValidationError, service::CatalogError};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{Level, event};

/// The body of every failed request.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// A human-readable description of the failure
    pub error_message: String,
}

pub(crate) type ApiError = (StatusCode, Json<ErrorResponse>);

fn respond(status: StatusCode, message: impl ToString) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error_message: message.to_string(),
        }),
    )
}

fn unavailable() -> ApiError {
    respond(
        StatusCode::INTERNAL_SERVER_ERROR,
        "the catalog is temporarily unavailable",
    )
}

/// Map a service failure onto its HTTP representation.
///
/// Storage failures are logged here and replaced by a generic message.
pub(crate) fn api_error<E: std::error::Error>(err: CatalogError<E>) -> ApiError {
    match err {
        CatalogError::NotFound(_) | CatalogError::TagNotFound(_) => {
            respond(StatusCode::NOT_FOUND, err)
        }
        CatalogError::Conflict | CatalogError::Validation(_) => {
            respond(StatusCode::BAD_REQUEST, err)
        }
        CatalogError::Inconsistent => {
            event!(Level::ERROR, err = err.to_string());
            unavailable()
        }
        CatalogError::Storage(err) => {
            event!(Level::ERROR, err = err.to_string());
            unavailable()
        }
    }
}

pub(crate) fn invalid(err: ValidationError) -> ApiError {
    respond(StatusCode::BAD_REQUEST, err)
}
