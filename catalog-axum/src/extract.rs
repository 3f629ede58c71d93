//! Extractor rejections rendered as [`ErrorResponse`] bodies.
//!
//! Handlers wrap axum's extractors in [`WithRejection`] with [`Rejection`], so
//! a body, query string or path that fails to deserialize is reported in the
//! same `Error on field (...) : ...` shape as a failed validation.

use crate::error::{ApiError, ErrorResponse};
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::QueryRejection;
use std::error::Error;

/// Re-exported so handlers can name the wrapper next to [`Rejection`].
pub(crate) use axum_extra::extract::WithRejection;

/// An extractor failure, already mapped onto the API's error body.
#[derive(Debug)]
pub(crate) struct Rejection(ApiError);

impl Rejection {
    fn new(status: StatusCode, fallback_field: &str, detail: String) -> Self {
        // Data errors carry a `path: reason` prefix when serde can locate the field
        let (field, rule) = match detail.split_once(": ") {
            Some((path, rule)) if !path.is_empty() && !path.contains(char::is_whitespace) => {
                (path.to_owned(), rule.to_owned())
            }
            _ => (fallback_field.to_owned(), detail),
        };

        // A well-formed request with the wrong shape is a bad request, not 422
        let status = if status == StatusCode::UNPROCESSABLE_ENTITY {
            StatusCode::BAD_REQUEST
        } else {
            status
        };

        Self((
            status,
            Json(ErrorResponse {
                error_message: format!("Error on field ({field}) : {rule}"),
            }),
        ))
    }
}

/// The innermost description of a rejection, without axum's generic prefix.
fn detail(rejection: &(impl Error + ToString)) -> String {
    rejection
        .source()
        .map(ToString::to_string)
        .unwrap_or_else(|| rejection.to_string())
}

impl From<JsonRejection> for Rejection {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), "body", detail(&rejection))
    }
}

impl From<QueryRejection> for Rejection {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(rejection.status(), "query", detail(&rejection))
    }
}

impl From<PathRejection> for Rejection {
    fn from(rejection: PathRejection) -> Self {
        Self::new(rejection.status(), "path", detail(&rejection))
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        self.0.into_response()
    }
}
