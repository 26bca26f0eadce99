use crate::error::ClimateError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde_json::json;
use thiserror::Error;

/// Wraps a [`ClimateError`] raised while answering a request.
///
/// Queries never fail for lack of matching rows, so anything reaching this type is an internal
/// failure and is answered with a 500 and a JSON `{"error": ...}` body.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub ClimateError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}
