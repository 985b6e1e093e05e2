//! HTTP mapping for pipeline errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ragchat_core::Error;
use serde::Serialize;
use tracing::{error, warn};

/// Handler error; wraps the core error taxonomy.
#[derive(Debug)]
pub struct AppError(pub Error);

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self.0, Error::Unauthenticated) {
            return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
        }
        let status = if self.0.is_client_error() {
            warn!("Rejected chat request: {}", self.0);
            StatusCode::BAD_REQUEST
        } else {
            error!("Chat request failed: {}", self.0);
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}
