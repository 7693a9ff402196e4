//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and JSON error bodies, and turns
//! axum extractor rejections into validation errors so every malformed request
//! is answered the same way.
//!
//! | Error                     | Status |
//! |---------------------------|--------|
//! | `SlotError::NotFound`     | 404    |
//! | `SlotError::Validation`   | 422    |
//! | `SlotError::Integrity`    | 422    |
//! | `SlotError::Database`     | 500    |
//! | `SlotError::Internal`     | 500    |

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use slotsync_core::errors::SlotError;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use slotsync_api::middleware::error_handling::AppError;
/// use slotsync_core::errors::SlotError;
///
/// async fn handler(title: Option<String>) -> Result<Json<String>, AppError> {
///     let title = title.ok_or_else(|| SlotError::Validation("title is required".to_string()))?;
///     Ok(Json(title))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub SlotError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            SlotError::NotFound(_) => StatusCode::NOT_FOUND,
            SlotError::Validation(_) | SlotError::Integrity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            SlotError::Database(_) | SlotError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = ?self.0, "Request failed");
        } else {
            tracing::debug!(status = %status, error = %self.0, "Request rejected");
        }

        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

impl From<SlotError> for AppError {
    fn from(err: SlotError) -> Self {
        AppError(err)
    }
}

impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(SlotError::Database(err))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError(SlotError::Validation(rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError(SlotError::Validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError(SlotError::Validation(rejection.body_text()))
    }
}
