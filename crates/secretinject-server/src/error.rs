//! API error handling.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::signature::SignatureError;
use secretinject_config::ConfigError;

/// Errors answering a conversion request.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Signature(#[from] SignatureError),

    #[error("Invalid JSON: {0}")]
    InvalidRequest(#[from] serde_json::Error),

    #[error(transparent)]
    Conversion(#[from] ConfigError),

    #[error("conversion task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ApiError {
    /// Status code sent to the CI server.
    ///
    /// Rejected signatures and unreadable pipelines are both client errors;
    /// the host treats any non-200 answer as a failed conversion.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Signature(_) | ApiError::InvalidRequest(_) | ApiError::Conversion(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}
