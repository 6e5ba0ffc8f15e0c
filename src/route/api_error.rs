use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use crate::select_server;
use crate::server_repository::server_repository_error::ServerRepositoryError;

/// Failure of a request, rendered as `{"error": message}`.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("Database configuration missing")]
    ConfigurationMissing,
    #[error("{0}")]
    NotFound(String),
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("{0}")]
    Datastore(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::ConfigurationMissing => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Datastore(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!("Request failed: {self}");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<ServerRepositoryError> for ApiError {
    fn from(error: ServerRepositoryError) -> Self {
        ApiError::Datastore(error.to_string())
    }
}

impl From<select_server::error::Error> for ApiError {
    fn from(error: select_server::error::Error) -> Self {
        ApiError::NotFound(error.to_string())
    }
}
