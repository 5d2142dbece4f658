use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage call exceeded {0:?}")]
    Timeout(Duration),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Incorrect body: {0}")]
    IncorrectBody(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Status code and the public `description` for this error kind.
    pub fn classify(&self) -> (StatusCode, &'static str) {
        match self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad request"),
            Self::IncorrectBody(_) => (StatusCode::BAD_REQUEST, "incorrect body"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "not found"),
            Self::Database(_)
            | Self::HttpRequest(_)
            | Self::Serialization(_)
            | Self::Timeout(_)
            | Self::ExternalApi(_)
            | Self::Internal(_)
            | Self::Other(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal server error"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, description) = self.classify();

        match &self {
            Self::Database(e) => tracing::error!("Database error: {}", e),
            Self::HttpRequest(e) => tracing::error!("HTTP request error: {}", e),
            Self::Serialization(e) => tracing::error!("Serialization error: {}", e),
            Self::Timeout(limit) => tracing::error!("Storage call timed out after {:?}", limit),
            Self::ExternalApi(msg) => tracing::error!("External API error: {}", msg),
            Self::Internal(msg) => tracing::error!("Internal error: {}", msg),
            Self::Other(e) => tracing::error!("Unexpected error: {}", e),
            Self::BadRequest(msg) | Self::IncorrectBody(msg) => {
                tracing::warn!("Rejected request: {}", msg)
            }
            Self::Unauthorized(msg) => tracing::warn!("Unauthorized access: {}", msg),
            Self::NotFound(msg) => tracing::debug!("Not found: {}", msg),
        }

        (status, Json(json!({ "description": description }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_keep_their_status() {
        assert_eq!(
            AppError::BadRequest("x".into()).classify(),
            (StatusCode::BAD_REQUEST, "bad request")
        );
        assert_eq!(
            AppError::IncorrectBody("x".into()).classify(),
            (StatusCode::BAD_REQUEST, "incorrect body")
        );
        assert_eq!(
            AppError::NotFound("x".into()).classify(),
            (StatusCode::NOT_FOUND, "not found")
        );
        assert_eq!(
            AppError::Unauthorized("x".into()).classify(),
            (StatusCode::UNAUTHORIZED, "unauthorized")
        );
    }

    #[test]
    fn upstream_failures_collapse_to_internal() {
        let (status, description) = AppError::ExternalApi("503".into()).classify();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(description, "internal server error");

        let (status, _) = AppError::Timeout(Duration::from_secs(5)).classify();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
