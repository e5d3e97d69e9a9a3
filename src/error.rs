//! Error types for the service
//!
//! Provides unified error handling using thiserror. A missing or expired cache
//! key is never an error; lookups return `Option` instead.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Api Error Enum ==
/// Unified error type for the service.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request rejected by a handler
    #[error("{0}")]
    BadRequest(String),

    /// Operation refused by the business rules of a resource
    #[error("{0}")]
    OperationNotAllowed(String),

    /// Request denied by the admission gate
    #[error("rate limit exceeded")]
    RateLimited,

    /// Encoding a value for the JSON helpers failed
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A store already has its background sweeper
    #[error("sweeper already running for store '{0}'")]
    SweeperRunning(&'static str),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::OperationNotAllowed(_) => StatusCode::BAD_REQUEST,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Serialization(_)
            | ApiError::SweeperRunning(_)
            | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            ApiError::OperationNotAllowed(msg) => json!({
                "error": msg,
                "code": "OPERATION_NOT_ALLOWED"
            }),
            other => json!({
                "error": other.to_string(),
                "code": status.as_u16()
            }),
        };

        (status, Json(body)).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the service.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_rate_limited_response() {
        let (status, json) = body_json(ApiError::RateLimited).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(json["error"], "rate limit exceeded");
        assert_eq!(json["code"], 429);
    }

    #[tokio::test]
    async fn test_operation_not_allowed_response() {
        let (status, json) =
            body_json(ApiError::OperationNotAllowed("cannot delete".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "OPERATION_NOT_ALLOWED");
    }

    #[tokio::test]
    async fn test_bad_request_carries_numeric_code() {
        let (status, json) = body_json(ApiError::BadRequest("cannot delete user".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "cannot delete user");
        assert_eq!(json["code"], 400);
    }
}
