//! Rate limiting middleware.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::admission::TokenBucket;
use crate::error::ApiError;

/// Rejects the request with `429` when the bucket is empty.
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<TokenBucket>>,
    request: Request,
    next: Next,
) -> Response {
    if !limiter.allow() {
        warn!(path = request.uri().path(), "rate limit exceeded");
        return ApiError::RateLimited.into_response();
    }
    next.run(request).await
}
