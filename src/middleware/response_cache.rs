//! Response caching middleware.
//!
//! GET requests are looked up in the [`ResponseCache`]. A hit is replayed with
//! an `x-cache: HIT` header and `"cached":true` in its body. A miss runs the
//! handler, answers with `"cached":false` spliced into the first body chunk,
//! and stores the raw response when its status is 2xx. Other methods pass
//! straight through.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderName, HeaderValue, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::response_cache::{
    inject_cache_flag, RecordedBody, ResponseCache, ResponseSnapshot, CACHE_STATUS_HEADER,
};

pub async fn response_cache_middleware(
    State(cache): State<ResponseCache>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() != Method::GET {
        return next.run(request).await;
    }

    let method = request.method().clone();
    let uri = request.uri().clone();

    if let Some(snapshot) = cache.lookup(&method, &uri).await {
        let body = inject_cache_flag(&snapshot.body, true);
        let marker = (
            HeaderName::from_static(CACHE_STATUS_HEADER),
            HeaderValue::from_static("HIT"),
        );
        return snapshot.to_response(body, Some(marker));
    }

    let response = next.run(request).await;
    let (mut parts, body) = response.into_parts();

    let recorded = match RecordedBody::capture(body).await {
        Ok(recorded) => recorded,
        Err(err) => {
            warn!(path = uri.path(), error = %err, "failed to read response body");
            return ApiError::Internal("failed to read response body".to_string()).into_response();
        }
    };

    // Patched bodies change length; let the server recompute it.
    parts.headers.remove(header::CONTENT_LENGTH);

    let snapshot = ResponseSnapshot::new(parts.status, parts.headers.clone(), recorded.raw);
    if snapshot.is_success() {
        cache.store(&method, &uri, snapshot).await;
    } else {
        debug!(path = uri.path(), status = parts.status.as_u16(), "response not cached");
    }

    Response::from_parts(parts, Body::from(recorded.outgoing))
}
