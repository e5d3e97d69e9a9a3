//! Captured HTTP response.

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::Response,
};
use bytes::Bytes;

/// Status, headers and raw body of a response, ready for replay.
///
/// The body is stored without any cache flag; the flag is spliced in each
/// time the snapshot is served.
#[derive(Debug, Clone)]
pub struct ResponseSnapshot {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl ResponseSnapshot {
    /// Builds a snapshot, dropping `content-length` since replayed bodies are
    /// rewritten and re-measured.
    pub fn new(status: StatusCode, mut headers: HeaderMap, body: Bytes) -> Self {
        headers.remove(header::CONTENT_LENGTH);
        Self {
            status,
            headers,
            body,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Rebuilds a response with `body` and one extra header.
    pub(crate) fn to_response(
        &self,
        body: Bytes,
        marker: Option<(HeaderName, HeaderValue)>,
    ) -> Response {
        let mut response = Response::new(Body::from(body));
        *response.status_mut() = self.status;

        let headers = response.headers_mut();
        for (name, value) in self.headers.iter() {
            headers.append(name.clone(), value.clone());
        }
        if let Some((name, value)) = marker {
            headers.append(name, value);
        }
        response
    }
}
