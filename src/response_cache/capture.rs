//! Body capture and cache-flag injection.
//!
//! The flag is a best-effort textual patch: a body whose last byte is `}` gets
//! `"cached":<bool>` spliced in before that brace. Nothing is parsed, so any
//! other payload passes through byte for byte.

use axum::body::Body;
use bytes::{BufMut, Bytes, BytesMut};
use http_body_util::BodyExt;

const CACHED_TRUE: &[u8] = br#""cached":true}"#;
const CACHED_FALSE: &[u8] = br#""cached":false}"#;

/// Splices the `cached` field into a JSON-object-looking chunk.
pub fn inject_cache_flag(chunk: &Bytes, cached: bool) -> Bytes {
    let Some((b'}', head)) = chunk.split_last() else {
        return chunk.clone();
    };

    let field = if cached { CACHED_TRUE } else { CACHED_FALSE };
    // `{}` takes the field without a separator.
    let empty_object = head
        .iter()
        .rev()
        .find(|b| !b.is_ascii_whitespace())
        == Some(&b'{');

    let mut out = BytesMut::with_capacity(chunk.len() + field.len() + 1);
    out.extend_from_slice(head);
    if !empty_object {
        out.put_u8(b',');
    }
    out.extend_from_slice(field);
    out.freeze()
}

/// A downstream body read to completion.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedBody {
    /// Bytes exactly as the handler produced them
    pub raw: Bytes,
    /// Bytes to send on a miss: first data frame patched, the rest untouched
    pub outgoing: Bytes,
}

impl RecordedBody {
    /// Drains `body` frame by frame. Trailers are dropped.
    pub async fn capture(mut body: Body) -> Result<Self, axum::Error> {
        let mut raw = BytesMut::new();
        let mut outgoing = BytesMut::new();
        let mut first_write = true;

        while let Some(frame) = body.frame().await {
            let Ok(data) = frame?.into_data() else {
                continue;
            };
            if data.is_empty() {
                continue;
            }

            raw.extend_from_slice(&data);
            if first_write {
                outgoing.extend_from_slice(&inject_cache_flag(&data, false));
                first_write = false;
            } else {
                outgoing.extend_from_slice(&data);
            }
        }

        Ok(Self {
            raw: raw.freeze(),
            outgoing: outgoing.freeze(),
        })
    }
}
