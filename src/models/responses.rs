//! Response DTOs for the service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;

/// Body of the stub resource endpoints.
///
/// Field order matches the wire format: `message`, then `id`, then `cached`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Whether the handler answered from the TTL store
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached: Option<bool>,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            id: None,
            cached: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_cached(mut self, cached: bool) -> Self {
        self.cached = Some(cached);
        self
    }
}

// == V2 Users ==

#[derive(Debug, Clone, Serialize)]
pub struct UserV2 {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Pagination {
    pub total: u64,
    pub page: u64,
}

/// Response body for `GET /api/v2/users`
#[derive(Debug, Clone, Serialize)]
pub struct UserListV2Response {
    pub data: Vec<UserV2>,
    pub pagination: Pagination,
    pub message: String,
}

impl UserListV2Response {
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            pagination: Pagination { total: 0, page: 1 },
            message: "list all users - v2".to_string(),
        }
    }
}

/// Response body for `GET /api/v2/users/:id`
#[derive(Debug, Clone, Serialize)]
pub struct UserV2Response {
    pub data: UserV2,
    pub message: String,
}

impl UserV2Response {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            data: UserV2 {
                id: id.into(),
                name: String::new(),
            },
            message: "get user - v2".to_string(),
        }
    }
}

/// Statistics of one store, as reported by `GET /stats`
#[derive(Debug, Clone, Serialize)]
pub struct StoreStatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expired_removed: u64,
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StoreStatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expired_removed: stats.expired_removed,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the stats endpoint (GET /stats). Disabled layers are `null`.
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub store: Option<StoreStatsResponse>,
    pub response_cache: Option<StoreStatsResponse>,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status, always "ok"
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_response_field_order() {
        let resp = MessageResponse::new("get user").with_id("7").with_cached(false);
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"message":"get user","id":"7","cached":false}"#);
    }

    #[test]
    fn test_message_response_omits_unset_fields() {
        let json = serde_json::to_string(&MessageResponse::new("list all users")).unwrap();
        assert_eq!(json, r#"{"message":"list all users"}"#);
    }

    #[test]
    fn test_user_list_v2_shape() {
        let json = serde_json::to_string(&UserListV2Response::empty()).unwrap();
        assert_eq!(
            json,
            r#"{"data":[],"pagination":{"total":0,"page":1},"message":"list all users - v2"}"#
        );
    }

    #[test]
    fn test_stats_response_hit_rate() {
        let stats = CacheStats {
            hits: 80,
            misses: 20,
            evictions: 5,
            expired_removed: 0,
            total_entries: 100,
        };
        let resp = StoreStatsResponse::from(stats);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
        assert_eq!(resp.evictions, 5);
    }

    #[test]
    fn test_health_response_serialize() {
        let json = serde_json::to_string(&HealthResponse::ok()).unwrap();
        assert!(json.contains(r#""status":"ok""#));
        assert!(json.contains("timestamp"));
    }
}
