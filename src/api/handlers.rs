//! API Handlers
//!
//! HTTP request handlers. The resource endpoints are fixed stub responses;
//! the v1 user reads go through the TTL store and report `cached` themselves.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use tracing::warn;

use super::AppState;
use crate::error::{ApiError, Result};
use crate::models::{
    HealthResponse, MessageResponse, StatsResponse, StoreStatsResponse, UserListV2Response,
    UserV2Response,
};

const USERS_LIST_KEY: &str = "users:list";

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Handler for GET /stats
///
/// Reports counters for each enabled store.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let store: Option<StoreStatsResponse> = match &state.store {
        Some(store) => Some(store.stats().await.into()),
        None => None,
    };
    let response_cache: Option<StoreStatsResponse> = match &state.responses {
        Some(responses) => Some(responses.stats().await.into()),
        None => None,
    };

    Json(StatsResponse {
        store,
        response_cache,
    })
}

// == Users v1 ==

/// Handler for GET /api/v1/users
pub async fn list_users(State(state): State<AppState>) -> Json<MessageResponse> {
    if let Some(store) = &state.store {
        if let Some(Value::String(message)) = store.get(USERS_LIST_KEY).await {
            return Json(MessageResponse::new(message).with_cached(true));
        }
        store
            .set(USERS_LIST_KEY, Value::String("list all users".to_string()))
            .await;
    }

    Json(MessageResponse::new("list all users").with_cached(false))
}

/// Handler for POST /api/v1/users
pub async fn create_user() -> (StatusCode, Json<MessageResponse>) {
    (StatusCode::CREATED, Json(MessageResponse::new("user created")))
}

/// Handler for GET /api/v1/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<MessageResponse> {
    let key = format!("user:{id}");

    if let Some(store) = &state.store {
        if let Some(message) = store.get_json::<String>(&key).await {
            return Json(MessageResponse::new(message).with_id(id).with_cached(true));
        }
        if let Err(err) = store.set_json(key, "get user").await {
            warn!(error = %err, "failed to cache user");
        }
    }

    Json(MessageResponse::new("get user").with_id(id).with_cached(false))
}

/// Handler for PUT /api/v1/users/:id
pub async fn update_user(Path(id): Path<String>) -> Json<MessageResponse> {
    Json(MessageResponse::new("user updated").with_id(id))
}

/// Handler for DELETE /api/v1/users/:id
///
/// Always refused; the store is never invalidated on writes.
pub async fn delete_user(Path(_id): Path<String>) -> Result<Json<MessageResponse>> {
    Err(ApiError::BadRequest("cannot delete user".to_string()))
}

// == Products v1 ==

/// Handler for GET /api/v1/products
pub async fn list_products() -> Json<MessageResponse> {
    Json(MessageResponse::new("list all products"))
}

/// Handler for POST /api/v1/products
pub async fn create_product() -> (StatusCode, Json<MessageResponse>) {
    (StatusCode::CREATED, Json(MessageResponse::new("product created")))
}

/// Handler for GET /api/v1/products/:id
pub async fn get_product(Path(id): Path<String>) -> Json<MessageResponse> {
    Json(MessageResponse::new("get product").with_id(id))
}

/// Handler for PUT /api/v1/products/:id
pub async fn update_product(Path(id): Path<String>) -> Json<MessageResponse> {
    Json(MessageResponse::new("product updated").with_id(id))
}

/// Handler for DELETE /api/v1/products/:id
pub async fn delete_product(Path(_id): Path<String>) -> Result<Json<MessageResponse>> {
    Err(ApiError::OperationNotAllowed(
        "cannot delete product at this time".to_string(),
    ))
}

// == Users v2 ==

/// Handler for GET /api/v2/users
pub async fn list_users_v2() -> Json<UserListV2Response> {
    Json(UserListV2Response::empty())
}

/// Handler for GET /api/v2/users/:id
pub async fn get_user_v2(Path(id): Path<String>) -> Json<UserV2Response> {
    Json(UserV2Response::new(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::TtlCache;
    use std::time::Duration;

    fn state_with_store() -> AppState {
        AppState::new().with_store(TtlCache::new(Duration::from_secs(300), 100))
    }

    #[tokio::test]
    async fn test_list_users_miss_then_hit() {
        let state = state_with_store();

        let first = list_users(State(state.clone())).await;
        assert_eq!(first.cached, Some(false));
        assert_eq!(first.message, "list all users");

        let second = list_users(State(state)).await;
        assert_eq!(second.cached, Some(true));
        assert_eq!(second.message, "list all users");
    }

    #[tokio::test]
    async fn test_list_users_without_store() {
        let state = AppState::new();

        for _ in 0..2 {
            let response = list_users(State(state.clone())).await;
            assert_eq!(response.cached, Some(false));
        }
    }

    #[tokio::test]
    async fn test_get_user_uses_json_helpers() {
        let state = state_with_store();

        let first = get_user(State(state.clone()), Path("7".to_string())).await;
        assert_eq!(first.cached, Some(false));
        assert_eq!(first.id.as_deref(), Some("7"));

        let stored = state.store.as_ref().unwrap().get("user:7").await;
        assert_eq!(stored, Some(Value::String("\"get user\"".to_string())));

        let second = get_user(State(state), Path("7".to_string())).await;
        assert_eq!(second.cached, Some(true));
        assert_eq!(second.message, "get user");
    }

    #[tokio::test]
    async fn test_delete_handlers_refuse() {
        let user = delete_user(Path("1".to_string())).await;
        assert!(matches!(user, Err(ApiError::BadRequest(_))));

        let product = delete_product(Path("1".to_string())).await;
        assert!(matches!(product, Err(ApiError::OperationNotAllowed(_))));
    }

    #[tokio::test]
    async fn test_stats_handler_reports_enabled_stores() {
        let state = state_with_store();
        let listed = list_users(State(state.clone())).await;
        assert_eq!(listed.cached, Some(false));

        let response = stats_handler(State(state)).await;
        let store = response.store.clone().unwrap();
        assert_eq!(store.misses, 1);
        assert_eq!(store.total_entries, 1);
        assert!(response.response_cache.is_none());
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "ok");
    }
}
