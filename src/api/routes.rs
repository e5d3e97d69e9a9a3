//! API Routes
//!
//! Configures the Axum router with all endpoints and the cache/admission
//! middleware stack.

use axum::{middleware::from_fn_with_state, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use super::handlers::{
    create_product, create_user, delete_product, delete_user, get_product, get_user, get_user_v2,
    health_handler, list_products, list_users, list_users_v2, stats_handler, update_product,
    update_user,
};
use super::AppState;
use crate::middleware::{rate_limit_middleware, response_cache_middleware};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /health`, `GET /stats`
/// - `/api/v1/users[/:id]` - reads backed by the TTL store
/// - `/api/v1/products[/:id]`, `/api/v2/users[/:id]` - behind the response cache
///
/// # Middleware
/// - Rate limiting: outermost application layer, so denied requests never
///   reach the caches
/// - Response cache: only on the routes listed above, when enabled
/// - Request timeout (`408`), CORS and request tracing
pub fn create_router(state: AppState) -> Router {
    let mut cached_routes: Router<AppState> = Router::new()
        .route("/api/v1/products", get(list_products).post(create_product))
        .route(
            "/api/v1/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/api/v2/users", get(list_users_v2))
        .route("/api/v2/users/:id", get(get_user_v2));

    if let Some(responses) = state.responses.clone() {
        cached_routes =
            cached_routes.layer(from_fn_with_state(responses, response_cache_middleware));
    }

    let router: Router<AppState> = Router::new()
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler))
        .route("/api/v1/users", get(list_users).post(create_user))
        .route(
            "/api/v1/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .merge(cached_routes);

    with_outer_layers(router, state)
}

/// Wraps `router` in the layers every route shares.
fn with_outer_layers(mut router: Router<AppState>, state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    if let Some(limiter) = state.limiter.clone() {
        router = router.layer(from_fn_with_state(limiter, rate_limit_middleware));
    }
    if let Some(timeout) = state.request_timeout {
        router = router.layer(TimeoutLayer::new(timeout));
    }

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
