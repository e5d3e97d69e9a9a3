//! API Module
//!
//! HTTP handlers, shared state and routing.
//!
//! # Endpoints
//! - `GET /health` - Health check endpoint
//! - `GET /stats` - Statistics of both cache layers
//! - `/api/v1/users`, `/api/v1/products`, `/api/v2/users` - stub resources

pub mod handlers;
pub mod routes;
mod state;

pub use handlers::*;
pub use routes::create_router;
pub use state::AppState;
