//! Response models for the service API
//!
//! This module defines the DTOs (Data Transfer Objects) serialized into
//! HTTP response bodies.

pub mod responses;

// Re-export commonly used types
pub use responses::{
    HealthResponse, MessageResponse, Pagination, StatsResponse, StoreStatsResponse,
    UserListV2Response, UserV2, UserV2Response,
};
