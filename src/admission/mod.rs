//! Admission Gate
//!
//! Decides whether a request may proceed before any cache work happens.

mod token_bucket;

pub use token_bucket::TokenBucket;
