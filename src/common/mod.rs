//! Common module - Shared errors, domain types, gateway trait and rate limiter

pub mod errors;
pub mod limiter;
pub mod traits;
pub mod types;

pub use errors::{Result, StatsError};
pub use limiter::TokenBucketLimiter;
pub use traits::MatchDataGateway;
