//! MatchStats Library
//!
//! Fetches per-match League of Legends statistics for a player while
//! keeping every match detail request under a shared API rate limit.

pub mod common;
pub mod config;
pub mod riot;
pub mod stats;

// Re-export commonly used types
pub use common::errors::{Result, StatsError};
pub use common::limiter::TokenBucketLimiter;
pub use common::traits::MatchDataGateway;
pub use common::types::{
    DerivedStats, FetchResult, GameStats, Identity, MatchDetail, MatchFailure, MatchId,
    MatchReference, Participant, ParticipantStats, QueueFilter, ReferenceKind, StatsReport,
    StatsRequest,
};
pub use config::types::AppConfig;
pub use riot::client::RiotGateway;
pub use riot::rest::RiotRestClient;
pub use stats::{transform, BoxedGateway, FetchOrchestrator};
