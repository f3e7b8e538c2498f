//! Configuration types

use serde::{Deserialize, Serialize};

use crate::common::errors::{Result, StatsError};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Riot API endpoints and credentials
    #[serde(default)]
    pub riot: RiotConfig,
    /// Shared quota for match detail requests
    #[serde(default)]
    pub limiter: LimiterConfig,
    /// Per-call fan-out limits
    #[serde(default)]
    pub fetch: FetchConfig,
    /// General application settings
    #[serde(default)]
    pub settings: AppSettings,
}

impl AppConfig {
    /// Reject settings that would stall or disable the fetch pipeline
    pub fn validate(&self) -> Result<()> {
        if self.limiter.capacity == 0 {
            return Err(StatsError::Configuration(
                "limiter.capacity must be at least 1".to_string(),
            ));
        }
        if self.limiter.refill_window_ms == 0 {
            return Err(StatsError::Configuration(
                "limiter.refill_window_ms must be non-zero".to_string(),
            ));
        }
        if self.fetch.max_match_count == 0 {
            return Err(StatsError::Configuration(
                "fetch.max_match_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Riot platform configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiotConfig {
    /// API key sent as `X-Riot-Token`
    #[serde(default)]
    pub api_key: Option<String>,
    /// Base URL of the regional platform API
    #[serde(default = "default_platform_url")]
    pub platform_url: String,
    /// Static queue table
    #[serde(default = "default_queues_url")]
    pub queues_url: String,
    /// Data Dragon CDN base URL
    #[serde(default = "default_ddragon_url")]
    pub ddragon_url: String,
    /// Data Dragon patch version for champion data
    #[serde(default = "default_ddragon_version")]
    pub ddragon_version: String,
}

impl Default for RiotConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            platform_url: default_platform_url(),
            queues_url: default_queues_url(),
            ddragon_url: default_ddragon_url(),
            ddragon_version: default_ddragon_version(),
        }
    }
}

fn default_platform_url() -> String {
    "https://na1.api.riotgames.com".to_string()
}

fn default_queues_url() -> String {
    "http://static.developer.riotgames.com/docs/lol/queues.json".to_string()
}

fn default_ddragon_url() -> String {
    "http://ddragon.leagueoflegends.com".to_string()
}

fn default_ddragon_version() -> String {
    "9.21.1".to_string()
}

/// Token bucket settings
///
/// Riot allows 100 requests per 2 minutes for a development key. The
/// default takes a quarter of that so identity, match list and reference
/// lookups, which are not gated, still fit under the real limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimiterConfig {
    /// Tokens per window
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Window length in milliseconds
    #[serde(default = "default_refill_window")]
    pub refill_window_ms: u64,
}

impl Default for LimiterConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            refill_window_ms: default_refill_window(),
        }
    }
}

fn default_capacity() -> usize {
    25
}

fn default_refill_window() -> u64 {
    120_000
}

/// Fan-out limits for a single `get_stats` call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Upper bound on detail fetches per call, regardless of the request
    #[serde(default = "default_max_match_count")]
    pub max_match_count: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_match_count: default_max_match_count(),
        }
    }
}

fn default_max_match_count() -> usize {
    10
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

/// API key for authenticated platform requests
#[derive(Clone)]
pub struct ApiCredentials {
    pub api_key: String,
}

impl ApiCredentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &"<redacted>")
            .finish()
    }
}
