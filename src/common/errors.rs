//! Error types for the application

use thiserror::Error;

/// Result type alias using our StatsError
pub type Result<T> = std::result::Result<T, StatsError>;

/// Main error type for stats operations
#[derive(Error, Debug)]
pub enum StatsError {
    /// Malformed caller input (requested count, queue filter)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The remote service has no player with this display name
    #[error("Identity not found: {0}")]
    IdentityNotFound(String),

    /// The remote service answered with an unexpected status or body
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// A keyed resource (match, queue, champion) does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The match record has no participant for the requested entity
    #[error("Participant {subject_entity_id} not found in match {match_id}")]
    ParticipantNotFound {
        match_id: String,
        subject_entity_id: i64,
    },

    /// The match reports a non-positive duration
    #[error("Invalid match duration {duration_seconds}s for match {match_id}")]
    InvalidMatchDuration {
        match_id: String,
        duration_seconds: i64,
    },

    /// Rate limiting errors
    #[error("Rate limit exceeded: {message}, retry after {retry_after_seconds:?} seconds")]
    RateLimit {
        message: String,
        retry_after_seconds: Option<u64>,
    },

    /// HTTP request errors
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StatsError {
    /// Whether this error was raised by caller input validation.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, StatsError::InvalidArgument(_))
    }

    /// Per-match transform failures. These only ever occupy a single
    /// result slot and never abort a whole `get_stats` call.
    pub fn is_transform_failure(&self) -> bool {
        matches!(
            self,
            StatsError::ParticipantNotFound { .. } | StatsError::InvalidMatchDuration { .. }
        )
    }

    /// Short, stable label for logs and serialized failure markers.
    pub fn kind(&self) -> &'static str {
        match self {
            StatsError::InvalidArgument(_) => "invalid_argument",
            StatsError::IdentityNotFound(_) => "identity_not_found",
            StatsError::Upstream(_) => "upstream_error",
            StatsError::NotFound(_) => "not_found",
            StatsError::ParticipantNotFound { .. } => "participant_not_found",
            StatsError::InvalidMatchDuration { .. } => "invalid_match_duration",
            StatsError::RateLimit { .. } => "rate_limit",
            StatsError::HttpRequest(_) => "http_request",
            StatsError::JsonParse(_) => "json_parse",
            StatsError::Configuration(_) => "configuration",
            StatsError::Internal(_) => "internal",
        }
    }
}
