//! Domain types shared by the gateway, the transform and the orchestrator

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

use super::errors::{Result, StatsError};

/// Opaque match identifier as issued by the remote service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(String);

impl MatchId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for MatchId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for MatchId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A resolved player identity. Lives for a single `get_stats` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Display name as reported by the service
    pub display_name: String,
    /// Account id used for match list lookups
    pub account_id: String,
    /// Encrypted summoner id, when the service returned one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summoner_id: Option<String>,
}

impl Identity {
    pub fn new(display_name: impl Into<String>, account_id: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            account_id: account_id.into(),
            summoner_id: None,
        }
    }
}

/// One entry of a match list, most recent first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReference {
    pub match_id: MatchId,
    /// Champion the player used in this match
    pub subject_entity_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub played_at: Option<DateTime<Utc>>,
}

impl MatchReference {
    pub fn new(match_id: impl Into<MatchId>, subject_entity_id: i64) -> Self {
        Self {
            match_id: match_id.into(),
            subject_entity_id,
            queue: None,
            played_at: None,
        }
    }
}

/// Validated queue filter for match list lookups
///
/// Common queue ids:
/// - 400: Draft Pick
/// - 420: Ranked Solo/Duo
/// - 430: Blind Pick
/// - 440: Ranked Flex
/// - 450: ARAM
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QueueFilter {
    /// All queues
    #[default]
    None,
    Single(u32),
    /// Several queues, in caller order
    Set(Vec<u32>),
}

impl QueueFilter {
    /// Parse raw filter entries. Every entry must be a non-negative integer.
    pub fn parse<S: AsRef<str>>(values: &[S]) -> Result<Self> {
        let ids = values
            .iter()
            .map(|raw| {
                let raw = raw.as_ref().trim();
                raw.parse::<u32>().map_err(|_| {
                    StatsError::InvalidArgument(format!(
                        "queue filter entry '{}' is not numeric",
                        raw
                    ))
                })
            })
            .collect::<Result<Vec<u32>>>()?;

        Ok(match ids.len() {
            0 => QueueFilter::None,
            1 => QueueFilter::Single(ids[0]),
            _ => QueueFilter::Set(ids),
        })
    }

    /// Queue ids in request order (empty for `None`)
    pub fn queue_ids(&self) -> &[u32] {
        match self {
            QueueFilter::None => &[],
            QueueFilter::Single(id) => std::slice::from_ref(id),
            QueueFilter::Set(ids) => ids,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, QueueFilter::None)
    }
}

/// Static reference tables served outside the rate-limited API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    /// Queue id -> queue description
    Queue,
    /// Champion key -> champion name
    Champion,
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceKind::Queue => write!(f, "queue"),
            ReferenceKind::Champion => write!(f, "champion"),
        }
    }
}

/// Raw end-of-game statistics for one participant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantStats {
    pub win: bool,
    pub kills: u32,
    pub assists: u32,
    pub deaths: u32,
    pub vision_score: u32,
    pub total_minions_killed: u32,
    pub total_damage_dealt: u64,
    pub total_damage_dealt_to_champions: u64,
    pub gold_earned: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub champion_id: i64,
    pub stats: ParticipantStats,
}

/// Full match record as returned by the detail endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchDetail {
    pub match_id: MatchId,
    /// Match length in seconds
    pub game_duration: i64,
    pub participants: Vec<Participant>,
}

/// Per-minute metrics computed from the raw stats, one decimal place
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub cs_per_minute: Decimal,
    pub gold_per_minute: Decimal,
}

/// Normalized statistics for the subject participant of one match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    pub match_id: MatchId,
    pub subject_entity_id: i64,
    pub match_duration_seconds: i64,
    pub win: bool,
    pub kills: u32,
    pub assists: u32,
    pub deaths: u32,
    pub vision_score: u32,
    pub minions_killed: u32,
    pub total_damage: u64,
    pub damage_to_targets: u64,
    pub gold_earned: u64,
    pub derived: DerivedStats,
    /// Queue id from the match list entry
    pub queue: Option<u32>,
    /// Start time from the match list entry
    pub played_at: Option<DateTime<Utc>>,
}

impl GameStats {
    /// Attach the match list metadata the detail record does not carry
    pub fn with_reference(self, reference: &MatchReference) -> Self {
        GameStats {
            queue: reference.queue,
            played_at: reference.played_at,
            ..self
        }
    }
}

/// Failure marker for a single match slot
#[derive(Debug, Serialize)]
pub struct MatchFailure {
    pub match_id: MatchId,
    #[serde(serialize_with = "serialize_cause")]
    pub cause: StatsError,
}

fn serialize_cause<S: Serializer>(
    cause: &StatsError,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    use serde::ser::SerializeStruct;

    let mut state = serializer.serialize_struct("Cause", 2)?;
    state.serialize_field("kind", cause.kind())?;
    state.serialize_field("message", &cause.to_string())?;
    state.end()
}

/// Outcome of one selected match
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FetchResult {
    Stats(GameStats),
    Failed(MatchFailure),
}

impl FetchResult {
    pub fn failed(match_id: MatchId, cause: StatsError) -> Self {
        FetchResult::Failed(MatchFailure { match_id, cause })
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, FetchResult::Stats(_))
    }

    pub fn stats(&self) -> Option<&GameStats> {
        match self {
            FetchResult::Stats(stats) => Some(stats),
            FetchResult::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&MatchFailure> {
        match self {
            FetchResult::Stats(_) => None,
            FetchResult::Failed(failure) => Some(failure),
        }
    }

    pub fn match_id(&self) -> &MatchId {
        match self {
            FetchResult::Stats(stats) => &stats.match_id,
            FetchResult::Failed(failure) => &failure.match_id,
        }
    }
}

/// Caller-facing request. Fields are raw so validation happens in one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsRequest {
    pub display_name: String,
    pub queue_filter: Vec<String>,
    pub requested_count: i64,
}

impl StatsRequest {
    pub fn new(display_name: impl Into<String>, requested_count: i64) -> Self {
        Self {
            display_name: display_name.into(),
            queue_filter: Vec::new(),
            requested_count,
        }
    }

    pub fn with_queues<I, S>(mut self, queues: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.queue_filter = queues.into_iter().map(Into::into).collect();
        self
    }

    /// Check the count and filter without touching the network.
    pub fn validate(&self) -> Result<(usize, QueueFilter)> {
        if self.display_name.trim().is_empty() {
            return Err(StatsError::InvalidArgument(
                "display name must not be empty".to_string(),
            ));
        }
        if self.requested_count < 1 {
            return Err(StatsError::InvalidArgument(format!(
                "requested count must be at least 1, got {}",
                self.requested_count
            )));
        }
        let count = usize::try_from(self.requested_count).map_err(|_| {
            StatsError::InvalidArgument(format!(
                "requested count {} is out of range",
                self.requested_count
            ))
        })?;
        let filter = QueueFilter::parse(self.queue_filter.as_slice())?;
        Ok((count, filter))
    }
}

/// Result of a successful `get_stats` call
#[derive(Debug, Serialize)]
pub struct StatsReport {
    pub identity: Identity,
    /// Validated requested count, before the ceiling and list length apply
    pub requested: usize,
    /// One entry per selected match, in match list order
    pub results: Vec<FetchResult>,
}

impl StatsReport {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.len() - self.succeeded()
    }

    /// Successful entries only, still in match list order
    pub fn stats(&self) -> impl Iterator<Item = &GameStats> {
        self.results.iter().filter_map(FetchResult::stats)
    }
}
