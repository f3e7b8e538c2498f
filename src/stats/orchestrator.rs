//! Multi-stage fetch pipeline
//!
//! ```text
//! validate ──► resolve identity ──► match list ──► select first N
//!                                                      │
//!                        ┌─────────────────────────────┼──────────────┐
//!                        ▼                             ▼              ▼
//!                 acquire token                 acquire token   acquire token
//!                 fetch detail                  fetch detail    fetch detail
//!                 transform                     transform       transform
//!                        └─────────────────────────────┼──────────────┘
//!                                                      ▼
//!                                      results in match list order
//! ```
//!
//! Validation, identity and match list failures abort the call. A failure
//! in any single match only marks that match's slot.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{debug, info, instrument, warn};

use super::transform::transform;
use crate::common::errors::{Result, StatsError};
use crate::common::limiter::TokenBucketLimiter;
use crate::common::traits::MatchDataGateway;
use crate::common::types::{FetchResult, MatchReference, ReferenceKind, StatsReport, StatsRequest};
use crate::config::types::FetchConfig;

/// Shared handle to a gateway implementation
pub type BoxedGateway = Arc<dyn MatchDataGateway>;

/// Coordinates identity resolution, match selection and the rate-limited
/// detail fan-out for `get_stats` calls
///
/// Cheap to clone; clones share the gateway and the limiter.
#[derive(Clone)]
pub struct FetchOrchestrator {
    gateway: BoxedGateway,
    limiter: Arc<TokenBucketLimiter>,
    max_match_count: usize,
}

impl FetchOrchestrator {
    /// Create an orchestrator
    ///
    /// # Arguments
    /// * `gateway` - Remote data source
    /// * `limiter` - Quota shared with every other orchestrator in the process
    /// * `max_match_count` - Ceiling on detail fetches for a single call
    pub fn new(
        gateway: BoxedGateway,
        limiter: Arc<TokenBucketLimiter>,
        max_match_count: usize,
    ) -> Result<Self> {
        if max_match_count == 0 {
            return Err(StatsError::Configuration(
                "max match count must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            gateway,
            limiter,
            max_match_count,
        })
    }

    pub fn from_config(
        gateway: BoxedGateway,
        limiter: Arc<TokenBucketLimiter>,
        config: &FetchConfig,
    ) -> Result<Self> {
        Self::new(gateway, limiter, config.max_match_count)
    }

    pub fn max_match_count(&self) -> usize {
        self.max_match_count
    }

    /// Fetch statistics for the most recent matches of a player
    ///
    /// Returns `Err` only when the call as a whole fails (bad input,
    /// unknown player, match list unavailable). Otherwise the report holds
    /// exactly `min(requested, max_match_count, available)` results in
    /// match list order, some of which may be failure markers.
    #[instrument(skip(self, request), fields(display_name = %request.display_name))]
    pub async fn get_stats(&self, request: &StatsRequest) -> Result<StatsReport> {
        let (requested, queue_filter) = request.validate()?;

        let identity = self.gateway.resolve_identity(&request.display_name).await?;
        debug!("Resolved account {}", identity.account_id);

        let match_list = self
            .gateway
            .fetch_match_list(&identity.account_id, &queue_filter)
            .await?;
        let available = match_list.len();

        let selected = self.select(match_list, requested);
        info!(
            "Fetching {} of {} available matches ({} requested)",
            selected.len(),
            available,
            requested
        );

        let results = self.fetch_all(&selected).await;

        let report = StatsReport {
            identity,
            requested,
            results,
        };
        info!(
            "Fetched {} matches, {} failed",
            report.succeeded(),
            report.failed()
        );
        Ok(report)
    }

    /// Resolve display names for reference keys
    ///
    /// The reference table is fetched once per call, outside the limiter,
    /// and shared by every key. Keys missing from the table are logged and
    /// left out; a failed table fetch yields an empty map.
    #[instrument(skip(self, keys))]
    pub async fn resolve_names<I, S>(&self, kind: ReferenceKind, keys: I) -> HashMap<String, String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let distinct: Vec<String> = keys
            .into_iter()
            .map(Into::into)
            .filter(|key| seen.insert(key.clone()))
            .collect();
        if distinct.is_empty() {
            return HashMap::new();
        }

        let table = match self.gateway.fetch_reference_table(kind).await {
            Ok(table) => table,
            Err(e) => {
                warn!("Could not load {} table: {}", kind, e);
                return HashMap::new();
            }
        };

        distinct
            .into_iter()
            .filter_map(|key| match table.get(key.trim()) {
                Some(name) => Some((key, name.clone())),
                None => {
                    warn!("No {} named for key {}", kind, key);
                    None
                }
            })
            .collect()
    }

    /// Keep the first `requested` entries, never more than the ceiling
    fn select(&self, mut match_list: Vec<MatchReference>, requested: usize) -> Vec<MatchReference> {
        let effective = requested.min(self.max_match_count).min(match_list.len());
        match_list.truncate(effective);
        match_list
    }

    /// Run every selected match concurrently. `join_all` yields results in
    /// input order whatever order the fetches complete in.
    async fn fetch_all(&self, selected: &[MatchReference]) -> Vec<FetchResult> {
        join_all(selected.iter().map(|reference| self.fetch_one(reference))).await
    }

    async fn fetch_one(&self, reference: &MatchReference) -> FetchResult {
        self.limiter.acquire().await;

        let outcome = match self.gateway.fetch_match_detail(&reference.match_id).await {
            Ok(detail) => transform(&detail, reference.subject_entity_id),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(stats) => FetchResult::Stats(stats.with_reference(reference)),
            Err(cause) => {
                let stage = if cause.is_transform_failure() {
                    "record"
                } else {
                    "fetch"
                };
                warn!(
                    match_id = %reference.match_id,
                    kind = cause.kind(),
                    stage,
                    "Match skipped: {}",
                    cause
                );
                FetchResult::failed(reference.match_id.clone(), cause)
            }
        }
    }
}

impl std::fmt::Debug for FetchOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchOrchestrator")
            .field("limiter", &self.limiter)
            .field("max_match_count", &self.max_match_count)
            .finish_non_exhaustive()
    }
}
