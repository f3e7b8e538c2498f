//! Trait definitions for remote game-data gateways

use std::collections::HashMap;

use async_trait::async_trait;

use super::errors::Result;
use super::types::{Identity, MatchDetail, MatchId, MatchReference, QueueFilter, ReferenceKind};

/// Trait for remote game-data services (Riot API, test fakes, etc.)
///
/// Implementations perform the network calls only. Rate limiting,
/// subset selection and result assembly belong to the orchestrator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MatchDataGateway: Send + Sync {
    /// Resolve a display name to an account identity
    ///
    /// Fails with `StatsError::IdentityNotFound` when the service knows
    /// no such player.
    async fn resolve_identity(&self, display_name: &str) -> Result<Identity>;

    /// Fetch the account's match list, most recent first
    ///
    /// # Arguments
    /// * `account_id` - Account id from `resolve_identity`
    /// * `queue_filter` - Queues to restrict the list to
    async fn fetch_match_list(
        &self,
        account_id: &str,
        queue_filter: &QueueFilter,
    ) -> Result<Vec<MatchReference>>;

    /// Fetch the full record of a single match
    ///
    /// This is the quota-bound call; callers must hold a limiter token.
    async fn fetch_match_detail(&self, match_id: &MatchId) -> Result<MatchDetail>;

    /// Look up a display string in a static reference table
    async fn resolve_reference_data(&self, kind: ReferenceKind, key: &str) -> Result<String>;

    /// Fetch a whole static reference table as key -> display string
    ///
    /// Entries without a display string are left out.
    async fn fetch_reference_table(&self, kind: ReferenceKind) -> Result<HashMap<String, String>>;
}
