//! Riot implementation of the match data gateway

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

use super::rest::RiotRestClient;
use crate::common::errors::{Result, StatsError};
use crate::common::traits::MatchDataGateway;
use crate::common::types::{
    Identity, MatchDetail, MatchId, MatchReference, QueueFilter, ReferenceKind,
};
use crate::config::types::{ApiCredentials, RiotConfig};

/// Gateway backed by the Riot REST API
#[derive(Debug, Clone)]
pub struct RiotGateway {
    rest_client: RiotRestClient,
}

impl RiotGateway {
    /// Create a new gateway from configuration
    pub fn new(config: &RiotConfig) -> Result<Self> {
        Self::with_timeout(config, Duration::from_secs(30))
    }

    /// Create a new gateway with a custom request timeout
    pub fn with_timeout(config: &RiotConfig, timeout: Duration) -> Result<Self> {
        let rest_client = RiotRestClient::with_timeout(config, timeout)?;

        // Apply credentials to REST client if available
        let rest_client = match &config.api_key {
            Some(key) => rest_client.with_credentials(&ApiCredentials::new(key.clone()))?,
            None => rest_client,
        };

        Ok(Self { rest_client })
    }

    /// Get a reference to the REST client
    pub fn rest(&self) -> &RiotRestClient {
        &self.rest_client
    }

    async fn queue_table(&self) -> Result<HashMap<String, String>> {
        let queues = self.rest_client.get_queues().await?;
        Ok(queues
            .into_iter()
            .filter_map(|q| q.description.map(|d| (q.queue_id.to_string(), d)))
            .collect())
    }
}

#[async_trait]
impl MatchDataGateway for RiotGateway {
    #[instrument(skip(self))]
    async fn resolve_identity(&self, display_name: &str) -> Result<Identity> {
        let summoner = self.rest_client.get_summoner_by_name(display_name).await?;
        debug!("Resolved {} to account {}", summoner.name, summoner.account_id);
        Ok(summoner.into())
    }

    #[instrument(skip(self))]
    async fn fetch_match_list(
        &self,
        account_id: &str,
        queue_filter: &QueueFilter,
    ) -> Result<Vec<MatchReference>> {
        let matchlist = self.rest_client.get_matchlist(account_id, queue_filter).await?;
        Ok(matchlist.matches.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn fetch_match_detail(&self, match_id: &MatchId) -> Result<MatchDetail> {
        let response = self.rest_client.get_match(match_id).await?;
        Ok(response.into())
    }

    #[instrument(skip(self))]
    async fn resolve_reference_data(&self, kind: ReferenceKind, key: &str) -> Result<String> {
        let key = match kind {
            ReferenceKind::Queue => key
                .trim()
                .parse::<u32>()
                .map_err(|_| {
                    StatsError::InvalidArgument(format!("queue id '{}' is not numeric", key))
                })?
                .to_string(),
            ReferenceKind::Champion => key.trim().to_string(),
        };

        self.fetch_reference_table(kind)
            .await?
            .remove(&key)
            .ok_or_else(|| StatsError::NotFound(format!("{} {}", kind, key)))
    }

    #[instrument(skip(self))]
    async fn fetch_reference_table(&self, kind: ReferenceKind) -> Result<HashMap<String, String>> {
        let table = match kind {
            ReferenceKind::Queue => self.queue_table().await?,
            ReferenceKind::Champion => self.rest_client.get_champion_keys().await?,
        };
        debug!("Loaded {} {} entries", table.len(), kind);
        Ok(table)
    }
}
