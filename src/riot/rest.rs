//! REST API client for the Riot platform and static data endpoints

use std::collections::HashMap;
use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::auth::{generate_auth_headers, AuthHeaders};
use super::messages::*;
use crate::common::errors::{Result, StatsError};
use crate::common::types::{MatchId, QueueFilter};
use crate::config::types::{ApiCredentials, RiotConfig};

/// REST API client for Riot
#[derive(Debug, Clone)]
pub struct RiotRestClient {
    /// HTTP client
    client: Client,
    /// Base URL of the regional platform API
    platform_url: Url,
    /// Static queue table URL
    queues_url: Url,
    /// Data Dragon CDN base URL
    ddragon_url: Url,
    /// Data Dragon patch version
    ddragon_version: String,
    /// Token header for platform endpoints
    auth: Option<AuthHeaders>,
}

impl RiotRestClient {
    /// Create a new REST client (unauthenticated)
    pub fn new(config: &RiotConfig) -> Result<Self> {
        Self::with_timeout(config, Duration::from_secs(30))
    }

    /// Create a new REST client with custom timeout
    pub fn with_timeout(config: &RiotConfig, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StatsError::Internal(e.to_string()))?;

        Ok(Self {
            client,
            platform_url: parse_url("platform_url", &config.platform_url)?,
            queues_url: parse_url("queues_url", &config.queues_url)?,
            ddragon_url: parse_url("ddragon_url", &config.ddragon_url)?,
            ddragon_version: config.ddragon_version.clone(),
            auth: None,
        })
    }

    /// Set the API key for platform requests
    pub fn with_credentials(mut self, credentials: &ApiCredentials) -> Result<Self> {
        self.auth = Some(generate_auth_headers(credentials)?);
        Ok(self)
    }

    // ========================================================================
    // Platform Endpoints (API key, counted against the rate limit)
    // ========================================================================

    /// Look up a summoner by display name
    #[instrument(skip(self))]
    pub async fn get_summoner_by_name(&self, summoner_name: &str) -> Result<SummonerResponse> {
        let url = self.platform_endpoint(&["lol", "summoner", "v4", "summoners", "by-name", summoner_name])?;
        debug!("Fetching summoner from: {}", url);

        let response = self.send_platform(url).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StatsError::IdentityNotFound(summoner_name.to_string()));
        }

        Self::parse_json(response).await
    }

    /// Get the match list of an account, most recent first
    ///
    /// The platform answers 404 when the account has no matches for the
    /// filter; that is reported as an empty list.
    #[instrument(skip(self))]
    pub async fn get_matchlist(
        &self,
        account_id: &str,
        queue_filter: &QueueFilter,
    ) -> Result<MatchlistResponse> {
        let mut url =
            self.platform_endpoint(&["lol", "match", "v4", "matchlists", "by-account", account_id])?;
        if !queue_filter.is_none() {
            let mut query = url.query_pairs_mut();
            for queue in queue_filter.queue_ids() {
                query.append_pair("queue", &queue.to_string());
            }
        }
        debug!("Fetching match list from: {}", url);

        let response = self.send_platform(url).await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!("No matches for account {}", account_id);
            return Ok(MatchlistResponse::default());
        }

        Self::parse_json(response).await
    }

    /// Get the full record of a match
    #[instrument(skip(self))]
    pub async fn get_match(&self, match_id: &MatchId) -> Result<MatchResponse> {
        let url = self.platform_endpoint(&["lol", "match", "v4", "matches", match_id.as_str()])?;
        debug!("Fetching match from: {}", url);

        let response = self.send_platform(url).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StatsError::NotFound(format!("match {}", match_id)));
        }

        Self::parse_json(response).await
    }

    // ========================================================================
    // Static Data Endpoints (no key, not rate limited)
    // ========================================================================

    /// Get the static queue table
    #[instrument(skip(self))]
    pub async fn get_queues(&self) -> Result<Vec<QueueDto>> {
        debug!("Fetching queue table from: {}", self.queues_url);
        let response = self.client.get(self.queues_url.clone()).send().await?;
        Self::parse_json(response).await
    }

    /// Get the champion key -> name table from Data Dragon
    #[instrument(skip(self))]
    pub async fn get_champion_keys(&self) -> Result<HashMap<String, String>> {
        let mut url = self.ddragon_url.clone();
        url.path_segments_mut()
            .map_err(|_| StatsError::Configuration("ddragon_url cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(&["cdn", self.ddragon_version.as_str(), "data", "en_US", "championFull.json"]);
        debug!("Fetching champion data from: {}", url);

        let response = self.client.get(url).send().await?;
        let champions: ChampionFullResponse = Self::parse_json(response).await?;
        Ok(champions.keys)
    }

    // ========================================================================
    // Helper Methods
    // ========================================================================

    /// Join path segments onto the platform URL, percent-encoding each one
    fn platform_endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.platform_url.clone();
        url.path_segments_mut()
            .map_err(|_| StatsError::Configuration("platform_url cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send_platform(&self, url: Url) -> Result<Response> {
        let request = self.client.get(url);
        let request = match &self.auth {
            Some(auth) => auth.apply_to_request(request),
            None => request,
        };
        Ok(request.send().await?)
    }

    /// Decode a success body, or map the status to an error
    async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_seconds = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(StatsError::RateLimit {
                message: "Riot API quota exceeded".to_string(),
                retry_after_seconds,
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<RiotErrorResponse>(&body)
                .map(|e| e.status.message)
                .unwrap_or(body);
            return Err(StatsError::Upstream(format!(
                "Server returned status {}: {}",
                status, message
            )));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn parse_url(name: &str, raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| StatsError::Configuration(format!("Invalid {}: {}", name, e)))
}
