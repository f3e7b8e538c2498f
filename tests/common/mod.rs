//! Common test utilities and fixtures

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use match_stats::{
    FetchOrchestrator, Identity, MatchDataGateway, MatchDetail, MatchId, MatchReference,
    Participant, ParticipantStats, QueueFilter, ReferenceKind, Result, StatsError,
    TokenBucketLimiter,
};

/// Champion id used by every scripted match
pub const CHAMPION: i64 = 22;

/// What the fake returns for one match detail request
#[derive(Debug, Clone)]
pub enum Scripted {
    Detail(MatchDetail),
    NotFound,
    Upstream,
}

/// In-memory gateway with scripted responses and per-match delays
#[derive(Default)]
pub struct FakeGateway {
    pub identities: HashMap<String, Identity>,
    pub match_list: Vec<MatchReference>,
    pub details: HashMap<MatchId, Scripted>,
    pub delays: HashMap<MatchId, Duration>,
    pub identity_calls: AtomicUsize,
    pub list_calls: AtomicUsize,
    /// Instant each detail request reached the gateway, in arrival order
    pub detail_calls: Mutex<Vec<(MatchId, Instant)>>,
}

impl FakeGateway {
    /// Player `name` with `matches` recent matches, ids "1".."n", all on `CHAMPION`
    pub fn with_matches(name: &str, matches: usize) -> Self {
        let mut gateway = FakeGateway::default();
        gateway.identities.insert(
            name.to_string(),
            Identity::new(name, format!("account-{}", name)),
        );
        for i in 1..=matches as i64 {
            let id = MatchId::from(i);
            gateway.match_list.push(MatchReference::new(id.clone(), CHAMPION));
            gateway
                .details
                .insert(id.clone(), Scripted::Detail(sample_detail(id, 1800, 300, 12_000)));
        }
        gateway
    }

    pub fn script(mut self, match_id: i64, outcome: Scripted) -> Self {
        self.details.insert(MatchId::from(match_id), outcome);
        self
    }

    pub fn delay(mut self, match_id: i64, delay: Duration) -> Self {
        self.delays.insert(MatchId::from(match_id), delay);
        self
    }

    pub fn detail_call_count(&self) -> usize {
        self.detail_calls.lock().unwrap().len()
    }

    pub fn detail_call_times(&self) -> Vec<Instant> {
        self.detail_calls.lock().unwrap().iter().map(|(_, t)| *t).collect()
    }
}

#[async_trait]
impl MatchDataGateway for FakeGateway {
    async fn resolve_identity(&self, display_name: &str) -> Result<Identity> {
        self.identity_calls.fetch_add(1, Ordering::SeqCst);
        self.identities
            .get(display_name)
            .cloned()
            .ok_or_else(|| StatsError::IdentityNotFound(display_name.to_string()))
    }

    async fn fetch_match_list(
        &self,
        _account_id: &str,
        _queue_filter: &QueueFilter,
    ) -> Result<Vec<MatchReference>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.match_list.clone())
    }

    async fn fetch_match_detail(&self, match_id: &MatchId) -> Result<MatchDetail> {
        self.detail_calls
            .lock()
            .unwrap()
            .push((match_id.clone(), Instant::now()));

        if let Some(delay) = self.delays.get(match_id) {
            tokio::time::sleep(*delay).await;
        }

        match self.details.get(match_id) {
            Some(Scripted::Detail(detail)) => Ok(detail.clone()),
            Some(Scripted::Upstream) => Err(StatsError::Upstream("status 503".to_string())),
            Some(Scripted::NotFound) | None => Err(StatsError::NotFound(format!("match {}", match_id))),
        }
    }

    async fn resolve_reference_data(&self, kind: ReferenceKind, key: &str) -> Result<String> {
        Err(StatsError::NotFound(format!("{} {}", kind, key)))
    }

    async fn fetch_reference_table(&self, _kind: ReferenceKind) -> Result<HashMap<String, String>> {
        Ok(HashMap::new())
    }
}

/// A two-participant match where `CHAMPION` has the given stats
pub fn sample_detail(match_id: MatchId, duration: i64, minions: u32, gold: u64) -> MatchDetail {
    MatchDetail {
        match_id,
        game_duration: duration,
        participants: vec![
            Participant {
                champion_id: 11,
                stats: ParticipantStats::default(),
            },
            Participant {
                champion_id: CHAMPION,
                stats: ParticipantStats {
                    win: true,
                    kills: 8,
                    assists: 6,
                    deaths: 3,
                    vision_score: 24,
                    total_minions_killed: minions,
                    total_damage_dealt: 140_000,
                    total_damage_dealt_to_champions: 22_000,
                    gold_earned: gold,
                },
            },
        ],
    }
}

/// Orchestrator over `gateway` with its own limiter
pub fn orchestrator(
    gateway: Arc<FakeGateway>,
    capacity: usize,
    window: Duration,
    max_match_count: usize,
) -> FetchOrchestrator {
    let limiter = Arc::new(TokenBucketLimiter::new(capacity, window).unwrap());
    FetchOrchestrator::new(gateway, limiter, max_match_count).unwrap()
}

/// Sample Riot API responses for testing
pub mod api_responses {
    pub const SUMMONER: &str = r#"{
        "id": "summoner-enc-1",
        "accountId": "account-enc-1",
        "puuid": "puuid-1",
        "name": "Ashe99",
        "profileIconId": 4,
        "revisionDate": 1572557063000,
        "summonerLevel": 112
    }"#;

    pub const MATCHLIST: &str = r#"{
        "matches": [
            {"platformId": "NA1", "gameId": 3003, "champion": 22, "queue": 420, "season": 13, "timestamp": 1572557063416, "role": "DUO_CARRY", "lane": "BOTTOM"},
            {"platformId": "NA1", "gameId": 3002, "champion": 22, "queue": 420, "season": 13, "timestamp": 1572550000000, "role": "DUO_CARRY", "lane": "BOTTOM"},
            {"platformId": "NA1", "gameId": 3001, "champion": 51, "queue": 430, "season": 13, "timestamp": 1572540000000, "role": "DUO_CARRY", "lane": "BOTTOM"}
        ],
        "startIndex": 0,
        "endIndex": 3,
        "totalGames": 3
    }"#;

    /// Match where champion 22 has 300 cs and 12000 gold over 30 minutes
    pub fn match_detail(game_id: i64, champion_id: i64, duration: i64) -> String {
        format!(
            r#"{{
                "gameId": {game_id},
                "gameDuration": {duration},
                "queueId": 420,
                "participants": [
                    {{
                        "participantId": 1, "teamId": 100, "championId": 11,
                        "stats": {{
                            "win": false, "kills": 1, "assists": 2, "deaths": 9,
                            "visionScore": 10, "totalMinionsKilled": 40,
                            "totalDamageDealt": 50000, "totalDamageDealtToChampions": 8000,
                            "goldEarned": 6000
                        }}
                    }},
                    {{
                        "participantId": 2, "teamId": 200, "championId": {champion_id},
                        "stats": {{
                            "win": true, "kills": 8, "assists": 6, "deaths": 3,
                            "visionScore": 24, "wardsPlaced": 11, "totalMinionsKilled": 300,
                            "totalDamageDealt": 140000, "totalDamageDealtToChampions": 22000,
                            "goldEarned": 12000
                        }}
                    }}
                ]
            }}"#
        )
    }

    pub const QUEUES: &str = r#"[
        {"queueId": 0, "map": "Custom games", "description": null, "notes": null},
        {"queueId": 420, "map": "Summoner's Rift", "description": "5v5 Ranked Solo games", "notes": null},
        {"queueId": 450, "map": "Howling Abyss", "description": "5v5 ARAM games", "notes": null}
    ]"#;

    pub const CHAMPION_FULL: &str = r#"{
        "type": "champion",
        "format": "full",
        "version": "9.21.1",
        "keys": {"22": "Ashe", "51": "Caitlyn"},
        "data": {}
    }"#;

    pub const NOT_FOUND: &str =
        r#"{"status": {"message": "Data not found", "status_code": 404}}"#;
}
