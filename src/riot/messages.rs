//! Riot API wire types
//!
//! Only the fields this crate reads are modelled; everything else in the
//! payloads is ignored by serde.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::common::types::{
    Identity, MatchDetail, MatchReference, Participant, ParticipantStats,
};

/// Response from `/lol/summoner/v4/summoners/by-name/{name}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummonerResponse {
    /// Encrypted summoner id
    pub id: String,
    pub account_id: String,
    pub name: String,
    #[serde(default)]
    pub puuid: Option<String>,
    #[serde(default)]
    pub summoner_level: Option<i64>,
}

impl From<SummonerResponse> for Identity {
    fn from(summoner: SummonerResponse) -> Self {
        Identity {
            display_name: summoner.name,
            account_id: summoner.account_id,
            summoner_id: Some(summoner.id),
        }
    }
}

/// Response from `/lol/match/v4/matchlists/by-account/{accountId}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchlistResponse {
    #[serde(default)]
    pub matches: Vec<MatchReferenceDto>,
    #[serde(default)]
    pub start_index: Option<i64>,
    #[serde(default)]
    pub end_index: Option<i64>,
    #[serde(default)]
    pub total_games: Option<i64>,
}

/// One match list entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReferenceDto {
    pub game_id: i64,
    /// Champion id played in this match
    pub champion: i64,
    #[serde(default)]
    pub queue: Option<u32>,
    /// Epoch milliseconds
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub platform_id: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub lane: Option<String>,
}

impl From<MatchReferenceDto> for MatchReference {
    fn from(dto: MatchReferenceDto) -> Self {
        MatchReference {
            match_id: dto.game_id.into(),
            subject_entity_id: dto.champion,
            queue: dto.queue,
            played_at: dto
                .timestamp
                .and_then(chrono::DateTime::from_timestamp_millis),
        }
    }
}

/// Response from `/lol/match/v4/matches/{matchId}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    pub game_id: i64,
    /// Seconds
    pub game_duration: i64,
    #[serde(default)]
    pub queue_id: Option<u32>,
    #[serde(default)]
    pub participants: Vec<ParticipantDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    #[serde(default)]
    pub participant_id: Option<i64>,
    #[serde(default)]
    pub team_id: Option<i64>,
    pub champion_id: i64,
    pub stats: ParticipantStatsDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantStatsDto {
    pub win: bool,
    pub kills: u32,
    pub assists: u32,
    pub deaths: u32,
    #[serde(default)]
    pub vision_score: u32,
    #[serde(default)]
    pub wards_placed: Option<u32>,
    pub total_minions_killed: u32,
    pub total_damage_dealt: u64,
    pub total_damage_dealt_to_champions: u64,
    pub gold_earned: u64,
}

impl From<ParticipantStatsDto> for ParticipantStats {
    fn from(dto: ParticipantStatsDto) -> Self {
        ParticipantStats {
            win: dto.win,
            kills: dto.kills,
            assists: dto.assists,
            deaths: dto.deaths,
            vision_score: dto.vision_score,
            total_minions_killed: dto.total_minions_killed,
            total_damage_dealt: dto.total_damage_dealt,
            total_damage_dealt_to_champions: dto.total_damage_dealt_to_champions,
            gold_earned: dto.gold_earned,
        }
    }
}

impl From<MatchResponse> for MatchDetail {
    fn from(response: MatchResponse) -> Self {
        MatchDetail {
            match_id: response.game_id.into(),
            game_duration: response.game_duration,
            participants: response
                .participants
                .into_iter()
                .map(|p| Participant {
                    champion_id: p.champion_id,
                    stats: p.stats.into(),
                })
                .collect(),
        }
    }
}

/// Entry of the static `queues.json` table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueDto {
    pub queue_id: u32,
    #[serde(default)]
    pub map: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Data Dragon `championFull.json`; only the key table is read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChampionFullResponse {
    #[serde(default)]
    pub version: Option<String>,
    /// Champion numeric key (as a string) -> champion name
    pub keys: HashMap<String, String>,
}

/// Error body returned by the platform API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiotErrorResponse {
    pub status: RiotErrorStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiotErrorStatus {
    pub message: String,
    pub status_code: u16,
}
