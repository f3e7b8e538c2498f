//! Match record -> normalized game statistics

use rust_decimal::{Decimal, RoundingStrategy};

use crate::common::errors::{Result, StatsError};
use crate::common::types::{DerivedStats, GameStats, MatchDetail};

/// Extract the subject participant's statistics from a match record
///
/// Pure and synchronous. Fails with `ParticipantNotFound` when no
/// participant played `subject_entity_id`, and with `InvalidMatchDuration`
/// when the match reports a non-positive length.
pub fn transform(detail: &MatchDetail, subject_entity_id: i64) -> Result<GameStats> {
    let participant = detail
        .participants
        .iter()
        .find(|p| p.champion_id == subject_entity_id)
        .ok_or_else(|| StatsError::ParticipantNotFound {
            match_id: detail.match_id.to_string(),
            subject_entity_id,
        })?;

    let duration = detail.game_duration;
    if duration <= 0 {
        return Err(StatsError::InvalidMatchDuration {
            match_id: detail.match_id.to_string(),
            duration_seconds: duration,
        });
    }

    let stats = &participant.stats;
    let derived = DerivedStats {
        cs_per_minute: per_minute(u64::from(stats.total_minions_killed), duration),
        gold_per_minute: per_minute(stats.gold_earned, duration),
    };

    Ok(GameStats {
        match_id: detail.match_id.clone(),
        subject_entity_id,
        match_duration_seconds: duration,
        win: stats.win,
        kills: stats.kills,
        assists: stats.assists,
        deaths: stats.deaths,
        vision_score: stats.vision_score,
        minions_killed: stats.total_minions_killed,
        total_damage: stats.total_damage_dealt,
        damage_to_targets: stats.total_damage_dealt_to_champions,
        gold_earned: stats.gold_earned,
        derived,
        queue: None,
        played_at: None,
    })
}

/// `value` per minute of a `duration_seconds` match, to one decimal place
fn per_minute(value: u64, duration_seconds: i64) -> Decimal {
    let mut rate = (Decimal::from(value) * Decimal::from(60) / Decimal::from(duration_seconds))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    rate.rescale(1);
    rate
}
