//! Team ranking composer.
//!
//! Joins parsed rosters against the live leaderboard and orders the teams.
//! Under the default [`RankingStrategy::Best`] a team stands where its best
//! active player stands; bench players are resolved for display only.

use std::cmp::Ordering;

use serde::Serialize;
use tracing::debug;

use crate::cli::types::{LeagueTag, Position, RankingStrategy, MISSED_CUT_SENTINEL};
use crate::core::names::matches_search;
use crate::espn::positions::LivePositionMap;
use crate::sheets::roster::{RosterSlot, TeamRoster};

#[cfg(test)]
mod tests;

/// Where a slot's standing came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotSource {
    /// Found on the live leaderboard.
    Live,
    /// Not on the leaderboard; position read from the sheet.
    Declared,
    /// Neither source places the player.
    Missing,
}

/// A roster slot resolved against live data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotStanding {
    pub player_name: String,
    pub declared_position: String,
    pub declared_score: String,
    pub has_portrait: bool,
    pub position: Position,
    pub position_display: String,
    pub score: String,
    pub thru: Option<String>,
    pub source: SlotSource,
}

impl SlotStanding {
    fn missing(slot: &RosterSlot) -> Self {
        Self::from_slot(slot, Position::MissedCut, "MC".to_string(), "-".to_string())
            .with_source(SlotSource::Missing)
    }

    fn from_slot(slot: &RosterSlot, position: Position, display: String, score: String) -> Self {
        Self {
            player_name: slot.player_name.clone(),
            declared_position: slot.declared_position.clone(),
            declared_score: slot.declared_score.clone(),
            has_portrait: slot.has_portrait,
            position,
            position_display: display,
            score,
            thru: None,
            source: SlotSource::Declared,
        }
    }

    fn with_source(mut self, source: SlotSource) -> Self {
        self.source = source;
        self
    }
}

/// Resolve one slot: live entry first, then the sheet's declared position.
pub fn resolve_slot(slot: &RosterSlot, live: &LivePositionMap) -> SlotStanding {
    if let Some(entry) = live.get(&slot.player_name) {
        let mut standing = SlotStanding::from_slot(
            slot,
            entry.position,
            entry.position_display.clone(),
            entry.score.clone(),
        )
        .with_source(SlotSource::Live);
        standing.thru = Some(entry.thru.clone());
        return standing;
    }

    match Position::from_declared(&slot.declared_position) {
        Some(position @ Position::Ranked { .. }) => {
            let score = if slot.declared_score.trim().is_empty() {
                "-".to_string()
            } else {
                slot.declared_score.clone()
            };
            SlotStanding::from_slot(slot, position, slot.declared_position.clone(), score)
        }
        _ => SlotStanding::missing(slot),
    }
}

/// A team's place in the standings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamStanding {
    /// 1-based place after sorting.
    pub rank: usize,
    pub name: String,
    pub league: LeagueTag,
    pub declared_position: String,
    /// Value the teams are ordered by; lower is better.
    pub ranking_key: f64,
    /// Best active position (the sentinel when nobody is placed).
    pub best_position: u32,
    pub best_player: Option<String>,
    pub active_in_tournament: usize,
    pub active: Vec<SlotStanding>,
    pub bench: Vec<SlotStanding>,
}

impl TeamStanding {
    /// Display form of the best active position.
    pub fn best_position_display(&self) -> String {
        if self.best_position >= MISSED_CUT_SENTINEL {
            return "MC".to_string();
        }
        self.active
            .iter()
            .find(|s| Some(&s.player_name) == self.best_player.as_ref())
            .map(|s| s.position_display.clone())
            .unwrap_or_else(|| self.best_position.to_string())
    }

    /// True when any active or bench player's name contains `query`.
    pub fn has_player_matching(&self, query: &str) -> bool {
        self.active
            .iter()
            .chain(self.bench.iter())
            .any(|s| matches_search(&s.player_name, query))
    }
}

fn best_slot(active: &[SlotStanding]) -> (u32, Option<String>) {
    let mut best = MISSED_CUT_SENTINEL;
    let mut player = None;
    for slot in active {
        let key = slot.position.sort_key();
        if key < best {
            best = key;
            player = Some(slot.player_name.clone());
        }
    }
    (best, player)
}

fn average_live_position(active: &[SlotStanding]) -> f64 {
    let placed: Vec<u32> = active
        .iter()
        .filter(|s| s.source == SlotSource::Live && s.position.is_ranked())
        .map(|s| s.position.sort_key())
        .collect();
    if placed.is_empty() {
        return f64::from(MISSED_CUT_SENTINEL);
    }
    placed.iter().map(|&p| f64::from(p)).sum::<f64>() / placed.len() as f64
}

/// Resolve one team without ranking it.
pub fn score_team(
    roster: &TeamRoster,
    live: &LivePositionMap,
    strategy: RankingStrategy,
) -> TeamStanding {
    let active: Vec<SlotStanding> = roster
        .active_players
        .iter()
        .map(|slot| resolve_slot(slot, live))
        .collect();
    let bench: Vec<SlotStanding> = roster
        .bench_players
        .iter()
        .map(|slot| resolve_slot(slot, live))
        .collect();

    let active_in_tournament = active
        .iter()
        .filter(|s| s.position != Position::MissedCut)
        .count();
    let (best_position, best_player) = best_slot(&active);
    let ranking_key = match strategy {
        RankingStrategy::Best => f64::from(best_position),
        RankingStrategy::Average => average_live_position(&active),
    };

    debug!(
        team = %roster.name,
        best = best_position,
        key = ranking_key,
        active = active_in_tournament,
        "scored team"
    );

    TeamStanding {
        rank: 0,
        name: roster.name.clone(),
        league: roster.league,
        declared_position: roster.declared_position.clone(),
        ranking_key,
        best_position,
        best_player,
        active_in_tournament,
        active,
        bench,
    }
}

/// Score every team, sort ascending by ranking key (ties keep sheet order)
/// and assign 1-based ranks.
pub fn compose_standings(
    rosters: &[TeamRoster],
    live: &LivePositionMap,
    strategy: RankingStrategy,
) -> Vec<TeamStanding> {
    let mut standings: Vec<TeamStanding> = rosters
        .iter()
        .map(|roster| score_team(roster, live, strategy))
        .collect();

    standings.sort_by(|a, b| {
        a.ranking_key
            .partial_cmp(&b.ranking_key)
            .unwrap_or(Ordering::Equal)
    });
    for (index, standing) in standings.iter_mut().enumerate() {
        standing.rank = index + 1;
    }
    standings
}
