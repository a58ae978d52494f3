//! Live tournament positions keyed by player name.
//!
//! The team view only needs a small slice of each competitor: where they
//! stand, their aggregate score and a short progress label. [`LivePositionMap`]
//! is rebuilt from every leaderboard refresh.

use chrono::FixedOffset;
use serde::Serialize;

use super::normalize::format_tee_time;
use super::types::{Competitor, RoundState, Thru, Tournament};
use crate::cli::types::Position;
use crate::core::names::find_by_name;

/// Live standing of one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiveEntry {
    pub name: String,
    pub position: Position,
    pub position_display: String,
    pub score: String,
    pub thru: String,
}

impl LiveEntry {
    pub fn from_competitor(competitor: &Competitor, display_offset: &FixedOffset) -> Self {
        let position_display = competitor
            .position_id
            .filter(|id| *id > 0)
            .map(|_| competitor.position_display.clone())
            .filter(|d| !d.is_empty() && d != "-")
            .unwrap_or_else(|| competitor.position.to_string());

        Self {
            name: competitor.name.clone(),
            position: competitor.position,
            position_display,
            score: competitor
                .score_display
                .clone()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "-".to_string()),
            thru: thru_label(competitor, display_offset),
        }
    }
}

/// Short progress label for the team view: a tee time (`"1:05 PM"`) or
/// `"Sched"` before the round, the hole count during it, `"F"` otherwise.
pub fn thru_label(competitor: &Competitor, display_offset: &FixedOffset) -> String {
    let not_started = matches!(competitor.thru, Some(Thru::Holes(0)));
    if not_started && competitor.status_state == Some(RoundState::Pre) {
        return competitor
            .tee_time
            .as_deref()
            .and_then(|t| format_tee_time(t, display_offset))
            .unwrap_or_else(|| "Sched".to_string());
    }

    match competitor.thru {
        Some(Thru::Holes(n)) if n > 0 && n != 18 => n.to_string(),
        _ => "F".to_string(),
    }
}

/// Name-indexed live positions for one leaderboard refresh.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LivePositionMap {
    entries: Vec<LiveEntry>,
}

impl LivePositionMap {
    pub fn from_tournament(tournament: &Tournament, display_offset: &FixedOffset) -> Self {
        Self {
            entries: tournament
                .competitors
                .iter()
                .map(|c| LiveEntry::from_competitor(c, display_offset))
                .collect(),
        }
    }

    pub fn from_entries(entries: Vec<LiveEntry>) -> Self {
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&LiveEntry> {
        find_by_name(&self.entries, name, |e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LiveEntry> {
        self.entries.iter()
    }
}
