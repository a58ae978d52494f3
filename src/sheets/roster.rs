//! Roster grid parser.
//!
//! Each team occupies a block on the league sheet: a header row at the anchor
//! (team name, declared position two columns over, league tag three columns
//! over) and up to `slot_rows` roster rows beneath it. Rows are laid out by
//! hand, so the player name may sit one or two columns right of the anchor
//! depending on whether a portrait image precedes it.

use serde::Serialize;
use tracing::debug;

use super::grid::{format_number, Cell, Grid};
use super::layout::{Anchor, SheetLayout};
use crate::cli::types::LeagueTag;

#[cfg(test)]
mod tests;

/// Players counted toward the team's standing.
pub const ACTIVE_SLOTS: usize = 3;
/// Nominal bench size; larger benches are kept but logged.
pub const NOMINAL_BENCH_SLOTS: usize = 6;

/// Marker names longer than this are treated as the next team's header.
const TEAM_NAME_MIN_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterSlot {
    pub player_name: String,
    pub declared_position: String,
    pub declared_score: String,
    pub has_portrait: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamRoster {
    pub name: String,
    pub league: LeagueTag,
    pub declared_position: String,
    pub anchor: Anchor,
    pub active_players: Vec<RosterSlot>,
    pub bench_players: Vec<RosterSlot>,
    /// Roster rows explicitly marked empty with `"-"`.
    pub empty_slots: usize,
}

impl TeamRoster {
    pub fn players(&self) -> impl Iterator<Item = &RosterSlot> {
        self.active_players.iter().chain(self.bench_players.iter())
    }
}

enum SlotRow {
    Player(RosterSlot),
    Empty,
    Skip,
    NextTeam,
}

/// Digits with an optional sign and at most one decimal point.
fn is_numeric(text: &str) -> bool {
    let text = text.trim();
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let mut digits = 0;
    let mut points = 0;
    for c in unsigned.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => points += 1,
            _ => return false,
        }
    }
    digits > 0 && points <= 1
}

fn player_name(cell: &Cell) -> Option<String> {
    let text = cell.as_text()?.trim();
    if text.chars().count() < 3 || text == "-" || is_numeric(text) {
        return None;
    }
    Some(text.to_string())
}

fn declared_position(cell: &Cell) -> String {
    cell.display()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "-".to_string())
}

fn declared_score(cell: &Cell) -> String {
    match cell {
        Cell::Number(n) if *n > 0.0 => format!("+{}", format_number(*n)),
        other => declared_position(other),
    }
}

fn looks_like_team_name(name: &str, markers: &[String]) -> bool {
    name.chars().count() > TEAM_NAME_MIN_LEN && markers.iter().any(|m| name.contains(m.as_str()))
}

fn read_slot_row(grid: &Grid, row: usize, col: usize, markers: &[String]) -> SlotRow {
    let first = grid.cell(row, col);
    let second = grid.cell(row, col + 1);

    let (name_col, has_portrait) = if first.is_image() {
        (col + 1, true)
    } else if second.is_image() {
        (col + 2, true)
    } else if first.is_dash() || second.is_dash() {
        return SlotRow::Empty;
    } else {
        match (col..=col + 2).find(|&c| player_name(grid.cell(row, c)).is_some()) {
            Some(c) => (c, false),
            None => return SlotRow::Skip,
        }
    };

    let Some(name) = player_name(grid.cell(row, name_col)) else {
        return SlotRow::Skip;
    };

    if looks_like_team_name(&name, markers) {
        debug!(row, col, name = %name, "reached next team header, stopping");
        return SlotRow::NextTeam;
    }

    SlotRow::Player(RosterSlot {
        player_name: name,
        declared_position: declared_position(grid.cell(row, name_col + 1)),
        declared_score: declared_score(grid.cell(row, name_col + 2)),
        has_portrait,
    })
}

/// Parse the team block at `anchor`.
///
/// Returns `None` when the anchor cell holds no team name.
pub fn parse_team(grid: &Grid, anchor: Anchor, layout: &SheetLayout) -> Option<TeamRoster> {
    let Anchor { row, col } = anchor;
    let name = grid.cell(row, col).display()?.trim().to_string();
    if name.is_empty() {
        return None;
    }

    let declared_position = grid
        .cell(row, col + 2)
        .display()
        .map(|s| s.trim().to_string())
        .unwrap_or_default();
    let league = grid
        .cell(row, col + 3)
        .as_text()
        .and_then(|t| t.parse::<LeagueTag>().ok())
        .unwrap_or_default();

    debug!(team = %name, row, col, "parsing team");

    let mut players = Vec::new();
    let mut empty_slots = 0;
    for r in row + 1..=row + layout.slot_rows {
        if !grid.has_row(r) {
            continue;
        }
        match read_slot_row(grid, r, col, &layout.team_markers) {
            SlotRow::Player(slot) => {
                debug!(
                    player = %slot.player_name,
                    position = %slot.declared_position,
                    score = %slot.declared_score,
                    "found player"
                );
                players.push(slot);
            }
            SlotRow::Empty => {
                empty_slots += 1;
                debug!(row = r, "empty roster slot");
            }
            SlotRow::Skip => {}
            SlotRow::NextTeam => break,
        }
    }

    let bench_players = players.split_off(players.len().min(ACTIVE_SLOTS));
    if bench_players.len() > NOMINAL_BENCH_SLOTS {
        debug!(team = %name, bench = bench_players.len(), "bench exceeds nominal size");
    }

    Some(TeamRoster {
        name,
        league,
        declared_position,
        anchor,
        active_players: players,
        bench_players,
        empty_slots,
    })
}

/// Parse every team the layout names. Anchors without a team are skipped.
pub fn parse_rosters(grid: &Grid, layout: &SheetLayout) -> Vec<TeamRoster> {
    let teams: Vec<TeamRoster> = layout
        .anchors
        .iter()
        .filter_map(|&anchor| parse_team(grid, anchor, layout))
        .collect();
    debug!(teams = teams.len(), "parsed rosters");
    teams
}
