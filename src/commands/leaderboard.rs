//! Live tournament leaderboard.

use chrono::FixedOffset;
use serde::Serialize;

use crate::{
    core::names::matches_search,
    espn::{normalize::normalize, types::Tournament},
    state::RefreshPlan,
    Result,
};

use super::common::{apply_limit, print_json, print_source, CommandContext};

#[derive(Debug, Clone, Default)]
pub struct LeaderboardParams {
    pub search: Option<String>,
    pub limit: Option<usize>,
    pub as_json: bool,
}

/// One printed leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardRow {
    pub position: String,
    pub name: String,
    pub to_par: String,
    pub progress: String,
}

/// Rows in leaderboard order: placed players by position, then everyone
/// without a position in feed order.
pub fn leaderboard_rows(
    tournament: &Tournament,
    display_offset: &FixedOffset,
    search: Option<&str>,
) -> Vec<LeaderboardRow> {
    let mut competitors: Vec<_> = tournament.competitors.iter().collect();
    competitors.sort_by_key(|c| c.position.sort_key());

    competitors
        .into_iter()
        .filter(|c| search.map_or(true, |q| matches_search(&c.name, q)))
        .map(|c| {
            let score = normalize(c, display_offset);
            let position = match c.position_display.trim() {
                "" | "-" => c.position.to_string(),
                shown => shown.to_string(),
            };
            LeaderboardRow {
                position,
                name: c.name.clone(),
                to_par: score.to_par,
                progress: score.progress,
            }
        })
        .collect()
}

/// `"<event> - <round>"` heading line.
pub fn tournament_header(tournament: &Tournament) -> String {
    format!("{} - {}", tournament.name, tournament.round_label())
}

pub fn render_rows(rows: &[LeaderboardRow]) -> String {
    rows.iter()
        .map(|r| {
            format!(
                "{:>4}  {:<28} {:>4} {}",
                r.position, r.name, r.to_par, r.progress
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Serialize)]
struct LeaderboardOutput<'a> {
    tournament: &'a str,
    round: String,
    players: &'a [LeaderboardRow],
}

/// Handle the leaderboard command
pub async fn handle_leaderboard(ctx: &CommandContext, params: LeaderboardParams) -> Result<()> {
    if !params.as_json {
        println!("Fetching live leaderboard...");
    }
    let snapshot = ctx.state.refresh(RefreshPlan::leaderboard()).await;

    let Some(tournament) = snapshot.tournament.as_ref() else {
        print_source("Leaderboard", &snapshot.leaderboard_report);
        println!("No leaderboard data available");
        return Ok(());
    };

    let rows = apply_limit(
        leaderboard_rows(tournament, ctx.display_offset(), params.search.as_deref()),
        params.limit,
    );

    if params.as_json {
        return print_json(&LeaderboardOutput {
            tournament: &tournament.name,
            round: tournament.round_label(),
            players: &rows,
        });
    }

    print_source("Leaderboard", &snapshot.leaderboard_report);
    println!();
    println!("{}", tournament_header(tournament));
    if rows.is_empty() {
        println!("No players match");
    } else {
        println!("{}", render_rows(&rows));
    }
    Ok(())
}
