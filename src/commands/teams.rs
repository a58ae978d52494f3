//! Fantasy team standings.

use serde::Serialize;

use crate::{
    cli::types::{LeagueTag, RankingStrategy},
    state::RefreshPlan,
    teams::{SlotStanding, TeamStanding},
    Result,
};

use super::common::{print_json, print_source, CommandContext};

#[derive(Debug, Clone, Default)]
pub struct TeamsParams {
    pub strategy: RankingStrategy,
    pub league: Option<LeagueTag>,
    /// Keep teams with an active or bench player whose name contains this.
    pub search: Option<String>,
    pub as_json: bool,
}

/// Apply the league and player filters. Ranks are kept from the full table.
pub fn filter_standings<'a>(
    standings: &'a [TeamStanding],
    league: Option<LeagueTag>,
    search: Option<&str>,
) -> Vec<&'a TeamStanding> {
    standings
        .iter()
        .filter(|s| league.map_or(true, |l| s.league == l))
        .filter(|s| search.map_or(true, |q| s.has_player_matching(q)))
        .collect()
}

fn render_slot(slot: &SlotStanding) -> String {
    let mut line = format!(
        "      {:<26} {:>4} {:>4}",
        slot.player_name, slot.position_display, slot.score
    );
    if let Some(thru) = &slot.thru {
        line.push_str(&format!(" {:>8}", thru));
    }
    line
}

/// Slots best position first. Ties keep parse order.
fn by_position(slots: &[SlotStanding]) -> Vec<&SlotStanding> {
    let mut sorted: Vec<&SlotStanding> = slots.iter().collect();
    sorted.sort_by_key(|slot| slot.position.sort_key());
    sorted
}

pub fn render_team(standing: &TeamStanding) -> String {
    let best = match &standing.best_player {
        Some(player) => format!("{} {}", standing.best_position_display(), player),
        None => "MC".to_string(),
    };
    let mut lines = vec![format!(
        "{:>3}. {} ({})  best: {}  [{}/{} playing]",
        standing.rank,
        standing.name,
        standing.league,
        best,
        standing.active_in_tournament,
        standing.active.len()
    )];
    lines.extend(by_position(&standing.active).into_iter().map(render_slot));
    if !standing.bench.is_empty() {
        lines.push("    Bench:".to_string());
        lines.extend(by_position(&standing.bench).into_iter().map(render_slot));
    }
    lines.join("\n")
}

#[derive(Debug, Serialize)]
pub struct TeamsOutput<'a> {
    pub strategy: String,
    pub teams: Vec<&'a TeamStanding>,
}

/// JSON body for the teams command. An empty sheet yields an empty team list.
pub fn teams_output<'a>(standings: &'a [TeamStanding], params: &TeamsParams) -> TeamsOutput<'a> {
    TeamsOutput {
        strategy: params.strategy.to_string(),
        teams: filter_standings(standings, params.league, params.search.as_deref()),
    }
}

/// Handle the teams command
pub async fn handle_teams(ctx: &CommandContext, params: TeamsParams) -> Result<()> {
    ctx.config().require_sheet_url()?;

    if !params.as_json {
        println!("Loading league sheet and live leaderboard...");
    }
    let snapshot = ctx.state.refresh(RefreshPlan::teams(params.strategy)).await;

    if params.as_json {
        return print_json(&teams_output(&snapshot.standings, &params));
    }

    print_source("Leaderboard", &snapshot.leaderboard_report);
    print_source("League sheet", &snapshot.sheet_report);
    if snapshot.rosters.is_empty() {
        println!("No team data available");
        return Ok(());
    }

    let teams = filter_standings(
        &snapshot.standings,
        params.league,
        params.search.as_deref(),
    );

    if let Some(tournament) = &snapshot.tournament {
        println!();
        println!("{} - {}", tournament.name, tournament.round_label());
    }
    if teams.is_empty() {
        println!("No teams match");
    }
    for team in teams {
        println!();
        println!("{}", render_team(team));
    }
    Ok(())
}
