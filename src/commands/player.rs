//! Single-player details: tournament card plus rankings across feeds.

use chrono::FixedOffset;
use serde::Serialize;

use crate::{
    error::GolfError,
    espn::normalize::{normalize, round_breakdown, NormalizedScore, RoundBreakdown},
    rankings::{FeedStanding, PlayerProfile},
    state::{RefreshPlan, Snapshot},
    Result,
};

use super::common::{print_json, print_source, CommandContext};

#[derive(Debug, Clone, Default)]
pub struct PlayerParams {
    pub name: String,
    pub as_json: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerDetails {
    pub name: String,
    pub position: Option<String>,
    pub score: Option<NormalizedScore>,
    pub rounds: Option<RoundBreakdown>,
    pub rankings: Option<PlayerProfile>,
}

/// Gather what the snapshot knows about `name`.
///
/// Fails with [`GolfError::PlayerNotFound`] when neither the leaderboard nor
/// the rankings directory has the player.
pub fn player_details(
    snapshot: &Snapshot,
    name: &str,
    display_offset: &FixedOffset,
) -> Result<PlayerDetails> {
    let competitor = snapshot.tournament.as_ref().and_then(|t| t.find(name));
    let profile = snapshot.directory.get(name).cloned();

    if competitor.is_none() && profile.is_none() {
        return Err(GolfError::PlayerNotFound {
            name: name.to_string(),
        });
    }

    Ok(PlayerDetails {
        name: competitor
            .map(|c| c.name.clone())
            .or_else(|| profile.as_ref().map(|p| p.name.clone()))
            .unwrap_or_else(|| name.to_string()),
        position: competitor.map(|c| match c.position_display.trim() {
            "" | "-" => c.position.to_string(),
            shown => shown.to_string(),
        }),
        score: competitor.map(|c| normalize(c, display_offset)),
        rounds: competitor.map(|c| round_breakdown(c, display_offset)),
        rankings: profile,
    })
}

fn render_standing(label: &str, unit: &str, standing: &Option<FeedStanding>) -> String {
    match standing {
        Some(s) => {
            let mut line = format!("  {:<10} #{} ({} {})", label, s.rank, s.value, unit);
            if let Some(detail) = &s.detail {
                line.push_str(&format!(" {}", detail));
            }
            line
        }
        None => format!("  {:<10} unranked", label),
    }
}

pub fn render_details(details: &PlayerDetails) -> String {
    let mut lines = vec![details.name.clone()];

    match (&details.position, &details.score) {
        (Some(position), Some(score)) => {
            lines.push(format!("  Position: {}  {}", position, score));
        }
        _ => lines.push("  Not in the current field".to_string()),
    }

    if let Some(rounds) = &details.rounds {
        for round in &rounds.rounds {
            lines.push(format!("  {}", round));
        }
        if rounds.total_strokes > 0 {
            lines.push(format!(
                "  Total: {} strokes ({})",
                rounds.total_strokes, rounds.total_to_par
            ));
        }
    }

    if let Some(profile) = &details.rankings {
        lines.push("Rankings".to_string());
        lines.push(render_standing("World", "pts", &profile.world));
        lines.push(render_standing("Skill", "SG", &profile.skill));
        lines.push(render_standing("Season", "pts", &profile.season));
    }

    lines.join("\n")
}

/// Handle the player command
pub async fn handle_player(ctx: &CommandContext, params: PlayerParams) -> Result<()> {
    if !params.as_json {
        println!("Looking up {}...", params.name);
    }
    let snapshot = ctx.state.refresh(RefreshPlan::rankings()).await;

    if !params.as_json {
        print_source("Leaderboard", &snapshot.leaderboard_report);
        print_source("Rankings", &snapshot.rankings_report);
    }

    let details = player_details(&snapshot, &params.name, ctx.display_offset())?;
    if params.as_json {
        return print_json(&details);
    }

    println!();
    println!("{}", render_details(&details));
    Ok(())
}
