//! Periodic refresh loop.

use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::info;

use crate::{
    cli::types::RankingStrategy,
    state::{RefreshPlan, Snapshot},
    Result,
};

use super::common::{source_message, CommandContext};

pub const DEFAULT_INTERVAL_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct WatchParams {
    pub interval_secs: u64,
    pub strategy: RankingStrategy,
}

impl Default for WatchParams {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_INTERVAL_SECS,
            strategy: RankingStrategy::default(),
        }
    }
}

/// Short per-refresh report: event, leader, top teams and any source
/// problems.
pub fn summarize(snapshot: &Snapshot, top_teams: usize) -> String {
    let mut lines = Vec::new();
    let stamp = snapshot
        .refreshed_at
        .map(|t| t.format("%H:%M:%S UTC").to_string())
        .unwrap_or_default();
    lines.push(format!("[{}] refresh #{}", stamp, snapshot.generation));

    match &snapshot.tournament {
        Some(tournament) => {
            lines.push(format!("{} - {}", tournament.name, tournament.round_label()));
            if let Some(leader) = tournament.sorted_by_position().first() {
                lines.push(format!(
                    "  Leader: {} {}",
                    leader.name,
                    leader.score_display.as_deref().unwrap_or("-")
                ));
            }
        }
        None => lines.push("No leaderboard data available".to_string()),
    }

    for standing in snapshot.standings.iter().take(top_teams) {
        lines.push(format!(
            "  {:>2}. {:<24} best {}",
            standing.rank,
            standing.name,
            standing.best_position_display()
        ));
    }

    for (label, report) in [
        ("Leaderboard", &snapshot.leaderboard_report),
        ("Rankings", &snapshot.rankings_report),
        ("League sheet", &snapshot.sheet_report),
    ] {
        if report.error.is_some() || report.from_cache {
            if let Some(message) = source_message(label, report) {
                lines.push(format!("  {}", message));
            }
        }
    }

    lines.join("\n")
}

/// Handle the watch command. Runs until Ctrl-C.
pub async fn handle_watch(ctx: &CommandContext, params: WatchParams) -> Result<()> {
    let plan = RefreshPlan {
        sheet: ctx.config().sheet_url.is_some(),
        ..RefreshPlan::all(params.strategy)
    };
    if !plan.sheet {
        println!("⚠ No sheet URL configured, team standings disabled");
    }

    let mut ticker = tokio::time::interval(Duration::from_secs(params.interval_secs.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    println!(
        "Refreshing every {}s (Ctrl-C to stop)",
        params.interval_secs.max(1)
    );
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let snapshot = ctx.state.refresh(plan).await;
                println!();
                println!("{}", summarize(&snapshot, 5));
            }
            signal = tokio::signal::ctrl_c() => {
                signal?;
                info!("watch stopped");
                break;
            }
        }
    }
    Ok(())
}
