//! Rankings tables for the world, skill and season feeds.

use serde::Serialize;

use crate::{
    cli::types::RankingFeed,
    core::names::matches_search,
    rankings::{value_unit, RankingEntry, RankingsSnapshot},
    state::RefreshPlan,
    Result,
};

use super::common::{apply_limit, print_json, print_source, CommandContext};

#[derive(Debug, Clone, Default)]
pub struct RankingsParams {
    pub feed: RankingFeed,
    pub search: Option<String>,
    pub limit: Option<usize>,
    pub as_json: bool,
}

/// The feeds a selector expands to.
pub fn selected_feeds(feed: RankingFeed) -> Vec<RankingFeed> {
    match feed {
        RankingFeed::All => vec![RankingFeed::Owgr, RankingFeed::Datagolf, RankingFeed::Fedex],
        single => vec![single],
    }
}

/// Filtered, limited entries of one feed.
#[derive(Debug, Clone, Serialize)]
pub struct FeedTable {
    pub feed: String,
    pub unit: &'static str,
    pub entries: Vec<RankingEntry>,
}

pub fn feed_tables(
    snapshot: &RankingsSnapshot,
    feed: RankingFeed,
    search: Option<&str>,
    limit: Option<usize>,
) -> Vec<FeedTable> {
    selected_feeds(feed)
        .into_iter()
        .map(|f| {
            let entries = snapshot
                .feed(f)
                .iter()
                .filter(|e| search.map_or(true, |q| matches_search(&e.player, q)))
                .cloned()
                .collect();
            FeedTable {
                feed: f.to_string(),
                unit: value_unit(f),
                entries: apply_limit(entries, limit),
            }
        })
        .collect()
}

pub fn render_table(table: &FeedTable) -> String {
    let mut lines = vec![table.feed.clone()];
    if table.entries.is_empty() {
        lines.push("  No players match".to_string());
    }
    for entry in &table.entries {
        let mut line = format!(
            "{:>4}. {:<28} {} {}",
            entry.rank, entry.player, entry.value, table.unit
        );
        if let Some(detail) = &entry.detail {
            line.push_str(&format!("  {}", detail));
        }
        lines.push(line);
    }
    lines.join("\n")
}

#[derive(Serialize)]
struct RankingsOutput<'a> {
    timestamp: Option<&'a str>,
    is_fallback: bool,
    feeds: &'a [FeedTable],
}

/// Handle the rankings command
pub async fn handle_rankings(ctx: &CommandContext, params: RankingsParams) -> Result<()> {
    if !params.as_json {
        println!("Loading rankings...");
    }
    let snapshot = ctx.state.refresh(RefreshPlan::rankings()).await;

    let Some(rankings) = snapshot.rankings.as_ref() else {
        print_source("Rankings", &snapshot.rankings_report);
        print_source("Leaderboard", &snapshot.leaderboard_report);
        println!("No rankings data available");
        return Ok(());
    };

    let tables = feed_tables(
        rankings,
        params.feed,
        params.search.as_deref(),
        params.limit,
    );

    if params.as_json {
        return print_json(&RankingsOutput {
            timestamp: rankings.timestamp.as_deref(),
            is_fallback: rankings.is_fallback,
            feeds: &tables,
        });
    }

    print_source("Rankings", &snapshot.rankings_report);
    if rankings.is_fallback {
        println!("Showing the top of the live leaderboard instead");
    } else if let Some(timestamp) = &rankings.timestamp {
        println!("Rankings as of {}", timestamp);
    }
    for table in &tables {
        println!();
        println!("{}", render_table(table));
    }
    Ok(())
}
