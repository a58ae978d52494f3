//! CLI argument definitions and parsing.

pub mod types;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use types::{LeagueTag, RankingFeed, RankingStrategy};

use crate::core::config::{parse_offset, Config, RankingsSource};
use crate::Result;

/// Source overrides shared by every command.
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// League sheet endpoint (or set `FANTASY_GOLF_SHEET_URL`).
    #[clap(long, global = true)]
    pub sheet_url: Option<String>,

    /// Rankings snapshot path or http(s) URL (or set `FANTASY_GOLF_RANKINGS`).
    #[clap(long, global = true)]
    pub rankings: Option<String>,

    /// Display offset from UTC in hours, e.g. `-5` (or set `FANTASY_GOLF_TZ_OFFSET`).
    #[clap(long, global = true, allow_hyphen_values = true)]
    pub tz_offset: Option<String>,

    /// Serve every source from the local cache without network access.
    #[clap(long, global = true)]
    pub offline: bool,

    /// Debug logging on stderr.
    #[clap(long, short, global = true)]
    pub verbose: bool,
}

impl SourceArgs {
    /// Apply the flags given on the command line over `config`.
    pub fn apply(&self, config: &mut Config) -> Result<()> {
        if let Some(url) = &self.sheet_url {
            config.sheet_url = Some(url.clone());
        }
        if let Some(source) = &self.rankings {
            config.rankings = RankingsSource::parse(source);
        }
        if let Some(raw) = &self.tz_offset {
            config.display_offset = parse_offset(raw)?;
        }
        config.offline |= self.offline;
        Ok(())
    }
}

#[derive(Debug, Parser)]
#[clap(
    name = "fantasy-golf",
    about = "Live golf leaderboard, rankings and fantasy team standings"
)]
pub struct FantasyGolf {
    #[clap(flatten)]
    pub sources: SourceArgs,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Live tournament leaderboard with cumulative score and progress.
    Leaderboard {
        /// Only players whose name contains this text.
        #[clap(long, short)]
        search: Option<String>,

        /// Show at most this many players.
        #[clap(long, short)]
        limit: Option<usize>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// World, skill and season rankings.
    ///
    /// Falls back to the top of the live leaderboard when the rankings
    /// snapshot cannot be loaded.
    Rankings {
        /// Feed to show.
        #[clap(long, short, value_enum, default_value_t = RankingFeed::All)]
        feed: RankingFeed,

        /// Only players whose name contains this text.
        #[clap(long, short)]
        search: Option<String>,

        /// Show at most this many players per feed.
        #[clap(long, short)]
        limit: Option<usize>,

        /// Read the snapshot from this file.
        #[clap(long)]
        file: Option<PathBuf>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Fantasy team standings from the league sheet and the live leaderboard.
    Teams {
        /// How a team's standing is derived from its active players.
        #[clap(long, value_enum, default_value_t = RankingStrategy::Best)]
        strategy: RankingStrategy,

        /// Only teams in this league.
        #[clap(long, value_enum)]
        league: Option<LeagueTag>,

        /// Only teams with a player whose name contains this text.
        #[clap(long, short)]
        search: Option<String>,

        /// Sheet layout JSON (or set `FANTASY_GOLF_LAYOUT`).
        #[clap(long)]
        layout: Option<PathBuf>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// One player's scorecard and rankings.
    Player {
        /// Player name; case and punctuation are ignored.
        name: String,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Refresh the leaderboard and standings on an interval until Ctrl-C.
    Watch {
        /// Seconds between refreshes.
        #[clap(long, short, default_value_t = crate::commands::watch::DEFAULT_INTERVAL_SECS)]
        interval: u64,

        /// How a team's standing is derived from its active players.
        #[clap(long, value_enum, default_value_t = RankingStrategy::Best)]
        strategy: RankingStrategy,

        /// Sheet layout JSON (or set `FANTASY_GOLF_LAYOUT`).
        #[clap(long)]
        layout: Option<PathBuf>,
    },
}
