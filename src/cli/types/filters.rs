//! Filter and selector types for fantasy golf CLI commands.

use crate::error::GolfError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Division a fantasy team plays in.
///
/// The league spreadsheet writes this as `CL` (championship) or `RL`
/// (relegation) in the team header row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
pub enum LeagueTag {
    /// Championship league
    #[default]
    #[value(alias = "championship")]
    CL,
    /// Relegation league
    #[value(alias = "relegation")]
    RL,
}

impl fmt::Display for LeagueTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LeagueTag::CL => "CL",
            LeagueTag::RL => "RL",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for LeagueTag {
    type Err = GolfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CL" | "CHAMPIONSHIP" => Ok(LeagueTag::CL),
            "RL" | "RELEGATION" => Ok(LeagueTag::RL),
            _ => Err(GolfError::InvalidLeagueTag { tag: s.to_string() }),
        }
    }
}

/// How a team's standing is derived from its active players.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum RankingStrategy {
    /// Team ranks by its single best-placed active player
    #[default]
    Best,
    /// Team ranks by the mean live position of its active players
    Average,
}

impl fmt::Display for RankingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RankingStrategy::Best => "best",
            RankingStrategy::Average => "average",
        };
        write!(f, "{}", s)
    }
}

/// Which rankings feed to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum RankingFeed {
    /// Official world golf ranking
    Owgr,
    /// Skill rating (strokes gained)
    Datagolf,
    /// Season points race
    Fedex,
    /// All three feeds
    #[default]
    All,
}

impl fmt::Display for RankingFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RankingFeed::Owgr => "World Golf Ranking",
            RankingFeed::Datagolf => "Data Golf Ranking",
            RankingFeed::Fedex => "FedEx Cup Ranking",
            RankingFeed::All => "All Rankings",
        };
        write!(f, "{}", s)
    }
}
