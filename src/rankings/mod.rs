//! Rankings snapshot: world ranking, skill rating and season points.
//!
//! The snapshot is a JSON document produced offline by a scraper, read from a
//! local file or over HTTP. Field types drift between scraper versions, so
//! ranks and values are accepted as strings or numbers and kept as display
//! text.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::cli::types::RankingFeed;
use crate::core::config::RankingsSource;
use crate::core::names::{find_by_name, position_by_name};
use crate::espn::types::Tournament;
use crate::error::Result;
use crate::sheets::grid::format_number;

#[cfg(test)]
mod tests;

/// Leaderboard-derived rankings list length when the snapshot is unavailable.
pub const FALLBACK_RANKINGS_LEN: usize = 30;

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => n.as_f64().map(format_number),
        _ => None,
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawEntry {
    #[serde(default)]
    rank: Value,
    #[serde(default)]
    player: Value,
    #[serde(default)]
    points: Value,
    #[serde(default)]
    rating: Value,
    #[serde(default)]
    country: Value,
    #[serde(default)]
    tour: Value,
    #[serde(default)]
    earnings: Value,
}

#[derive(Debug, Default, Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    owgr: Vec<RawEntry>,
    #[serde(default)]
    datagolf: Vec<RawEntry>,
    #[serde(default)]
    fedex: Vec<RawEntry>,
}

/// One row of a rankings feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankingEntry {
    pub rank: String,
    pub player: String,
    /// Points for the world and season feeds, rating for the skill feed.
    pub value: String,
    /// Country, tour or earnings depending on the feed.
    pub detail: Option<String>,
}

impl RankingEntry {
    fn from_raw(raw: &RawEntry, feed: RankingFeed) -> Option<Self> {
        let player = value_text(&raw.player)?;
        let (value, detail) = match feed {
            RankingFeed::Datagolf => (&raw.rating, value_text(&raw.tour).or(Some("PGA".into()))),
            RankingFeed::Fedex => (&raw.points, value_text(&raw.earnings)),
            _ => (&raw.points, value_text(&raw.country)),
        };
        Some(Self {
            rank: value_text(&raw.rank).unwrap_or_else(|| "-".to_string()),
            player,
            value: value_text(value).unwrap_or_else(|| "N/A".to_string()),
            detail,
        })
    }
}

/// All three feeds from one snapshot.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RankingsSnapshot {
    pub timestamp: Option<String>,
    pub owgr: Vec<RankingEntry>,
    pub datagolf: Vec<RankingEntry>,
    pub fedex: Vec<RankingEntry>,
    /// Built from the live leaderboard rather than a snapshot file.
    pub is_fallback: bool,
}

fn convert(entries: &[RawEntry], feed: RankingFeed) -> Vec<RankingEntry> {
    entries
        .iter()
        .filter_map(|e| RankingEntry::from_raw(e, feed))
        .collect()
}

impl RankingsSnapshot {
    pub fn from_value(payload: Value) -> Result<Self> {
        let raw: RawSnapshot = serde_json::from_value(payload)?;
        debug!(
            owgr = raw.owgr.len(),
            datagolf = raw.datagolf.len(),
            fedex = raw.fedex.len(),
            "decoded rankings snapshot"
        );
        Ok(Self {
            timestamp: raw.timestamp,
            owgr: convert(&raw.owgr, RankingFeed::Owgr),
            datagolf: convert(&raw.datagolf, RankingFeed::Datagolf),
            fedex: convert(&raw.fedex, RankingFeed::Fedex),
            is_fallback: false,
        })
    }

    /// Placeholder rankings from the top of the live leaderboard, used for
    /// every feed when the snapshot cannot be loaded.
    pub fn from_leaderboard(tournament: &Tournament) -> Self {
        let entries: Vec<RankingEntry> = tournament
            .sorted_by_position()
            .into_iter()
            .take(FALLBACK_RANKINGS_LEN)
            .enumerate()
            .map(|(i, c)| RankingEntry {
                rank: (i + 1).to_string(),
                player: c.name.clone(),
                value: "N/A".to_string(),
                detail: None,
            })
            .collect();

        Self {
            timestamp: None,
            owgr: entries.clone(),
            datagolf: entries.clone(),
            fedex: entries,
            is_fallback: true,
        }
    }

    pub fn feed(&self, feed: RankingFeed) -> &[RankingEntry] {
        match feed {
            RankingFeed::Owgr | RankingFeed::All => &self.owgr,
            RankingFeed::Datagolf => &self.datagolf,
            RankingFeed::Fedex => &self.fedex,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.owgr.is_empty() && self.datagolf.is_empty() && self.fedex.is_empty()
    }
}

/// Unit suffix shown after a feed's value.
pub fn value_unit(feed: RankingFeed) -> &'static str {
    match feed {
        RankingFeed::Datagolf => "SG",
        _ => "pts",
    }
}

/// One player's standing in one feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedStanding {
    pub rank: String,
    pub value: String,
    pub detail: Option<String>,
}

impl From<&RankingEntry> for FeedStanding {
    fn from(entry: &RankingEntry) -> Self {
        Self {
            rank: entry.rank.clone(),
            value: entry.value.clone(),
            detail: entry.detail.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerProfile {
    pub name: String,
    pub world: Option<FeedStanding>,
    pub skill: Option<FeedStanding>,
    pub season: Option<FeedStanding>,
}

impl PlayerProfile {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            world: None,
            skill: None,
            season: None,
        }
    }
}

/// Players merged across the three feeds by normalized name.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlayerDirectory {
    players: Vec<PlayerProfile>,
}

impl PlayerDirectory {
    pub fn from_snapshot(snapshot: &RankingsSnapshot) -> Self {
        let mut directory = Self::default();
        if snapshot.is_fallback {
            return directory;
        }
        for entry in &snapshot.owgr {
            directory.profile_mut(&entry.player).world = Some(entry.into());
        }
        for entry in &snapshot.datagolf {
            directory.profile_mut(&entry.player).skill = Some(entry.into());
        }
        for entry in &snapshot.fedex {
            directory.profile_mut(&entry.player).season = Some(entry.into());
        }
        directory
    }

    fn profile_mut(&mut self, name: &str) -> &mut PlayerProfile {
        let index = match position_by_name(&self.players, name, |p| p.name.as_str()) {
            Some(index) => index,
            None => {
                self.players.push(PlayerProfile::new(name));
                self.players.len() - 1
            }
        };
        &mut self.players[index]
    }

    pub fn get(&self, name: &str) -> Option<&PlayerProfile> {
        find_by_name(&self.players, name, |p| p.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

/// Load the snapshot payload from a file or URL.
pub async fn get_rankings(client: &Client, source: &RankingsSource) -> Result<Value> {
    match source {
        RankingsSource::File(path) => {
            info!(path = %path.display(), "reading rankings snapshot");
            let contents = tokio::fs::read_to_string(path).await?;
            Ok(serde_json::from_str(&contents)?)
        }
        RankingsSource::Url(url) => {
            info!(url = %url, "fetching rankings snapshot");
            let res = client
                .get(url)
                .send()
                .await?
                .error_for_status()?
                .json::<Value>()
                .await?;
            Ok(res)
        }
    }
}
