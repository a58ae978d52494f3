//! Runtime configuration resolved from the environment.
//!
//! Values come from process environment variables (optionally seeded from a
//! `.env` file by the binary). CLI flags override individual fields after
//! [`Config::from_env`] runs.

use std::path::PathBuf;

use chrono::{FixedOffset, Offset, Utc};

use crate::error::{GolfError, Result};

pub const LEADERBOARD_URL_ENV_VAR: &str = "FANTASY_GOLF_LEADERBOARD_URL";
pub const SHEET_URL_ENV_VAR: &str = "FANTASY_GOLF_SHEET_URL";
pub const SHEET_NAME_ENV_VAR: &str = "FANTASY_GOLF_SHEET_NAME";
pub const RANKINGS_ENV_VAR: &str = "FANTASY_GOLF_RANKINGS";
pub const LAYOUT_ENV_VAR: &str = "FANTASY_GOLF_LAYOUT";
pub const TZ_OFFSET_ENV_VAR: &str = "FANTASY_GOLF_TZ_OFFSET";

pub const DEFAULT_LEADERBOARD_URL: &str =
    "https://site.api.espn.com/apis/site/v2/sports/golf/leaderboard";
pub const DEFAULT_SHEET_NAME: &str = "League Center";
pub const DEFAULT_RANKINGS_SOURCE: &str = "rankings_data.json";
pub const DEFAULT_TZ_OFFSET_HOURS: i32 = -5;

/// Where the rankings snapshot is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankingsSource {
    File(PathBuf),
    Url(String),
}

impl RankingsSource {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            RankingsSource::Url(raw.to_string())
        } else {
            RankingsSource::File(PathBuf::from(raw))
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub leaderboard_url: String,
    pub sheet_url: Option<String>,
    pub sheet_name: String,
    pub rankings: RankingsSource,
    pub layout_path: Option<PathBuf>,
    pub display_offset: FixedOffset,
    /// Serve every source from the payload cache without touching the network.
    pub offline: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            leaderboard_url: DEFAULT_LEADERBOARD_URL.to_string(),
            sheet_url: None,
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            rankings: RankingsSource::parse(DEFAULT_RANKINGS_SOURCE),
            layout_path: None,
            display_offset: FixedOffset::east_opt(DEFAULT_TZ_OFFSET_HOURS * 3600)
                .unwrap_or_else(|| Utc.fix()),
            offline: false,
        }
    }
}

/// Parse a display offset given in hours (`"-5"`, `"+1"`, `"5.5"`).
pub fn parse_offset(raw: &str) -> Result<FixedOffset> {
    let hours: f64 = raw.trim().parse().map_err(|_| GolfError::InvalidOffset {
        value: raw.to_string(),
    })?;
    let seconds = (hours * 3600.0).round();
    if !seconds.is_finite() || seconds.abs() >= 86_400.0 {
        return Err(GolfError::InvalidOffset {
            value: raw.to_string(),
        });
    }
    FixedOffset::east_opt(seconds as i32).ok_or_else(|| GolfError::InvalidOffset {
        value: raw.to_string(),
    })
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    /// Read configuration from the environment, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();

        if let Some(url) = non_empty_var(LEADERBOARD_URL_ENV_VAR) {
            config.leaderboard_url = url;
        }
        config.sheet_url = non_empty_var(SHEET_URL_ENV_VAR);
        if let Some(name) = non_empty_var(SHEET_NAME_ENV_VAR) {
            config.sheet_name = name;
        }
        if let Some(source) = non_empty_var(RANKINGS_ENV_VAR) {
            config.rankings = RankingsSource::parse(&source);
        }
        config.layout_path = non_empty_var(LAYOUT_ENV_VAR).map(PathBuf::from);
        if let Some(raw) = non_empty_var(TZ_OFFSET_ENV_VAR) {
            config.display_offset = parse_offset(&raw)?;
        }

        Ok(config)
    }

    /// The sheet URL, or the error explaining how to provide one.
    pub fn require_sheet_url(&self) -> Result<&str> {
        self.sheet_url
            .as_deref()
            .ok_or_else(|| GolfError::MissingSheetUrl {
                env_var: SHEET_URL_ENV_VAR.to_string(),
            })
    }
}
