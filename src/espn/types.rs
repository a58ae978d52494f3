//! Leaderboard payload types and the domain records built from them.
//!
//! ESPN's golf leaderboard is loosely typed: ids arrive as strings or numbers,
//! `thru` may be `5`, `"5"`, `"F"` or missing, and round values can be `"--"`.
//! The raw structs below accept all of that and the domain types
//! ([`Tournament`], [`Competitor`]) carry the cleaned-up result.

use crate::cli::types::Position;
use crate::error::{GolfError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;


fn de_lenient_u32<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Value> = Option::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(value_as_u32))
}

fn de_lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn de_lenient_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

fn value_as_u32(v: &Value) -> Option<u32> {
    match v {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

/// Holes completed in the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Thru {
    Holes(u32),
    Finished,
}

impl Thru {
    /// Interpret ESPN's `thru`, which may be a number, a numeric string
    /// (sometimes with a trailing `*` for a back-nine start) or `"F"`.
    pub fn from_value(v: &Value) -> Option<Self> {
        match v {
            Value::Number(_) => value_as_u32(v).map(Thru::Holes),
            Value::String(s) => {
                let s = s.trim().trim_end_matches('*');
                if s.eq_ignore_ascii_case("F") {
                    Some(Thru::Finished)
                } else {
                    s.parse::<u32>().ok().map(Thru::Holes)
                }
            }
            _ => None,
        }
    }

    /// Positive hole count that is not a full round.
    pub fn partial_holes(&self) -> Option<u32> {
        match self {
            Thru::Holes(n) if *n > 0 && *n != 18 => Some(*n),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Thru::Finished | Thru::Holes(18))
    }
}

fn de_thru<'de, D>(deserializer: D) -> std::result::Result<Option<Thru>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Value> = Option::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(Thru::from_value))
}

/// Competitor round state from `status.type.state`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RoundState {
    Pre,
    In,
    Post,
}

impl RoundState {
    pub fn from_espn(state: &str) -> Option<Self> {
        match state.trim().to_lowercase().as_str() {
            "pre" => Some(RoundState::Pre),
            "in" => Some(RoundState::In),
            "post" => Some(RoundState::Post),
            _ => None,
        }
    }
}

/// Top-level envelope of the leaderboard endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeaderboardResponse {
    #[serde(default)]
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Event {
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub competitions: Vec<Competition>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Competition {
    #[serde(default)]
    pub status: Option<CompetitionStatus>,
    #[serde(default)]
    pub competitors: Vec<RawCompetitor>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompetitionStatus {
    #[serde(default, deserialize_with = "de_lenient_u32")]
    pub period: Option<u32>,
    #[serde(rename = "type", default)]
    pub status_type: Option<StatusType>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusType {
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCompetitor {
    #[serde(default)]
    pub athlete: Option<Athlete>,
    #[serde(default)]
    pub status: Option<CompetitorStatus>,
    #[serde(default)]
    pub score: Option<ScoreField>,
    #[serde(default)]
    pub linescores: Vec<RawLineScore>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Athlete {
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompetitorStatus {
    #[serde(default)]
    pub position: Option<StatusPosition>,
    #[serde(default, deserialize_with = "de_thru")]
    pub thru: Option<Thru>,
    #[serde(rename = "teeTime", default)]
    pub tee_time: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_u32")]
    pub period: Option<u32>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(rename = "type", default)]
    pub status_type: Option<StatusType>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusPosition {
    #[serde(default, deserialize_with = "de_lenient_u32")]
    pub id: Option<u32>,
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
}

/// `score` is an object on the leaderboard endpoint but a bare string on some
/// scoreboard variants.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ScoreField {
    Object {
        #[serde(rename = "displayValue", default)]
        display_value: Option<String>,
    },
    Text(String),
    Number(f64),
}

impl ScoreField {
    pub fn display_value(&self) -> Option<String> {
        match self {
            ScoreField::Object { display_value } => display_value.clone(),
            ScoreField::Text(s) => Some(s.clone()),
            ScoreField::Number(n) => Some(format_signed(*n as i64)),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLineScore {
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub value: Option<f64>,
    #[serde(rename = "displayValue", default)]
    pub display_value: Option<String>,
}

/// Render a to-par integer: `+3`, `-2`, `E`.
pub fn format_signed(total: i64) -> String {
    match total {
        t if t > 0 => format!("+{}", t),
        t if t < 0 => t.to_string(),
        _ => "E".to_string(),
    }
}

/// One round of a competitor's card.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RoundScore {
    pub strokes: Option<i32>,
    pub to_par_display: Option<String>,
}

impl From<&RawLineScore> for RoundScore {
    fn from(raw: &RawLineScore) -> Self {
        Self {
            strokes: raw
                .value
                .filter(|v| v.is_finite() && *v > 0.0)
                .map(|v| v.round() as i32),
            to_par_display: raw
                .display_value
                .as_ref()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty() && s != "--"),
        }
    }
}

/// A tournament competitor as read from one leaderboard refresh.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Competitor {
    pub name: String,
    pub id: String,
    /// Numeric position id when ESPN supplied one.
    pub position_id: Option<u32>,
    pub position: Position,
    pub position_display: String,
    pub round_scores: Vec<RoundScore>,
    pub status_state: Option<RoundState>,
    pub thru: Option<Thru>,
    pub tee_time: Option<String>,
    pub score_display: Option<String>,
    pub detail: Option<String>,
    pub period: Option<u32>,
    pub completed: bool,
}

impl Competitor {
    /// Build a competitor from the raw payload, defaulting anything missing.
    ///
    /// Returns `None` for entries without an athlete.
    pub fn from_raw(raw: &RawCompetitor) -> Option<Self> {
        let athlete = raw.athlete.as_ref()?;
        let status = raw.status.clone().unwrap_or_default();
        let position = status.position.clone().unwrap_or_default();
        let status_type = status.status_type.clone().unwrap_or_default();

        Some(Self {
            name: athlete
                .display_name
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            id: athlete.id.clone().unwrap_or_default(),
            position_id: position.id,
            position: Position::from_espn(position.id, position.display_name.as_deref()),
            position_display: position
                .display_name
                .clone()
                .unwrap_or_else(|| "-".to_string()),
            round_scores: raw.linescores.iter().map(RoundScore::from).collect(),
            status_state: status_type.state.as_deref().and_then(RoundState::from_espn),
            thru: status.thru,
            tee_time: status.tee_time.clone().filter(|t| !t.trim().is_empty()),
            score_display: raw.score.as_ref().and_then(ScoreField::display_value),
            detail: status.detail.clone(),
            period: status.period,
            completed: status_type.completed.unwrap_or(false),
        })
    }
}

/// The current event with its competitors.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Tournament {
    pub id: Option<String>,
    pub name: String,
    pub period: u32,
    pub completed: bool,
    pub competitors: Vec<Competitor>,
}

impl Tournament {
    /// Take `events[0].competitions[0]` from a leaderboard response.
    pub fn from_response(response: &LeaderboardResponse) -> Result<Self> {
        let event = response.events.first().ok_or(GolfError::NoEvent)?;
        let competition = event.competitions.first().cloned().unwrap_or_default();
        let status = competition.status.unwrap_or_default();

        Ok(Self {
            id: event.id.clone(),
            name: event
                .name
                .clone()
                .unwrap_or_else(|| "Tournament".to_string()),
            period: status.period.unwrap_or(1),
            completed: status
                .status_type
                .and_then(|t| t.completed)
                .unwrap_or(false),
            competitors: competition
                .competitors
                .iter()
                .filter_map(Competitor::from_raw)
                .collect(),
        })
    }

    /// `"Final"` once the event is complete, otherwise `"Round N"`.
    pub fn round_label(&self) -> String {
        if self.completed {
            "Final".to_string()
        } else {
            format!("Round {}", self.period)
        }
    }

    /// Competitors with a numeric position, leader first.
    pub fn sorted_by_position(&self) -> Vec<&Competitor> {
        let mut ranked: Vec<&Competitor> = self
            .competitors
            .iter()
            .filter(|c| c.position_id.is_some_and(|id| id > 0))
            .collect();
        ranked.sort_by_key(|c| c.position_id);
        ranked
    }

    /// Find a competitor by exact display name or, failing that, by
    /// normalized name.
    pub fn find(&self, name: &str) -> Option<&Competitor> {
        crate::core::names::find_by_name(&self.competitors, name, |c| c.name.as_str())
    }
}
