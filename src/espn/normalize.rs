//! Score and progress normalization for leaderboard competitors.
//!
//! Turns one [`Competitor`] into the pair shown on every leaderboard row: a
//! cumulative to-par string (`"-7"`, `"E"`, `"+2"`) and a progress label
//! (`"(12)"`, `"(F)"`, `"(1:45 PM)"`, `"(Scheduled)"`). Nothing here fails;
//! malformed input degrades to a default label.

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDateTime, Timelike};
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use super::types::{format_signed, Competitor, RoundState, Thru};


static DETAIL_SCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[+-]?\d+|E").expect("detail score pattern is valid"));

/// Normalized leaderboard cell for one competitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedScore {
    pub to_par: String,
    pub progress: String,
}

impl fmt::Display for NormalizedScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.to_par, self.progress)
    }
}

/// Parse a leading signed integer the way a lenient reader would: `"+3"`,
/// `"-2"`, `"4"`, `"3 (through 9)"`.
fn leading_int(text: &str) -> Option<i64> {
    let text = text.trim();
    let (sign, rest) = match text.as_bytes().first()? {
        b'+' => (1, &text[1..]),
        b'-' => (-1, &text[1..]),
        _ => (1, text),
    };
    let digits: &str = &rest[..rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len())];
    digits.parse::<i64>().ok().map(|n| sign * n)
}

/// Parse one round's to-par display.
///
/// `"E"` is even par and still counts as a score; anything unparsable is
/// `None`.
pub fn parse_round_to_par(display: &str) -> Option<i64> {
    let display = display.trim();
    if display.eq_ignore_ascii_case("E") {
        return Some(0);
    }
    leading_int(display)
}

/// Cumulative to-par across rounds, with the aggregate and status-detail
/// fallbacks when no round carries a usable value.
pub fn cumulative_to_par(competitor: &Competitor) -> String {
    let mut total = 0i64;
    let mut has_score = false;

    for round in &competitor.round_scores {
        if let Some(n) = round.to_par_display.as_deref().and_then(parse_round_to_par) {
            total = total.saturating_add(n);
            has_score = true;
        }
    }

    if has_score {
        return format_signed(total);
    }

    let mut score = competitor
        .score_display
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("E")
        .to_string();

    if score == "E" {
        if let Some(found) = competitor
            .detail
            .as_deref()
            .and_then(|d| DETAIL_SCORE.find(d))
        {
            score = found.as_str().to_string();
        }
    }

    score
}

/// Render a tee time as `h:mm AM` / `h:mm PM`.
///
/// Timestamps with an offset (or `Z`) are converted into `display_offset`;
/// timestamps without one are rendered as the clock time written.
pub fn format_tee_time(raw: &str, display_offset: &FixedOffset) -> Option<String> {
    let raw = raw.trim();
    let (is_pm, hour, minute) = match parse_zoned(raw) {
        Some(dt) => {
            let local = dt.with_timezone(display_offset);
            let (pm, h) = local.hour12();
            (pm, h, local.minute())
        }
        None => {
            let naive = parse_naive(raw)?;
            let (pm, h) = naive.hour12();
            (pm, h, naive.minute())
        }
    };
    Some(format!(
        "{}:{:02} {}",
        hour,
        minute,
        if is_pm { "PM" } else { "AM" }
    ))
}

fn parse_zoned(raw: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }
    // ESPN often omits seconds: `2024-04-11T13:48Z`
    let with_offset = match raw.strip_suffix('Z').or_else(|| raw.strip_suffix('z')) {
        Some(stripped) => format!("{}+00:00", stripped),
        None => raw.to_string(),
    };
    ["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M:%S%:z", "%Y-%m-%dT%H:%M:%S%.f%:z"]
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(&with_offset, fmt).ok())
}

fn parse_naive(raw: &str) -> Option<NaiveDateTime> {
    [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ]
    .iter()
    .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Progress label for a competitor.
pub fn progress_label(competitor: &Competitor, display_offset: &FixedOffset) -> String {
    let thru_zero = matches!(competitor.thru, Some(Thru::Holes(0)));
    let is_pre = competitor.status_state == Some(RoundState::Pre);

    if is_pre || (thru_zero && competitor.tee_time.is_some()) {
        return match competitor.tee_time.as_deref() {
            Some(raw) => match format_tee_time(raw, display_offset) {
                Some(time) => format!("({})", time),
                None => {
                    debug!(player = %competitor.name, tee_time = raw, "unparsable tee time");
                    "(Scheduled)".to_string()
                }
            },
            None => "(Scheduled)".to_string(),
        };
    }

    if let Some(holes) = competitor.thru.as_ref().and_then(Thru::partial_holes) {
        return format!("({})", holes);
    }

    "(F)".to_string()
}

/// Normalize one competitor for display.
pub fn normalize(competitor: &Competitor, display_offset: &FixedOffset) -> NormalizedScore {
    NormalizedScore {
        to_par: cumulative_to_par(competitor),
        progress: progress_label(competitor, display_offset),
    }
}

/// One line of a player's per-round breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RoundLine {
    /// Upcoming round for a player who has not teed off yet.
    Scheduled { round: usize, tee_time: Option<String> },
    /// Round in progress.
    InProgress {
        round: usize,
        strokes: i32,
        to_par: String,
        thru: u32,
    },
    Finished {
        round: usize,
        strokes: i32,
        to_par: String,
    },
}

impl fmt::Display for RoundLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundLine::Scheduled {
                round,
                tee_time: Some(t),
            } => write!(f, "Round {}: Scheduled - Tee time {}", round, t),
            RoundLine::Scheduled {
                round,
                tee_time: None,
            } => write!(f, "Round {}: Scheduled", round),
            RoundLine::InProgress {
                round,
                strokes,
                to_par,
                thru,
            } => write!(
                f,
                "Round {}: {} strokes ({}) - Thru {}",
                round, strokes, to_par, thru
            ),
            RoundLine::Finished {
                round,
                strokes,
                to_par,
            } => write!(f, "Round {}: {} strokes ({}) - F", round, strokes, to_par),
        }
    }
}

/// Per-round breakdown plus tournament totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundBreakdown {
    pub rounds: Vec<RoundLine>,
    pub total_strokes: i32,
    pub total_to_par: String,
}

/// Build the round-by-round view of a competitor's card.
///
/// Rounds without strokes are skipped, except the current period while the
/// player has not started, which shows as scheduled. The last round with
/// strokes is in progress while `thru` is a partial hole count.
pub fn round_breakdown(competitor: &Competitor, display_offset: &FixedOffset) -> RoundBreakdown {
    let current_period = competitor.period.unwrap_or(1) as usize;
    let is_pre = competitor.status_state == Some(RoundState::Pre);
    let partial = competitor.thru.as_ref().and_then(Thru::partial_holes);
    let last_with_data = competitor
        .round_scores
        .iter()
        .rposition(|r| r.strokes.is_some());

    let mut rounds = Vec::new();
    let mut total_strokes = 0i32;
    let mut total_to_par = 0i64;

    for (index, round) in competitor.round_scores.iter().enumerate() {
        let number = index + 1;
        let Some(strokes) = round.strokes else {
            if number == current_period && is_pre {
                rounds.push(RoundLine::Scheduled {
                    round: number,
                    tee_time: competitor
                        .tee_time
                        .as_deref()
                        .and_then(|t| format_tee_time(t, display_offset)),
                });
            }
            continue;
        };

        let to_par = round
            .to_par_display
            .clone()
            .unwrap_or_else(|| "E".to_string());
        total_strokes = total_strokes.saturating_add(strokes);
        total_to_par = total_to_par.saturating_add(parse_round_to_par(&to_par).unwrap_or(0));

        match partial {
            Some(thru) if Some(index) == last_with_data => rounds.push(RoundLine::InProgress {
                round: number,
                strokes,
                to_par,
                thru,
            }),
            _ => rounds.push(RoundLine::Finished {
                round: number,
                strokes,
                to_par,
            }),
        }
    }

    RoundBreakdown {
        rounds,
        total_strokes,
        total_to_par: format_signed(total_to_par),
    }
}
