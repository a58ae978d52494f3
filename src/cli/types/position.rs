//! Tournament position types and utilities.

use crate::error::GolfError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Numeric rank used for anyone who cannot be placed on the leaderboard.
pub const MISSED_CUT_SENTINEL: u32 = 999;

/// A player's standing in a tournament.
///
/// ESPN and the league spreadsheet both describe positions as loose strings
/// (`"1"`, `"T6"`, `"MC"`, `"-"`). This enum is the closed set those strings
/// collapse into.
///
/// # Examples
///
/// ```rust
/// use fantasy_golf::Position;
///
/// let pos: Position = "T6".parse().unwrap();
/// assert_eq!(pos, Position::Ranked { place: 6, tied: true });
/// assert_eq!(pos.to_string(), "T6");
/// assert_eq!(Position::MissedCut.sort_key(), 999);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Position {
    /// On the leaderboard at `place` (1 = leader).
    Ranked { place: u32, tied: bool },
    /// Missed the cut, withdrew, was disqualified, or was not found at all.
    #[default]
    MissedCut,
    /// Known to the field but without a position yet.
    NotStarted,
}

impl Position {
    /// Build a position from ESPN's `status.position` pair.
    ///
    /// A missing or non-positive id means the player is off the leaderboard.
    pub fn from_espn(id: Option<u32>, display: Option<&str>) -> Self {
        match id {
            Some(place) if place > 0 && place < MISSED_CUT_SENTINEL => Position::Ranked {
                place,
                tied: display.is_some_and(|d| d.trim_start().starts_with('T')),
            },
            _ => Position::MissedCut,
        }
    }

    /// Pull the first run of digits out of a hand-typed position such as `"T23"`.
    ///
    /// Returns `None` when the text holds no digits (`"MC"`, `"-"`).
    pub fn from_declared(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed == "-" || trimmed.eq_ignore_ascii_case("MC") {
            return None;
        }
        let digits: String = trimmed
            .chars()
            .skip_while(|c| !c.is_ascii_digit())
            .take_while(|c| c.is_ascii_digit())
            .collect();
        let place = digits.parse::<u32>().ok().filter(|p| *p > 0)?;
        if place >= MISSED_CUT_SENTINEL {
            return Some(Position::MissedCut);
        }
        Some(Position::Ranked {
            place,
            tied: trimmed.starts_with('T') || trimmed.starts_with('t'),
        })
    }

    /// Ordering key: the place for ranked players, the sentinel otherwise.
    pub fn sort_key(&self) -> u32 {
        match self {
            Position::Ranked { place, .. } => *place,
            Position::MissedCut | Position::NotStarted => MISSED_CUT_SENTINEL,
        }
    }

    pub fn is_ranked(&self) -> bool {
        matches!(self, Position::Ranked { .. })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Ranked { place, tied: true } => write!(f, "T{}", place),
            Position::Ranked { place, tied: false } => write!(f, "{}", place),
            Position::MissedCut => write!(f, "MC"),
            Position::NotStarted => write!(f, "-"),
        }
    }
}

impl FromStr for Position {
    type Err = GolfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_uppercase().as_str() {
            "" | "-" | "--" => return Ok(Position::NotStarted),
            "MC" | "CUT" | "WD" | "DQ" | "MDF" => return Ok(Position::MissedCut),
            _ => {}
        }

        let (tied, digits) = match trimmed.strip_prefix(['T', 't']) {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        match digits.parse::<u32>() {
            Ok(place) if place > 0 && place < MISSED_CUT_SENTINEL => {
                Ok(Position::Ranked { place, tied })
            }
            Ok(place) if place >= MISSED_CUT_SENTINEL => Ok(Position::MissedCut),
            _ => Err(GolfError::InvalidPosition {
                position: s.to_string(),
            }),
        }
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_string_round_trip() {
        for text in ["1", "T6", "42", "T10", "MC", "-"] {
            let parsed: Position = text.parse().unwrap();
            assert_eq!(parsed.to_string(), text);
        }
    }

    #[test]
    fn test_position_from_str_aliases() {
        assert_eq!("CUT".parse::<Position>().unwrap(), Position::MissedCut);
        assert_eq!("wd".parse::<Position>().unwrap(), Position::MissedCut);
        assert_eq!("".parse::<Position>().unwrap(), Position::NotStarted);
        assert_eq!("999".parse::<Position>().unwrap(), Position::MissedCut);
        assert!("leader".parse::<Position>().is_err());
        assert!("0".parse::<Position>().is_err());
    }

    #[test]
    fn test_position_from_espn() {
        assert_eq!(
            Position::from_espn(Some(3), Some("T3")),
            Position::Ranked {
                place: 3,
                tied: true
            }
        );
        assert_eq!(
            Position::from_espn(Some(1), Some("1")),
            Position::Ranked {
                place: 1,
                tied: false
            }
        );
        assert_eq!(Position::from_espn(None, Some("MC")), Position::MissedCut);
        assert_eq!(Position::from_espn(Some(0), None), Position::MissedCut);
    }

    #[test]
    fn test_position_from_declared() {
        assert_eq!(
            Position::from_declared("T1"),
            Some(Position::Ranked {
                place: 1,
                tied: true
            })
        );
        assert_eq!(
            Position::from_declared("23"),
            Some(Position::Ranked {
                place: 23,
                tied: false
            })
        );
        assert_eq!(Position::from_declared("MC"), None);
        assert_eq!(Position::from_declared("-"), None);
        assert_eq!(Position::from_declared("n/a"), None);
    }

    #[test]
    fn test_position_sort_key() {
        assert_eq!(
            Position::Ranked {
                place: 7,
                tied: false
            }
            .sort_key(),
            7
        );
        assert_eq!(Position::MissedCut.sort_key(), MISSED_CUT_SENTINEL);
        assert_eq!(Position::NotStarted.sort_key(), MISSED_CUT_SENTINEL);
    }

    #[test]
    fn test_position_serializes_as_display_string() {
        let json = serde_json::to_value(Position::Ranked {
            place: 2,
            tied: true,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!("T2"));
    }
}
