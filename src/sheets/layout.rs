//! Where teams sit on the league sheet.
//!
//! A layout names each team block's top-left anchor plus the handful of
//! knobs the roster parser needs. The season's layout is compiled in; a JSON
//! file can replace it when the sheet is rearranged.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GolfError, Result};

/// Top-left cell of a team block (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Anchor {
    pub row: usize,
    pub col: usize,
}

impl Anchor {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

const DEFAULT_ANCHORS: [(usize, usize); 14] = [
    (1, 6),
    (1, 11),
    (12, 1),
    (12, 6),
    (12, 11),
    (12, 16),
    (23, 1),
    (23, 6),
    (23, 11),
    (23, 16),
    (34, 1),
    (34, 6),
    (34, 11),
    (34, 16),
];

const DEFAULT_TEAM_MARKERS: [&str; 4] = ["Team", "SZN", "Co.", "Revenge"];

pub const DEFAULT_SLOT_ROWS: usize = 9;

fn default_slot_rows() -> usize {
    DEFAULT_SLOT_ROWS
}

fn default_team_markers() -> Vec<String> {
    DEFAULT_TEAM_MARKERS.iter().map(|m| m.to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetLayout {
    /// Sheet tab this layout describes, when it differs from the configured one.
    #[serde(default)]
    pub sheet: Option<String>,
    pub anchors: Vec<Anchor>,
    /// Substrings that mark a cell as the next team's name.
    #[serde(default = "default_team_markers")]
    pub team_markers: Vec<String>,
    /// Roster rows scanned below each anchor.
    #[serde(default = "default_slot_rows")]
    pub slot_rows: usize,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            sheet: None,
            anchors: DEFAULT_ANCHORS
                .iter()
                .map(|&(row, col)| Anchor::new(row, col))
                .collect(),
            team_markers: default_team_markers(),
            slot_rows: DEFAULT_SLOT_ROWS,
        }
    }
}

impl SheetLayout {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let layout: SheetLayout =
            serde_json::from_str(json).map_err(|e| GolfError::InvalidLayout {
                message: e.to_string(),
            })?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Load `path` when given, otherwise the compiled-in layout.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.anchors.is_empty() {
            return Err(GolfError::InvalidLayout {
                message: "layout has no anchors".to_string(),
            });
        }
        if self.slot_rows == 0 {
            return Err(GolfError::InvalidLayout {
                message: "slot_rows must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
