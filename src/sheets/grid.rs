//! Spreadsheet grid cells as exported by the league's sheet endpoint.
//!
//! The export is a 2-D JSON array whose cells are strings, numbers, booleans,
//! `null`, or objects. Embedded portraits arrive as `{"valueType": "IMAGE"}`
//! objects; any other object carries nothing the parser uses.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One cell of the grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub enum Cell {
    Text(String),
    Number(f64),
    Bool(bool),
    Image,
    #[default]
    Empty,
}

static EMPTY: Cell = Cell::Empty;

impl Cell {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) if s.is_empty() => Cell::Empty,
            Value::String(s) => Cell::Text(s.clone()),
            Value::Number(n) => n.as_f64().map(Cell::Number).unwrap_or(Cell::Empty),
            Value::Bool(b) => Cell::Bool(*b),
            Value::Object(map) => match map.get("valueType").and_then(Value::as_str) {
                Some(kind) if kind.eq_ignore_ascii_case("IMAGE") => Cell::Image,
                _ => Cell::Empty,
            },
            Value::Null | Value::Array(_) => Cell::Empty,
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, Cell::Image)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// True for a text cell holding exactly `"-"`, the empty-slot marker.
    pub fn is_dash(&self) -> bool {
        self.as_text().is_some_and(|s| s.trim() == "-")
    }

    /// Render the cell as display text. Numbers drop a zero fraction
    /// (`3.0` → `"3"`); images and empty cells yield `None`.
    pub fn display(&self) -> Option<String> {
        match self {
            Cell::Text(s) => Some(s.clone()),
            Cell::Number(n) => Some(format_number(*n)),
            Cell::Bool(b) => Some(b.to_string()),
            Cell::Image | Cell::Empty => None,
        }
    }
}

pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Cell::from_value(&value))
    }
}

/// Row-major grid. Out-of-range lookups read as [`Cell::Empty`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Build from the JSON `data` array; a non-array row becomes an empty row.
    pub fn from_value(value: &Value) -> Self {
        let rows = value
            .as_array()
            .map(|rows| {
                rows.iter()
                    .map(|row| {
                        row.as_array()
                            .map(|cells| cells.iter().map(Cell::from_value).collect())
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self { rows }
    }

    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }

    pub fn has_row(&self, row: usize) -> bool {
        row < self.rows.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

impl<'de> Deserialize<'de> for Grid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Grid::from_value(&value))
    }
}
