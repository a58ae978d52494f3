//! League spreadsheet: client, grid model, layout and roster parser.

pub mod grid;
pub mod http;
pub mod layout;
pub mod roster;

pub use grid::{Cell, Grid};
pub use layout::{Anchor, SheetLayout};
pub use roster::{parse_rosters, RosterSlot, TeamRoster};
