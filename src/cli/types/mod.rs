//! Type-safe wrappers and enums for fantasy golf data.

pub mod filters;
pub mod position;

pub use filters::{LeagueTag, RankingFeed, RankingStrategy};
pub use position::{Position, MISSED_CUT_SENTINEL};
