//! Fantasy Golf CLI Library
//!
//! Follows a live golf tournament and a fantasy league built on top of it:
//! the ESPN leaderboard, a rankings snapshot (world ranking, skill rating,
//! season points) and a league spreadsheet listing each fantasy team's
//! roster.
//!
//! ## Features
//!
//! - **Leaderboard**: cumulative score to par and a progress label per player
//! - **Rankings**: three feeds merged into a per-player directory, with a
//!   leaderboard-derived fallback
//! - **Roster Parsing**: team blocks read off the spreadsheet grid at
//!   configurable anchors
//! - **Team Standings**: teams ordered by their best active player (or the
//!   average live position)
//! - **Caching**: every payload is kept in memory and on disk so a failed
//!   fetch can serve the last good copy
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fantasy_golf::{
//!     commands::{common::CommandContext, teams::{handle_teams, TeamsParams}},
//!     core::Config,
//!     RankingStrategy,
//! };
//!
//! # async fn example() -> fantasy_golf::Result<()> {
//! let ctx = CommandContext::new(Config::from_env()?)?;
//! handle_teams(
//!     &ctx,
//!     TeamsParams {
//!         strategy: RankingStrategy::Best,
//!         ..TeamsParams::default()
//!     },
//! )
//! .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Point the team view at your league sheet:
//! ```bash
//! export FANTASY_GOLF_SHEET_URL=https://script.google.com/macros/s/.../exec
//! ```

pub mod cli;
pub mod commands;
pub mod core;
pub mod error;
pub mod espn;
pub mod rankings;
pub mod sheets;
pub mod state;
pub mod teams;

// Re-export commonly used types
pub use cli::types::{LeagueTag, Position, RankingFeed, RankingStrategy};
pub use error::{GolfError, Result};
pub use state::{AppState, RefreshPlan, Snapshot};
