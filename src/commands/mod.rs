//! Command implementations for the fantasy golf CLI

pub mod common;
pub mod leaderboard;
pub mod player;
pub mod rankings;
pub mod teams;
pub mod watch;
