//! Core utilities for the fantasy golf CLI
//!
//! This module consolidates common utilities that are used across
//! the application:
//! - `cache`: two-tier payload cache
//! - `config`: environment-driven configuration
//! - `http`: shared client construction
//! - `names`: player name normalization and matching

pub mod cache;
pub mod config;
pub mod http;
pub mod names;

// Re-export commonly used items for convenience
pub use cache::{try_read_to_string, write_string, CacheManager};
pub use config::{Config, RankingsSource};
pub use names::{find_by_name, matches_search, normalize};
