//! Shared setup and output helpers for the command handlers.

use chrono::FixedOffset;
use serde::Serialize;

use crate::{
    core::{cache::CacheManager, config::Config, http::build_client},
    sheets::layout::SheetLayout,
    state::{AppState, SourceReport, SourceStatus},
    Result,
};

/// Resources every command needs: configuration, the HTTP client, the
/// payload caches and the loaded sheet layout, all owned by [`AppState`].
pub struct CommandContext {
    pub state: AppState,
}

impl CommandContext {
    /// Build the context with the default on-disk cache location.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_cache(config, CacheManager::new())
    }

    pub fn with_cache(config: Config, cache: CacheManager) -> Result<Self> {
        let layout = SheetLayout::load_or_default(config.layout_path.as_deref())?;
        let client = build_client()?;
        Ok(Self {
            state: AppState::new(client, config, cache, layout),
        })
    }

    pub fn config(&self) -> &Config {
        self.state.config()
    }

    pub fn display_offset(&self) -> &FixedOffset {
        &self.state.config().display_offset
    }
}

/// One-line status for a source after a refresh, or `None` if it was not
/// requested.
pub fn source_message(label: &str, report: &SourceReport) -> Option<String> {
    match report.status {
        SourceStatus::Ready if report.from_cache => {
            Some(format!("✓ {} loaded (from cache)", label))
        }
        SourceStatus::Ready => Some(format!("✓ {} loaded", label)),
        SourceStatus::Failed => Some(format!(
            "⚠ Could not load {}: {}",
            label.to_lowercase(),
            report.error.as_deref().unwrap_or("unknown error")
        )),
        SourceStatus::Idle | SourceStatus::Fetching => None,
    }
}

pub fn print_source(label: &str, report: &SourceReport) {
    if let Some(message) = source_message(label, report) {
        println!("{}", message);
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Keep at most `limit` items when a limit is set.
pub fn apply_limit<T>(mut items: Vec<T>, limit: Option<usize>) -> Vec<T> {
    if let Some(limit) = limit {
        items.truncate(limit);
    }
    items
}
