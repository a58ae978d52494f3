//! Application state and refresh coordination.
//!
//! Each refresh fetches the requested sources concurrently, builds a fresh
//! [`Snapshot`] and swaps it in whole. Readers hold an `Arc<Snapshot>` that
//! never changes underneath them. A refresh requested while another is in
//! flight waits for it and returns its result instead of fetching again.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::cli::types::RankingStrategy;
use crate::core::cache::{
    CacheKey, CacheManager, LeaderboardCacheKey, RankingsCacheKey, SheetCacheKey, UnifiedCache,
};
use crate::core::config::{Config, RankingsSource};
use crate::error::{GolfError, Result};
use crate::espn::{http as espn_http, positions::LivePositionMap, types::Tournament};
use crate::rankings::{self, PlayerDirectory, RankingsSnapshot};
use crate::sheets::{http as sheets_http, layout::SheetLayout, roster, TeamRoster};
use crate::teams::{compose_standings, TeamStanding};

/// Lifecycle of one upstream source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceStatus {
    #[default]
    Idle,
    Fetching,
    Ready,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Leaderboard,
    Rankings,
    Sheet,
}

/// Outcome of one source in one refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceReport {
    pub status: SourceStatus,
    /// Data was served from the payload cache after a failed fetch.
    pub from_cache: bool,
    pub error: Option<String>,
}

impl SourceReport {
    fn ready(from_cache: bool) -> Self {
        Self {
            status: SourceStatus::Ready,
            from_cache,
            error: None,
        }
    }

    fn failed(error: &GolfError) -> Self {
        Self {
            status: SourceStatus::Failed,
            from_cache: false,
            error: Some(error.to_string()),
        }
    }
}

/// Which sources a refresh should load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshPlan {
    pub leaderboard: bool,
    pub rankings: bool,
    pub sheet: bool,
    pub strategy: RankingStrategy,
}

impl RefreshPlan {
    pub fn leaderboard() -> Self {
        Self {
            leaderboard: true,
            rankings: false,
            sheet: false,
            strategy: RankingStrategy::default(),
        }
    }

    pub fn rankings() -> Self {
        Self {
            rankings: true,
            ..Self::leaderboard()
        }
    }

    pub fn teams(strategy: RankingStrategy) -> Self {
        Self {
            leaderboard: true,
            rankings: false,
            sheet: true,
            strategy,
        }
    }

    pub fn all(strategy: RankingStrategy) -> Self {
        Self {
            leaderboard: true,
            rankings: true,
            sheet: true,
            strategy,
        }
    }
}

/// Everything one refresh produced. Read-only once published.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub generation: u64,
    pub refreshed_at: Option<DateTime<Utc>>,
    pub tournament: Option<Tournament>,
    pub live: LivePositionMap,
    pub rankings: Option<RankingsSnapshot>,
    pub directory: PlayerDirectory,
    pub rosters: Vec<TeamRoster>,
    pub standings: Vec<TeamStanding>,
    pub leaderboard_report: SourceReport,
    pub rankings_report: SourceReport,
    pub sheet_report: SourceReport,
}

#[derive(Debug, Default)]
struct Statuses {
    leaderboard: SourceStatus,
    rankings: SourceStatus,
    sheet: SourceStatus,
}

impl Statuses {
    fn slot(&mut self, source: Source) -> &mut SourceStatus {
        match source {
            Source::Leaderboard => &mut self.leaderboard,
            Source::Rankings => &mut self.rankings,
            Source::Sheet => &mut self.sheet,
        }
    }
}

pub struct AppState {
    client: Client,
    config: Config,
    cache: CacheManager,
    layout: SheetLayout,
    current: RwLock<Arc<Snapshot>>,
    generation: AtomicU64,
    refresh_lock: tokio::sync::Mutex<()>,
    statuses: Mutex<Statuses>,
}

/// Fetch through the payload cache: write through on success, fall back to
/// the cached copy on failure. Offline mode reads the cache only.
async fn load_through_cache<K, F>(
    cache: &UnifiedCache<K, Value>,
    key: K,
    offline: bool,
    fetch: F,
) -> Result<(Value, bool)>
where
    K: CacheKey,
    F: Future<Output = Result<Value>>,
{
    if offline {
        return cache
            .get(&key)
            .map(|v| (v, true))
            .ok_or_else(|| GolfError::Cache {
                message: format!("no cached copy of {}", key.to_file_key()),
            });
    }

    match fetch.await {
        Ok(payload) => {
            if let Err(e) = cache.put(key, payload.clone()) {
                warn!(error = %e, "could not write payload cache");
            }
            Ok((payload, false))
        }
        Err(e) => match cache.get(&key) {
            Some(cached) => {
                warn!(error = %e, "fetch failed, serving cached payload");
                Ok((cached, true))
            }
            None => Err(e),
        },
    }
}

impl AppState {
    pub fn new(client: Client, config: Config, cache: CacheManager, layout: SheetLayout) -> Self {
        Self {
            client,
            config,
            cache,
            layout,
            current: RwLock::new(Arc::new(Snapshot::default())),
            generation: AtomicU64::new(0),
            refresh_lock: tokio::sync::Mutex::new(()),
            statuses: Mutex::new(Statuses::default()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The last published snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn status(&self, source: Source) -> SourceStatus {
        *self.statuses().slot(source)
    }

    fn statuses(&self) -> MutexGuard<'_, Statuses> {
        self.statuses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn set_status(&self, source: Source, status: SourceStatus) {
        *self.statuses().slot(source) = status;
    }

    /// Refresh the sources in `plan` and publish a new snapshot.
    ///
    /// Callers arriving while a refresh runs get that refresh's snapshot.
    pub async fn refresh(&self, plan: RefreshPlan) -> Arc<Snapshot> {
        let seen = self.generation.load(Ordering::Acquire);
        let _guard = self.refresh_lock.lock().await;
        if self.generation.load(Ordering::Acquire) != seen {
            debug!("joined in-flight refresh");
            return self.snapshot();
        }

        let generation = seen + 1;
        info!(generation, "refreshing");
        let snapshot = Arc::new(self.build_snapshot(plan, generation).await);

        *self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = snapshot.clone();
        self.generation.store(generation, Ordering::Release);
        snapshot
    }

    async fn build_snapshot(&self, plan: RefreshPlan, generation: u64) -> Snapshot {
        let (leaderboard, rankings, sheet) = tokio::join!(
            async {
                if plan.leaderboard {
                    Some(self.load_tournament().await)
                } else {
                    None
                }
            },
            async {
                if plan.rankings {
                    Some(self.load_rankings().await)
                } else {
                    None
                }
            },
            async {
                if plan.sheet {
                    Some(self.load_rosters().await)
                } else {
                    None
                }
            },
        );

        let mut snapshot = Snapshot {
            generation,
            refreshed_at: Some(Utc::now()),
            ..Snapshot::default()
        };

        match leaderboard {
            Some(Ok((tournament, from_cache))) => {
                snapshot.live =
                    LivePositionMap::from_tournament(&tournament, &self.config.display_offset);
                snapshot.tournament = Some(tournament);
                snapshot.leaderboard_report = SourceReport::ready(from_cache);
            }
            Some(Err(e)) => {
                warn!(error = %e, "leaderboard unavailable");
                snapshot.leaderboard_report = SourceReport::failed(&e);
            }
            None => {}
        }

        match rankings {
            Some(Ok((ranking_snapshot, from_cache))) => {
                snapshot.directory = PlayerDirectory::from_snapshot(&ranking_snapshot);
                snapshot.rankings = Some(ranking_snapshot);
                snapshot.rankings_report = SourceReport::ready(from_cache);
            }
            Some(Err(e)) => {
                warn!(error = %e, "rankings snapshot unavailable");
                snapshot.rankings_report = SourceReport::failed(&e);
                if let Some(tournament) = &snapshot.tournament {
                    info!("using leaderboard-derived rankings");
                    snapshot.rankings = Some(RankingsSnapshot::from_leaderboard(tournament));
                }
            }
            None => {}
        }

        match sheet {
            Some(Ok((rosters, from_cache))) => {
                snapshot.standings = compose_standings(&rosters, &snapshot.live, plan.strategy);
                snapshot.rosters = rosters;
                snapshot.sheet_report = SourceReport::ready(from_cache);
            }
            Some(Err(e)) => {
                warn!(error = %e, "league sheet unavailable");
                snapshot.sheet_report = SourceReport::failed(&e);
            }
            None => {}
        }

        snapshot
    }

    async fn tracked<T, F>(&self, source: Source, work: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        self.set_status(source, SourceStatus::Fetching);
        let result = work.await;
        self.set_status(
            source,
            match result {
                Ok(_) => SourceStatus::Ready,
                Err(_) => SourceStatus::Failed,
            },
        );
        result
    }

    async fn load_tournament(&self) -> Result<(Tournament, bool)> {
        self.tracked(Source::Leaderboard, async {
            let url = &self.config.leaderboard_url;
            let key = LeaderboardCacheKey { url: url.clone() };
            let (payload, from_cache) = load_through_cache(
                &self.cache.leaderboard,
                key,
                self.config.offline,
                espn_http::get_leaderboard(&self.client, url),
            )
            .await?;
            Ok((espn_http::parse_tournament(payload)?, from_cache))
        })
        .await
    }

    async fn load_rankings(&self) -> Result<(RankingsSnapshot, bool)> {
        self.tracked(Source::Rankings, async {
            let source = &self.config.rankings;
            let key = RankingsCacheKey {
                source: match source {
                    RankingsSource::File(path) => path.display().to_string(),
                    RankingsSource::Url(url) => url.clone(),
                },
            };
            let (payload, from_cache) = load_through_cache(
                &self.cache.rankings,
                key,
                self.config.offline,
                rankings::get_rankings(&self.client, source),
            )
            .await?;
            Ok((RankingsSnapshot::from_value(payload)?, from_cache))
        })
        .await
    }

    async fn load_rosters(&self) -> Result<(Vec<TeamRoster>, bool)> {
        self.tracked(Source::Sheet, async {
            let sheet_name = self
                .layout
                .sheet
                .clone()
                .unwrap_or_else(|| self.config.sheet_name.clone());
            let key = SheetCacheKey {
                sheet_name: sheet_name.clone(),
            };
            let url = self.config.require_sheet_url()?;
            let (payload, from_cache) = load_through_cache(
                &self.cache.sheet,
                key,
                self.config.offline,
                sheets_http::get_sheet(&self.client, url, &sheet_name),
            )
            .await?;
            let sheet = sheets_http::parse_sheet(payload)?;
            Ok((roster::parse_rosters(&sheet.grid, &self.layout), from_cache))
        })
        .await
    }
}
