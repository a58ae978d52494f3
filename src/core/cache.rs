//! Unified caching system for in-memory LRU cache and persistent file storage
//!
//! This module provides a two-tier payload cache:
//! - L1 Cache: In-memory LRU cache for fast access within one process
//! - L2 Cache: JSON files under `~/.cache/fantasy-golf` that survive restarts
//!
//! Every successful fetch writes through both tiers. When a later fetch fails
//! the last good payload is served from here instead.

use lru::LruCache;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    fs,
    hash::Hash,
    io::{Read, Write},
    num::NonZeroUsize,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
};

use crate::error::{GolfError, Result};

const CACHE_DIR_NAME: &str = "fantasy-golf";

/// Default cache root: `<platform cache dir>/fantasy-golf`.
pub fn default_cache_root() -> PathBuf {
    let base = dirs::cache_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".cache");
        home
    });
    base.join(CACHE_DIR_NAME)
}

/// Try to read a file into a String
pub fn try_read_to_string(path: &Path) -> Option<String> {
    let mut f = fs::File::open(path).ok()?;
    let mut s = String::new();

    f.read_to_string(&mut s).ok()?;

    Some(s)
}

/// Write a string to file
pub fn write_string(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut f = fs::File::create(path)?;
    f.write_all(contents.as_bytes())
}

/// Reduce arbitrary text (URLs, sheet names) to something safe in a filename.
fn slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    out.trim_matches('_').to_string()
}

/// Generic cache key that can be used for both memory and disk caching
pub trait CacheKey: Hash + Eq + Clone + Send + Sync {
    /// Generate a string representation for file system storage
    fn to_file_key(&self) -> String;

    /// Generate the file path for this cache entry under `root`
    fn to_file_path(&self, root: &Path) -> PathBuf {
        root.join(format!("{}.json", self.to_file_key()))
    }
}

/// Cache key for the ESPN leaderboard payload
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LeaderboardCacheKey {
    pub url: String,
}

impl CacheKey for LeaderboardCacheKey {
    fn to_file_key(&self) -> String {
        format!("leaderboard_{}", slug(&self.url))
    }
}

/// Cache key for the league spreadsheet grid
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SheetCacheKey {
    pub sheet_name: String,
}

impl CacheKey for SheetCacheKey {
    fn to_file_key(&self) -> String {
        format!("sheet_{}", slug(&self.sheet_name))
    }
}

/// Cache key for the rankings snapshot, identified by its file path or URL
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RankingsCacheKey {
    pub source: String,
}

impl CacheKey for RankingsCacheKey {
    fn to_file_key(&self) -> String {
        format!("rankings_{}", slug(&self.source))
    }
}

/// Unified cache that combines LRU memory cache with file system persistence
pub struct UnifiedCache<K, V>
where
    K: CacheKey,
    V: Clone + Serialize + for<'de> Deserialize<'de>,
{
    memory_cache: Arc<Mutex<LruCache<K, V>>>,
    memory_capacity: usize,
    root: PathBuf,
}

impl<K, V> UnifiedCache<K, V>
where
    K: CacheKey,
    V: Clone + Serialize + for<'de> Deserialize<'de>,
{
    /// Create a cache persisting under the default cache root
    pub fn new(memory_capacity: usize) -> Self {
        Self::with_root(memory_capacity, default_cache_root())
    }

    /// Create a cache persisting under `root`
    pub fn with_root(memory_capacity: usize, root: PathBuf) -> Self {
        let capacity = NonZeroUsize::new(memory_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            memory_cache: Arc::new(Mutex::new(LruCache::new(capacity))),
            memory_capacity: capacity.get(),
            root,
        }
    }

    fn memory(&self) -> MutexGuard<'_, LruCache<K, V>> {
        self.memory_cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Get an item from cache (checks memory first, then disk)
    pub fn get(&self, key: &K) -> Option<V> {
        if let Some(value) = self.memory().get(key) {
            return Some(value.clone());
        }

        let value = self.get_from_disk(key)?;
        self.memory().put(key.clone(), value.clone());
        Some(value)
    }

    /// Put an item into cache (stores in both memory and disk)
    pub fn put(&self, key: K, value: V) -> Result<()> {
        self.memory().put(key.clone(), value.clone());
        self.put_to_disk(&key, &value)
    }

    /// Get item from disk cache only
    fn get_from_disk(&self, key: &K) -> Option<V> {
        let path = key.to_file_path(&self.root);
        let content = try_read_to_string(&path)?;
        serde_json::from_str(&content).ok()
    }

    /// Put item to disk cache only
    fn put_to_disk(&self, key: &K, value: &V) -> Result<()> {
        let path = key.to_file_path(&self.root);
        let content = serde_json::to_string_pretty(value)?;
        write_string(&path, &content).map_err(|e| GolfError::Cache {
            message: format!("writing {}: {}", path.display(), e),
        })
    }

    /// Clear memory cache only (keeps disk cache)
    pub fn clear_memory(&self) {
        self.memory().clear();
    }

    /// Remove the disk entry for a key
    pub fn invalidate_disk_cache(&self, key: &K) -> std::io::Result<()> {
        let path = key.to_file_path(&self.root);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Get memory cache statistics
    pub fn memory_stats(&self) -> (usize, usize) {
        (self.memory().len(), self.memory_capacity)
    }
}

/// Payload caches for the three upstream sources
pub struct CacheManager {
    pub leaderboard: UnifiedCache<LeaderboardCacheKey, Value>,
    pub sheet: UnifiedCache<SheetCacheKey, Value>,
    pub rankings: UnifiedCache<RankingsCacheKey, Value>,
}

impl CacheManager {
    pub fn new() -> Self {
        Self::with_root(default_cache_root())
    }

    pub fn with_root(root: PathBuf) -> Self {
        Self {
            leaderboard: UnifiedCache::with_root(4, root.clone()),
            sheet: UnifiedCache::with_root(4, root.clone()),
            rankings: UnifiedCache::with_root(4, root),
        }
    }
}

impl Default for CacheManager {
    fn default() -> Self {
        Self::new()
    }
}
