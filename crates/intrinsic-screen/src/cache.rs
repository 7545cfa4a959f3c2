//! Fundamentals cache.
//!
//! Records are keyed by `(ticker, as-of date)` where the as-of date is the UTC
//! day the record was fetched. An entry is served only while it is younger
//! than the configured time-to-live and the lookup happens on the same as-of
//! day. Nothing is evicted implicitly; callers decide when to
//! [`evict_expired`](FundamentalsCache::evict_expired),
//! [`invalidate`](FundamentalsCache::invalidate) or
//! [`clear`](FundamentalsCache::clear).
//!
//! The cache can be persisted as JSON so reruns of the screener skip tickers
//! fetched earlier the same day.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use intrinsic_traits::{
    Date, FundamentalRecord, FundamentalsSource, IntrinsicError, Result, Symbol,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Default time-to-live of a cached record.
pub const DEFAULT_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    symbol: Symbol,
    as_of: Date,
}

impl CacheKey {
    fn new(symbol: &str, at: DateTime<Utc>) -> Self {
        Self {
            symbol: symbol.to_uppercase(),
            as_of: at.date_naive(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    symbol: Symbol,
    as_of: Date,
    fetched_at: DateTime<Utc>,
    record: FundamentalRecord,
}

/// In-memory fundamentals cache with an explicit time-to-live.
#[derive(Debug, Clone)]
pub struct FundamentalsCache {
    entries: HashMap<CacheKey, CacheEntry>,
    ttl: Duration,
}

impl Default for FundamentalsCache {
    fn default() -> Self {
        Self::new(Duration::hours(DEFAULT_TTL_HOURS))
    }
}

impl FundamentalsCache {
    /// Create an empty cache whose entries live for `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// The configured time-to-live.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of stored entries, fresh or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_fresh(&self, entry: &CacheEntry, now: DateTime<Utc>) -> bool {
        now - entry.fetched_at < self.ttl
    }

    /// Look up the record for `symbol` as of `now`.
    #[must_use]
    pub fn get(&self, symbol: &str, now: DateTime<Utc>) -> Option<&FundamentalRecord> {
        self.entries
            .get(&CacheKey::new(symbol, now))
            .filter(|entry| self.is_fresh(entry, now))
            .map(|entry| &entry.record)
    }

    /// Store `record`, fetched at `now`.
    pub fn insert(&mut self, record: FundamentalRecord, now: DateTime<Utc>) {
        let key = CacheKey::new(&record.ticker, now);
        let entry = CacheEntry {
            symbol: key.symbol.clone(),
            as_of: key.as_of,
            fetched_at: now,
            record,
        };
        self.entries.insert(key, entry);
    }

    /// Drop every entry of `symbol`, whatever its as-of date. Returns how many went.
    pub fn invalidate(&mut self, symbol: &str) -> usize {
        let symbol = symbol.to_uppercase();
        let before = self.entries.len();
        self.entries.retain(|key, _| key.symbol != symbol);
        before - self.entries.len()
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drop entries past their time-to-live. Returns how many went.
    pub fn evict_expired(&mut self, now: DateTime<Utc>) -> usize {
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| now - entry.fetched_at < ttl);
        before - self.entries.len()
    }

    /// Load a cache previously written by [`save`](Self::save).
    ///
    /// A missing file yields an empty cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path, ttl: Duration) -> Result<Self> {
        let mut cache = Self::new(ttl);
        if !path.exists() {
            return Ok(cache);
        }

        let text = fs::read_to_string(path)?;
        let entries: Vec<CacheEntry> = serde_json::from_str(&text).map_err(|e| {
            IntrinsicError::Cache(format!("Failed to parse {}: {e}", path.display()))
        })?;
        for entry in entries {
            let key = CacheKey {
                symbol: entry.symbol.to_uppercase(),
                as_of: entry.as_of,
            };
            cache.entries.insert(key, entry);
        }

        debug!(path = %path.display(), entries = cache.len(), "loaded fundamentals cache");
        Ok(cache)
    }

    /// Write every entry to `path` as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut entries: Vec<&CacheEntry> = self.entries.values().collect();
        entries.sort_by(|a, b| (&a.symbol, a.as_of).cmp(&(&b.symbol, b.as_of)));
        let text = serde_json::to_string_pretty(&entries)?;
        fs::write(path, text)?;
        debug!(path = %path.display(), entries = entries.len(), "saved fundamentals cache");
        Ok(())
    }
}

/// Hit and miss counters of a [`CachedSource`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups served from the cache.
    pub hits: usize,
    /// Lookups forwarded to the wrapped source.
    pub misses: usize,
}

#[derive(Debug)]
struct CacheState {
    cache: FundamentalsCache,
    stats: CacheStats,
}

/// A [`FundamentalsSource`] that consults a [`FundamentalsCache`] first.
///
/// Only successful fetches are cached; errors always go back to the
/// wrapped source on the next lookup.
pub struct CachedSource<S> {
    inner: S,
    state: Mutex<CacheState>,
    clock: fn() -> DateTime<Utc>,
}

impl<S> std::fmt::Debug for CachedSource<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedSource")
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

impl<S: FundamentalsSource> CachedSource<S> {
    /// Wrap `inner` with `cache`.
    pub fn new(inner: S, cache: FundamentalsCache) -> Self {
        Self {
            inner,
            state: Mutex::new(CacheState {
                cache,
                stats: CacheStats::default(),
            }),
            clock: Utc::now,
        }
    }

    /// Replace the wall clock, for deterministic lookups.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }
}

impl<S> CachedSource<S> {
    fn lock(&self) -> std::sync::MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Counters since construction.
    pub fn stats(&self) -> CacheStats {
        self.lock().stats
    }

    /// Drop every cached entry of `symbol`.
    pub fn invalidate(&self, symbol: &str) -> usize {
        self.lock().cache.invalidate(symbol)
    }

    /// Drop everything.
    pub fn clear(&self) {
        self.lock().cache.clear();
    }

    /// A copy of the current cache contents.
    pub fn snapshot(&self) -> FundamentalsCache {
        self.lock().cache.clone()
    }

    /// Persist the cache to `path`, dropping expired entries first.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let now = (self.clock)();
        let mut state = self.lock();
        let evicted = state.cache.evict_expired(now);
        if evicted > 0 {
            info!(evicted, "evicted expired cache entries");
        }
        state.cache.save(path)
    }
}

#[async_trait]
impl<S: FundamentalsSource> FundamentalsSource for CachedSource<S> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn fetch(&self, symbol: &str) -> Result<FundamentalRecord> {
        let now = (self.clock)();
        {
            let mut state = self.lock();
            if let Some(record) = state.cache.get(symbol, now).cloned() {
                state.stats.hits += 1;
                debug!(symbol, "cache hit");
                return Ok(record);
            }
            state.stats.misses += 1;
        }

        let record = self.inner.fetch(symbol).await?;
        self.lock().cache.insert(record.clone(), now);
        Ok(record)
    }
}
