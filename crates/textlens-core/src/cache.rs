//! Time-bounded memo of full analyses, keyed by the exact input text.
//!
//! Editors tend to fire several identical analysis requests inside one
//! debounce window. The cache answers the repeats without recomputing:
//!
//! - Keys are the raw text, unnormalized. `"a"` and `"a "` are different keys.
//! - A hit younger than the TTL returns the stored [`Arc`] unchanged; the
//!   timestamp is not refreshed.
//! - A stale hit is a miss: the analysis is recomputed and the key overwritten.
//! - When an insert pushes the cache past capacity, one entry is evicted,
//!   chosen by [`EvictionPolicy`].
//!
//! The cache is single-owner (`&mut self`). Share it across threads by
//! wrapping it in a mutex.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::{self, AnalysisResult};
use crate::keywords::KeywordOptions;

/// How long a cached analysis stays fresh.
pub const DEFAULT_TTL: Duration = Duration::from_millis(5000);

/// Maximum number of cached texts.
pub const DEFAULT_CAPACITY: usize = 10;

/// Source of the current time.
pub trait Clock {
    /// The current instant.
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same time, so a test can keep one handle and give
/// another to the cache.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    elapsed_ms: Arc<AtomicU64>,
}

impl ManualClock {
    /// A clock frozen at its creation instant.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed_ms: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Move time forward.
    pub fn advance(&self, by: Duration) {
        let ms = u64::try_from(by.as_millis()).unwrap_or(u64::MAX);
        self.elapsed_ms.fetch_add(ms, Ordering::SeqCst);
    }

    /// Jump to `at` past the origin.
    pub fn set(&self, at: Duration) {
        let ms = u64::try_from(at.as_millis()).unwrap_or(u64::MAX);
        self.elapsed_ms.store(ms, Ordering::SeqCst);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + Duration::from_millis(self.elapsed_ms.load(Ordering::SeqCst))
    }
}

/// Which entry to drop when the cache is over capacity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum EvictionPolicy {
    /// Least recently used: hits refresh an entry's position.
    #[default]
    Lru,
    /// Insertion order: hits and stale overwrites keep the original position.
    Fifo,
}

impl EvictionPolicy {
    /// Returns the policy as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lru => "lru",
            Self::Fifo => "fifo",
        }
    }
}

/// A cached analysis and the instant it was computed.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedAnalysis {
    /// The analysis result.
    pub analysis: AnalysisResult,
    /// When `analysis` was computed.
    pub computed_at: Instant,
}

/// Hit, miss, and eviction counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CacheStats {
    /// Fresh entries served without recomputation.
    pub hits: u64,
    /// Lookups that had to compute (absent or stale).
    pub misses: u64,
    /// Entries dropped for capacity.
    pub evictions: u64,
}

#[derive(Debug)]
struct Slot {
    entry: Arc<CachedAnalysis>,
    inserted: u64,
    last_used: u64,
}

/// Memo of recent analyses.
#[derive(Debug)]
pub struct AnalysisCache<C: Clock = SystemClock> {
    entries: HashMap<String, Slot>,
    options: KeywordOptions,
    ttl: Duration,
    capacity: usize,
    eviction: EvictionPolicy,
    clock: C,
    tick: u64,
    stats: CacheStats,
}

impl AnalysisCache<SystemClock> {
    /// A cache using the wall clock and default TTL, capacity, and policy.
    pub fn new(options: KeywordOptions) -> Self {
        Self::with_clock(options, SystemClock)
    }
}

impl Default for AnalysisCache<SystemClock> {
    fn default() -> Self {
        Self::new(KeywordOptions::default())
    }
}

impl<C: Clock> AnalysisCache<C> {
    /// A cache reading time from `clock`.
    pub fn with_clock(options: KeywordOptions, clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            options,
            ttl: DEFAULT_TTL,
            capacity: DEFAULT_CAPACITY,
            eviction: EvictionPolicy::default(),
            clock,
            tick: 0,
            stats: CacheStats::default(),
        }
    }

    /// Set how long entries stay fresh.
    pub const fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the maximum number of entries.
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the eviction policy.
    pub const fn with_eviction(mut self, eviction: EvictionPolicy) -> Self {
        self.eviction = eviction;
        self
    }

    /// Return the cached analysis of `text`, computing it if absent or stale.
    #[tracing::instrument(skip(self, text), fields(text_len = text.len()))]
    pub fn get_or_compute(&mut self, text: &str) -> Arc<CachedAnalysis> {
        let now = self.clock.now();
        self.tick += 1;
        let tick = self.tick;

        if let Some(slot) = self.entries.get_mut(text) {
            if now.saturating_duration_since(slot.entry.computed_at) < self.ttl {
                slot.last_used = tick;
                self.stats.hits += 1;
                debug!("analysis cache hit");
                return Arc::clone(&slot.entry);
            }
            debug!("analysis cache entry stale");
        }

        self.stats.misses += 1;
        let entry = Arc::new(CachedAnalysis {
            analysis: engine::analyze(text, &self.options),
            computed_at: now,
        });

        if let Some(slot) = self.entries.get_mut(text) {
            // Overwrite in place; FIFO keeps the original insertion position.
            slot.entry = Arc::clone(&entry);
            slot.last_used = tick;
        } else {
            self.entries.insert(
                text.to_string(),
                Slot {
                    entry: Arc::clone(&entry),
                    inserted: tick,
                    last_used: tick,
                },
            );
            if self.entries.len() > self.capacity {
                self.evict_one();
            }
        }

        debug!(entries = self.entries.len(), "analysis cache miss");
        entry
    }

    /// Drop every entry older than the TTL. Returns how many were removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now();
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries
            .retain(|_, slot| now.saturating_duration_since(slot.entry.computed_at) < ttl);
        before - self.entries.len()
    }

    /// Remove all entries. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached texts, fresh or stale.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `text` has an entry, fresh or stale.
    pub fn contains(&self, text: &str) -> bool {
        self.entries.contains_key(text)
    }

    /// Hit, miss, and eviction counters since creation.
    pub const fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Keyword options applied to every analysis.
    pub const fn options(&self) -> &KeywordOptions {
        &self.options
    }

    /// Freshness window.
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Maximum number of entries.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Eviction policy.
    pub const fn eviction(&self) -> EvictionPolicy {
        self.eviction
    }

    fn evict_one(&mut self) {
        let policy = self.eviction;
        let victim = self
            .entries
            .iter()
            .min_by_key(|(_, slot)| match policy {
                EvictionPolicy::Lru => slot.last_used,
                EvictionPolicy::Fifo => slot.inserted,
            })
            .map(|(key, _)| key.clone());

        if let Some(key) = victim {
            self.entries.remove(&key);
            self.stats.evictions += 1;
            debug!(policy = policy.as_str(), "analysis cache eviction");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "Hello world. This is great!";

    fn cache(clock: &ManualClock) -> AnalysisCache<ManualClock> {
        AnalysisCache::with_clock(KeywordOptions::default(), clock.clone())
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn hit_within_ttl_returns_same_entry() {
        let clock = ManualClock::new();
        let mut cache = cache(&clock);

        let first = cache.get_or_compute(TEXT);
        clock.set(ms(4999));
        let second = cache.get_or_compute(TEXT);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.computed_at, second.computed_at);
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn stale_entry_recomputed_with_same_values() {
        let clock = ManualClock::new();
        let mut cache = cache(&clock);

        let first = cache.get_or_compute(TEXT);
        clock.set(ms(4999));
        let _ = cache.get_or_compute(TEXT);
        clock.set(ms(5001));
        let third = cache.get_or_compute(TEXT);

        assert!(!Arc::ptr_eq(&first, &third));
        assert!(third.computed_at > first.computed_at);
        assert_eq!(third.computed_at - first.computed_at, ms(5001));
        assert_eq!(first.analysis, third.analysis);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn exactly_ttl_is_stale() {
        let clock = ManualClock::new();
        let mut cache = cache(&clock);

        let first = cache.get_or_compute(TEXT);
        clock.set(ms(5000));
        let second = cache.get_or_compute(TEXT);
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn hits_do_not_refresh_timestamp() {
        let clock = ManualClock::new();
        let mut cache = cache(&clock);

        let first = cache.get_or_compute(TEXT);
        for t in [1000, 2000, 3000, 4000] {
            clock.set(ms(t));
            cache.get_or_compute(TEXT);
        }
        clock.set(ms(5500));
        let later = cache.get_or_compute(TEXT);
        assert!(!Arc::ptr_eq(&first, &later));
    }

    #[test]
    fn keys_are_exact_text() {
        let clock = ManualClock::new();
        let mut cache = cache(&clock);

        let a = cache.get_or_compute("same words");
        let b = cache.get_or_compute("same words ");
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn lru_evicts_least_recently_used() {
        let clock = ManualClock::new();
        let mut cache = cache(&clock).with_capacity(3);

        cache.get_or_compute("one");
        cache.get_or_compute("two");
        cache.get_or_compute("three");
        // Touch "one" so "two" becomes the oldest by use.
        cache.get_or_compute("one");
        cache.get_or_compute("four");

        assert_eq!(cache.len(), 3);
        assert!(cache.contains("one"));
        assert!(!cache.contains("two"));
        assert!(cache.contains("three"));
        assert!(cache.contains("four"));
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn fifo_evicts_first_inserted_even_after_hit() {
        let clock = ManualClock::new();
        let mut cache = cache(&clock)
            .with_capacity(3)
            .with_eviction(EvictionPolicy::Fifo);

        cache.get_or_compute("one");
        cache.get_or_compute("two");
        cache.get_or_compute("three");
        cache.get_or_compute("one");
        cache.get_or_compute("four");

        assert!(!cache.contains("one"));
        assert!(cache.contains("two"));
    }

    #[test]
    fn fifo_stale_overwrite_keeps_insertion_position() {
        let clock = ManualClock::new();
        let mut cache = cache(&clock)
            .with_capacity(2)
            .with_eviction(EvictionPolicy::Fifo);

        cache.get_or_compute("one");
        clock.set(ms(100));
        cache.get_or_compute("two");
        clock.set(ms(6000));
        // Stale: recomputed, but still first in insertion order.
        cache.get_or_compute("one");
        cache.get_or_compute("three");

        assert!(!cache.contains("one"));
        assert!(cache.contains("two"));
        assert!(cache.contains("three"));
    }

    #[test]
    fn default_capacity_is_ten() {
        let clock = ManualClock::new();
        let mut cache = cache(&clock);
        for i in 0..11 {
            cache.get_or_compute(&format!("text number {i}"));
        }
        assert_eq!(cache.len(), DEFAULT_CAPACITY);
        assert!(!cache.contains("text number 0"));
        assert!(cache.contains("text number 10"));
    }

    #[test]
    fn purge_expired_drops_stale_entries() {
        let clock = ManualClock::new();
        let mut cache = cache(&clock);

        cache.get_or_compute("old");
        clock.set(ms(3000));
        cache.get_or_compute("new");
        clock.set(ms(6000));

        assert_eq!(cache.purge_expired(), 1);
        assert!(!cache.contains("old"));
        assert!(cache.contains("new"));
    }

    #[test]
    fn custom_ttl() {
        let clock = ManualClock::new();
        let mut cache = cache(&clock).with_ttl(ms(100));

        let first = cache.get_or_compute(TEXT);
        clock.advance(ms(150));
        let second = cache.get_or_compute(TEXT);
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn clear_keeps_counters() {
        let clock = ManualClock::new();
        let mut cache = cache(&clock);
        cache.get_or_compute(TEXT);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn system_clock_cache_is_idempotent() {
        let mut cache: AnalysisCache = AnalysisCache::default();
        let a = cache.get_or_compute(TEXT);
        let b = cache.get_or_compute(TEXT);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.analysis, b.analysis);
        assert_eq!(a.analysis.statistics.word_count, 5);
    }
}
