use super::clock::{Clock, SystemClock};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const DEFAULT_MAX_TRACKED: usize = 10_000;

/// Share of the store dropped in one pass when no entry has expired.
const EVICTION_BATCH_DIVISOR: usize = 10;

/// Fixed-window throttle: one admitted action per caller per window.
///
/// A suppressed call never extends the window. The store is bounded by
/// `max_tracked` once each `admit` returns; concurrent first-time callers
/// may overshoot it until their own admissions trim the store again. When
/// full, expired entries go first, then the oldest tenth of the store.
#[derive(Clone)]
pub struct RateLimiter<K = i64, C = SystemClock> {
    window_starts: Arc<DashMap<K, Instant>>,
    window: Duration,
    max_tracked: usize,
    clock: C,
}

impl<K> RateLimiter<K, SystemClock>
where
    K: Eq + Hash + Clone,
{
    pub fn new(window: Duration) -> Self {
        Self::with_clock(window, DEFAULT_MAX_TRACKED, SystemClock)
    }

    pub fn with_capacity(window: Duration, max_tracked: usize) -> Self {
        Self::with_clock(window, max_tracked, SystemClock)
    }
}

impl<K, C> RateLimiter<K, C>
where
    K: Eq + Hash + Clone,
    C: Clock,
{
    pub fn with_clock(window: Duration, max_tracked: usize, clock: C) -> Self {
        Self {
            window_starts: Arc::new(DashMap::new()),
            window,
            max_tracked: max_tracked.max(1),
            clock,
        }
    }

    /// Returns `true` and opens a new window if `caller` has no active one.
    ///
    /// The check and the write happen under the caller's entry lock, so two
    /// concurrent calls for the same caller cannot both be admitted.
    pub fn admit(&self, caller: K) -> bool {
        let now = self.clock.now();

        let is_new = !self.window_starts.contains_key(&caller);
        if is_new && self.window_starts.len() >= self.max_tracked {
            self.evict(now, self.max_tracked - 1, None);
        }

        let admitted = match self.window_starts.entry(caller.clone()) {
            Entry::Occupied(mut entry) => {
                if self.is_active(*entry.get(), now) {
                    return false;
                }
                entry.insert(now);
                true
            }
            Entry::Vacant(entry) => {
                entry.insert(now);
                true
            }
        };

        if self.window_starts.len() > self.max_tracked {
            self.evict(now, self.max_tracked, Some(&caller));
        }
        admitted
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn tracked(&self) -> usize {
        self.window_starts.len()
    }

    fn is_active(&self, started: Instant, now: Instant) -> bool {
        now.saturating_duration_since(started) < self.window
    }

    /// Drops expired entries, then the oldest ones in batches, until at most
    /// `limit` remain. `keep` is never evicted.
    fn evict(&self, now: Instant, limit: usize, keep: Option<&K>) {
        self.window_starts
            .retain(|_, started| self.is_active(*started, now));

        let len = self.window_starts.len();
        if len > limit {
            let mut candidates: Vec<(K, Instant)> = self
                .window_starts
                .iter()
                .filter(|entry| keep != Some(entry.key()))
                .map(|entry| (entry.key().clone(), *entry.value()))
                .collect();

            let batch = (len - limit)
                .max(self.max_tracked / EVICTION_BATCH_DIVISOR)
                .min(candidates.len());
            if batch < candidates.len() {
                candidates.select_nth_unstable_by_key(batch, |(_, started)| *started);
            }

            for (key, _) in candidates.into_iter().take(batch) {
                self.window_starts.remove(&key);
            }
        }

        tracing::debug!(tracked = self.window_starts.len(), "Throttle store evicted entries");
    }
}
