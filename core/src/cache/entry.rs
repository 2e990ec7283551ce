use std::time::{Duration, Instant};

/// One cache slot: the last known value, when the server last vouched for
/// it, and whether a write has since invalidated it.
///
/// Only `refresh` renews freshness. `patch` edits the value locally and
/// keeps whatever freshness the entry already had.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub data: T,
    fetched_at: Instant,
    invalidated: bool,
}

impl<T> CacheEntry<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            fetched_at: Instant::now(),
            invalidated: false,
        }
    }

    pub fn age(&self) -> Duration {
        self.fetched_at.elapsed()
    }

    /// Invalidated, or older than `stale_time`.
    pub fn is_stale(&self, stale_time: Duration) -> bool {
        self.invalidated || self.age() > stale_time
    }

    pub fn invalidate(&mut self) {
        self.invalidated = true;
    }

    /// Stores an authoritative value and starts a new freshness window.
    pub fn refresh(&mut self, data: T) {
        self.data = data;
        self.fetched_at = Instant::now();
        self.invalidated = false;
    }

    /// Replaces the value with a locally derived one. Age and invalidation
    /// are left alone.
    pub fn patch(&mut self, data: T) {
        self.data = data;
    }

    pub fn is_expired(&self, cache_time: Duration) -> bool {
        self.age() > cache_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn new_entry_is_fresh() {
        let entry = CacheEntry::new(42);
        assert_eq!(entry.data, 42);
        assert!(!entry.is_stale(Duration::from_secs(1)));
    }

    #[test]
    fn entry_goes_stale_after_stale_time() {
        let entry = CacheEntry::new(42);
        sleep(Duration::from_millis(10));
        assert!(entry.is_stale(Duration::from_millis(5)));
        assert!(!entry.is_stale(Duration::from_secs(60)));
    }

    #[test]
    fn invalidation_ignores_age() {
        let mut entry = CacheEntry::new(42);
        entry.invalidate();
        assert!(entry.is_stale(Duration::from_secs(60)));
    }

    #[test]
    fn refresh_clears_invalidation() {
        let mut entry = CacheEntry::new(42);
        entry.invalidate();
        entry.refresh(100);
        assert_eq!(entry.data, 100);
        assert!(!entry.is_stale(Duration::from_secs(60)));
    }

    #[test]
    fn patch_keeps_invalidation() {
        let mut entry = CacheEntry::new(42);
        entry.invalidate();
        entry.patch(100);
        assert_eq!(entry.data, 100);
        assert!(entry.is_stale(Duration::from_secs(60)));
    }

    #[test]
    fn patch_keeps_age() {
        let mut entry = CacheEntry::new(42);
        sleep(Duration::from_millis(10));
        entry.patch(100);
        assert!(entry.is_stale(Duration::from_millis(5)));
        assert!(entry.age() >= Duration::from_millis(10));
    }

    #[test]
    fn expires_after_cache_time() {
        let entry = CacheEntry::new(());
        assert!(!entry.is_expired(Duration::from_secs(60)));
        sleep(Duration::from_millis(10));
        assert!(entry.is_expired(Duration::from_millis(5)));
    }
}
