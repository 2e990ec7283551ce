use std::time::Duration;

/// Freshness and retention windows for cached queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryConfig {
    /// How long data is served from the cache before a read refetches it.
    pub stale_time: Duration,

    /// How long an entry is kept before `collect_garbage` drops it.
    pub cache_time: Duration,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            stale_time: Duration::from_secs(60),
            cache_time: Duration::from_secs(5 * 60),
        }
    }
}

impl QueryConfig {
    #[must_use]
    pub const fn new(stale_time: Duration, cache_time: Duration) -> Self {
        Self {
            stale_time,
            cache_time,
        }
    }
}
