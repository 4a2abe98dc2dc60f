//! Caching layer for departure board responses.
//!
//! Repeat queries for the same origin station inside a short window are
//! common (re-render, favourite re-check, quick re-submit). A short TTL
//! cache keyed by origin CRS bounds the load we put on the provider
//! without holding stale boards for long.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::board::{BoardError, DepartureSource, RawDeparture};
use crate::domain::Crs;

/// Cached board entry: the full record list for one origin station.
type BoardEntry = Arc<Vec<RawDeparture>>;

/// Configuration for the board cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 256,
        }
    }
}

/// Departure source with caching.
///
/// Wraps any `DepartureSource` and caches board responses per origin
/// station. Itself a `DepartureSource`, so the assembler doesn't know
/// whether it is talking to the cache or the live client.
pub struct CachedBoardClient<C> {
    source: C,
    boards: MokaCache<Crs, BoardEntry>,
}

impl<C: DepartureSource> CachedBoardClient<C> {
    /// Create a new cached source.
    pub fn new(source: C, config: &CacheConfig) -> Self {
        let boards = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { source, boards }
    }

    /// Fetch a board, using the cache if a fresh entry exists.
    pub async fn fetch_board(&self, station: &Crs) -> Result<Vec<RawDeparture>, BoardError> {
        if let Some(cached) = self.boards.get(station).await {
            debug!(station = %station, "departure board served from cache");
            return Ok((*cached).clone());
        }

        let departures = self.source.fetch_board(station).await?;

        self.boards
            .insert(*station, Arc::new(departures.clone()))
            .await;

        Ok(departures)
    }

    /// Access the underlying source for operations that bypass the cache.
    pub fn source(&self) -> &C {
        &self.source
    }

    /// Number of cached boards (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.boards.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.boards.invalidate_all();
    }
}

impl<C: DepartureSource> DepartureSource for CachedBoardClient<C> {
    async fn fetch_board(&self, station: &Crs) -> Result<Vec<RawDeparture>, BoardError> {
        CachedBoardClient::fetch_board(self, station).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Source that counts how many fetches reach it.
    struct CountingSource {
        calls: AtomicUsize,
    }

    impl CountingSource {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl DepartureSource for CountingSource {
        async fn fetch_board(&self, _station: &Crs) -> Result<Vec<RawDeparture>, BoardError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![RawDeparture::default()])
        }
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(60));
        assert_eq!(config.max_capacity, 256);
    }

    #[tokio::test]
    async fn second_fetch_is_served_from_cache() {
        let cached = CachedBoardClient::new(CountingSource::new(), &CacheConfig::default());
        let pad = Crs::parse("PAD").unwrap();

        let first = cached.fetch_board(&pad).await.unwrap();
        let second = cached.fetch_board(&pad).await.unwrap();

        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert_eq!(cached.source().calls(), 1);
    }

    #[tokio::test]
    async fn different_stations_fetch_separately() {
        let cached = CachedBoardClient::new(CountingSource::new(), &CacheConfig::default());

        cached.fetch_board(&Crs::parse("PAD").unwrap()).await.unwrap();
        cached.fetch_board(&Crs::parse("RDG").unwrap()).await.unwrap();

        assert_eq!(cached.source().calls(), 2);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        struct FailingSource;

        impl DepartureSource for FailingSource {
            async fn fetch_board(
                &self,
                _station: &Crs,
            ) -> Result<Vec<RawDeparture>, BoardError> {
                Err(BoardError::Upstream {
                    status: 503,
                    message: "unavailable".into(),
                })
            }
        }

        let cached = CachedBoardClient::new(FailingSource, &CacheConfig::default());
        let pad = Crs::parse("PAD").unwrap();

        assert!(cached.fetch_board(&pad).await.is_err());
        assert_eq!(cached.entry_count(), 0);
    }

    #[tokio::test]
    async fn invalidation_forces_refetch() {
        let cached = CachedBoardClient::new(CountingSource::new(), &CacheConfig::default());
        let pad = Crs::parse("PAD").unwrap();

        cached.fetch_board(&pad).await.unwrap();
        cached.invalidate_all();
        cached.fetch_board(&pad).await.unwrap();

        assert_eq!(cached.source().calls(), 2);
    }
}
