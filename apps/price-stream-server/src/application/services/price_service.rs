//! Price Service
//!
//! Latest-price reads with a cache-aside strategy, and the write-through used
//! by the simulation tick.

use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::PriceCache;
use crate::domain::pricing::{PriceError, PriceStore, PriceUpdate, normalize_symbol};
use crate::infrastructure::metrics::{self, CacheOperation};

/// Default time-to-live of cached prices.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(600);

/// Cache-aside access to the latest price of each symbol.
pub struct PriceService {
    store: Arc<PriceStore>,
    cache: Arc<dyn PriceCache>,
    ttl: Duration,
}

impl std::fmt::Debug for PriceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriceService")
            .field("tracked_symbols", &self.store.len())
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl PriceService {
    /// Create a price service over a store and cache.
    #[must_use]
    pub fn new(store: Arc<PriceStore>, cache: Arc<dyn PriceCache>, ttl: Duration) -> Self {
        Self { store, cache, ttl }
    }

    /// The authoritative store.
    #[must_use]
    pub const fn store(&self) -> &Arc<PriceStore> {
        &self.store
    }

    /// Latest price for a symbol.
    ///
    /// Reads the cache first and returns a hit as-is, which may be slightly
    /// stale. A miss, a cache failure, or an undecodable entry falls back to
    /// the store.
    ///
    /// # Errors
    ///
    /// [`PriceError::EmptySymbol`] for a blank symbol, [`PriceError::NotFound`]
    /// if neither the cache nor the store has it.
    pub async fn get_current_price(&self, symbol: &str) -> Result<PriceUpdate, PriceError> {
        let symbol = normalize_symbol(symbol).ok_or(PriceError::EmptySymbol)?;

        match self.cache.read(&symbol).await {
            Ok(Some(update)) => {
                metrics::record_cache_hit();
                return Ok(update);
            }
            Ok(None) => metrics::record_cache_miss(),
            Err(e) => {
                metrics::record_cache_error(CacheOperation::Read);
                tracing::warn!(
                    symbol = %symbol,
                    error = %e,
                    "Cache read failed, using price store"
                );
            }
        }

        self.store.get(&symbol)
    }

    /// Best-effort write of `update` to the cache.
    ///
    /// Failures are logged and counted, never returned.
    pub async fn write_through(&self, update: &PriceUpdate) {
        if let Err(e) = self.cache.write(update, self.ttl).await {
            metrics::record_cache_error(CacheOperation::Write);
            tracing::warn!(symbol = %update.symbol, error = %e, "Cache write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{CacheError, MockPriceCache};

    fn store_with(symbol: &str, price: f64) -> Arc<PriceStore> {
        Arc::new(PriceStore::with_seeds(&[(symbol, price)]))
    }

    #[tokio::test]
    async fn cache_hit_is_returned_even_if_stale() {
        let store = store_with("AAPL", 175.50);
        let mut cache = MockPriceCache::new();
        cache
            .expect_read()
            .withf(|symbol| symbol == "AAPL")
            .times(1)
            .returning(|_| Ok(Some(PriceUpdate::opening("AAPL", 170.0, 1))));
        let service = PriceService::new(store, Arc::new(cache), DEFAULT_CACHE_TTL);

        let price = service.get_current_price("aapl").await.unwrap();

        assert_eq!(price.current_price, 170.0);
    }

    #[tokio::test]
    async fn cache_miss_falls_back_to_store() {
        let store = store_with("GOOGL", 140.25);
        let mut cache = MockPriceCache::new();
        cache.expect_read().returning(|_| Ok(None));
        let service = PriceService::new(store, Arc::new(cache), DEFAULT_CACHE_TTL);

        let price = service.get_current_price("GOOGL").await.unwrap();

        assert_eq!(price.current_price, 140.25);
    }

    #[tokio::test]
    async fn cache_failure_falls_back_to_store() {
        let store = store_with("GOOGL", 140.25);
        let mut cache = MockPriceCache::new();
        cache.expect_read().returning(|_| {
            Err(CacheError::Unavailable {
                message: "connection refused".to_string(),
            })
        });
        let service = PriceService::new(store, Arc::new(cache), DEFAULT_CACHE_TTL);

        let price = service.get_current_price("GOOGL").await.unwrap();

        assert_eq!(price.current_price, 140.25);
    }

    #[tokio::test]
    async fn undecodable_entry_falls_back_to_store() {
        let store = store_with("MSFT", 380.75);
        let mut cache = MockPriceCache::new();
        cache.expect_read().returning(|symbol| {
            Err(CacheError::Decode {
                key: crate::application::ports::cache_key(symbol),
                message: "expected value at line 1".to_string(),
            })
        });
        let service = PriceService::new(store, Arc::new(cache), DEFAULT_CACHE_TTL);

        let price = service.get_current_price("MSFT").await.unwrap();

        assert_eq!(price.current_price, 380.75);
    }

    #[tokio::test]
    async fn unknown_symbol_is_not_found() {
        let mut cache = MockPriceCache::new();
        cache.expect_read().returning(|_| Ok(None));
        let service = PriceService::new(
            Arc::new(PriceStore::new()),
            Arc::new(cache),
            DEFAULT_CACHE_TTL,
        );

        let err = service.get_current_price("ZZZZ").await.unwrap_err();

        assert_eq!(err, PriceError::NotFound("ZZZZ".to_string()));
    }

    #[tokio::test]
    async fn blank_symbol_is_rejected_without_cache_read() {
        let mut cache = MockPriceCache::new();
        cache.expect_read().never();
        let service = PriceService::new(
            Arc::new(PriceStore::new()),
            Arc::new(cache),
            DEFAULT_CACHE_TTL,
        );

        let err = service.get_current_price("  ").await.unwrap_err();

        assert_eq!(err, PriceError::EmptySymbol);
    }

    #[tokio::test]
    async fn write_through_uses_configured_ttl() {
        let mut cache = MockPriceCache::new();
        cache
            .expect_write()
            .withf(|update, ttl| update.symbol == "AAPL" && *ttl == Duration::from_secs(30))
            .times(1)
            .returning(|_, _| Ok(()));
        let service = PriceService::new(
            store_with("AAPL", 1.0),
            Arc::new(cache),
            Duration::from_secs(30),
        );

        service
            .write_through(&PriceUpdate::opening("AAPL", 1.0, 0))
            .await;
    }

    #[tokio::test]
    async fn write_through_swallows_failures() {
        let mut cache = MockPriceCache::new();
        cache.expect_write().times(1).returning(|_, _| {
            Err(CacheError::Unavailable {
                message: "timeout".to_string(),
            })
        });
        let service =
            PriceService::new(store_with("AAPL", 1.0), Arc::new(cache), DEFAULT_CACHE_TTL);

        service
            .write_through(&PriceUpdate::opening("AAPL", 1.0, 0))
            .await;
    }
}
