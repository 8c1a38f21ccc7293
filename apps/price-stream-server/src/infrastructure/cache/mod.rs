//! Latest-Price Cache Adapter
//!
//! In-process TTL cache implementing [`PriceCache`]. Values are stored as
//! JSON under `price:{SYMBOL}` keys, each with the TTL given at write time.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;

use crate::application::ports::{CacheError, PriceCache, cache_key};
use crate::domain::pricing::PriceUpdate;

/// Default maximum number of cached symbols.
pub const DEFAULT_MAX_ENTRIES: u64 = 10_000;

#[derive(Debug, Clone)]
struct CachedPrice {
    payload: String,
    ttl: Duration,
}

/// Expires each entry after the TTL it was written with.
struct PerEntryTtl;

impl Expiry<String, CachedPrice> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedPrice,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CachedPrice,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Moka-backed price cache.
#[derive(Clone)]
pub struct MokaPriceCache {
    cache: Cache<String, CachedPrice>,
}

impl std::fmt::Debug for MokaPriceCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaPriceCache")
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

impl Default for MokaPriceCache {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}

impl MokaPriceCache {
    /// Create a cache holding at most `max_entries` symbols.
    #[must_use]
    pub fn new(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .name("latest_prices")
            .max_capacity(max_entries)
            .expire_after(PerEntryTtl)
            .build();
        Self { cache }
    }

    #[cfg(test)]
    async fn insert_raw(&self, symbol: &str, payload: &str, ttl: Duration) {
        self.cache
            .insert(
                cache_key(symbol),
                CachedPrice {
                    payload: payload.to_string(),
                    ttl,
                },
            )
            .await;
    }
}

#[async_trait]
impl PriceCache for MokaPriceCache {
    async fn read(&self, symbol: &str) -> Result<Option<PriceUpdate>, CacheError> {
        let key = cache_key(symbol);
        let Some(entry) = self.cache.get(&key).await else {
            return Ok(None);
        };

        serde_json::from_str(&entry.payload)
            .map(Some)
            .map_err(|e| CacheError::Decode {
                key,
                message: e.to_string(),
            })
    }

    async fn write(&self, update: &PriceUpdate, ttl: Duration) -> Result<(), CacheError> {
        let payload = serde_json::to_string(update).map_err(|e| CacheError::Encode {
            message: e.to_string(),
        })?;

        self.cache
            .insert(cache_key(&update.symbol), CachedPrice { payload, ttl })
            .await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(600);

    #[tokio::test]
    async fn read_missing_is_miss() {
        let cache = MokaPriceCache::default();

        assert_eq!(cache.read("AAPL").await.unwrap(), None);
    }

    #[tokio::test]
    async fn write_then_read_returns_update() {
        let cache = MokaPriceCache::default();
        let update = PriceUpdate::opening("AAPL", 175.5, 1_700_000_000);

        cache.write(&update, TTL).await.unwrap();

        assert_eq!(cache.read("AAPL").await.unwrap(), Some(update));
    }

    #[tokio::test]
    async fn write_replaces_previous_value() {
        let cache = MokaPriceCache::default();
        let first = PriceUpdate::opening("AAPL", 175.5, 1);
        let second = first.advance(1.0, 10.0, 2);

        cache.write(&first, TTL).await.unwrap();
        cache.write(&second, TTL).await.unwrap();

        assert_eq!(cache.read("AAPL").await.unwrap(), Some(second));
    }

    #[tokio::test]
    async fn entries_expire_after_ttl() {
        let cache = MokaPriceCache::default();
        let update = PriceUpdate::opening("AAPL", 175.5, 1);

        cache
            .write(&update, Duration::from_millis(50))
            .await
            .unwrap();
        assert!(cache.read("AAPL").await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(cache.read("AAPL").await.unwrap(), None);
    }

    #[tokio::test]
    async fn corrupt_entry_is_decode_error() {
        let cache = MokaPriceCache::default();
        cache.insert_raw("AAPL", "{not json", TTL).await;

        let err = cache.read("AAPL").await.unwrap_err();

        assert!(matches!(err, CacheError::Decode { key, .. } if key == "price:AAPL"));
    }

    #[tokio::test]
    async fn stored_payload_is_json() {
        let cache = MokaPriceCache::default();
        let update = PriceUpdate::opening("MSFT", 380.75, 1);
        cache.write(&update, TTL).await.unwrap();

        let raw = cache.cache.get("price:MSFT").await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw.payload).unwrap();

        assert_eq!(json["symbol"], "MSFT");
        assert_eq!(raw.ttl, TTL);
    }
}
