//! Price Cache Port (Driven Port)
//!
//! Interface for the TTL key-value cache in front of the price store.
//! The cache is never authoritative; callers fall back to the store.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::pricing::PriceUpdate;

/// Cache key for a symbol's latest price.
#[must_use]
pub fn cache_key(symbol: &str) -> String {
    format!("price:{symbol}")
}

/// Price cache error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
    /// Backend could not be reached or rejected the operation.
    #[error("Price cache unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// Value could not be serialized for storage.
    #[error("Failed to encode cached price: {message}")]
    Encode {
        /// Error details.
        message: String,
    },

    /// Stored value could not be deserialized.
    #[error("Failed to decode cached price for {key}: {message}")]
    Decode {
        /// Cache key of the bad entry.
        key: String,
        /// Error details.
        message: String,
    },
}

/// Port for the latest-price cache.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PriceCache: Send + Sync {
    /// Read the cached price for a symbol. `Ok(None)` is a miss.
    async fn read(&self, symbol: &str) -> Result<Option<PriceUpdate>, CacheError>;

    /// Store `update` under its symbol for `ttl`.
    async fn write(&self, update: &PriceUpdate, ttl: Duration) -> Result<(), CacheError>;
}
