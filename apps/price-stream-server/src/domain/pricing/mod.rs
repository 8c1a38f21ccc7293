//! Price Types and the Authoritative Price Store
//!
//! Domain types for the latest simulated price of each tracked symbol.
//!
//! # Design
//!
//! The [`PriceStore`] holds exactly one [`PriceUpdate`] per symbol and is the
//! source of truth for the read path. It is mutated by the simulation tick
//! (`put`) and by idempotent seeding (`ensure`). Symbols are never evicted.
//!
//! Readers take a shared lock and clone the update out, so a reader never
//! observes a half-written price.

use std::collections::HashMap;

use chrono::Utc;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

// =============================================================================
// Types
// =============================================================================

/// A ticker symbol, always stored uppercase.
pub type Symbol = String;

/// Day range multiplier above the current price.
const DAY_HIGH_FACTOR: f64 = 1.02;

/// Day range multiplier below the current price.
const DAY_LOW_FACTOR: f64 = 0.98;

/// Symbols tracked from startup with their opening prices.
pub const DEFAULT_SEEDS: &[(&str, f64)] = &[
    ("AAPL", 175.50),
    ("GOOGL", 140.25),
    ("MSFT", 380.75),
    ("AMZN", 152.30),
    ("TSLA", 242.80),
    ("META", 485.20),
    ("NVDA", 495.60),
    ("NFLX", 475.90),
    ("JPM", 210.45),
    ("JNJ", 165.80),
];

/// Normalize a client-supplied symbol.
///
/// Trims whitespace and uppercases. Returns `None` for an empty symbol.
#[must_use]
pub fn normalize_symbol(raw: &str) -> Option<Symbol> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_ascii_uppercase())
}

/// Current unix time in seconds.
#[must_use]
pub fn unix_now() -> i64 {
    Utc::now().timestamp()
}

// =============================================================================
// Price Update
// =============================================================================

/// Latest price for one symbol.
///
/// Immutable once built; a newer update replaces the previous one wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceUpdate {
    /// Uppercase ticker.
    pub symbol: Symbol,
    /// Last price, always positive.
    pub current_price: f64,
    /// Absolute change from the previous price.
    pub change: f64,
    /// Percentage change from the previous price.
    pub change_percent: f64,
    /// Unix seconds when the price was generated.
    pub timestamp: i64,
    /// Simulated traded volume.
    pub volume: f64,
    /// Simulated day high.
    pub day_high: f64,
    /// Simulated day low.
    pub day_low: f64,
}

impl PriceUpdate {
    /// Opening state for a newly tracked symbol: no change, no volume.
    #[must_use]
    pub fn opening(symbol: impl Into<Symbol>, base_price: f64, timestamp: i64) -> Self {
        Self {
            symbol: symbol.into(),
            current_price: base_price,
            change: 0.0,
            change_percent: 0.0,
            timestamp,
            volume: 0.0,
            day_high: base_price * DAY_HIGH_FACTOR,
            day_low: base_price * DAY_LOW_FACTOR,
        }
    }

    /// Apply a percentage move to this price and return the next update.
    ///
    /// The timestamp never moves backwards relative to `self`.
    #[must_use]
    pub fn advance(&self, change_percent: f64, volume: f64, timestamp: i64) -> Self {
        let new_price = self.current_price * (1.0 + change_percent / 100.0);
        Self {
            symbol: self.symbol.clone(),
            current_price: new_price,
            change: new_price - self.current_price,
            change_percent,
            timestamp: timestamp.max(self.timestamp),
            volume: volume.max(0.0),
            day_high: new_price * DAY_HIGH_FACTOR,
            day_low: new_price * DAY_LOW_FACTOR,
        }
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Price lookup errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PriceError {
    /// Symbol is not tracked by the store and not cached.
    #[error("price not found for symbol: {0}")]
    NotFound(Symbol),

    /// Symbol was empty after normalization.
    #[error("symbol must not be empty")]
    EmptySymbol,
}

// =============================================================================
// Price Store
// =============================================================================

/// In-memory latest price per symbol.
///
/// # Example
///
/// ```rust
/// use price_stream_server::domain::pricing::PriceStore;
///
/// let store = PriceStore::new();
/// assert!(store.ensure("AAPL", 175.50));
///
/// // Seeding is idempotent.
/// assert!(!store.ensure("AAPL", 1.0));
/// assert_eq!(store.get("AAPL").unwrap().current_price, 175.50);
/// ```
#[derive(Debug, Default)]
pub struct PriceStore {
    prices: RwLock<HashMap<Symbol, PriceUpdate>>,
}

impl PriceStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with the given symbols and opening prices.
    #[must_use]
    pub fn with_seeds(seeds: &[(&str, f64)]) -> Self {
        let store = Self::new();
        for (symbol, price) in seeds {
            store.ensure(symbol, *price);
        }
        store
    }

    /// Latest price for a symbol.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::NotFound`] if the symbol is not tracked.
    pub fn get(&self, symbol: &str) -> Result<PriceUpdate, PriceError> {
        self.prices
            .read()
            .get(symbol)
            .cloned()
            .ok_or_else(|| PriceError::NotFound(symbol.to_string()))
    }

    /// Replace the latest price for `update.symbol`.
    pub fn put(&self, update: PriceUpdate) {
        self.prices.write().insert(update.symbol.clone(), update);
    }

    /// Start tracking `symbol` at `base_price` if it is not tracked yet.
    ///
    /// Returns `true` if the symbol was newly added.
    pub fn ensure(&self, symbol: &str, base_price: f64) -> bool {
        let mut prices = self.prices.write();
        if prices.contains_key(symbol) {
            return false;
        }
        prices.insert(
            symbol.to_string(),
            PriceUpdate::opening(symbol, base_price, unix_now()),
        );
        true
    }

    /// Copy of every tracked price.
    #[must_use]
    pub fn snapshot(&self) -> Vec<PriceUpdate> {
        self.prices.read().values().cloned().collect()
    }

    /// Number of tracked symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.read().len()
    }

    /// Whether no symbols are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.read().is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test_case("aapl", Some("AAPL"); "lowercase")]
    #[test_case("  msft ", Some("MSFT"); "padded")]
    #[test_case("BRK.B", Some("BRK.B"); "dotted")]
    #[test_case("", None; "empty")]
    #[test_case("   ", None; "whitespace")]
    fn normalize_symbol_cases(raw: &str, expected: Option<&str>) {
        assert_eq!(normalize_symbol(raw).as_deref(), expected);
    }

    #[test]
    fn get_unknown_symbol_is_not_found() {
        let store = PriceStore::new();

        let err = store.get("ZZZZ").unwrap_err();

        assert_eq!(err, PriceError::NotFound("ZZZZ".to_string()));
    }

    #[test]
    fn ensure_seeds_opening_state() {
        let store = PriceStore::new();

        assert!(store.ensure("IBM", 150.0));

        let price = store.get("IBM").unwrap();
        assert_close(price.current_price, 150.0);
        assert_close(price.change, 0.0);
        assert_close(price.change_percent, 0.0);
        assert!(price.timestamp > 0);
    }

    #[test]
    fn ensure_is_idempotent() {
        let store = PriceStore::new();
        store.ensure("IBM", 150.0);
        let before = store.get("IBM").unwrap();

        assert!(!store.ensure("IBM", 999.0));

        assert_eq!(store.get("IBM").unwrap(), before);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn put_replaces_previous_update() {
        let store = PriceStore::with_seeds(&[("AAPL", 175.50)]);
        let next = store.get("AAPL").unwrap().advance(1.0, 10.0, unix_now());

        store.put(next.clone());

        assert_eq!(store.get("AAPL").unwrap(), next);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn default_seeds_are_all_tracked() {
        let store = PriceStore::with_seeds(DEFAULT_SEEDS);

        assert_eq!(store.len(), DEFAULT_SEEDS.len());
        assert_close(store.get("AAPL").unwrap().current_price, 175.50);
        assert_close(store.get("JNJ").unwrap().current_price, 165.80);
    }

    #[test]
    fn advance_applies_percentage_move() {
        let opening = PriceUpdate::opening("AAPL", 175.50, 1_000);

        let next = opening.advance(1.0, 5_000.0, 1_002);

        assert_close(next.current_price, 177.255);
        assert_close(next.change, 1.755);
        assert_close(next.change_percent, 1.0);
        assert_close(next.day_high, 177.255 * 1.02);
        assert_close(next.day_low, 177.255 * 0.98);
        assert_eq!(next.volume, 5_000.0);
        assert_eq!(next.timestamp, 1_002);
    }

    #[test]
    fn advance_never_moves_timestamp_backwards() {
        let opening = PriceUpdate::opening("AAPL", 100.0, 2_000);

        let next = opening.advance(-0.5, 1.0, 1_500);

        assert_eq!(next.timestamp, 2_000);
        assert!(next.current_price < 100.0);
    }

    #[test]
    fn snapshot_holds_every_tracked_price() {
        let store = PriceStore::with_seeds(&[("AAPL", 1.0), ("MSFT", 2.0)]);

        let mut snapshot: Vec<_> = store.snapshot().into_iter().map(|p| p.symbol).collect();
        snapshot.sort();

        assert_eq!(snapshot, vec!["AAPL", "MSFT"]);
        assert_eq!(store.len(), snapshot.len());
    }

    #[test]
    fn price_update_json_shape() {
        let update = PriceUpdate::opening("AAPL", 175.5, 1_700_000_000);

        let json = serde_json::to_value(&update).unwrap();

        assert_eq!(json["symbol"], "AAPL");
        assert_eq!(json["current_price"], 175.5);
        assert_eq!(json["timestamp"], 1_700_000_000);
    }

    #[test]
    fn thread_safety_concurrent_readers_and_writer() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(PriceStore::with_seeds(&[("AAPL", 100.0)]));
        let mut handles = vec![];

        let writer = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            for i in 0..200 {
                let next = writer
                    .get("AAPL")
                    .unwrap()
                    .advance(0.1, f64::from(i), unix_now());
                writer.put(next);
            }
        }));

        for _ in 0..4 {
            let reader = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                for _ in 0..200 {
                    let price = reader.get("AAPL").unwrap();
                    assert!(price.current_price > 0.0);
                    assert!(price.day_high > price.day_low);
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert!(store.get("AAPL").unwrap().current_price > 100.0);
    }
}
