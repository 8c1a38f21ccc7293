//! Price Simulation Engine
//!
//! Fixed-interval driver that perturbs every tracked price, writes the result
//! through to the cache and fans it out to subscribers.
//!
//! The random source sits behind [`PriceMoveSource`] so a test can pin the
//! move applied on a tick.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::time::{MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;

use crate::domain::pricing::{PriceUpdate, unix_now};
use crate::domain::subscription::SubscriptionRegistry;
use crate::infrastructure::metrics;

use super::PriceService;

// =============================================================================
// Configuration
// =============================================================================

/// Simulation parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    /// Time between ticks.
    pub tick_interval: Duration,
    /// Largest absolute percentage move per tick.
    pub max_change_percent: f64,
    /// Exclusive upper bound of simulated volume.
    pub max_volume: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(2),
            max_change_percent: 2.0,
            max_volume: 10_000_000.0,
        }
    }
}

// =============================================================================
// Price Moves
// =============================================================================

/// One tick's move for one symbol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceMove {
    /// Percentage change to apply.
    pub change_percent: f64,
    /// Simulated volume.
    pub volume: f64,
}

/// Source of per-symbol price moves.
pub trait PriceMoveSource: Send {
    /// Move to apply to `symbol` on this tick.
    fn next_move(&mut self, symbol: &str) -> PriceMove;
}

/// Uniformly random moves within the configured bounds.
#[derive(Debug)]
pub struct RandomMoves {
    rng: StdRng,
    max_change_percent: f64,
    max_volume: f64,
}

impl RandomMoves {
    /// Random moves seeded from the operating system.
    #[must_use]
    pub fn new(config: &SimulationConfig) -> Self {
        Self::with_rng(StdRng::from_os_rng(), config)
    }

    /// Deterministic moves for a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64, config: &SimulationConfig) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), config)
    }

    fn with_rng(rng: StdRng, config: &SimulationConfig) -> Self {
        Self {
            rng,
            max_change_percent: config.max_change_percent.abs(),
            max_volume: config.max_volume,
        }
    }
}

impl PriceMoveSource for RandomMoves {
    fn next_move(&mut self, _symbol: &str) -> PriceMove {
        let change_percent = if self.max_change_percent > 0.0 {
            self.rng
                .random_range(-self.max_change_percent..=self.max_change_percent)
        } else {
            0.0
        };
        let volume = if self.max_volume >= 1.0 {
            self.rng.random_range(0.0..self.max_volume).floor()
        } else {
            0.0
        };

        PriceMove {
            change_percent,
            volume,
        }
    }
}

// =============================================================================
// Status
// =============================================================================

/// Progress shared with health reporting.
#[derive(Debug, Default)]
pub struct SimulationStatus {
    ticks: AtomicU64,
    last_tick_at: AtomicI64,
}

impl SimulationStatus {
    /// Create a fresh status.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed ticks.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Unix seconds of the last completed tick, if any.
    #[must_use]
    pub fn last_tick_at(&self) -> Option<i64> {
        match self.last_tick_at.load(Ordering::Relaxed) {
            0 => None,
            ts => Some(ts),
        }
    }

    /// Whether at least one tick has completed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ticks() > 0
    }

    fn record(&self, at: i64) {
        self.last_tick_at.store(at, Ordering::Relaxed);
        self.ticks.fetch_add(1, Ordering::Relaxed);
    }
}

/// Totals for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Symbols updated.
    pub symbols: usize,
    /// Updates enqueued to subscribers.
    pub delivered: usize,
    /// Updates dropped for full queues.
    pub dropped: usize,
    /// Orphaned subscriptions pruned.
    pub pruned: usize,
}

// =============================================================================
// Engine
// =============================================================================

/// Periodic price generator.
pub struct PriceSimulationEngine {
    prices: Arc<PriceService>,
    registry: Arc<SubscriptionRegistry>,
    moves: Box<dyn PriceMoveSource>,
    config: SimulationConfig,
    status: Arc<SimulationStatus>,
}

impl std::fmt::Debug for PriceSimulationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriceSimulationEngine")
            .field("config", &self.config)
            .field("ticks", &self.status.ticks())
            .finish_non_exhaustive()
    }
}

impl PriceSimulationEngine {
    /// Create an engine with random moves.
    #[must_use]
    pub fn new(
        prices: Arc<PriceService>,
        registry: Arc<SubscriptionRegistry>,
        config: SimulationConfig,
    ) -> Self {
        let moves = Box::new(RandomMoves::new(&config));
        Self::with_moves(prices, registry, config, moves)
    }

    /// Create an engine with a custom move source.
    #[must_use]
    pub fn with_moves(
        prices: Arc<PriceService>,
        registry: Arc<SubscriptionRegistry>,
        config: SimulationConfig,
        moves: Box<dyn PriceMoveSource>,
    ) -> Self {
        Self {
            prices,
            registry,
            moves,
            config,
            status: Arc::new(SimulationStatus::new()),
        }
    }

    /// Shared progress handle.
    #[must_use]
    pub fn status(&self) -> Arc<SimulationStatus> {
        Arc::clone(&self.status)
    }

    /// Tick until cancelled.
    ///
    /// The first tick fires one interval after start. Cancellation is
    /// observed between ticks, never in the middle of one.
    pub async fn run(mut self, cancel: CancellationToken) {
        let period = self.config.tick_interval;
        let mut ticker = interval_at(tokio::time::Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(
            interval_ms = u64::try_from(period.as_millis()).unwrap_or(u64::MAX),
            symbols = self.prices.store().len(),
            "Price simulation started"
        );

        loop {
            tokio::select! {
                () = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    let report = self.tick().await;
                    tracing::trace!(
                        symbols = report.symbols,
                        delivered = report.delivered,
                        dropped = report.dropped,
                        "Tick complete"
                    );
                }
            }
        }

        tracing::info!(ticks = self.status.ticks(), "Price simulation stopped");
    }

    /// Advance every tracked symbol once.
    pub async fn tick(&mut self) -> TickReport {
        let started = Instant::now();
        let now = unix_now();
        let mut report = TickReport::default();

        let mut current = self.prices.store().snapshot();
        current.sort_by(|a, b| a.symbol.cmp(&b.symbol));

        for previous in current {
            let next = self.next_price(&previous, now);
            self.prices.store().put(next.clone());
            self.prices.write_through(&next).await;

            let delivery = self.registry.broadcast(&next.symbol, &next);
            if delivery.delivered > 0 {
                metrics::record_updates_delivered(&next.symbol, delivery.delivered as u64);
            }
            if delivery.dropped > 0 {
                metrics::record_updates_dropped(&next.symbol, delivery.dropped as u64);
            }

            report.symbols += 1;
            report.delivered += delivery.delivered;
            report.dropped += delivery.dropped;
            report.pruned += delivery.pruned;
        }

        if report.pruned > 0 {
            tracing::debug!(pruned = report.pruned, "Pruned orphaned subscriptions");
        }

        #[allow(clippy::cast_precision_loss)]
        metrics::set_subscriptions(self.registry.stats().subscription_count as f64);
        metrics::record_tick(started.elapsed());
        self.status.record(now);

        report
    }

    fn next_price(&mut self, previous: &PriceUpdate, now: i64) -> PriceUpdate {
        let PriceMove {
            change_percent,
            volume,
        } = self.moves.next_move(&previous.symbol);
        previous.advance(change_percent, volume, now)
    }
}

// =============================================================================
// Tests
// =============================================================================
