//! Prometheus Metrics Module
//!
//! Exposes application metrics via Prometheus format for monitoring.
//!
//! # Metrics Categories
//!
//! - **Simulation**: Ticks and tick duration
//! - **Fan-out**: Updates delivered and dropped per symbol
//! - **Cache**: Hits, misses and errors by operation
//! - **Sessions**: Active subscriptions and streaming sessions
//!
//! # Integration
//!
//! Metrics are exposed at `/metrics` on the health server port.

use std::sync::OnceLock;
use std::time::Duration;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

// =============================================================================
// Global Metrics Handle
// =============================================================================

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Initialize the Prometheus metrics recorder.
///
/// Safe to call more than once; later calls return the first handle. If a
/// different global recorder is already installed, the returned handle renders
/// an empty registry.
pub fn init_metrics() -> PrometheusHandle {
    PROMETHEUS_HANDLE
        .get_or_init(|| {
            let handle = match PrometheusBuilder::new().install_recorder() {
                Ok(handle) => handle,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to install Prometheus recorder");
                    PrometheusBuilder::new().build_recorder().handle()
                }
            };

            register_metrics();
            handle
        })
        .clone()
}

/// Get the Prometheus handle for rendering metrics.
///
/// Returns `None` if metrics have not been initialized.
#[must_use]
pub fn get_metrics_handle() -> Option<PrometheusHandle> {
    PROMETHEUS_HANDLE.get().cloned()
}

// =============================================================================
// Metric Registration
// =============================================================================

fn register_metrics() {
    // Simulation
    describe_counter!(
        "price_stream_ticks_total",
        "Total simulation ticks completed"
    );
    describe_histogram!(
        "price_stream_tick_duration_seconds",
        "Time to update, cache and broadcast every tracked symbol"
    );

    // Fan-out
    describe_counter!(
        "price_stream_updates_delivered_total",
        "Total price updates enqueued to subscribers"
    );
    describe_counter!(
        "price_stream_updates_dropped_total",
        "Total price updates dropped because a subscriber queue was full"
    );

    // Cache
    describe_counter!(
        "price_stream_cache_hits_total",
        "Latest-price reads served from the cache"
    );
    describe_counter!(
        "price_stream_cache_misses_total",
        "Latest-price reads that fell back to the price store"
    );
    describe_counter!(
        "price_stream_cache_errors_total",
        "Cache failures by operation"
    );

    // Sessions
    describe_gauge!(
        "price_stream_subscriptions",
        "Number of live price subscriptions"
    );
    describe_gauge!(
        "price_stream_sessions",
        "Number of active streaming sessions by kind"
    );
}

// =============================================================================
// Metric Recording Functions
// =============================================================================

/// Metric labels for cache operations.
#[derive(Debug, Clone, Copy)]
pub enum CacheOperation {
    /// Latest-price lookup.
    Read,
    /// Write-through after a tick.
    Write,
}

impl CacheOperation {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
        }
    }
}

/// Metric labels for streaming session kinds.
#[derive(Debug, Clone, Copy)]
pub enum SessionKind {
    /// One-way multi-symbol price stream.
    Polling,
    /// Bidirectional action/update session.
    Live,
}

impl SessionKind {
    /// Get the string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Polling => "polling",
            Self::Live => "live",
        }
    }
}

/// Record a completed simulation tick.
pub fn record_tick(duration: Duration) {
    counter!("price_stream_ticks_total").increment(1);
    histogram!("price_stream_tick_duration_seconds").record(duration.as_secs_f64());
}

/// Record updates enqueued to subscribers of a symbol.
pub fn record_updates_delivered(symbol: &str, count: u64) {
    counter!(
        "price_stream_updates_delivered_total",
        "symbol" => symbol.to_string()
    )
    .increment(count);
}

/// Record updates dropped for saturated subscribers of a symbol.
pub fn record_updates_dropped(symbol: &str, count: u64) {
    counter!(
        "price_stream_updates_dropped_total",
        "symbol" => symbol.to_string()
    )
    .increment(count);
}

/// Record a latest-price read served from the cache.
pub fn record_cache_hit() {
    counter!("price_stream_cache_hits_total").increment(1);
}

/// Record a latest-price read that missed the cache.
pub fn record_cache_miss() {
    counter!("price_stream_cache_misses_total").increment(1);
}

/// Record a cache failure.
pub fn record_cache_error(operation: CacheOperation) {
    counter!(
        "price_stream_cache_errors_total",
        "operation" => operation.as_str()
    )
    .increment(1);
}

/// Update the live subscription count.
pub fn set_subscriptions(count: f64) {
    gauge!("price_stream_subscriptions").set(count);
}

/// Record a streaming session starting.
pub fn session_started(kind: SessionKind) {
    gauge!("price_stream_sessions", "kind" => kind.as_str()).increment(1.0);
}

/// Record a streaming session ending.
pub fn session_ended(kind: SessionKind) {
    gauge!("price_stream_sessions", "kind" => kind.as_str()).decrement(1.0);
}

// =============================================================================
// Tests
// =============================================================================
