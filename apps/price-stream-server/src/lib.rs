#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements,
        clippy::cast_possible_truncation
    )
)]

//! Price Stream Server - Simulated Real-Time Price Distribution
//!
//! A gRPC service that moves a set of tracked symbols on a fixed tick and
//! fans every update out to many concurrent streaming clients. Delivery is
//! best-effort: a subscriber that falls behind loses updates instead of
//! slowing anyone else down.
//!
//! # Layers (inside → outside)
//!
//! - **Domain**: Core price distribution types
//!   - `pricing`: Latest price per symbol and the price store
//!   - `subscription`: Per-symbol bounded queues with drop-on-full fan-out
//!   - `portfolio`: Positions, valuation and alerts
//!
//! - **Application**: Use cases and port definitions
//!   - `ports`: Cache, store and session transport interfaces
//!   - `services`: Price reads, portfolio, simulation, streaming sessions
//!
//! - **Infrastructure**: Adapters and external integrations
//!   - `cache`: In-process TTL cache for latest prices
//!   - `persistence`: In-memory portfolio and alert stores
//!   - `grpc`: `portfolio.v1.PortfolioService` implementation
//!   - `config`, `health`, `metrics`, `telemetry`: Process plumbing
//!
//! # Data Flow
//!
//! ```text
//!                    ┌──────────────┐
//!  tick ──► engine ──┤  PriceStore  │◄── GetPrice (via cache)
//!                    └──────────────┘
//!             │ write-through ──► cache
//!             ▼
//!   SubscriptionRegistry ──► StreamPrices sessions ──► Client 1..N
//!                        └─► LiveUpdates sessions  ──► Client 1..N
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Module Declarations
// =============================================================================

/// Domain layer - Core types with no I/O.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Re-exports
// =============================================================================

// Domain types
pub use domain::portfolio::{AlertCondition, NewPosition, PortfolioSummary, Stock};
pub use domain::pricing::{DEFAULT_SEEDS, PriceError, PriceStore, PriceUpdate, Symbol};
pub use domain::subscription::{Subscription, SubscriptionRegistry, SubscriptionStats};

// Application services
pub use application::services::streaming::{LiveSession, PollingSession, SessionEnd};
pub use application::services::{
    PortfolioService, PriceService, PriceSimulationEngine, SimulationConfig, SimulationStatus,
};

// Infrastructure config
pub use infrastructure::config::{ConfigError, ServerConfig};

// Adapters
pub use infrastructure::cache::MokaPriceCache;
pub use infrastructure::persistence::{InMemoryAlertStore, InMemoryPortfolioStore};

// Health server
pub use infrastructure::health::{HealthServer, HealthServerError, HealthServerState};

// gRPC server (for integration tests)
pub use infrastructure::grpc::{
    ActiveSessions, PriceStreamServer, proto::portfolio::v1 as proto,
};

// Metrics
pub use infrastructure::metrics::init_metrics;

// Telemetry
pub use infrastructure::telemetry::{TelemetryConfig, TelemetryGuard, init as init_telemetry};
