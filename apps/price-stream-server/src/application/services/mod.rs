//! Application Services
//!
//! Services that orchestrate domain logic and coordinate between ports.
//!
//! - `PriceService`: Cache-aside latest-price reads and write-through
//! - `PortfolioService`: Position, valuation and alert use cases
//! - `PriceSimulationEngine`: Periodic price generator and fan-out driver
//! - `streaming`: Polling and bidirectional session adapters

mod portfolio_service;
mod price_service;
mod simulation;

/// Streaming session adapters.
pub mod streaming;

pub use portfolio_service::PortfolioService;
pub use price_service::{DEFAULT_CACHE_TTL, PriceService};
pub use simulation::{
    PriceMove, PriceMoveSource, PriceSimulationEngine, RandomMoves, SimulationConfig,
    SimulationStatus, TickReport,
};
