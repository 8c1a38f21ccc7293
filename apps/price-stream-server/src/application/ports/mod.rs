//! Application Ports (Driven)
//!
//! Ports define interfaces for the external systems the engine talks to.
//! - `PriceCache`: TTL accelerator for the latest price
//! - `PortfolioStore` / `AlertStore`: position and alert persistence
//! - `UpdateSink` / `ActionSource`: one client session's transport

mod cache_port;
mod portfolio_port;
mod session_port;

pub use cache_port::{CacheError, PriceCache, cache_key};
pub use portfolio_port::{AlertStore, PortfolioError, PortfolioStore};
pub use session_port::{ActionSource, PortfolioEvent, SessionAction, TransportError, UpdateSink};

#[cfg(test)]
pub use cache_port::MockPriceCache;
#[cfg(test)]
pub use portfolio_port::MockPortfolioStore;
