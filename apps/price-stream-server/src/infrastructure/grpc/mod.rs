//! gRPC Portfolio Service
//!
//! Exposes prices, portfolio operations and both streaming session adapters
//! as `portfolio.v1.PortfolioService`.
//!
//! # Architecture
//!
//! Each streaming RPC spawns one session task that owns its subscriptions:
//!
//! 1. `StreamPrices` runs a polling session for the requested symbols
//! 2. `LiveUpdates` runs a bidirectional session driven by client actions
//! 3. Session output is written to a bounded channel backing the response
//! 4. Subscriptions are released when the session ends, whatever the cause

mod convert;
pub mod server;

// Allow clippy warnings and missing docs in generated code
#[allow(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used
)]
pub mod proto {
    pub mod portfolio {
        pub mod v1 {
            include!("../../../../../packages/schema-gen/rust/portfolio/v1/portfolio.v1.rs");
            include!("../../../../../packages/schema-gen/rust/portfolio/v1/portfolio.v1.tonic.rs");
        }
    }
}

pub use server::{ActiveSessions, PriceStreamServer};
