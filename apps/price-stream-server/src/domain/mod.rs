//! Domain Layer - Price state, subscriptions and portfolio values.
//!
//! This layer contains the core types of the price distribution engine.
//! It performs no I/O; every type here is safe to share across tasks.

/// Latest price per symbol and the authoritative price store.
pub mod pricing;

/// Per-symbol subscriber queues with lossy fan-out.
pub mod subscription;

/// Stock positions, valuation and price alerts.
pub mod portfolio;
