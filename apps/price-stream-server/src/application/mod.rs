//! Application Layer - Use cases and port definitions.
//!
//! This layer contains the application services and port interfaces
//! that define how the domain interacts with caches, stores and client
//! transports.

/// Port interfaces for caches, stores and session transports.
pub mod ports;

/// Price reads, portfolio use cases, simulation and streaming sessions.
pub mod services;
