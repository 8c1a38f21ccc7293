//! Infrastructure Layer - Adapters and external integrations.
//!
//! This layer contains the concrete implementations of the port interfaces
//! defined in the application layer, plus the process-level servers.

/// In-process TTL cache for latest prices.
pub mod cache;

/// Configuration loaded from the environment.
pub mod config;

/// gRPC service implementation.
pub mod grpc;

/// Health check HTTP endpoint.
pub mod health;

/// Prometheus metrics instrumentation.
pub mod metrics;

/// In-memory portfolio and alert stores.
pub mod persistence;

/// Logging and OpenTelemetry tracing.
pub mod telemetry;
