//! Health Check and Metrics Endpoint
//!
//! HTTP endpoint for health checks, engine progress and Prometheus metrics.
//!
//! # Endpoints
//!
//! - `GET /health` - Returns JSON health status
//! - `GET /healthz` - Liveness probe (simple OK)
//! - `GET /readyz` - Readiness probe (ready once the engine has ticked)
//! - `GET /metrics` - Prometheus metrics in text format

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::application::services::SimulationStatus;
use crate::domain::pricing::{PriceStore, unix_now};
use crate::domain::subscription::SubscriptionRegistry;
use crate::infrastructure::grpc::server::ActiveSessions;
use crate::infrastructure::metrics::get_metrics_handle;

// =============================================================================
// Health Response Types
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: HealthStatus,
    /// Server version.
    pub version: String,
    /// Server uptime in seconds.
    pub uptime_secs: u64,
    /// Current time.
    pub current_time: DateTime<Utc>,
    /// Price engine progress.
    pub engine: EngineStatus,
    /// Subscription statistics.
    pub subscriptions: SubscriptionStatus,
    /// Active streaming sessions.
    pub sessions: SessionStatus,
}

/// Overall health status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Engine is ticking on schedule.
    Healthy,
    /// Engine has not completed a tick yet.
    Starting,
    /// Engine has stopped ticking.
    Stalled,
}

/// Price engine progress.
#[derive(Debug, Clone, Serialize)]
pub struct EngineStatus {
    /// Symbols in the price store.
    pub tracked_symbols: usize,
    /// Completed ticks.
    pub ticks: u64,
    /// Unix seconds of the last tick.
    pub last_tick_at: Option<i64>,
}

/// Subscription statistics.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionStatus {
    /// Symbols with at least one subscriber.
    pub symbols: usize,
    /// Live subscriptions.
    pub total: usize,
}

/// Active session counts.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    /// `StreamPrices` sessions.
    pub polling: u64,
    /// `LiveUpdates` sessions.
    pub live: u64,
}

// =============================================================================
// Health Server State
// =============================================================================

/// Shared state for the health server.
pub struct HealthServerState {
    version: String,
    started_at: Instant,
    stale_after: Duration,
    prices: Arc<PriceStore>,
    registry: Arc<SubscriptionRegistry>,
    simulation: Arc<SimulationStatus>,
    sessions: Arc<ActiveSessions>,
}

impl HealthServerState {
    /// Create new health server state.
    ///
    /// The engine counts as stalled when its last tick is older than
    /// `stale_after`.
    #[must_use]
    pub fn new(
        version: String,
        stale_after: Duration,
        prices: Arc<PriceStore>,
        registry: Arc<SubscriptionRegistry>,
        simulation: Arc<SimulationStatus>,
        sessions: Arc<ActiveSessions>,
    ) -> Self {
        Self {
            version,
            started_at: Instant::now(),
            stale_after,
            prices,
            registry,
            simulation,
            sessions,
        }
    }
}

// =============================================================================
// Health Server
// =============================================================================

/// Health check HTTP server.
pub struct HealthServer {
    port: u16,
    state: Arc<HealthServerState>,
    cancel: CancellationToken,
}

impl HealthServer {
    /// Create a new health server.
    #[must_use]
    pub const fn new(port: u16, state: Arc<HealthServerState>, cancel: CancellationToken) -> Self {
        Self {
            port,
            state,
            cancel,
        }
    }

    /// Run the health server until cancelled.
    ///
    /// # Errors
    ///
    /// Returns `HealthServerError` if binding fails or the HTTP server
    /// encounters a fatal error while running.
    pub async fn run(self) -> Result<(), HealthServerError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| HealthServerError::BindFailed(self.port, e.to_string()))?;

        tracing::info!(port = self.port, "Health server listening");

        axum::serve(listener, router(self.state))
            .with_graceful_shutdown(self.cancel.cancelled_owned())
            .await
            .map_err(|e| HealthServerError::ServerFailed(e.to_string()))?;

        tracing::info!("Health server stopped");
        Ok(())
    }
}

fn router(state: Arc<HealthServerState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/healthz", get(liveness_handler))
        .route("/readyz", get(readiness_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

// =============================================================================
// HTTP Handlers
// =============================================================================

async fn health_handler(State(state): State<Arc<HealthServerState>>) -> impl IntoResponse {
    let response = build_health_response(&state, unix_now());
    let status_code = match response.status {
        HealthStatus::Healthy | HealthStatus::Starting => StatusCode::OK,
        HealthStatus::Stalled => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status_code, Json(response))
}

async fn liveness_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

async fn readiness_handler(State(state): State<Arc<HealthServerState>>) -> impl IntoResponse {
    if state.simulation.is_ready() {
        (StatusCode::OK, "READY")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "NOT READY")
    }
}

async fn metrics_handler() -> impl IntoResponse {
    get_metrics_handle().map_or_else(
        || {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                [("content-type", "text/plain")],
                "Metrics not initialized".to_string(),
            )
        },
        |handle| {
            (
                StatusCode::OK,
                [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
                handle.render(),
            )
        },
    )
}

fn build_health_response(state: &HealthServerState, now: i64) -> HealthResponse {
    let stats = state.registry.stats();
    let last_tick_at = state.simulation.last_tick_at();

    HealthResponse {
        status: determine_health_status(last_tick_at, now, state.stale_after),
        version: state.version.clone(),
        uptime_secs: state.started_at.elapsed().as_secs(),
        current_time: Utc::now(),
        engine: EngineStatus {
            tracked_symbols: state.prices.len(),
            ticks: state.simulation.ticks(),
            last_tick_at,
        },
        subscriptions: SubscriptionStatus {
            symbols: stats.symbol_count,
            total: stats.subscription_count,
        },
        sessions: SessionStatus {
            polling: state.sessions.polling(),
            live: state.sessions.live(),
        },
    }
}

fn determine_health_status(
    last_tick_at: Option<i64>,
    now: i64,
    stale_after: Duration,
) -> HealthStatus {
    let Some(last) = last_tick_at else {
        return HealthStatus::Starting;
    };
    let age = u64::try_from(now.saturating_sub(last)).unwrap_or(0);
    if age > stale_after.as_secs() {
        HealthStatus::Stalled
    } else {
        HealthStatus::Healthy
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Health server errors.
#[derive(Debug, thiserror::Error)]
pub enum HealthServerError {
    /// Failed to bind to port.
    #[error("failed to bind to port {0}: {1}")]
    BindFailed(u16, String),

    /// Server error.
    #[error("server error: {0}")]
    ServerFailed(String),
}

// =============================================================================
// Tests
// =============================================================================
