//! Price Stream Server Binary
//!
//! Starts the price simulation, the gRPC service and the health server.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin price-stream-server
//! ```
//!
//! # Environment Variables
//!
//! - `PRICE_STREAM_GRPC_PORT`: gRPC server port (default: 50051)
//! - `PRICE_STREAM_HEALTH_PORT`: Health check HTTP port (default: 8082)
//! - `PRICE_STREAM_TICK_INTERVAL_MS`: Simulation tick (default: 2000)
//! - `PRICE_STREAM_MAX_CHANGE_PERCENT`: Largest move per tick (default: 2.0)
//! - `PRICE_STREAM_MAX_VOLUME`: Simulated volume bound (default: 10000000)
//! - `PRICE_STREAM_SUBSCRIBER_CAPACITY`: Per-subscription queue (default: 100)
//! - `PRICE_STREAM_POLL_INTERVAL_MS`: `StreamPrices` poll sleep (default: 100)
//! - `PRICE_STREAM_SESSION_QUEUE_CAPACITY`: `LiveUpdates` queue (default: 100)
//! - `PRICE_STREAM_CACHE_TTL_SECS`: Latest-price cache TTL (default: 600)
//! - `PRICE_STREAM_CACHE_MAX_ENTRIES`: Latest-price cache size (default: 10000)
//! - `OTEL_ENABLED`: Export spans over OTLP (default: false)
//! - `OTEL_EXPORTER_OTLP_ENDPOINT`: OTLP endpoint (default: <http://localhost:4317>)
//! - `OTEL_SERVICE_NAME`: Service name (default: price-stream-server)
//! - `RUST_LOG`: Log level (default: info)

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use price_stream_server::proto::portfolio_service_server::PortfolioServiceServer;
use price_stream_server::infrastructure::telemetry;
use price_stream_server::{
    DEFAULT_SEEDS, HealthServer, HealthServerState, InMemoryAlertStore, InMemoryPortfolioStore,
    LiveSession, MokaPriceCache, PollingSession, PortfolioService, PriceService,
    PriceSimulationEngine, PriceStore, PriceStreamServer, ServerConfig, SubscriptionRegistry,
    init_metrics,
};
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tonic::transport::Server;

/// Graceful shutdown timeout.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

/// Missed ticks before the engine is reported as stalled.
const STALLED_AFTER_TICKS: u32 = 5;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    load_dotenv();

    // Initialize telemetry (tracing + optional OpenTelemetry)
    let _telemetry_guard = telemetry::init();

    tracing::info!("Starting Price Stream Server");

    // Initialize Prometheus metrics
    let _metrics_handle = init_metrics();

    let config = ServerConfig::from_env()?;
    log_config(&config);

    let shutdown_token = CancellationToken::new();

    // Core state
    let store = Arc::new(PriceStore::with_seeds(DEFAULT_SEEDS));
    let registry = Arc::new(SubscriptionRegistry::new(
        config.streaming.subscriber_capacity,
    ));
    let prices = Arc::new(PriceService::new(
        Arc::clone(&store),
        Arc::new(MokaPriceCache::new(config.cache.max_entries)),
        config.cache.ttl,
    ));
    let portfolio = Arc::new(PortfolioService::new(
        Arc::new(InMemoryPortfolioStore::new()),
        Arc::new(InMemoryAlertStore::new()),
        Arc::clone(&prices),
    ));

    // Price simulation
    let engine = PriceSimulationEngine::new(
        Arc::clone(&prices),
        Arc::clone(&registry),
        config.simulation,
    );
    let simulation_status = engine.status();
    let engine_task = tokio::spawn(engine.run(shutdown_token.clone()));

    // gRPC server
    let grpc_server = Arc::new(PriceStreamServer::new(
        Arc::clone(&prices),
        Arc::clone(&portfolio),
        PollingSession::new(Arc::clone(&registry), config.streaming.poll_interval),
        LiveSession::new(
            Arc::clone(&registry),
            Arc::clone(&portfolio),
            config.streaming.session_queue_capacity,
        ),
        shutdown_token.clone(),
    ));

    // Health server
    let stale_after = config
        .simulation
        .tick_interval
        .saturating_mul(STALLED_AFTER_TICKS)
        .max(Duration::from_secs(1));
    let health_state = Arc::new(HealthServerState::new(
        env!("CARGO_PKG_VERSION").to_string(),
        stale_after,
        Arc::clone(&store),
        Arc::clone(&registry),
        simulation_status,
        grpc_server.sessions(),
    ));
    let health_server = HealthServer::new(
        config.server.health_port,
        health_state,
        shutdown_token.clone(),
    );

    tokio::spawn(async move {
        if let Err(e) = health_server.run().await {
            tracing::error!(error = %e, "Health server error");
        }
    });

    let grpc_addr = SocketAddr::from(([0, 0, 0, 0], config.server.grpc_port));
    let grpc_service = PortfolioServiceServer::from_arc(grpc_server);
    let grpc_shutdown = shutdown_token.clone();

    let grpc_task = tokio::spawn(async move {
        tracing::info!(addr = %grpc_addr, "gRPC server listening");
        if let Err(e) = Server::builder()
            .add_service(grpc_service)
            .serve_with_shutdown(grpc_addr, grpc_shutdown.cancelled_owned())
            .await
        {
            tracing::error!(error = %e, "gRPC server error");
        }
        tracing::info!("gRPC server stopped");
    });

    tracing::info!(symbols = store.len(), "Price stream server ready");

    await_shutdown(shutdown_token).await;

    let drained = tokio::time::timeout(SHUTDOWN_TIMEOUT, async {
        let _ = engine_task.await;
        let _ = grpc_task.await;
    })
    .await;
    if drained.is_err() {
        tracing::warn!("Shutdown timed out");
    }

    tracing::info!("Price stream server stopped");
    Ok(())
}

/// Load .env file from current directory or any ancestor directory.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Log the parsed configuration.
fn log_config(config: &ServerConfig) {
    tracing::info!(
        grpc_port = config.server.grpc_port,
        health_port = config.server.health_port,
        tick_interval_ms = millis(config.simulation.tick_interval),
        subscriber_capacity = config.streaming.subscriber_capacity,
        "Configuration loaded"
    );
    tracing::debug!(
        max_change_percent = config.simulation.max_change_percent,
        max_volume = config.simulation.max_volume,
        poll_interval_ms = millis(config.streaming.poll_interval),
        session_queue_capacity = config.streaming.session_queue_capacity,
        cache_ttl_secs = config.cache.ttl.as_secs(),
        cache_max_entries = config.cache.max_entries,
        "Tuning parameters"
    );
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
async fn await_shutdown(shutdown_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }

    shutdown_token.cancel();

    tracing::info!(
        timeout_secs = SHUTDOWN_TIMEOUT.as_secs(),
        "Graceful shutdown started"
    );
}
