//! Shared harness for the gRPC integration tests.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tonic::transport::{Channel, Server};

use price_stream_server::application::services::{PriceMove, PriceMoveSource};
use price_stream_server::{
    InMemoryAlertStore, InMemoryPortfolioStore, LiveSession, MokaPriceCache, PollingSession,
    PortfolioService, PriceService, PriceSimulationEngine, PriceStore, PriceStreamServer,
    SimulationConfig, SubscriptionRegistry,
    proto::{
        portfolio_service_client::PortfolioServiceClient,
        portfolio_service_server::PortfolioServiceServer,
    },
};

pub const TIMEOUT: Duration = Duration::from_secs(5);

/// Every symbol moves by the same percentage on every tick.
pub struct FixedMoves(f64);

impl PriceMoveSource for FixedMoves {
    fn next_move(&mut self, _symbol: &str) -> PriceMove {
        PriceMove {
            change_percent: self.0,
            volume: 1_000.0,
        }
    }
}

pub struct TestServer {
    pub client: PortfolioServiceClient<Channel>,
    pub engine: PriceSimulationEngine,
    pub registry: Arc<SubscriptionRegistry>,
    pub store: Arc<PriceStore>,
    pub shutdown: CancellationToken,
    pub handle: tokio::task::JoinHandle<()>,
}

/// Start a test gRPC server on a random port and return the client.
pub async fn setup_test_server(seeds: &[(&str, f64)]) -> TestServer {
    let store = Arc::new(PriceStore::with_seeds(seeds));
    let registry = Arc::new(SubscriptionRegistry::new(16));
    let prices = Arc::new(PriceService::new(
        Arc::clone(&store),
        Arc::new(MokaPriceCache::new(100)),
        Duration::from_secs(600),
    ));
    let portfolio = Arc::new(PortfolioService::new(
        Arc::new(InMemoryPortfolioStore::new()),
        Arc::new(InMemoryAlertStore::new()),
        Arc::clone(&prices),
    ));
    let engine = PriceSimulationEngine::with_moves(
        Arc::clone(&prices),
        Arc::clone(&registry),
        SimulationConfig::default(),
        Box::new(FixedMoves(1.0)),
    );

    let shutdown = CancellationToken::new();
    let server = PriceStreamServer::new(
        prices,
        Arc::clone(&portfolio),
        PollingSession::new(Arc::clone(&registry), Duration::from_millis(10)),
        LiveSession::new(Arc::clone(&registry), portfolio, 16),
        shutdown.clone(),
    );

    // Find an available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server_handle = tokio::spawn(async move {
        Server::builder()
            .add_service(PortfolioServiceServer::new(server))
            .serve_with_incoming(tokio_stream::wrappers::TcpListenerStream::new(listener))
            .await
            .unwrap();
    });

    // Give server time to start
    tokio::time::sleep(Duration::from_millis(50)).await;

    let client = PortfolioServiceClient::connect(format!("http://{addr}"))
        .await
        .unwrap();

    TestServer {
        client,
        engine,
        registry,
        store,
        shutdown,
        handle: server_handle,
    }
}

pub async fn wait_for_subscribers(registry: &SubscriptionRegistry, symbol: &str, count: usize) {
    timeout(TIMEOUT, async {
        while registry.subscriber_count(symbol) != count {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .unwrap();
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}
