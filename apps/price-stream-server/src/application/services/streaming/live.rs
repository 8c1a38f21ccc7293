//! Bidirectional session adapter.
//!
//! One inbound task applies client actions. Each subscription gets a
//! forwarding task that drains it into a single bounded outbound queue, and
//! the session loop moves that queue onto the client transport.
//!
//! ```text
//! ActionSource ──► inbound task ──► SessionSubscriptions
//!                      │                 │ one forwarder per symbol
//!                      │                 ▼
//!                      └──────────► outbound queue ──► UpdateSink
//! ```

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::application::ports::{
    ActionSource, PortfolioEvent, SessionAction, TransportError, UpdateSink,
};
use crate::application::services::PortfolioService;
use crate::domain::pricing::{normalize_symbol, unix_now};
use crate::domain::subscription::{Subscription, SubscriptionRegistry};

use super::{SessionEnd, SessionSubscriptions};

/// Default capacity of a session's outbound queue.
pub const DEFAULT_SESSION_QUEUE_CAPACITY: usize = 100;

/// Bidirectional action/update session.
#[derive(Debug, Clone)]
pub struct LiveSession {
    registry: Arc<SubscriptionRegistry>,
    portfolio: Arc<PortfolioService>,
    queue_capacity: usize,
}

impl LiveSession {
    /// Create a bidirectional adapter.
    #[must_use]
    pub fn new(
        registry: Arc<SubscriptionRegistry>,
        portfolio: Arc<PortfolioService>,
        queue_capacity: usize,
    ) -> Self {
        Self {
            registry,
            portfolio,
            queue_capacity: queue_capacity.max(1),
        }
    }

    /// Run the session until the client stops sending, the transport fails,
    /// or `cancel` fires.
    ///
    /// Returns only after every subscription the session opened has been
    /// released and every forwarding task has finished.
    pub async fn run<A, S>(&self, source: A, mut sink: S, cancel: CancellationToken) -> SessionEnd
    where
        A: ActionSource + 'static,
        S: UpdateSink<PortfolioEvent>,
    {
        let session_cancel = cancel.child_token();
        let (outbound_tx, mut outbound_rx) = mpsc::channel(self.queue_capacity);
        let (done_tx, mut done_rx) = oneshot::channel();

        let inbound = Inbound {
            registry: Arc::clone(&self.registry),
            portfolio: Arc::clone(&self.portfolio),
            outbound: outbound_tx,
            cancel: session_cancel.clone(),
        };
        let inbound_task = tokio::spawn(inbound.run(source, done_tx));

        let end = loop {
            tokio::select! {
                done = &mut done_rx => {
                    break match done {
                        Ok(Ok(())) => SessionEnd::InputClosed,
                        Ok(Err(e)) => SessionEnd::Transport(e),
                        Err(_) => SessionEnd::Cancelled,
                    };
                }
                () = session_cancel.cancelled() => break SessionEnd::Cancelled,
                event = outbound_rx.recv() => {
                    let Some(event) = event else {
                        break SessionEnd::InputClosed;
                    };
                    tokio::select! {
                        sent = sink.send(event) => {
                            if let Err(e) = sent {
                                break SessionEnd::Transport(e);
                            }
                        }
                        () = session_cancel.cancelled() => break SessionEnd::Cancelled,
                    }
                }
            }
        };

        session_cancel.cancel();
        drop(outbound_rx);
        if let Err(e) = inbound_task.await {
            tracing::error!(error = %e, "Session inbound task failed");
        }

        tracing::debug!(reason = end.as_str(), "Live session ended");
        end
    }
}

// =============================================================================
// Inbound Task
// =============================================================================

struct Inbound {
    registry: Arc<SubscriptionRegistry>,
    portfolio: Arc<PortfolioService>,
    outbound: mpsc::Sender<PortfolioEvent>,
    cancel: CancellationToken,
}

impl Inbound {
    async fn run<A: ActionSource>(
        self,
        mut source: A,
        done: oneshot::Sender<Result<(), TransportError>>,
    ) {
        let mut subscriptions = SessionSubscriptions::new(Arc::clone(&self.registry));
        let mut forwarders = JoinSet::new();

        let result = loop {
            let received = tokio::select! {
                () = self.cancel.cancelled() => break Ok(()),
                received = source.receive() => received,
            };

            match received {
                Ok(Some(action)) => {
                    self.apply(action, &mut subscriptions, &mut forwarders).await;
                }
                Ok(None) => break Ok(()),
                Err(e) => break Err(e),
            }

            while let Some(joined) = forwarders.try_join_next() {
                log_forwarder_exit(joined);
            }
        };

        if let Err(e) = &result {
            tracing::warn!(error = %e, "Session input failed");
        }
        let _ = done.send(result);

        subscriptions.close_all();
        while let Some(joined) = forwarders.join_next().await {
            log_forwarder_exit(joined);
        }
    }

    async fn apply(
        &self,
        action: SessionAction,
        subscriptions: &mut SessionSubscriptions,
        forwarders: &mut JoinSet<()>,
    ) {
        tracing::debug!(action = action.name(), "Session action");

        match action {
            SessionAction::Subscribe { symbol } => {
                let Some(symbol) = normalize_symbol(&symbol) else {
                    tracing::warn!("Ignoring subscribe without symbol");
                    return;
                };
                match subscriptions.open(&symbol) {
                    Some(subscription) => {
                        forwarders.spawn(forward(
                            subscription,
                            self.outbound.clone(),
                            self.cancel.clone(),
                        ));
                    }
                    None => tracing::debug!(symbol = %symbol, "Already subscribed"),
                }
            }
            SessionAction::Unsubscribe { symbol } => {
                let Some(symbol) = normalize_symbol(&symbol) else {
                    return;
                };
                if !subscriptions.close(&symbol) {
                    tracing::debug!(symbol = %symbol, "Unsubscribe without subscription");
                }
            }
            SessionAction::AddStock(position) => {
                let user_id = position.user_id.clone();
                if let Err(e) = self.portfolio.add_stock(position).await {
                    tracing::warn!(user_id = %user_id, error = %e, "Failed to add stock");
                    return;
                }
                match self.portfolio.get_portfolio(&user_id).await {
                    Ok(summary) => {
                        self.push(PortfolioEvent::PortfolioSummary {
                            summary,
                            timestamp: unix_now(),
                        })
                        .await;
                    }
                    Err(e) => {
                        tracing::warn!(user_id = %user_id, error = %e, "Failed to load portfolio");
                    }
                }
            }
            SessionAction::RemoveStock { symbol } => {
                tracing::warn!(symbol = %symbol, "Remove stock is not supported over the stream");
            }
        }
    }

    async fn push(&self, event: PortfolioEvent) {
        tokio::select! {
            sent = self.outbound.send(event) => {
                if sent.is_err() {
                    tracing::debug!("Outbound queue closed");
                }
            }
            () = self.cancel.cancelled() => {}
        }
    }
}

/// Drain one subscription into the outbound queue until it closes, the queue
/// closes, or the session is cancelled.
async fn forward(
    mut subscription: Subscription,
    outbound: mpsc::Sender<PortfolioEvent>,
    cancel: CancellationToken,
) {
    loop {
        let update = tokio::select! {
            () = cancel.cancelled() => break,
            update = subscription.recv() => update,
        };
        let Some(update) = update else {
            break;
        };

        let event = PortfolioEvent::PriceChange {
            update,
            timestamp: unix_now(),
        };
        tokio::select! {
            sent = outbound.send(event) => {
                if sent.is_err() {
                    break;
                }
            }
            () = cancel.cancelled() => break,
        }
    }
    tracing::trace!(symbol = subscription.symbol(), "Forwarder stopped");
}

fn log_forwarder_exit(joined: Result<(), tokio::task::JoinError>) {
    if let Err(e) = joined {
        tracing::error!(error = %e, "Forwarding task failed");
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::application::services::PriceService;
    use crate::application::services::DEFAULT_CACHE_TTL;
    use crate::application::services::streaming::testing::{ChannelSink, ChannelSource};
    use crate::domain::portfolio::NewPosition;
    use crate::domain::pricing::{PriceStore, PriceUpdate};
    use crate::infrastructure::cache::MokaPriceCache;
    use crate::infrastructure::persistence::{InMemoryAlertStore, InMemoryPortfolioStore};

    const TIMEOUT: Duration = Duration::from_secs(2);

    struct Harness {
        registry: Arc<SubscriptionRegistry>,
        store: Arc<PriceStore>,
        actions: mpsc::Sender<Result<SessionAction, TransportError>>,
        events: mpsc::Receiver<PortfolioEvent>,
        cancel: CancellationToken,
        handle: tokio::task::JoinHandle<SessionEnd>,
    }

    fn start(seeds: &[(&str, f64)]) -> Harness {
        let registry = Arc::new(SubscriptionRegistry::new(16));
        let store = Arc::new(PriceStore::with_seeds(seeds));
        let prices = Arc::new(PriceService::new(
            Arc::clone(&store),
            Arc::new(MokaPriceCache::new(100)),
            DEFAULT_CACHE_TTL,
        ));
        let portfolio = Arc::new(PortfolioService::new(
            Arc::new(InMemoryPortfolioStore::new()),
            Arc::new(InMemoryAlertStore::new()),
            prices,
        ));
        let session = LiveSession::new(Arc::clone(&registry), portfolio, 16);

        let (action_tx, action_rx) = mpsc::channel(16);
        let (event_tx, event_rx) = mpsc::channel(16);
        let cancel = CancellationToken::new();
        let handle = {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                session
                    .run(ChannelSource(action_rx), ChannelSink(event_tx), cancel)
                    .await
            })
        };

        Harness {
            registry,
            store,
            actions: action_tx,
            events: event_rx,
            cancel,
            handle,
        }
    }

    fn subscribe(symbol: &str) -> Result<SessionAction, TransportError> {
        Ok(SessionAction::Subscribe {
            symbol: symbol.to_string(),
        })
    }

    async fn wait_for_subscribers(registry: &SubscriptionRegistry, symbol: &str, count: usize) {
        tokio::time::timeout(TIMEOUT, async {
            while registry.subscriber_count(symbol) != count {
                tokio::time::sleep(Duration::from_millis(2)).await;
            }
        })
        .await
        .unwrap();
    }

    async fn next_event(events: &mut mpsc::Receiver<PortfolioEvent>) -> PortfolioEvent {
        tokio::time::timeout(TIMEOUT, events.recv())
            .await
            .unwrap()
            .unwrap()
    }

    #[tokio::test]
    async fn subscribe_forwards_price_changes() {
        let mut h = start(&[("TSLA", 242.80)]);

        h.actions.send(subscribe("tsla")).await.unwrap();
        wait_for_subscribers(&h.registry, "TSLA", 1).await;

        let update = h.store.get("TSLA").unwrap().advance(1.0, 10.0, unix_now());
        h.registry.broadcast("TSLA", &update);

        match next_event(&mut h.events).await {
            PortfolioEvent::PriceChange {
                update: received,
                timestamp,
            } => {
                assert_eq!(received, update);
                assert!(timestamp > 0);
            }
            other => panic!("unexpected event: {other:?}"),
        }

        h.cancel.cancel();
        let end = tokio::time::timeout(TIMEOUT, h.handle).await.unwrap().unwrap();
        assert_eq!(end, SessionEnd::Cancelled);
        assert_eq!(h.registry.stats().subscription_count, 0);
    }

    #[tokio::test]
    async fn duplicate_subscribe_is_ignored() {
        let mut h = start(&[]);

        h.actions.send(subscribe("AAPL")).await.unwrap();
        h.actions.send(subscribe("AAPL")).await.unwrap();
        h.actions.send(subscribe("MSFT")).await.unwrap();
        wait_for_subscribers(&h.registry, "MSFT", 1).await;

        assert_eq!(h.registry.subscriber_count("AAPL"), 1);

        h.registry
            .broadcast("AAPL", &PriceUpdate::opening("AAPL", 1.0, 1));
        assert!(matches!(
            next_event(&mut h.events).await,
            PortfolioEvent::PriceChange { .. }
        ));
        assert!(h.events.try_recv().is_err());

        drop(h.actions);
        tokio::time::timeout(TIMEOUT, h.handle).await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn unsubscribe_stops_that_symbol_only() {
        let mut h = start(&[]);

        h.actions.send(subscribe("AAPL")).await.unwrap();
        h.actions.send(subscribe("MSFT")).await.unwrap();
        wait_for_subscribers(&h.registry, "MSFT", 1).await;
        wait_for_subscribers(&h.registry, "AAPL", 1).await;

        h.actions
            .send(Ok(SessionAction::Unsubscribe {
                symbol: "AAPL".to_string(),
            }))
            .await
            .unwrap();
        wait_for_subscribers(&h.registry, "AAPL", 0).await;

        h.registry
            .broadcast("AAPL", &PriceUpdate::opening("AAPL", 1.0, 1));
        h.registry
            .broadcast("MSFT", &PriceUpdate::opening("MSFT", 2.0, 1));

        match next_event(&mut h.events).await {
            PortfolioEvent::PriceChange { update, .. } => assert_eq!(update.symbol, "MSFT"),
            other => panic!("expected a price change, got {other:?}"),
        }

        h.cancel.cancel();
        tokio::time::timeout(TIMEOUT, h.handle).await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn add_stock_tracks_symbol_and_pushes_summary() {
        let mut h = start(&[]);

        h.actions
            .send(Ok(SessionAction::AddStock(NewPosition {
                user_id: "user-1".to_string(),
                symbol: "ibm".to_string(),
                quantity: 2.0,
                purchase_price: 150.0,
                purchase_date: 1_700_000_000,
            })))
            .await
            .unwrap();

        match next_event(&mut h.events).await {
            PortfolioEvent::PortfolioSummary { summary, .. } => {
                assert_eq!(summary.positions.len(), 1);
                assert_eq!(summary.positions[0].stock.symbol, "IBM");
                assert!((summary.total_value - 300.0).abs() < 1e-9);
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert_eq!(h.store.get("IBM").unwrap().current_price, 150.0);

        h.cancel.cancel();
        tokio::time::timeout(TIMEOUT, h.handle).await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn invalid_add_stock_is_not_surfaced() {
        let mut h = start(&[]);

        h.actions
            .send(Ok(SessionAction::AddStock(NewPosition {
                user_id: "user-1".to_string(),
                symbol: "IBM".to_string(),
                quantity: 0.0,
                purchase_price: 150.0,
                purchase_date: 0,
            })))
            .await
            .unwrap();
        h.actions.send(subscribe("AAPL")).await.unwrap();
        wait_for_subscribers(&h.registry, "AAPL", 1).await;

        assert!(h.events.try_recv().is_err());
        assert!(h.store.get("IBM").is_err());
        assert!(!h.handle.is_finished());

        h.cancel.cancel();
        let end = tokio::time::timeout(TIMEOUT, h.handle).await.unwrap().unwrap();
        assert_eq!(end, SessionEnd::Cancelled);
    }

    #[tokio::test]
    async fn end_of_input_releases_everything() {
        let h = start(&[]);

        for symbol in ["AAPL", "MSFT", "TSLA"] {
            h.actions.send(subscribe(symbol)).await.unwrap();
        }
        wait_for_subscribers(&h.registry, "TSLA", 1).await;
        drop(h.actions);

        let end = tokio::time::timeout(TIMEOUT, h.handle).await.unwrap().unwrap();

        assert_eq!(end, SessionEnd::InputClosed);
        assert_eq!(h.registry.stats().subscription_count, 0);
    }

    #[tokio::test]
    async fn input_error_ends_session() {
        let h = start(&[]);

        h.actions.send(subscribe("AAPL")).await.unwrap();
        wait_for_subscribers(&h.registry, "AAPL", 1).await;
        h.actions
            .send(Err(TransportError::Receive {
                message: "stream reset".to_string(),
            }))
            .await
            .unwrap();

        let end = tokio::time::timeout(TIMEOUT, h.handle).await.unwrap().unwrap();

        assert!(matches!(
            end,
            SessionEnd::Transport(TransportError::Receive { .. })
        ));
        assert_eq!(h.registry.stats().subscription_count, 0);
    }

    #[tokio::test]
    async fn closed_sink_ends_session() {
        let h = start(&[]);

        h.actions.send(subscribe("AAPL")).await.unwrap();
        wait_for_subscribers(&h.registry, "AAPL", 1).await;
        drop(h.events);
        h.registry
            .broadcast("AAPL", &PriceUpdate::opening("AAPL", 1.0, 1));

        let end = tokio::time::timeout(TIMEOUT, h.handle).await.unwrap().unwrap();

        assert_eq!(end, SessionEnd::Transport(TransportError::Disconnected));
        assert_eq!(h.registry.stats().subscription_count, 0);
    }

    #[tokio::test]
    async fn remove_stock_is_ignored() {
        let mut h = start(&[]);

        h.actions
            .send(Ok(SessionAction::RemoveStock {
                symbol: "AAPL".to_string(),
            }))
            .await
            .unwrap();
        h.actions.send(subscribe("AAPL")).await.unwrap();
        wait_for_subscribers(&h.registry, "AAPL", 1).await;

        assert!(h.events.try_recv().is_err());

        h.cancel.cancel();
        tokio::time::timeout(TIMEOUT, h.handle).await.unwrap().unwrap();
    }
}
