//! Streaming Session Adapters
//!
//! Bridge subscription queues to a client transport.
//!
//! - [`PollingSession`]: many symbols to one outbound stream, drained on a
//!   fixed poll interval
//! - [`LiveSession`]: client actions in, merged price and portfolio events out
//!
//! Both adapters register their subscriptions in a [`SessionSubscriptions`]
//! guard, so every subscription a session opened is released on every exit
//! path, including a panic or the session future being dropped.

use std::collections::HashMap;
use std::sync::Arc;

use crate::application::ports::TransportError;
use crate::domain::pricing::Symbol;
use crate::domain::subscription::{Subscription, SubscriptionId, SubscriptionRegistry};

mod live;
mod polling;

pub use live::{DEFAULT_SESSION_QUEUE_CAPACITY, LiveSession};
pub use polling::{DEFAULT_POLL_INTERVAL, PollingSession};

// =============================================================================
// Session End
// =============================================================================

/// Why a session stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    /// Server shutdown or client cancellation.
    Cancelled,
    /// The client finished sending actions.
    InputClosed,
    /// A subscription queue was closed underneath the session.
    QueueClosed {
        /// Symbol of the closed subscription.
        symbol: Symbol,
    },
    /// The transport failed in either direction.
    Transport(TransportError),
}

impl SessionEnd {
    /// Short reason for logging.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cancelled => "cancelled",
            Self::InputClosed => "input_closed",
            Self::QueueClosed { .. } => "queue_closed",
            Self::Transport(_) => "transport_error",
        }
    }
}

// =============================================================================
// Session Subscriptions
// =============================================================================

/// Subscriptions opened by one session, at most one per symbol.
///
/// Dropping the guard unsubscribes everything still open.
#[derive(Debug)]
pub struct SessionSubscriptions {
    registry: Arc<SubscriptionRegistry>,
    open: HashMap<Symbol, SubscriptionId>,
}

impl SessionSubscriptions {
    /// Create an empty guard over `registry`.
    #[must_use]
    pub fn new(registry: Arc<SubscriptionRegistry>) -> Self {
        Self {
            registry,
            open: HashMap::new(),
        }
    }

    /// Subscribe to `symbol` unless this session already has.
    ///
    /// Returns `None` for a duplicate.
    pub fn open(&mut self, symbol: &str) -> Option<Subscription> {
        if self.open.contains_key(symbol) {
            return None;
        }
        let subscription = self.registry.subscribe(symbol);
        self.open.insert(symbol.to_string(), subscription.id());
        Some(subscription)
    }

    /// Release this session's subscription to `symbol`.
    ///
    /// Returns `false` if the session had none.
    pub fn close(&mut self, symbol: &str) -> bool {
        self.open
            .remove(symbol)
            .is_some_and(|id| self.registry.unsubscribe(symbol, id))
    }

    /// Release every subscription.
    pub fn close_all(&mut self) {
        for (symbol, id) in self.open.drain() {
            self.registry.unsubscribe(&symbol, id);
        }
    }

    /// Whether the session is subscribed to `symbol`.
    #[must_use]
    pub fn contains(&self, symbol: &str) -> bool {
        self.open.contains_key(symbol)
    }

    /// Number of open subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.open.len()
    }

    /// Whether nothing is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}

impl Drop for SessionSubscriptions {
    fn drop(&mut self) {
        self.close_all();
    }
}

// =============================================================================
// Test Doubles
// =============================================================================

#[cfg(test)]
pub(crate) mod testing {
    use async_trait::async_trait;
    use tokio::sync::mpsc;

    use crate::application::ports::{ActionSource, SessionAction, TransportError, UpdateSink};

    /// Sink that forwards into a channel; fails once the receiver is gone.
    pub struct ChannelSink<T>(pub mpsc::Sender<T>);

    #[async_trait]
    impl<T: Send + 'static> UpdateSink<T> for ChannelSink<T> {
        async fn send(&mut self, item: T) -> Result<(), TransportError> {
            self.0
                .send(item)
                .await
                .map_err(|_| TransportError::Disconnected)
        }
    }

    /// Action source fed from a channel; a closed channel is end of input.
    pub struct ChannelSource(pub mpsc::Receiver<Result<SessionAction, TransportError>>);

    #[async_trait]
    impl ActionSource for ChannelSource {
        async fn receive(&mut self) -> Result<Option<SessionAction>, TransportError> {
            match self.0.recv().await {
                Some(Ok(action)) => Ok(Some(action)),
                Some(Err(e)) => Err(e),
                None => Ok(None),
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_deduplicates_per_symbol() {
        let registry = Arc::new(SubscriptionRegistry::new(4));
        let mut subs = SessionSubscriptions::new(Arc::clone(&registry));

        assert!(subs.open("AAPL").is_some());
        assert!(subs.open("AAPL").is_none());
        assert!(subs.open("MSFT").is_some());

        assert_eq!(subs.len(), 2);
        assert_eq!(registry.stats().subscription_count, 2);
    }

    #[test]
    fn close_releases_only_that_symbol() {
        let registry = Arc::new(SubscriptionRegistry::new(4));
        let mut subs = SessionSubscriptions::new(Arc::clone(&registry));
        let _aapl = subs.open("AAPL");
        let _msft = subs.open("MSFT");

        assert!(subs.close("AAPL"));
        assert!(!subs.close("AAPL"));

        assert!(!subs.contains("AAPL"));
        assert!(subs.contains("MSFT"));
        assert_eq!(registry.subscriber_count("AAPL"), 0);
        assert_eq!(registry.subscriber_count("MSFT"), 1);
    }

    #[test]
    fn drop_unsubscribes_everything() {
        let registry = Arc::new(SubscriptionRegistry::new(4));
        let mut subs = SessionSubscriptions::new(Arc::clone(&registry));
        let mut aapl = subs.open("AAPL").unwrap();
        let _msft = subs.open("MSFT");

        drop(subs);

        assert_eq!(registry.stats().subscription_count, 0);
        assert!(matches!(
            aapl.try_recv(),
            Err(tokio::sync::mpsc::error::TryRecvError::Disconnected)
        ));
    }

    #[test]
    fn session_end_reasons() {
        assert_eq!(SessionEnd::Cancelled.as_str(), "cancelled");
        assert_eq!(SessionEnd::InputClosed.as_str(), "input_closed");
        assert_eq!(
            SessionEnd::Transport(TransportError::Disconnected).as_str(),
            "transport_error"
        );
    }
}
