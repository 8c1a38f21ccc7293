//! Subscription Registry
//!
//! Tracks the live output queues registered against each symbol and fans
//! price updates out to them.
//!
//! # Design
//!
//! Every subscription owns a bounded queue. `broadcast` never blocks: a full
//! queue drops that update for that subscriber only, and a queue whose
//! consumer went away without unsubscribing is pruned on the next broadcast.
//!
//! Mutation and broadcast enumeration share one lock, so a queue is never
//! closed while a send to it is in flight and never written to after it has
//! been removed.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tokio::sync::mpsc::{self, error::TryRecvError, error::TrySendError};

use super::pricing::{PriceUpdate, Symbol};

// =============================================================================
// Types
// =============================================================================

/// Unique identifier for a subscription.
pub type SubscriptionId = u64;

/// Default capacity of each subscription queue.
pub const DEFAULT_SUBSCRIBER_CAPACITY: usize = 100;

/// Registered sender half of a subscription.
#[derive(Debug)]
struct Slot {
    id: SubscriptionId,
    sender: mpsc::Sender<PriceUpdate>,
}

/// Receiving half of a subscription, owned by exactly one consumer.
///
/// Dropping it without calling
/// [`SubscriptionRegistry::unsubscribe`] is allowed; the registry prunes the
/// orphaned slot on the next broadcast for the symbol.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    symbol: Symbol,
    receiver: mpsc::Receiver<PriceUpdate>,
}

impl Subscription {
    /// Subscription identifier.
    #[must_use]
    pub const fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Symbol this subscription is registered against.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Wait for the next update. Returns `None` once the queue is closed and
    /// drained.
    pub async fn recv(&mut self) -> Option<PriceUpdate> {
        self.receiver.recv().await
    }

    /// Take the next update without waiting.
    ///
    /// # Errors
    ///
    /// [`TryRecvError::Empty`] if nothing is queued, [`TryRecvError::Disconnected`]
    /// once the subscription was closed and drained.
    pub fn try_recv(&mut self) -> Result<PriceUpdate, TryRecvError> {
        self.receiver.try_recv()
    }
}

// =============================================================================
// Delivery Report
// =============================================================================

/// Outcome of one broadcast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Subscribers that received the update.
    pub delivered: usize,
    /// Subscribers whose queue was full.
    pub dropped: usize,
    /// Orphaned subscriptions removed during the broadcast.
    pub pruned: usize,
}

// =============================================================================
// Subscription Registry
// =============================================================================

/// Registry of per-symbol subscriber queues.
///
/// # Example
///
/// ```rust
/// use price_stream_server::domain::pricing::PriceUpdate;
/// use price_stream_server::domain::subscription::SubscriptionRegistry;
///
/// let registry = SubscriptionRegistry::new(8);
/// let mut sub = registry.subscribe("MSFT");
///
/// let report = registry.broadcast("MSFT", &PriceUpdate::opening("MSFT", 380.75, 0));
/// assert_eq!(report.delivered, 1);
/// assert_eq!(sub.try_recv().unwrap().symbol, "MSFT");
///
/// registry.unsubscribe("MSFT", sub.id());
/// assert!(sub.try_recv().is_err());
/// ```
#[derive(Debug)]
pub struct SubscriptionRegistry {
    subscriptions: Mutex<HashMap<Symbol, Vec<Slot>>>,
    next_id: AtomicU64,
    capacity: usize,
}

impl Default for SubscriptionRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_SUBSCRIBER_CAPACITY)
    }
}

impl SubscriptionRegistry {
    /// Create a registry whose queues hold `capacity` updates each.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            subscriptions: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            capacity: capacity.max(1),
        }
    }

    /// Queue capacity of each new subscription.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Register a new subscription for `symbol`.
    pub fn subscribe(&self, symbol: &str) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (sender, receiver) = mpsc::channel(self.capacity);

        self.subscriptions
            .lock()
            .entry(symbol.to_string())
            .or_default()
            .push(Slot { id, sender });

        tracing::debug!(symbol, subscription_id = id, "Subscription opened");

        Subscription {
            id,
            symbol: symbol.to_string(),
            receiver,
        }
    }

    /// Remove and close a subscription.
    ///
    /// Returns `false` if no such subscription is registered.
    pub fn unsubscribe(&self, symbol: &str, id: SubscriptionId) -> bool {
        let mut subscriptions = self.subscriptions.lock();
        let Some(slots) = subscriptions.get_mut(symbol) else {
            return false;
        };

        let before = slots.len();
        slots.retain(|slot| slot.id != id);
        let removed = slots.len() != before;

        if slots.is_empty() {
            subscriptions.remove(symbol);
        }
        drop(subscriptions);

        if removed {
            tracing::debug!(symbol, subscription_id = id, "Subscription closed");
        }
        removed
    }

    /// Enqueue `update` to every live subscription for `symbol`.
    pub fn broadcast(&self, symbol: &str, update: &PriceUpdate) -> DeliveryReport {
        let mut report = DeliveryReport::default();
        let mut subscriptions = self.subscriptions.lock();
        let Some(slots) = subscriptions.get_mut(symbol) else {
            return report;
        };

        slots.retain(|slot| match slot.sender.try_send(update.clone()) {
            Ok(()) => {
                report.delivered += 1;
                true
            }
            Err(TrySendError::Full(_)) => {
                report.dropped += 1;
                tracing::warn!(
                    symbol,
                    subscription_id = slot.id,
                    "Subscriber queue full, dropping update"
                );
                true
            }
            Err(TrySendError::Closed(_)) => {
                report.pruned += 1;
                false
            }
        });

        if slots.is_empty() {
            subscriptions.remove(symbol);
        }

        report
    }

    /// Number of live subscriptions for `symbol`.
    #[must_use]
    pub fn subscriber_count(&self, symbol: &str) -> usize {
        self.subscriptions.lock().get(symbol).map_or(0, Vec::len)
    }

    /// Registry-wide statistics.
    #[must_use]
    pub fn stats(&self) -> SubscriptionStats {
        let subscriptions = self.subscriptions.lock();
        SubscriptionStats {
            symbol_count: subscriptions.len(),
            subscription_count: subscriptions.values().map(Vec::len).sum(),
        }
    }
}

// =============================================================================
// Statistics
// =============================================================================

/// Registry statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubscriptionStats {
    /// Symbols with at least one subscription.
    pub symbol_count: usize,
    /// Total live subscriptions.
    pub subscription_count: usize,
}

// =============================================================================
// Tests
// =============================================================================
