//! Polling multi-symbol adapter.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::error::TryRecvError;
use tokio_util::sync::CancellationToken;

use crate::application::ports::UpdateSink;
use crate::domain::pricing::{PriceUpdate, Symbol, normalize_symbol};
use crate::domain::subscription::{Subscription, SubscriptionRegistry};

use super::{SessionEnd, SessionSubscriptions};

/// Default sleep between drain passes.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Streams updates for a fixed set of symbols to one sink.
///
/// Each pass takes everything already queued on every subscription without
/// waiting, forwards it, then sleeps for the poll interval.
#[derive(Debug, Clone)]
pub struct PollingSession {
    registry: Arc<SubscriptionRegistry>,
    poll_interval: Duration,
}

impl PollingSession {
    /// Create a polling adapter.
    #[must_use]
    pub fn new(registry: Arc<SubscriptionRegistry>, poll_interval: Duration) -> Self {
        Self {
            registry,
            poll_interval,
        }
    }

    /// Normalize and deduplicate requested symbols, keeping request order.
    #[must_use]
    pub fn requested_symbols(raw: &[String]) -> Vec<Symbol> {
        let mut symbols: Vec<Symbol> = Vec::with_capacity(raw.len());
        for symbol in raw.iter().filter_map(|s| normalize_symbol(s)) {
            if !symbols.contains(&symbol) {
                symbols.push(symbol);
            }
        }
        symbols
    }

    /// Run the session until cancellation, a closed queue, or a transport
    /// failure.
    pub async fn run<S>(
        &self,
        symbols: &[String],
        mut sink: S,
        cancel: CancellationToken,
    ) -> SessionEnd
    where
        S: UpdateSink<PriceUpdate>,
    {
        let mut guard = SessionSubscriptions::new(Arc::clone(&self.registry));
        let mut subscriptions: Vec<Subscription> = Self::requested_symbols(symbols)
            .iter()
            .filter_map(|symbol| guard.open(symbol))
            .collect();

        tracing::debug!(symbols = subscriptions.len(), "Polling session started");

        let end = loop {
            if cancel.is_cancelled() {
                break SessionEnd::Cancelled;
            }

            if let Err(end) = drain(&mut subscriptions, &mut sink, &cancel).await {
                break end;
            }

            tokio::select! {
                () = cancel.cancelled() => break SessionEnd::Cancelled,
                () = tokio::time::sleep(self.poll_interval) => {}
            }
        };

        guard.close_all();
        tracing::debug!(reason = end.as_str(), "Polling session ended");
        end
    }
}

/// Forward everything already queued. A send blocked on a slow client still
/// yields to cancellation.
async fn drain<S>(
    subscriptions: &mut [Subscription],
    sink: &mut S,
    cancel: &CancellationToken,
) -> Result<(), SessionEnd>
where
    S: UpdateSink<PriceUpdate>,
{
    for subscription in subscriptions.iter_mut() {
        loop {
            match subscription.try_recv() {
                Ok(update) => {
                    tokio::select! {
                        sent = sink.send(update) => sent.map_err(SessionEnd::Transport)?,
                        () = cancel.cancelled() => return Err(SessionEnd::Cancelled),
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    return Err(SessionEnd::QueueClosed {
                        symbol: subscription.symbol().to_string(),
                    });
                }
            }
        }
    }
    Ok(())
}
