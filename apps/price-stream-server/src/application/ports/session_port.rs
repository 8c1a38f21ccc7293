//! Session Transport Ports
//!
//! Interfaces between a streaming session and the client transport that
//! carries it. Any error from either port terminates that session only.

use async_trait::async_trait;

use crate::domain::portfolio::{NewPosition, PortfolioSummary};
use crate::domain::pricing::PriceUpdate;

/// Transport failure for one session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The client went away.
    #[error("Client disconnected")]
    Disconnected,

    /// Reading the next client message failed.
    #[error("Failed to receive from client: {message}")]
    Receive {
        /// Error details.
        message: String,
    },
}

/// A client request inside a bidirectional session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    /// Start receiving price changes for a symbol.
    Subscribe {
        /// Raw symbol as sent by the client.
        symbol: String,
    },
    /// Stop receiving price changes for a symbol.
    Unsubscribe {
        /// Raw symbol as sent by the client.
        symbol: String,
    },
    /// Record a new position.
    AddStock(NewPosition),
    /// Delete a position. Not supported over the stream.
    RemoveStock {
        /// Raw symbol as sent by the client.
        symbol: String,
    },
}

impl SessionAction {
    /// Action name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Subscribe { .. } => "subscribe",
            Self::Unsubscribe { .. } => "unsubscribe",
            Self::AddStock(_) => "add_stock",
            Self::RemoveStock { .. } => "remove_stock",
        }
    }
}

/// An event pushed to a bidirectional session's client.
#[derive(Debug, Clone, PartialEq)]
pub enum PortfolioEvent {
    /// A subscribed symbol's price moved.
    PriceChange {
        /// The new price.
        update: PriceUpdate,
        /// Unix seconds when the event was produced.
        timestamp: i64,
    },
    /// The user's portfolio after a change.
    PortfolioSummary {
        /// Valued positions and totals.
        summary: PortfolioSummary,
        /// Unix seconds when the event was produced.
        timestamp: i64,
    },
}

/// Outbound half of a session transport.
#[async_trait]
pub trait UpdateSink<T: Send + 'static>: Send {
    /// Deliver one item to the client.
    async fn send(&mut self, item: T) -> Result<(), TransportError>;
}

/// Inbound half of a session transport.
#[async_trait]
pub trait ActionSource: Send {
    /// Next client action. `Ok(None)` is a graceful end of input.
    async fn receive(&mut self) -> Result<Option<SessionAction>, TransportError>;
}
