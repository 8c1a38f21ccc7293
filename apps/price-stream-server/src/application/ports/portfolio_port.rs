//! Portfolio and Alert Store Ports (Driven Ports)
//!
//! Interfaces for persisting stock positions and price alerts.

use async_trait::async_trait;

use crate::domain::portfolio::{AlertCondition, NewPosition, PriceAlert, Stock};

/// Portfolio and alert errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortfolioError {
    /// Request failed validation.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Error details.
        message: String,
    },

    /// No position with this id belongs to the user.
    #[error("Stock not found or unauthorized: {stock_id}")]
    StockNotFound {
        /// The unknown position id.
        stock_id: String,
    },

    /// Backing store failed.
    #[error("Storage error: {message}")]
    Storage {
        /// Error details.
        message: String,
    },
}

impl PortfolioError {
    /// Create an invalid input error.
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

/// Port for stock position persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PortfolioStore: Send + Sync {
    /// Record a new position and return it with its assigned id.
    async fn add_stock(&self, position: NewPosition) -> Result<Stock, PortfolioError>;

    /// All positions for a user, most recent first.
    async fn get_portfolio(&self, user_id: &str) -> Result<Vec<Stock>, PortfolioError>;

    /// Delete one of the user's positions.
    async fn remove_stock(&self, user_id: &str, stock_id: &str) -> Result<(), PortfolioError>;
}

/// Port for price alert persistence.
#[async_trait]
pub trait AlertStore: Send + Sync {
    /// Record an alert and return its id.
    async fn create_alert(
        &self,
        user_id: &str,
        symbol: &str,
        target_price: f64,
        condition: AlertCondition,
    ) -> Result<String, PortfolioError>;

    /// All alerts for a user, most recent first.
    async fn list_alerts(&self, user_id: &str) -> Result<Vec<PriceAlert>, PortfolioError>;
}
