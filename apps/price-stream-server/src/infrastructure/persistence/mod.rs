//! In-Memory Portfolio and Alert Stores
//!
//! Process-local implementations of [`PortfolioStore`] and [`AlertStore`].
//! Contents are lost on restart.

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::application::ports::{AlertStore, PortfolioError, PortfolioStore};
use crate::domain::portfolio::{AlertCondition, NewPosition, PriceAlert, Stock};
use crate::domain::pricing::unix_now;

// =============================================================================
// Positions
// =============================================================================

/// In-memory implementation of [`PortfolioStore`].
#[derive(Debug, Default)]
pub struct InMemoryPortfolioStore {
    // Insertion order; reads reverse it.
    stocks: RwLock<Vec<Stock>>,
}

impl InMemoryPortfolioStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of positions across all users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stocks.read().len()
    }

    /// Whether the store holds no positions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stocks.read().is_empty()
    }
}

#[async_trait]
impl PortfolioStore for InMemoryPortfolioStore {
    async fn add_stock(&self, position: NewPosition) -> Result<Stock, PortfolioError> {
        let stock = Stock {
            id: Uuid::new_v4().to_string(),
            user_id: position.user_id,
            name: position.symbol.clone(),
            symbol: position.symbol,
            quantity: position.quantity,
            purchase_price: position.purchase_price,
            purchase_date: position.purchase_date,
        };
        self.stocks.write().push(stock.clone());
        Ok(stock)
    }

    async fn get_portfolio(&self, user_id: &str) -> Result<Vec<Stock>, PortfolioError> {
        Ok(self
            .stocks
            .read()
            .iter()
            .rev()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn remove_stock(&self, user_id: &str, stock_id: &str) -> Result<(), PortfolioError> {
        let mut stocks = self.stocks.write();
        let position = stocks
            .iter()
            .position(|s| s.id == stock_id && s.user_id == user_id)
            .ok_or_else(|| PortfolioError::StockNotFound {
                stock_id: stock_id.to_string(),
            })?;
        stocks.remove(position);
        Ok(())
    }
}

// =============================================================================
// Alerts
// =============================================================================

/// In-memory implementation of [`AlertStore`].
#[derive(Debug, Default)]
pub struct InMemoryAlertStore {
    alerts: RwLock<Vec<PriceAlert>>,
}

impl InMemoryAlertStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AlertStore for InMemoryAlertStore {
    async fn create_alert(
        &self,
        user_id: &str,
        symbol: &str,
        target_price: f64,
        condition: AlertCondition,
    ) -> Result<String, PortfolioError> {
        let alert = PriceAlert {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            symbol: symbol.to_string(),
            target_price,
            condition,
            created_at: unix_now(),
        };
        let id = alert.id.clone();
        self.alerts.write().push(alert);
        Ok(id)
    }

    async fn list_alerts(&self, user_id: &str) -> Result<Vec<PriceAlert>, PortfolioError> {
        Ok(self
            .alerts
            .read()
            .iter()
            .rev()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }
}

// =============================================================================
// Tests
// =============================================================================
