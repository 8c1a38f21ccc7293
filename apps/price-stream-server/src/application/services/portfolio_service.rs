//! Portfolio Service
//!
//! Position and alert use cases. Adding a position registers its symbol with
//! the price store so the simulation starts moving it.

use std::sync::Arc;

use crate::application::ports::{AlertStore, PortfolioError, PortfolioStore};
use crate::domain::portfolio::{
    AlertCondition, NewPosition, PortfolioSummary, PriceAlert, Stock, ValuedPosition,
};
use crate::domain::pricing::{PriceError, normalize_symbol};

use super::PriceService;

/// Position, valuation and alert use cases.
pub struct PortfolioService {
    stocks: Arc<dyn PortfolioStore>,
    alerts: Arc<dyn AlertStore>,
    prices: Arc<PriceService>,
}

impl std::fmt::Debug for PortfolioService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioService").finish_non_exhaustive()
    }
}

impl PortfolioService {
    /// Create a portfolio service.
    #[must_use]
    pub fn new(
        stocks: Arc<dyn PortfolioStore>,
        alerts: Arc<dyn AlertStore>,
        prices: Arc<PriceService>,
    ) -> Self {
        Self {
            stocks,
            alerts,
            prices,
        }
    }

    /// Record a new position and start tracking its symbol.
    ///
    /// # Errors
    ///
    /// [`PortfolioError::InvalidInput`] for a blank user or symbol or a
    /// non-positive quantity or price; store errors are passed through.
    pub async fn add_stock(&self, position: NewPosition) -> Result<ValuedPosition, PortfolioError> {
        let position = validate_position(position)?;

        let stock = self.stocks.add_stock(position).await?;
        if self.prices.store().ensure(&stock.symbol, stock.purchase_price) {
            tracing::info!(symbol = %stock.symbol, "Tracking new symbol");
        }

        tracing::info!(
            user_id = %stock.user_id,
            symbol = %stock.symbol,
            stock_id = %stock.id,
            "Stock added"
        );

        Ok(self.value(stock).await)
    }

    /// Value every position of a user at the latest price.
    ///
    /// # Errors
    ///
    /// [`PortfolioError::InvalidInput`] for a blank user; store errors are
    /// passed through.
    pub async fn get_portfolio(&self, user_id: &str) -> Result<PortfolioSummary, PortfolioError> {
        let user_id = require_user(user_id)?;
        let stocks = self.stocks.get_portfolio(user_id).await?;

        let mut positions = Vec::with_capacity(stocks.len());
        for stock in stocks {
            positions.push(self.value(stock).await);
        }

        Ok(PortfolioSummary::from_positions(positions))
    }

    /// Delete one of the user's positions.
    ///
    /// # Errors
    ///
    /// [`PortfolioError::StockNotFound`] if the position does not belong to
    /// the user.
    pub async fn remove_stock(&self, user_id: &str, stock_id: &str) -> Result<(), PortfolioError> {
        let user_id = require_user(user_id)?;
        if stock_id.trim().is_empty() {
            return Err(PortfolioError::invalid("stock_id is required"));
        }

        self.stocks.remove_stock(user_id, stock_id).await?;
        tracing::info!(user_id, stock_id, "Stock removed");
        Ok(())
    }

    /// Register a price alert and return its id.
    ///
    /// # Errors
    ///
    /// [`PortfolioError::InvalidInput`] for a blank user or symbol or a
    /// non-positive target.
    pub async fn set_price_alert(
        &self,
        user_id: &str,
        symbol: &str,
        target_price: f64,
        condition: AlertCondition,
    ) -> Result<String, PortfolioError> {
        let user_id = require_user(user_id)?;
        let symbol = normalize_symbol(symbol)
            .ok_or_else(|| PortfolioError::invalid("symbol is required"))?;
        if !(target_price.is_finite() && target_price > 0.0) {
            return Err(PortfolioError::invalid("target_price must be positive"));
        }

        let alert_id = self
            .alerts
            .create_alert(user_id, &symbol, target_price, condition)
            .await?;

        tracing::info!(
            user_id,
            symbol = %symbol,
            target_price,
            condition = condition.as_str(),
            alert_id = %alert_id,
            "Price alert set"
        );
        Ok(alert_id)
    }

    /// All alerts registered by a user.
    ///
    /// # Errors
    ///
    /// [`PortfolioError::InvalidInput`] for a blank user.
    pub async fn list_alerts(&self, user_id: &str) -> Result<Vec<PriceAlert>, PortfolioError> {
        let user_id = require_user(user_id)?;
        self.alerts.list_alerts(user_id).await
    }

    async fn value(&self, stock: Stock) -> ValuedPosition {
        let current_price = match self.prices.get_current_price(&stock.symbol).await {
            Ok(update) => update.current_price,
            Err(PriceError::NotFound(_) | PriceError::EmptySymbol) => stock.purchase_price,
        };
        ValuedPosition::new(stock, current_price)
    }
}

fn require_user(user_id: &str) -> Result<&str, PortfolioError> {
    let trimmed = user_id.trim();
    if trimmed.is_empty() {
        return Err(PortfolioError::invalid("user_id is required"));
    }
    Ok(trimmed)
}

fn validate_position(position: NewPosition) -> Result<NewPosition, PortfolioError> {
    let user_id = require_user(&position.user_id)?.to_string();
    let symbol = normalize_symbol(&position.symbol)
        .ok_or_else(|| PortfolioError::invalid("symbol is required"))?;
    if !(position.quantity.is_finite() && position.quantity > 0.0) {
        return Err(PortfolioError::invalid("quantity must be positive"));
    }
    if !(position.purchase_price.is_finite() && position.purchase_price > 0.0) {
        return Err(PortfolioError::invalid("purchase_price must be positive"));
    }

    Ok(NewPosition {
        user_id,
        symbol,
        ..position
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockPortfolioStore;
    use crate::application::services::DEFAULT_CACHE_TTL;
    use crate::domain::pricing::PriceStore;
    use crate::infrastructure::cache::MokaPriceCache;
    use crate::infrastructure::persistence::{InMemoryAlertStore, InMemoryPortfolioStore};

    fn prices(seeds: &[(&str, f64)]) -> Arc<PriceService> {
        Arc::new(PriceService::new(
            Arc::new(PriceStore::with_seeds(seeds)),
            Arc::new(MokaPriceCache::new(100)),
            DEFAULT_CACHE_TTL,
        ))
    }

    fn service_with(prices: Arc<PriceService>) -> PortfolioService {
        PortfolioService::new(
            Arc::new(InMemoryPortfolioStore::new()),
            Arc::new(InMemoryAlertStore::new()),
            prices,
        )
    }

    fn position(symbol: &str, quantity: f64, purchase_price: f64) -> NewPosition {
        NewPosition {
            user_id: "user-1".to_string(),
            symbol: symbol.to_string(),
            quantity,
            purchase_price,
            purchase_date: 1_700_000_000,
        }
    }

    #[tokio::test]
    async fn add_stock_registers_unknown_symbol() {
        let prices = prices(&[]);
        let service = service_with(Arc::clone(&prices));

        let valued = service.add_stock(position("ibm", 3.0, 150.0)).await.unwrap();

        assert_eq!(valued.stock.symbol, "IBM");
        assert_eq!(prices.store().get("IBM").unwrap().current_price, 150.0);
        assert_eq!(valued.current_price, 150.0);
        assert_eq!(valued.gain_loss, 0.0);
    }

    #[tokio::test]
    async fn add_stock_keeps_existing_price() {
        let prices = prices(&[("AAPL", 175.50)]);
        let service = service_with(Arc::clone(&prices));

        let valued = service
            .add_stock(position("AAPL", 10.0, 150.0))
            .await
            .unwrap();

        assert_eq!(prices.store().get("AAPL").unwrap().current_price, 175.50);
        assert!((valued.gain_loss - 255.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn add_stock_rejects_invalid_input() {
        let service = service_with(prices(&[]));

        for bad in [
            position("", 1.0, 1.0),
            position("AAPL", 0.0, 1.0),
            position("AAPL", -1.0, 1.0),
            position("AAPL", 1.0, 0.0),
            position("AAPL", 1.0, f64::NAN),
            NewPosition {
                user_id: " ".to_string(),
                ..position("AAPL", 1.0, 1.0)
            },
        ] {
            let err = service.add_stock(bad).await.unwrap_err();
            assert!(matches!(err, PortfolioError::InvalidInput { .. }));
        }
    }

    #[tokio::test]
    async fn add_stock_store_failure_does_not_track_symbol() {
        let prices = prices(&[]);
        let mut stocks = MockPortfolioStore::new();
        stocks.expect_add_stock().returning(|_| {
            Err(PortfolioError::Storage {
                message: "disk full".to_string(),
            })
        });
        let service = PortfolioService::new(
            Arc::new(stocks),
            Arc::new(InMemoryAlertStore::new()),
            Arc::clone(&prices),
        );

        let err = service.add_stock(position("IBM", 1.0, 1.0)).await.unwrap_err();

        assert!(matches!(err, PortfolioError::Storage { .. }));
        assert!(prices.store().is_empty());
    }

    #[tokio::test]
    async fn get_portfolio_values_at_latest_price() {
        let prices = prices(&[("AAPL", 100.0), ("MSFT", 200.0)]);
        let service = service_with(Arc::clone(&prices));
        service.add_stock(position("AAPL", 10.0, 100.0)).await.unwrap();
        service.add_stock(position("MSFT", 5.0, 200.0)).await.unwrap();

        let moved = prices.store().get("AAPL").unwrap().advance(10.0, 0.0, 0);
        prices.store().put(moved);

        let summary = service.get_portfolio("user-1").await.unwrap();

        assert_eq!(summary.positions.len(), 2);
        assert!((summary.total_value - (1100.0 + 1000.0)).abs() < 1e-9);
        assert!((summary.total_gain_loss - 100.0).abs() < 1e-9);
        assert!((summary.total_gain_loss_percent - 5.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn get_portfolio_for_new_user_is_empty() {
        let service = service_with(prices(&[]));

        let summary = service.get_portfolio("nobody").await.unwrap();

        assert_eq!(summary, PortfolioSummary::default());
    }

    #[tokio::test]
    async fn remove_stock_only_for_owner() {
        let service = service_with(prices(&[]));
        let valued = service.add_stock(position("AAPL", 1.0, 1.0)).await.unwrap();

        let err = service
            .remove_stock("someone-else", &valued.stock.id)
            .await
            .unwrap_err();
        assert!(matches!(err, PortfolioError::StockNotFound { .. }));

        service
            .remove_stock("user-1", &valued.stock.id)
            .await
            .unwrap();
        assert!(service.get_portfolio("user-1").await.unwrap().positions.is_empty());
    }

    #[tokio::test]
    async fn set_price_alert_returns_id() {
        let service = service_with(prices(&[]));

        let id = service
            .set_price_alert("user-1", "aapl", 180.0, AlertCondition::Above)
            .await
            .unwrap();

        let alerts = service.list_alerts("user-1").await.unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].id, id);
        assert_eq!(alerts[0].symbol, "AAPL");
    }

    #[tokio::test]
    async fn set_price_alert_rejects_non_positive_target() {
        let service = service_with(prices(&[]));

        let err = service
            .set_price_alert("user-1", "AAPL", 0.0, AlertCondition::Below)
            .await
            .unwrap_err();

        assert!(matches!(err, PortfolioError::InvalidInput { .. }));
    }
}
