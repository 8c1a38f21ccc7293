//! Portfolio Positions and Price Alerts
//!
//! Value types for stock positions held by a user and the price alerts they
//! register. Valuation against the latest price lives here so that the gRPC
//! surface and the streaming session compute identical numbers.

use serde::{Deserialize, Serialize};

use super::pricing::Symbol;

// =============================================================================
// Positions
// =============================================================================

/// A stock position as recorded by the portfolio store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    /// Position identifier.
    pub id: String,
    /// Owning user.
    pub user_id: String,
    /// Uppercase ticker.
    pub symbol: Symbol,
    /// Display name.
    pub name: String,
    /// Number of shares held.
    pub quantity: f64,
    /// Price paid per share.
    pub purchase_price: f64,
    /// Unix seconds of the purchase.
    pub purchase_date: i64,
}

impl Stock {
    /// Amount paid for the whole position.
    #[must_use]
    pub fn cost_basis(&self) -> f64 {
        self.purchase_price * self.quantity
    }
}

/// Input for recording a new position.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPosition {
    /// Owning user.
    pub user_id: String,
    /// Uppercase ticker.
    pub symbol: Symbol,
    /// Number of shares, must be positive.
    pub quantity: f64,
    /// Price paid per share, must be positive.
    pub purchase_price: f64,
    /// Unix seconds of the purchase.
    pub purchase_date: i64,
}

/// A position valued at a current price.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuedPosition {
    /// The underlying position.
    pub stock: Stock,
    /// Price used for valuation.
    pub current_price: f64,
    /// Unrealized gain or loss in currency.
    pub gain_loss: f64,
    /// Unrealized gain or loss as a percentage of cost basis.
    pub gain_loss_percent: f64,
}

impl ValuedPosition {
    /// Value `stock` at `current_price`.
    #[must_use]
    pub fn new(stock: Stock, current_price: f64) -> Self {
        let gain_loss = (current_price - stock.purchase_price) * stock.quantity;
        let gain_loss_percent = percent_of(gain_loss, stock.cost_basis());
        Self {
            stock,
            current_price,
            gain_loss,
            gain_loss_percent,
        }
    }

    /// Market value of the position.
    #[must_use]
    pub fn market_value(&self) -> f64 {
        self.current_price * self.stock.quantity
    }
}

/// Aggregate valuation of a user's positions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortfolioSummary {
    /// Each position valued at its latest price.
    pub positions: Vec<ValuedPosition>,
    /// Sum of market values.
    pub total_value: f64,
    /// Sum of unrealized gains and losses.
    pub total_gain_loss: f64,
    /// Total gain or loss over the total cost basis.
    pub total_gain_loss_percent: f64,
}

impl PortfolioSummary {
    /// Summarize already-valued positions.
    #[must_use]
    pub fn from_positions(positions: Vec<ValuedPosition>) -> Self {
        let total_value = positions.iter().map(ValuedPosition::market_value).sum();
        let total_gain_loss = positions.iter().map(|p| p.gain_loss).sum();
        let total_cost: f64 = positions.iter().map(|p| p.stock.cost_basis()).sum();

        Self {
            positions,
            total_value,
            total_gain_loss,
            total_gain_loss_percent: percent_of(total_gain_loss, total_cost),
        }
    }
}

fn percent_of(amount: f64, basis: f64) -> f64 {
    if basis > 0.0 {
        amount / basis * 100.0
    } else {
        0.0
    }
}

// =============================================================================
// Alerts
// =============================================================================

/// Direction a price must cross for an alert to fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertCondition {
    /// Fires when the price rises to or above the target.
    Above,
    /// Fires when the price falls to or below the target.
    Below,
}

impl AlertCondition {
    /// Get the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Above => "ABOVE",
            Self::Below => "BELOW",
        }
    }

    /// Whether `price` satisfies this condition for `target`.
    #[must_use]
    pub fn is_met(self, target: f64, price: f64) -> bool {
        match self {
            Self::Above => price >= target,
            Self::Below => price <= target,
        }
    }
}

/// A price alert registered by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceAlert {
    /// Alert identifier.
    pub id: String,
    /// Owning user.
    pub user_id: String,
    /// Uppercase ticker.
    pub symbol: Symbol,
    /// Target price.
    pub target_price: f64,
    /// Crossing direction.
    pub condition: AlertCondition,
    /// Unix seconds of creation.
    pub created_at: i64,
}

// =============================================================================
// Tests
// =============================================================================
