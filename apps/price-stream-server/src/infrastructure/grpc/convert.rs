//! Proto Conversions and Session Transports
//!
//! Maps domain values to `portfolio.v1` messages and adapts tonic channels
//! and request streams to the session transport ports.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tonic::{Status, Streaming};

use super::proto::portfolio::v1::{
    self as proto, portfolio_action::ActionType, portfolio_update::UpdateType,
};
use crate::application::ports::{
    ActionSource, PortfolioError, PortfolioEvent, SessionAction, TransportError, UpdateSink,
};
use crate::domain::portfolio::{
    AlertCondition, NewPosition, PortfolioSummary, PriceAlert, ValuedPosition,
};
use crate::domain::pricing::{PriceError, PriceUpdate, unix_now};

// =============================================================================
// Outbound Conversions
// =============================================================================

pub(super) fn price_update_to_proto(update: &PriceUpdate) -> proto::PriceUpdate {
    proto::PriceUpdate {
        symbol: update.symbol.clone(),
        current_price: update.current_price,
        change: update.change,
        change_percentage: update.change_percent,
        timestamp: update.timestamp,
        volume: update.volume,
        day_high: update.day_high,
        day_low: update.day_low,
    }
}

pub(super) fn position_to_proto(position: &ValuedPosition) -> proto::Stock {
    proto::Stock {
        id: position.stock.id.clone(),
        symbol: position.stock.symbol.clone(),
        name: position.stock.name.clone(),
        quantity: position.stock.quantity,
        purchase_price: position.stock.purchase_price,
        current_price: position.current_price,
        gain_loss: position.gain_loss,
        gain_loss_percentage: position.gain_loss_percent,
        purchase_date: position.stock.purchase_date,
    }
}

pub(super) fn summary_to_proto(summary: &PortfolioSummary) -> proto::GetPortfolioResponse {
    proto::GetPortfolioResponse {
        stocks: summary.positions.iter().map(position_to_proto).collect(),
        total_value: summary.total_value,
        total_gain_loss: summary.total_gain_loss,
        total_gain_loss_percentage: summary.total_gain_loss_percent,
    }
}

/// Stored alerts have not fired; trigger fields stay zero.
pub(super) fn alert_to_proto(alert: &PriceAlert) -> proto::Alert {
    let condition = match alert.condition {
        AlertCondition::Above => proto::AlertCondition::Above,
        AlertCondition::Below => proto::AlertCondition::Below,
    };
    proto::Alert {
        id: alert.id.clone(),
        symbol: alert.symbol.clone(),
        target_price: alert.target_price,
        triggered_price: 0.0,
        condition: condition.into(),
        created_at: alert.created_at,
        triggered_at: 0,
        is_triggered: false,
    }
}

pub(super) fn event_to_proto(event: &PortfolioEvent) -> proto::PortfolioUpdate {
    match event {
        PortfolioEvent::PriceChange { update, timestamp } => proto::PortfolioUpdate {
            r#type: UpdateType::PriceChange.into(),
            price_update: Some(price_update_to_proto(update)),
            alert: None,
            portfolio_summary: None,
            timestamp: *timestamp,
        },
        PortfolioEvent::PortfolioSummary { summary, timestamp } => proto::PortfolioUpdate {
            r#type: UpdateType::PortfolioSummary.into(),
            price_update: None,
            alert: None,
            portfolio_summary: Some(summary_to_proto(summary)),
            timestamp: *timestamp,
        },
    }
}

// =============================================================================
// Inbound Conversions
// =============================================================================

/// A zero purchase date means "now".
pub(super) fn new_position_from_proto(request: proto::AddStockRequest) -> NewPosition {
    NewPosition {
        user_id: request.user_id,
        symbol: request.symbol,
        quantity: request.quantity,
        purchase_price: request.purchase_price,
        purchase_date: if request.purchase_date > 0 {
            request.purchase_date
        } else {
            unix_now()
        },
    }
}

pub(super) fn alert_condition_from_proto(value: i32) -> Option<AlertCondition> {
    match proto::AlertCondition::try_from(value).ok()? {
        proto::AlertCondition::Above => Some(AlertCondition::Above),
        proto::AlertCondition::Below => Some(AlertCondition::Below),
    }
}

/// Returns `None` for an unknown action type or an add without details.
///
/// Blank user and symbol fields of the add details are taken from the
/// enclosing action.
pub(super) fn action_from_proto(action: proto::PortfolioAction) -> Option<SessionAction> {
    match ActionType::try_from(action.action).ok()? {
        ActionType::Subscribe => Some(SessionAction::Subscribe {
            symbol: action.symbol,
        }),
        ActionType::Unsubscribe => Some(SessionAction::Unsubscribe {
            symbol: action.symbol,
        }),
        ActionType::AddStock => {
            let mut details = action.add_details?;
            if details.user_id.trim().is_empty() {
                details.user_id = action.user_id;
            }
            if details.symbol.trim().is_empty() {
                details.symbol = action.symbol;
            }
            Some(SessionAction::AddStock(new_position_from_proto(details)))
        }
        ActionType::RemoveStock => Some(SessionAction::RemoveStock {
            symbol: action.symbol,
        }),
    }
}

// =============================================================================
// Error Mapping
// =============================================================================

pub(super) fn price_error_to_status(error: &PriceError) -> Status {
    match error {
        PriceError::NotFound(_) => Status::not_found(error.to_string()),
        PriceError::EmptySymbol => Status::invalid_argument(error.to_string()),
    }
}

pub(super) fn portfolio_error_to_status(error: &PortfolioError) -> Status {
    match error {
        PortfolioError::InvalidInput { message } => Status::invalid_argument(message.clone()),
        PortfolioError::StockNotFound { .. } => Status::not_found(error.to_string()),
        PortfolioError::Storage { .. } => Status::internal(error.to_string()),
    }
}

// =============================================================================
// Session Transports
// =============================================================================

/// Response channel of a `StreamPrices` call.
pub(super) struct PriceStreamSink(pub mpsc::Sender<Result<proto::PriceUpdate, Status>>);

#[async_trait]
impl UpdateSink<PriceUpdate> for PriceStreamSink {
    async fn send(&mut self, item: PriceUpdate) -> Result<(), TransportError> {
        self.0
            .send(Ok(price_update_to_proto(&item)))
            .await
            .map_err(|_| TransportError::Disconnected)
    }
}

/// Response channel of a `LiveUpdates` call.
pub(super) struct LiveUpdateSink(pub mpsc::Sender<Result<proto::PortfolioUpdate, Status>>);

#[async_trait]
impl UpdateSink<PortfolioEvent> for LiveUpdateSink {
    async fn send(&mut self, item: PortfolioEvent) -> Result<(), TransportError> {
        self.0
            .send(Ok(event_to_proto(&item)))
            .await
            .map_err(|_| TransportError::Disconnected)
    }
}

/// Request stream of a `LiveUpdates` call.
pub(super) struct ActionStream(pub Streaming<proto::PortfolioAction>);

#[async_trait]
impl ActionSource for ActionStream {
    async fn receive(&mut self) -> Result<Option<SessionAction>, TransportError> {
        loop {
            let message = self.0.message().await.map_err(|status| TransportError::Receive {
                message: status.message().to_string(),
            })?;
            let Some(message) = message else {
                return Ok(None);
            };

            let raw_action = message.action;
            match action_from_proto(message) {
                Some(action) => return Ok(Some(action)),
                None => tracing::warn!(action = raw_action, "Ignoring malformed portfolio action"),
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
