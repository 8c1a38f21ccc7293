//! gRPC Service Implementation
//!
//! Implements `PortfolioService`: unary portfolio and price RPCs plus the
//! two streaming session adapters.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::mpsc;
use tokio_stream::Stream;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;
use tonic::{Request, Response, Status, Streaming};
use tracing::Instrument;
use uuid::Uuid;

use super::convert::{
    ActionStream, LiveUpdateSink, PriceStreamSink, alert_condition_from_proto, alert_to_proto,
    new_position_from_proto, portfolio_error_to_status, position_to_proto, price_error_to_status,
    price_update_to_proto, summary_to_proto,
};
use super::proto::portfolio::v1::{
    AddStockRequest, AddStockResponse, GetAlertsRequest, GetAlertsResponse, GetPortfolioRequest,
    GetPortfolioResponse, GetPriceRequest, PortfolioAction, PortfolioUpdate, PriceUpdate,
    RemoveStockRequest, RemoveStockResponse, SetPriceAlertRequest, SetPriceAlertResponse,
    StreamPricesRequest,
    portfolio_service_server::PortfolioService as PortfolioServiceRpc,
};
use crate::application::services::streaming::{LiveSession, PollingSession, SessionEnd};
use crate::application::services::{PortfolioService, PriceService};
use crate::infrastructure::metrics::{self, SessionKind};

// =============================================================================
// Type Aliases
// =============================================================================

type RpcResult<T> = Result<Response<T>, Status>;
type BoxedStream<T> = Pin<Box<dyn Stream<Item = Result<T, Status>> + Send>>;

/// Buffer between a polling session and its response stream.
const PRICE_STREAM_BUFFER: usize = 256;

// =============================================================================
// Session Tracking
// =============================================================================

/// Counts of streaming sessions currently running.
#[derive(Debug, Default)]
pub struct ActiveSessions {
    polling: AtomicU64,
    live: AtomicU64,
}

impl ActiveSessions {
    /// Running `StreamPrices` sessions.
    #[must_use]
    pub fn polling(&self) -> u64 {
        self.polling.load(Ordering::Relaxed)
    }

    /// Running `LiveUpdates` sessions.
    #[must_use]
    pub fn live(&self) -> u64 {
        self.live.load(Ordering::Relaxed)
    }

    fn counter(&self, kind: SessionKind) -> &AtomicU64 {
        match kind {
            SessionKind::Polling => &self.polling,
            SessionKind::Live => &self.live,
        }
    }

    fn start(self: &Arc<Self>, kind: SessionKind) -> SessionGuard {
        self.counter(kind).fetch_add(1, Ordering::Relaxed);
        metrics::session_started(kind);
        SessionGuard {
            sessions: Arc::clone(self),
            kind,
        }
    }
}

/// Decrements the session count when the session task ends.
struct SessionGuard {
    sessions: Arc<ActiveSessions>,
    kind: SessionKind,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.sessions.counter(self.kind).fetch_sub(1, Ordering::Relaxed);
        metrics::session_ended(self.kind);
    }
}

// =============================================================================
// Server Implementation
// =============================================================================

/// gRPC server for prices and portfolios.
pub struct PriceStreamServer {
    prices: Arc<PriceService>,
    portfolio: Arc<PortfolioService>,
    polling: PollingSession,
    live: LiveSession,
    sessions: Arc<ActiveSessions>,
    shutdown: CancellationToken,
}

impl PriceStreamServer {
    /// Create a server. Cancelling `shutdown` ends every open session.
    #[must_use]
    pub fn new(
        prices: Arc<PriceService>,
        portfolio: Arc<PortfolioService>,
        polling: PollingSession,
        live: LiveSession,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            prices,
            portfolio,
            polling,
            live,
            sessions: Arc::new(ActiveSessions::default()),
            shutdown,
        }
    }

    /// Shared session counters for health reporting.
    #[must_use]
    pub fn sessions(&self) -> Arc<ActiveSessions> {
        Arc::clone(&self.sessions)
    }
}

#[tonic::async_trait]
impl PortfolioServiceRpc for PriceStreamServer {
    type StreamPricesStream = BoxedStream<PriceUpdate>;
    type LiveUpdatesStream = BoxedStream<PortfolioUpdate>;

    async fn add_stock(&self, request: Request<AddStockRequest>) -> RpcResult<AddStockResponse> {
        let position = new_position_from_proto(request.into_inner());
        let added = self
            .portfolio
            .add_stock(position)
            .await
            .map_err(|e| portfolio_error_to_status(&e))?;

        Ok(Response::new(AddStockResponse {
            success: true,
            message: "Stock added successfully".to_string(),
            stock: Some(position_to_proto(&added)),
        }))
    }

    async fn get_portfolio(
        &self,
        request: Request<GetPortfolioRequest>,
    ) -> RpcResult<GetPortfolioResponse> {
        let req = request.into_inner();
        let summary = self
            .portfolio
            .get_portfolio(&req.user_id)
            .await
            .map_err(|e| portfolio_error_to_status(&e))?;

        Ok(Response::new(summary_to_proto(&summary)))
    }

    async fn remove_stock(
        &self,
        request: Request<RemoveStockRequest>,
    ) -> RpcResult<RemoveStockResponse> {
        let req = request.into_inner();
        self.portfolio
            .remove_stock(&req.user_id, &req.stock_id)
            .await
            .map_err(|e| portfolio_error_to_status(&e))?;

        Ok(Response::new(RemoveStockResponse {
            success: true,
            message: "Stock removed successfully".to_string(),
        }))
    }

    async fn set_price_alert(
        &self,
        request: Request<SetPriceAlertRequest>,
    ) -> RpcResult<SetPriceAlertResponse> {
        let req = request.into_inner();
        let condition = alert_condition_from_proto(req.condition)
            .ok_or_else(|| Status::invalid_argument("unknown alert condition"))?;

        let alert_id = self
            .portfolio
            .set_price_alert(&req.user_id, &req.symbol, req.target_price, condition)
            .await
            .map_err(|e| portfolio_error_to_status(&e))?;

        Ok(Response::new(SetPriceAlertResponse {
            success: true,
            message: "Alert set successfully".to_string(),
            alert_id,
        }))
    }

    async fn get_alerts(&self, request: Request<GetAlertsRequest>) -> RpcResult<GetAlertsResponse> {
        let req = request.into_inner();
        let alerts = self
            .portfolio
            .list_alerts(&req.user_id)
            .await
            .map_err(|e| portfolio_error_to_status(&e))?;

        Ok(Response::new(GetAlertsResponse {
            alerts: alerts.iter().map(alert_to_proto).collect(),
        }))
    }

    async fn get_price(&self, request: Request<GetPriceRequest>) -> RpcResult<PriceUpdate> {
        let req = request.into_inner();
        let update = self
            .prices
            .get_current_price(&req.symbol)
            .await
            .map_err(|e| price_error_to_status(&e))?;

        Ok(Response::new(price_update_to_proto(&update)))
    }

    async fn stream_prices(
        &self,
        request: Request<StreamPricesRequest>,
    ) -> RpcResult<Self::StreamPricesStream> {
        let req = request.into_inner();
        if PollingSession::requested_symbols(&req.symbols).is_empty() {
            return Err(Status::invalid_argument("at least one symbol is required"));
        }

        let session_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "stream_prices",
            session_id = %session_id,
            user_id = %req.user_id,
        );
        let guard = self.sessions.start(SessionKind::Polling);
        let polling = self.polling.clone();
        let cancel = self.shutdown.child_token();
        let (tx, rx) = mpsc::channel(PRICE_STREAM_BUFFER);

        tokio::spawn(
            async move {
                let _guard = guard;
                tracing::info!(symbols = ?req.symbols, "Price stream opened");
                let watch = tx.clone();
                let session = polling.run(&req.symbols, PriceStreamSink(tx), cancel.clone());
                let end = until_client_leaves(&watch, &cancel, session).await;
                tracing::info!(reason = end.as_str(), "Price stream closed");
            }
            .instrument(span),
        );

        Ok(Response::new(
            Box::pin(ReceiverStream::new(rx)) as Self::StreamPricesStream
        ))
    }

    async fn live_updates(
        &self,
        request: Request<Streaming<PortfolioAction>>,
    ) -> RpcResult<Self::LiveUpdatesStream> {
        let inbound = request.into_inner();

        let session_id = Uuid::new_v4();
        let span = tracing::info_span!("live_updates", session_id = %session_id);
        let guard = self.sessions.start(SessionKind::Live);
        let live = self.live.clone();
        let cancel = self.shutdown.child_token();
        let (tx, rx) = mpsc::channel(PRICE_STREAM_BUFFER);

        tokio::spawn(
            async move {
                let _guard = guard;
                tracing::info!("Live session opened");
                let watch = tx.clone();
                let session = live.run(ActionStream(inbound), LiveUpdateSink(tx), cancel.clone());
                let end = until_client_leaves(&watch, &cancel, session).await;
                tracing::info!(reason = end.as_str(), "Live session closed");
            }
            .instrument(span),
        );

        Ok(Response::new(
            Box::pin(ReceiverStream::new(rx)) as Self::LiveUpdatesStream
        ))
    }
}

/// Drive `session`, cancelling it once the response stream is dropped.
///
/// `watch` must be released by the caller afterwards so that a session which
/// ends on its own also ends the response stream.
async fn until_client_leaves<T, F>(
    watch: &mpsc::Sender<T>,
    cancel: &CancellationToken,
    session: F,
) -> SessionEnd
where
    F: Future<Output = SessionEnd>,
{
    tokio::pin!(session);
    tokio::select! {
        end = &mut session => end,
        () = watch.closed() => {
            tracing::debug!("Client dropped the response stream");
            cancel.cancel();
            session.await
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn client_leaving_cancels_session() {
        let (tx, rx) = mpsc::channel::<u8>(1);
        let cancel = CancellationToken::new();
        let session = {
            let cancel = cancel.clone();
            async move {
                cancel.cancelled().await;
                SessionEnd::Cancelled
            }
        };
        drop(rx);

        let end = tokio::time::timeout(
            std::time::Duration::from_secs(2),
            until_client_leaves(&tx, &cancel, session),
        )
        .await
        .unwrap();

        assert_eq!(end, SessionEnd::Cancelled);
        assert!(cancel.is_cancelled());
    }

    #[tokio::test]
    async fn finished_session_returns_its_own_end() {
        let (tx, _rx) = mpsc::channel::<u8>(1);
        let cancel = CancellationToken::new();

        let end = until_client_leaves(&tx, &cancel, async { SessionEnd::InputClosed }).await;

        assert_eq!(end, SessionEnd::InputClosed);
        assert!(!cancel.is_cancelled());
    }

    #[test]
    fn session_guard_tracks_counts() {
        let sessions = Arc::new(ActiveSessions::default());

        let polling = sessions.start(SessionKind::Polling);
        let live = sessions.start(SessionKind::Live);
        let _second_live = sessions.start(SessionKind::Live);

        assert_eq!(sessions.polling(), 1);
        assert_eq!(sessions.live(), 2);

        drop(polling);
        drop(live);

        assert_eq!(sessions.polling(), 0);
        assert_eq!(sessions.live(), 1);
    }
}
