use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::warn;

use courier_core::api::RiderBackend;
use courier_core::error::CoreError;
use courier_core::poll::{PollControl, PollTask};
use courier_core::store::ClientState;
use courier_model::{OrderContext, OrderSummary};

use super::{FormOutcome, Navigation};

/// Unassigned-order feed plus the accept action.
pub struct OrdersScreen {
    backend: Arc<dyn RiderBackend>,
    state: ClientState,
}

impl OrdersScreen {
    pub fn new(backend: Arc<dyn RiderBackend>, state: ClientState) -> Self {
        Self { backend, state }
    }

    /// One feed refresh.
    pub async fn refresh(&self) -> Result<Vec<OrderSummary>, CoreError> {
        Ok(self.backend.unassigned_orders().await?)
    }

    /// Keep the feed fresh on a repeating interval. Snapshots arrive
    /// on the returned channel; a failed refresh is logged and the
    /// previous snapshot stands.
    pub fn watch_feed(&self, period: Duration) -> (PollTask, mpsc::Receiver<Vec<OrderSummary>>) {
        let (sender, receiver) = mpsc::channel(8);
        let backend = Arc::clone(&self.backend);

        let task = PollTask::spawn(period, move || {
            let backend = Arc::clone(&backend);
            let sender = sender.clone();
            async move {
                match backend.unassigned_orders().await {
                    Ok(orders) => {
                        if sender.send(orders).await.is_err() {
                            return PollControl::Stop;
                        }
                    }
                    Err(err) => warn!("order feed refresh failed: {err}"),
                }
                PollControl::Continue
            }
        });

        (task, receiver)
    }

    /// Accept an order: persist the returned delivery context and hand
    /// off to the map screen.
    pub async fn accept(&self, order_id: i64) -> Result<OrderContext, CoreError> {
        let rider_id = self.state.rider_id()?.ok_or(CoreError::NotSignedIn)?;
        let context = self.backend.accept_order(order_id, rider_id).await?;
        self.state.store_order_context(&context)?;
        Ok(context)
    }

    /// Accept with form semantics: success hands off to the map,
    /// failure surfaces the backend's message.
    pub async fn submit_accept(&self, order_id: i64) -> FormOutcome {
        match self.accept(order_id).await {
            Ok(context) => FormOutcome::Success {
                notice: format!(
                    "Order accepted successfully! Customer {}",
                    context.phone_number
                ),
                next: Navigation::DeliveryMap,
            },
            Err(err) => {
                warn!(order_id, "accept failed: {err}");
                FormOutcome::Failure(format!("Failed to accept order: {err}"))
            }
        }
    }
}
