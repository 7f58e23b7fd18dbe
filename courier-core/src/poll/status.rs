use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use courier_model::OrderState;

use crate::api::RiderBackend;
use crate::store::ClientState;

const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// What the delivery screen does after a status probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSignal {
    /// Order still in flight; stay on the map, touch nothing.
    Stay,
    /// Terminal state observed: the persisted context has been
    /// cleared; show `notice` and go back to the order list.
    ReturnToOrders { notice: String },
}

/// Delayed order-status probe for the delivery screen.
///
/// Waits, asks the backend whether the order reached a terminal state,
/// and cleans up the persisted context when it has. A probe that fails
/// in transport is rescheduled after the same delay, up to the attempt
/// limit.
pub struct OrderStatusWatcher {
    backend: Arc<dyn RiderBackend>,
    state: ClientState,
    delay: Duration,
    max_attempts: u32,
}

impl std::fmt::Debug for OrderStatusWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderStatusWatcher")
            .field("delay", &self.delay)
            .field("max_attempts", &self.max_attempts)
            .finish_non_exhaustive()
    }
}

impl OrderStatusWatcher {
    pub fn new(backend: Arc<dyn RiderBackend>, state: ClientState, delay: Duration) -> Self {
        Self {
            backend,
            state,
            delay,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Single probe: the order's state, with failures folded into
    /// [`OrderState::Unknown`].
    pub async fn poll_once(&self, order_id: i64) -> OrderState {
        match self.backend.order_status(order_id).await {
            Ok(state) => state,
            Err(err) => {
                warn!(order_id, "order status check failed: {err}");
                OrderState::Unknown
            }
        }
    }

    /// Probe once and apply the effects: terminal states clear the
    /// persisted order context and tell the caller to leave the map.
    pub async fn check_once(&self, order_id: i64) -> StatusSignal {
        let state = self.poll_once(order_id).await;
        self.signal_for(order_id, state)
    }

    /// Delayed watch: sleeps, probes, and reschedules on failed probes
    /// until the attempt budget runs out.
    pub async fn watch(&self, order_id: i64) -> StatusSignal {
        for attempt in 1..=self.max_attempts {
            tokio::time::sleep(self.delay).await;

            match self.poll_once(order_id).await {
                OrderState::Unknown if attempt < self.max_attempts => {
                    warn!(order_id, attempt, "rescheduling order status check");
                }
                state => return self.signal_for(order_id, state),
            }
        }
        StatusSignal::Stay
    }

    /// Run the watch on its own task; the handle resolves to the final
    /// signal.
    pub fn spawn(self, order_id: i64) -> JoinHandle<StatusSignal> {
        tokio::spawn(async move { self.watch(order_id).await })
    }

    fn signal_for(&self, order_id: i64, state: OrderState) -> StatusSignal {
        let notice = match state {
            OrderState::Completed => "Order completed",
            OrderState::Cancelled => "Order has been cancelled",
            OrderState::Active | OrderState::Unknown => return StatusSignal::Stay,
        };

        info!(order_id, ?state, "order reached a terminal state");
        if let Err(err) = self.state.clear_order_context() {
            // The rider still has to leave the map; a stale blob is
            // cleaned up on the next accept.
            warn!(order_id, "failed to clear order context: {err}");
        }

        StatusSignal::ReturnToOrders {
            notice: notice.to_string(),
        }
    }
}
