use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::warn;

use courier_core::api::RiderBackend;
use courier_core::error::CoreError;
use courier_core::geo::LocationSource;
use courier_core::map::{self, DeliveryMap};
use courier_core::poll::{OrderStatusWatcher, StatusSignal};
use courier_core::routing::RouteProvider;
use courier_core::store::ClientState;
use courier_model::{Coordinate, OrderContext};

/// The live delivery screen: map view model, route overlay, rider
/// position, and the delayed order-status check.
pub struct DeliveryScreen {
    pub map: DeliveryMap,
    context: OrderContext,
    backend: Arc<dyn RiderBackend>,
    routes: Arc<dyn RouteProvider>,
    state: ClientState,
}

impl DeliveryScreen {
    /// Mount from the persisted order context.
    pub fn mount(
        state: ClientState,
        backend: Arc<dyn RiderBackend>,
        routes: Arc<dyn RouteProvider>,
    ) -> Result<Self, CoreError> {
        let context = state.order_context()?.ok_or(CoreError::NoActiveOrder)?;
        let map = DeliveryMap::new(&context);

        Ok(Self {
            map,
            context,
            backend,
            routes,
            state,
        })
    }

    pub fn order_id(&self) -> i64 {
        self.context.order_id
    }

    /// Resolve the rider position and the route concurrently. They may
    /// finish in either order; neither failure is fatal, and the
    /// camera depends only on the order's endpoints.
    pub async fn load(&mut self, locations: &dyn LocationSource) {
        let request = self.map.route_request();
        let (position, route) = tokio::join!(
            locations.current_location(),
            self.routes.fetch_route(request.origin, request.destination),
        );

        match position {
            Ok(position) => {
                self.map.set_rider_position(position);
                self.report_position(position).await;
            }
            Err(err) => warn!("could not resolve rider position: {err}"),
        }
        self.map.apply_route(&request, route);
    }

    /// Best-effort position report to the backend; the map does not
    /// depend on it.
    async fn report_position(&self, position: Coordinate) {
        let rider_id = match self.state.rider_id() {
            Ok(Some(id)) => id,
            _ => return,
        };
        if let Err(err) = self.backend.update_location(rider_id, position).await {
            warn!("failed to report rider position: {err}");
        }
    }

    /// Kick off the delayed status probe on its own task.
    pub fn watch_status(&self, delay: Duration) -> JoinHandle<StatusSignal> {
        OrderStatusWatcher::new(Arc::clone(&self.backend), self.state.clone(), delay)
            .spawn(self.context.order_id)
    }

    /// `tel:` hand-off for the call-customer button.
    pub fn call_link(&self) -> String {
        map::call_link(&self.context.phone_number)
    }

    /// External turn-by-turn navigation hand-off.
    pub fn navigation_link(&self) -> String {
        map::directions_link(&self.context.pickup, &self.context.dropoff)
    }
}
