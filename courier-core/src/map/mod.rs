//! Delivery map screen state.

mod links;

pub use links::{call_link, directions_link};

use tracing::{debug, warn};

use courier_model::{Coordinate, OrderContext, RouteInfo, ViewState};

use crate::api::{ApiError, RiderBackend};
use crate::routing::{RouteFetchError, RouteProvider};

/// Marker pins the rendering layer draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Marker {
    Pickup(Coordinate),
    Dropoff(Coordinate),
    Rider(Coordinate),
}

/// Snapshot of the inputs for one asynchronous route fetch. Carries the
/// generation that was current when the request started.
#[derive(Debug, Clone, Copy)]
pub struct RouteRequest {
    pub generation: u64,
    pub origin: Coordinate,
    pub destination: Coordinate,
}

/// View model for the delivery map screen: camera, markers, route
/// overlay, and the two toggle flags.
///
/// The persisted order context stays the source of truth for the
/// endpoints; the camera and route are derived here and recomputed or
/// replaced, never merged.
#[derive(Debug)]
pub struct DeliveryMap {
    origin: Coordinate,
    destination: Coordinate,
    phone_number: String,
    rider_position: Option<Coordinate>,
    view: ViewState,
    route: Option<RouteInfo>,
    generation: u64,
    info_visible: bool,
    active: bool,
}

impl DeliveryMap {
    pub fn new(context: &OrderContext) -> Self {
        Self {
            origin: context.pickup,
            destination: context.dropoff,
            phone_number: context.phone_number.clone(),
            rider_position: None,
            view: ViewState::spanning(&context.pickup, &context.dropoff),
            route: None,
            generation: 0,
            info_visible: true,
            active: false,
        }
    }

    pub fn view_state(&self) -> ViewState {
        self.view
    }

    pub fn route(&self) -> Option<&RouteInfo> {
        self.route.as_ref()
    }

    pub fn info_visible(&self) -> bool {
        self.info_visible
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    /// Reframe the camera on new endpoints. Requests already in flight
    /// become stale; the displayed route stays until a fetch for the
    /// new endpoints lands.
    pub fn set_points(&mut self, origin: Coordinate, destination: Coordinate) {
        self.origin = origin;
        self.destination = destination;
        self.generation += 1;
        self.view = ViewState::spanning(&origin, &destination);
    }

    pub fn set_rider_position(&mut self, position: Coordinate) {
        self.rider_position = Some(position);
    }

    /// Inputs for a route fetch against the current endpoints.
    pub fn route_request(&self) -> RouteRequest {
        RouteRequest {
            generation: self.generation,
            origin: self.origin,
            destination: self.destination,
        }
    }

    /// Apply a completed fetch. Responses from a superseded request are
    /// dropped; failures leave the previous route in place.
    pub fn apply_route(
        &mut self,
        request: &RouteRequest,
        result: Result<RouteInfo, RouteFetchError>,
    ) {
        if request.generation != self.generation {
            debug!(
                stale = request.generation,
                current = self.generation,
                "dropping stale route response"
            );
            return;
        }

        match result {
            Ok(route) => self.route = Some(route),
            Err(err) => warn!("route fetch failed: {err}"),
        }
    }

    /// Fetch and apply in one step.
    pub async fn refresh_route(&mut self, provider: &dyn RouteProvider) {
        let request = self.route_request();
        let result = provider
            .fetch_route(request.origin, request.destination)
            .await;
        self.apply_route(&request, result);
    }

    /// Flip the info panel. Pure UI state; always legal.
    pub fn toggle_info(&mut self) -> bool {
        self.info_visible = !self.info_visible;
        self.info_visible
    }

    /// Round-trip the remote active flag; the local flag follows the
    /// server's answer and stays put on failure.
    pub async fn toggle_active(
        &mut self,
        backend: &dyn RiderBackend,
        rider_id: i64,
    ) -> Result<bool, ApiError> {
        let active = backend.toggle_active(rider_id).await?;
        self.active = active;
        Ok(active)
    }

    pub fn markers(&self) -> Vec<Marker> {
        let mut markers = vec![Marker::Pickup(self.origin), Marker::Dropoff(self.destination)];
        if let Some(position) = self.rider_position {
            markers.push(Marker::Rider(position));
        }
        markers
    }
}

#[cfg(test)]
mod tests {
    use courier_model::RouteInfo;

    use super::*;
    use crate::api::MockRiderBackend;
    use crate::routing::MockRouteProvider;

    fn context() -> OrderContext {
        OrderContext {
            order_id: 42,
            pickup: Coordinate::new(-6.77, 39.23),
            dropoff: Coordinate::new(-6.81, 39.28),
            phone_number: "+255700000001".to_string(),
        }
    }

    fn route(distance: f64) -> RouteInfo {
        RouteInfo {
            distance_meters: distance,
            duration_seconds: 600.0,
            path: vec![Coordinate::new(-6.77, 39.23), Coordinate::new(-6.81, 39.28)],
        }
    }

    #[test]
    fn camera_is_derived_from_the_context() {
        let map = DeliveryMap::new(&context());
        let view = map.view_state();
        assert!((view.center.lat - -6.79).abs() < 1e-9);
        assert!((view.center.lng - 39.255).abs() < 1e-9);
        assert_eq!(view.zoom, 12);
    }

    #[test]
    fn set_points_recomputes_the_camera_and_keeps_the_route() {
        let mut map = DeliveryMap::new(&context());
        let request = map.route_request();
        map.apply_route(&request, Ok(route(5000.0)));
        assert!(map.route().is_some());

        map.set_points(Coordinate::new(0.0, 0.0), Coordinate::new(0.2, 0.2));
        assert_eq!(map.view_state().zoom, 10);
        // Old overlay stays visible until a fresh fetch lands.
        assert!(map.route().is_some());
    }

    #[test]
    fn stale_responses_are_dropped() {
        let mut map = DeliveryMap::new(&context());
        let stale = map.route_request();

        map.set_points(Coordinate::new(0.0, 0.0), Coordinate::new(0.2, 0.2));
        map.apply_route(&stale, Ok(route(1.0)));
        assert!(map.route().is_none());

        let fresh = map.route_request();
        map.apply_route(&fresh, Ok(route(2.0)));
        assert_eq!(map.route().unwrap().distance_meters, 2.0);
    }

    #[test]
    fn failed_fetch_keeps_the_previous_route() {
        let mut map = DeliveryMap::new(&context());
        let request = map.route_request();
        map.apply_route(&request, Ok(route(5000.0)));

        map.apply_route(&request, Err(RouteFetchError::Status(500)));
        assert_eq!(map.route().unwrap().distance_meters, 5000.0);
    }

    #[tokio::test]
    async fn refresh_route_applies_the_provider_result() {
        let mut provider = MockRouteProvider::new();
        provider
            .expect_fetch_route()
            .times(2)
            .returning(|_, _| Ok(route(5420.7)));

        let mut map = DeliveryMap::new(&context());
        map.refresh_route(&provider).await;
        let first = map.route().unwrap().clone();

        // Identical inputs produce an independent but equal value.
        map.refresh_route(&provider).await;
        assert_eq!(map.route().unwrap(), &first);
    }

    #[tokio::test]
    async fn toggle_active_follows_the_server() {
        let mut backend = MockRiderBackend::new();
        backend.expect_toggle_active().returning(|_| Ok(true));

        let mut map = DeliveryMap::new(&context());
        assert!(!map.is_active());
        assert!(map.toggle_active(&backend, 7).await.unwrap());
        assert!(map.is_active());
    }

    #[tokio::test]
    async fn failed_toggle_leaves_the_flag() {
        let mut backend = MockRiderBackend::new();
        backend
            .expect_toggle_active()
            .returning(|_| Err(ApiError::Status { status: 502, message: "bad gateway".to_string() }));

        let mut map = DeliveryMap::new(&context());
        assert!(map.toggle_active(&backend, 7).await.is_err());
        assert!(!map.is_active());
    }

    #[test]
    fn info_toggle_is_always_legal() {
        let mut map = DeliveryMap::new(&context());
        assert!(map.info_visible());
        assert!(!map.toggle_info());
        assert!(map.toggle_info());
    }

    #[test]
    fn markers_include_the_rider_once_positioned() {
        let mut map = DeliveryMap::new(&context());
        assert_eq!(map.markers().len(), 2);

        map.set_rider_position(Coordinate::new(-6.78, 39.24));
        let markers = map.markers();
        assert_eq!(markers.len(), 3);
        assert!(matches!(markers[2], Marker::Rider(_)));
    }
}
