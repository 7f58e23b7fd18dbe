//! Core data model definitions shared across Courier crates.
#![allow(missing_docs)]

pub mod geo;
pub mod order;
pub mod rider;
pub mod route;
pub mod view;

// Intentionally curated re-exports for downstream consumers.
pub use geo::Coordinate;
pub use order::{OrderContext, OrderState, OrderSummary};
pub use rider::{NewRider, RiderProfile, Session, TransportType};
pub use route::RouteInfo;
pub use view::{DEFAULT_ZOOM, ViewState};
