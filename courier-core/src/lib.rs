//! Engine for the Courier delivery-rider client.
//!
//! Everything the screens need that is not rendering lives here: the
//! backend REST client, the external directions provider, the
//! geolocation port, the persisted client-side state, the polling
//! tasks, and the delivery map view model. External collaborators sit
//! behind async traits so tests can substitute them.
#![allow(missing_docs)]

pub mod api;
pub mod error;
pub mod geo;
pub mod map;
pub mod poll;
pub mod routing;
pub mod session;
pub mod store;

pub use api::{ApiClient, ApiError, RiderBackend};
pub use error::{CoreError, Result};
pub use geo::{LocationError, LocationSource, StoredLocation};
pub use map::{DeliveryMap, Marker, RouteRequest};
pub use poll::{OrderStatusWatcher, PollControl, PollTask, StatusSignal};
pub use routing::{MapboxDirections, RouteFetchError, RouteProvider};
pub use session::{SignUpError, SignUpForm, load_session, sign_in, sign_out, sign_up};
pub use store::{ClientState, FileStore, MemoryStore, StateStore, StoreError};
