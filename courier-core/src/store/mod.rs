//! Persisted client-side state.
//!
//! The browser build of this application kept rider identity and the
//! accepted-order blob in ad-hoc key/value storage. Here the storage
//! backend is an explicit injected seam, and every reader and writer
//! goes through the single [`ClientState`] accessor.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use courier_model::{Coordinate, OrderContext, RiderProfile};

/// Failures of the storage backend or of decoding what it holds.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("corrupt value under {key}: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Keyed scalar storage. Implementations must be safe to share across
/// tasks; values are opaque strings.
pub trait StateStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

// Key names match what the production backend and earlier clients
// already use, so existing persisted state keeps working.
mod keys {
    pub const RIDER_ID: &str = "deliveryPersonId";
    pub const RIDER_NAME: &str = "deliveryPersonName";
    pub const RIDER_LAT: &str = "deliveryPersonLatitude";
    pub const RIDER_LNG: &str = "deliveryPersonLongitude";
    pub const ORDER_CONTEXT: &str = "orderLocations";
}

/// Typed accessor over the raw store. The only component that knows
/// the key names; screens never touch the store directly.
#[derive(Clone)]
pub struct ClientState {
    store: Arc<dyn StateStore>,
}

impl std::fmt::Debug for ClientState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientState").finish_non_exhaustive()
    }
}

impl ClientState {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    /// Identity of the signed-in rider, if any. An unparseable id is
    /// treated as absent rather than fatal.
    pub fn rider_id(&self) -> Result<Option<i64>, StoreError> {
        let raw = self.store.get(keys::RIDER_ID)?;
        Ok(raw.and_then(|value| match value.parse() {
            Ok(id) => Some(id),
            Err(_) => {
                warn!("discarding unparseable rider id: {value:?}");
                None
            }
        }))
    }

    pub fn rider_name(&self) -> Result<Option<String>, StoreError> {
        self.store.get(keys::RIDER_NAME)
    }

    /// Coordinates recorded at sign-in. Either both axes are present
    /// and parseable or the position is absent as a whole.
    pub fn rider_coordinates(&self) -> Result<Option<Coordinate>, StoreError> {
        let lat = self.store.get(keys::RIDER_LAT)?;
        let lng = self.store.get(keys::RIDER_LNG)?;
        let position = match (lat, lng) {
            (Some(lat), Some(lng)) => match (lat.parse(), lng.parse()) {
                (Ok(lat), Ok(lng)) => Some(Coordinate::new(lat, lng)),
                _ => {
                    warn!("discarding unparseable rider coordinates");
                    None
                }
            },
            _ => None,
        };
        Ok(position)
    }

    pub fn set_rider_identity(&self, profile: &RiderProfile) -> Result<(), StoreError> {
        self.store.set(keys::RIDER_ID, &profile.id.to_string())?;
        self.store.set(keys::RIDER_NAME, &profile.display_name)?;
        if let Some(position) = profile.home_location {
            self.store.set(keys::RIDER_LAT, &position.lat.to_string())?;
            self.store.set(keys::RIDER_LNG, &position.lng.to_string())?;
        }
        Ok(())
    }

    pub fn clear_rider_identity(&self) -> Result<(), StoreError> {
        self.store.remove(keys::RIDER_ID)?;
        self.store.remove(keys::RIDER_NAME)?;
        self.store.remove(keys::RIDER_LAT)?;
        self.store.remove(keys::RIDER_LNG)?;
        Ok(())
    }

    /// The accepted order, decoded from its persisted JSON blob.
    pub fn order_context(&self) -> Result<Option<OrderContext>, StoreError> {
        match self.store.get(keys::ORDER_CONTEXT)? {
            Some(blob) => serde_json::from_str(&blob)
                .map(Some)
                .map_err(|source| StoreError::Corrupt {
                    key: keys::ORDER_CONTEXT.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    pub fn store_order_context(&self, context: &OrderContext) -> Result<(), StoreError> {
        let blob = serde_json::to_string(context).map_err(|source| StoreError::Corrupt {
            key: keys::ORDER_CONTEXT.to_string(),
            source,
        })?;
        self.store.set(keys::ORDER_CONTEXT, &blob)
    }

    pub fn clear_order_context(&self) -> Result<(), StoreError> {
        self.store.remove(keys::ORDER_CONTEXT)
    }
}
