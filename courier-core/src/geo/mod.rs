//! Rider position acquisition.

use async_trait::async_trait;
use thiserror::Error;

use courier_model::Coordinate;

use crate::store::ClientState;

/// Why a position lookup failed. Callers log and keep their last-known
/// state; there is no retry.
#[derive(Error, Debug)]
pub enum LocationError {
    #[error("no location capability in this environment")]
    Unsupported,

    #[error("location permission denied")]
    PermissionDenied,

    #[error("position unavailable: {0}")]
    PositionUnavailable(String),
}

/// Single-shot position source; resolves once per call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationSource: Send + Sync {
    async fn current_location(&self) -> Result<Coordinate, LocationError>;
}

/// Serves the coordinates recorded at sign-in. Stands in for a live
/// position feed on platforms without one.
#[derive(Debug)]
pub struct StoredLocation {
    state: ClientState,
}

impl StoredLocation {
    pub fn new(state: ClientState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl LocationSource for StoredLocation {
    async fn current_location(&self) -> Result<Coordinate, LocationError> {
        match self.state.rider_coordinates() {
            Ok(Some(position)) => Ok(position),
            Ok(None) => Err(LocationError::Unsupported),
            Err(err) => Err(LocationError::PositionUnavailable(err.to_string())),
        }
    }
}
