use thiserror::Error;

use crate::api::ApiError;
use crate::geo::LocationError;
use crate::routing::RouteFetchError;
use crate::session::SignUpError;
use crate::store::StoreError;

/// Umbrella error for engine operations that cross subsystems.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Route(#[from] RouteFetchError),

    #[error(transparent)]
    Location(#[from] LocationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    SignUp(#[from] SignUpError),

    #[error("not signed in")]
    NotSignedIn,

    #[error("no accepted order on this device")]
    NoActiveOrder,
}

pub type Result<T> = std::result::Result<T, CoreError>;
