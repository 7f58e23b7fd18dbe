//! External directions service integration.

mod mapbox;

pub use mapbox::MapboxDirections;

use async_trait::async_trait;
use thiserror::Error;

use courier_model::{Coordinate, RouteInfo};

/// Failure modes of a directions lookup. Whatever route the caller was
/// already displaying stays in place on any of these.
#[derive(Error, Debug)]
pub enum RouteFetchError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("directions service returned {0}")]
    Status(u16),

    #[error("malformed directions payload: {0}")]
    Malformed(String),

    #[error("no route between the requested points")]
    NoRoute,
}

/// Directions lookup between two points.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RouteProvider: Send + Sync {
    /// Fetch the route from `origin` to `destination`, normalized to
    /// distance, duration, and an ordered path.
    async fn fetch_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RouteInfo, RouteFetchError>;
}
