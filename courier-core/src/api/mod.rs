//! HTTP client for the Courier backend REST API.

mod client;
pub mod types;

pub use client::ApiClient;

use async_trait::async_trait;
use thiserror::Error;

use courier_model::{Coordinate, NewRider, OrderContext, OrderState, OrderSummary, RiderProfile};

/// Failures of a backend call, split along the lines the screens care
/// about: network trouble, a non-success status, a payload that does
/// not parse, and business-rule rejections that carry a message for
/// the rider.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("{0}")]
    Rejected(String),
}

/// Backend operations the client consumes. [`ApiClient`] is the
/// production implementation; tests substitute stubs or mocks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RiderBackend: Send + Sync {
    /// Exchange credentials for the rider profile.
    async fn login(&self, full_name: &str, password: &str) -> Result<RiderProfile, ApiError>;

    /// Create a new rider account.
    async fn register(&self, new_rider: &NewRider) -> Result<(), ApiError>;

    /// Orders waiting for a rider.
    async fn unassigned_orders(&self) -> Result<Vec<OrderSummary>, ApiError>;

    /// Claim an order; returns the pickup/drop-off context to track.
    async fn accept_order(&self, order_id: i64, rider_id: i64) -> Result<OrderContext, ApiError>;

    /// Current lifecycle state of one order.
    async fn order_status(&self, order_id: i64) -> Result<OrderState, ApiError>;

    /// Flip the remote active flag; returns the new value.
    async fn toggle_active(&self, rider_id: i64) -> Result<bool, ApiError>;

    /// Report the rider's current position.
    async fn update_location(&self, rider_id: i64, position: Coordinate) -> Result<(), ApiError>;
}
