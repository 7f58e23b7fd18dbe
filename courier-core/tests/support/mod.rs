//! Shared stubs for integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use courier_core::api::{ApiError, RiderBackend};
use courier_model::{Coordinate, NewRider, OrderContext, OrderState, OrderSummary, RiderProfile};

pub fn sample_context() -> OrderContext {
    OrderContext {
        order_id: 4217,
        pickup: Coordinate::new(-6.77, 39.23),
        dropoff: Coordinate::new(-6.81, 39.28),
        phone_number: "+255700000001".to_string(),
    }
}

pub fn sample_profile() -> RiderProfile {
    RiderProfile {
        id: 7,
        display_name: "Jane Doe".to_string(),
        email: None,
        home_location: Some(Coordinate::new(-6.77, 39.23)),
    }
}

/// Backend stub with a scripted sequence of order-status answers.
#[derive(Default)]
pub struct StubBackend {
    pub statuses: Mutex<VecDeque<Result<OrderState, ApiError>>>,
}

impl StubBackend {
    pub fn with_statuses(
        statuses: impl IntoIterator<Item = Result<OrderState, ApiError>>,
    ) -> Self {
        Self {
            statuses: Mutex::new(statuses.into_iter().collect()),
        }
    }

    pub fn transport_error() -> ApiError {
        ApiError::Status {
            status: 503,
            message: "service unavailable".to_string(),
        }
    }
}

#[async_trait]
impl RiderBackend for StubBackend {
    async fn login(&self, _full_name: &str, _password: &str) -> Result<RiderProfile, ApiError> {
        Ok(sample_profile())
    }

    async fn register(&self, _new_rider: &NewRider) -> Result<(), ApiError> {
        Ok(())
    }

    async fn unassigned_orders(&self) -> Result<Vec<OrderSummary>, ApiError> {
        Ok(vec![OrderSummary {
            id: 4217,
            total_amount: 18.5,
        }])
    }

    async fn accept_order(&self, _order_id: i64, _rider_id: i64) -> Result<OrderContext, ApiError> {
        Ok(sample_context())
    }

    async fn order_status(&self, _order_id: i64) -> Result<OrderState, ApiError> {
        self.statuses
            .lock()
            .expect("status script lock")
            .pop_front()
            .unwrap_or(Ok(OrderState::Active))
    }

    async fn toggle_active(&self, _rider_id: i64) -> Result<bool, ApiError> {
        Ok(true)
    }

    async fn update_location(&self, _rider_id: i64, _position: Coordinate) -> Result<(), ApiError> {
        Ok(())
    }
}
