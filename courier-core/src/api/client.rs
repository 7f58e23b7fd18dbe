use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use courier_model::{Coordinate, NewRider, OrderContext, OrderState, OrderSummary, RiderProfile};

use super::types;
use super::{ApiError, RiderBackend};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Reqwest-backed client for the Courier backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client rooted at `base_url` (scheme + host, no `/api`
    /// suffix).
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        info!("backend client rooted at {base_url}");

        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Decode a success payload, or map the failure the way the rest
    /// of the client expects it.
    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }
        response
            .json::<T>()
            .await
            .map_err(|err| ApiError::Malformed(err.to_string()))
    }

    async fn read_unit(response: reqwest::Response) -> Result<(), ApiError> {
        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }
        Ok(())
    }

    /// Client errors carry the backend's own message as a rejection;
    /// everything else is reported by status.
    async fn failure(response: reqwest::Response) -> ApiError {
        let status = response.status();
        let message = Self::error_message(response).await;
        if status.is_client_error() {
            ApiError::Rejected(message)
        } else {
            ApiError::Status {
                status: status.as_u16(),
                message,
            }
        }
    }

    async fn error_message(response: reqwest::Response) -> String {
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        serde_json::from_str::<types::ErrorBody>(&text)
            .ok()
            .and_then(|body| body.error.or(body.message))
            .unwrap_or(text)
    }
}

#[async_trait]
impl RiderBackend for ApiClient {
    async fn login(&self, full_name: &str, password: &str) -> Result<RiderProfile, ApiError> {
        let response = self
            .client
            .post(self.url("deliveryPerson/login"))
            .json(&types::LoginRequest {
                full_name,
                password,
            })
            .send()
            .await?;

        let body: types::LoginResponse = Self::read_json(response).await?;
        match body.rider_id {
            Some(id) => Ok(RiderProfile {
                id,
                display_name: body.rider_name.unwrap_or_else(|| full_name.to_string()),
                email: body.rider_email,
                home_location: match (body.latitude, body.longitude) {
                    (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)),
                    _ => None,
                },
            }),
            None => Err(ApiError::Rejected(
                body.message
                    .unwrap_or_else(|| "login failed".to_string()),
            )),
        }
    }

    async fn register(&self, new_rider: &NewRider) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.url("deliveryPerson"))
            .json(&types::RegisterRequest::from(new_rider))
            .send()
            .await?;
        Self::read_unit(response).await
    }

    async fn unassigned_orders(&self) -> Result<Vec<OrderSummary>, ApiError> {
        let response = self
            .client
            .get(self.url("orders/in-progress/unassigned"))
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn accept_order(&self, order_id: i64, rider_id: i64) -> Result<OrderContext, ApiError> {
        let response = self
            .client
            .put(self.url(&format!("orders/{order_id}/accept")))
            .json(&types::AcceptOrderRequest {
                delivery_person_id: rider_id,
            })
            .send()
            .await?;

        let context: OrderContext = Self::read_json(response).await?;
        debug!(order_id, "order accepted");
        Ok(context)
    }

    async fn order_status(&self, order_id: i64) -> Result<OrderState, ApiError> {
        let response = self
            .client
            .get(self.url(&format!("orders/{order_id}")))
            .send()
            .await?;

        let body: types::OrderStatusResponse = Self::read_json(response).await?;
        Ok(body
            .order_status
            .map(|status| OrderState::from_wire(&status))
            .unwrap_or(OrderState::Active))
    }

    async fn toggle_active(&self, rider_id: i64) -> Result<bool, ApiError> {
        let response = self
            .client
            .put(self.url(&format!("deliveryPerson/{rider_id}/toggle-active")))
            .send()
            .await?;

        let body: types::ToggleActiveResponse = Self::read_json(response).await?;
        Ok(body.is_active)
    }

    async fn update_location(&self, rider_id: i64, position: Coordinate) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.url("location/update"))
            .json(&types::LocationUpdateRequest {
                entity_id: rider_id,
                entity_type: "delivery_person",
                latitude: position.lat,
                longitude: position.lng,
            })
            .send()
            .await?;
        Self::read_unit(response).await
    }
}
