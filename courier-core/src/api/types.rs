//! Wire shapes of the backend REST API.

use serde::{Deserialize, Serialize};

use courier_model::{NewRider, TransportType};

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    #[serde(rename = "fullName")]
    pub full_name: &'a str,
    pub password: &'a str,
}

/// Login answer. The backend replies 200 for rejections too and puts
/// the verdict in `message`; a present rider id is what marks success.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "deliveryPersonId")]
    pub rider_id: Option<i64>,
    #[serde(default, rename = "deliveryPersonName")]
    pub rider_name: Option<String>,
    #[serde(default, rename = "deliveryPersonEmail")]
    pub rider_email: Option<String>,
    #[serde(default, rename = "deliveryPersonLatitude")]
    pub latitude: Option<f64>,
    #[serde(default, rename = "deliveryPersonLongitude")]
    pub longitude: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest<'a> {
    pub full_name: &'a str,
    pub phone_number: &'a str,
    pub college_id: i64,
    pub transport_type: TransportType,
    pub password: &'a str,
    pub latitude: f64,
    pub longitude: f64,
}

impl<'a> From<&'a NewRider> for RegisterRequest<'a> {
    fn from(new_rider: &'a NewRider) -> Self {
        Self {
            full_name: &new_rider.full_name,
            phone_number: &new_rider.phone_number,
            college_id: new_rider.college_id,
            transport_type: new_rider.transport_type,
            password: &new_rider.password,
            latitude: new_rider.position.lat,
            longitude: new_rider.position.lng,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AcceptOrderRequest {
    pub delivery_person_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct OrderStatusResponse {
    #[serde(default)]
    pub order_status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ToggleActiveResponse {
    pub is_active: bool,
}

#[derive(Debug, Serialize)]
pub struct LocationUpdateRequest {
    pub entity_id: i64,
    pub entity_type: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

/// Error body the backend attaches to non-success answers.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
