use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// Row in the unassigned-order feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub id: i64,
    pub total_amount: f64,
}

/// Locally held record of the currently accepted order.
///
/// Written once when the rider accepts, read by the map screen, and
/// deleted when a terminal state is observed. Field names match the
/// backend's accept payload so the blob round-trips untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderContext {
    #[serde(rename = "orderId")]
    pub order_id: i64,
    #[serde(rename = "pickup_location")]
    pub pickup: Coordinate,
    #[serde(rename = "dropoff_location")]
    pub dropoff: Coordinate,
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
}

/// Order lifecycle as observed from the rider's side:
/// `unassigned -> accepted -> {completed | cancelled}`. Only the two
/// terminal states matter to the client; everything else is "still in
/// flight".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderState {
    Active,
    Completed,
    Cancelled,
    /// The status could not be fetched; treated as non-terminal.
    Unknown,
}

impl OrderState {
    /// Classify the backend's `order_status` string.
    pub fn from_wire(status: &str) -> Self {
        match status {
            "completed" => OrderState::Completed,
            "cancelled" => OrderState::Cancelled,
            _ => OrderState::Active,
        }
    }

    /// True once no further rider action is expected.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderState::Completed | OrderState::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_status_classification() {
        assert_eq!(OrderState::from_wire("completed"), OrderState::Completed);
        assert_eq!(OrderState::from_wire("cancelled"), OrderState::Cancelled);
        assert_eq!(OrderState::from_wire("in_progress"), OrderState::Active);
        assert_eq!(OrderState::from_wire("assigned"), OrderState::Active);
    }

    #[test]
    fn only_completed_and_cancelled_are_terminal() {
        assert!(OrderState::Completed.is_terminal());
        assert!(OrderState::Cancelled.is_terminal());
        assert!(!OrderState::Active.is_terminal());
        assert!(!OrderState::Unknown.is_terminal());
    }

    #[test]
    fn context_round_trips_with_backend_field_names() {
        let context = OrderContext {
            order_id: 4217,
            pickup: Coordinate::new(-6.77, 39.23),
            dropoff: Coordinate::new(-6.81, 39.28),
            phone_number: "+255700000001".to_string(),
        };

        let encoded = serde_json::to_string(&context).unwrap();
        assert!(encoded.contains("\"orderId\""));
        assert!(encoded.contains("\"pickup_location\""));
        assert!(encoded.contains("\"dropoff_location\""));
        assert!(encoded.contains("\"phoneNumber\""));

        let decoded: OrderContext = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, context);
    }
}
