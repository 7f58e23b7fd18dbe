use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// How the rider moves deliveries around. Wire-encoded lowercase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportType {
    #[default]
    Foot,
    Bicycle,
    Motorcycle,
}

impl FromStr for TransportType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "foot" => Ok(TransportType::Foot),
            "bicycle" => Ok(TransportType::Bicycle),
            "motorcycle" => Ok(TransportType::Motorcycle),
            other => Err(format!("unknown transport type: {other}")),
        }
    }
}

/// Authenticated rider as the backend describes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiderProfile {
    pub id: i64,
    pub display_name: String,
    pub email: Option<String>,
    /// Coordinates recorded at registration, if the backend returned
    /// them at sign-in.
    pub home_location: Option<Coordinate>,
}

/// Authentication state as a tagged union rather than a bag of
/// nullable fields.
#[derive(Debug, Clone, PartialEq)]
pub enum Session {
    Unauthenticated,
    Authenticated(RiderProfile),
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }

    pub fn profile(&self) -> Option<&RiderProfile> {
        match self {
            Session::Authenticated(profile) => Some(profile),
            Session::Unauthenticated => None,
        }
    }
}

/// Registration payload for a new rider account.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRider {
    pub full_name: String,
    pub phone_number: String,
    pub college_id: i64,
    pub transport_type: TransportType,
    pub password: String,
    pub position: Coordinate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_type_parses_wire_values() {
        assert_eq!("foot".parse::<TransportType>(), Ok(TransportType::Foot));
        assert_eq!(
            "motorcycle".parse::<TransportType>(),
            Ok(TransportType::Motorcycle)
        );
        assert!("car".parse::<TransportType>().is_err());
    }

    #[test]
    fn transport_type_encodes_lowercase() {
        assert_eq!(
            serde_json::to_string(&TransportType::Bicycle).unwrap(),
            "\"bicycle\""
        );
    }

    #[test]
    fn session_exposes_profile_only_when_authenticated() {
        assert!(Session::Unauthenticated.profile().is_none());

        let session = Session::Authenticated(RiderProfile {
            id: 7,
            display_name: "Jane".to_string(),
            email: None,
            home_location: None,
        });
        assert!(session.is_authenticated());
        assert_eq!(session.profile().map(|p| p.id), Some(7));
    }
}
