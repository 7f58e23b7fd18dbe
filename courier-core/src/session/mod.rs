//! Sign-in, sign-up, and the persisted rider identity.

use thiserror::Error;
use tracing::info;

use courier_model::{Coordinate, NewRider, RiderProfile, Session, TransportType};

use crate::api::RiderBackend;
use crate::error::Result;
use crate::store::{ClientState, StoreError};

/// Client-side rules the sign-up form enforces before anything goes
/// over the wire.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SignUpError {
    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("location has not been captured yet")]
    MissingLocation,
}

/// Sign-up form as the rider fills it in.
#[derive(Debug, Clone)]
pub struct SignUpForm {
    pub full_name: String,
    pub phone_number: String,
    pub college_id: i64,
    pub transport_type: TransportType,
    pub password: String,
    pub confirm_password: String,
    pub position: Option<Coordinate>,
}

impl Default for SignUpForm {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            phone_number: String::new(),
            college_id: 1,
            transport_type: TransportType::Foot,
            password: String::new(),
            confirm_password: String::new(),
            position: None,
        }
    }
}

impl SignUpForm {
    /// Validate the client-side rules and produce the registration
    /// payload.
    pub fn into_new_rider(self) -> std::result::Result<NewRider, SignUpError> {
        if self.password != self.confirm_password {
            return Err(SignUpError::PasswordMismatch);
        }
        let position = self.position.ok_or(SignUpError::MissingLocation)?;

        Ok(NewRider {
            full_name: self.full_name,
            phone_number: self.phone_number,
            college_id: self.college_id,
            transport_type: self.transport_type,
            password: self.password,
            position,
        })
    }
}

/// Authenticate and persist the rider identity.
pub async fn sign_in(
    backend: &dyn RiderBackend,
    state: &ClientState,
    full_name: &str,
    password: &str,
) -> Result<RiderProfile> {
    let profile = backend.login(full_name, password).await?;
    state.set_rider_identity(&profile)?;
    info!(rider_id = profile.id, "signed in");
    Ok(profile)
}

/// Validate the form and create the account. The rider signs in
/// afterwards; nothing is persisted here.
pub async fn sign_up(backend: &dyn RiderBackend, form: SignUpForm) -> Result<()> {
    let new_rider = form.into_new_rider()?;
    backend.register(&new_rider).await?;
    info!("rider account created");
    Ok(())
}

/// Rebuild the session from whatever identity survived the last run.
pub fn load_session(state: &ClientState) -> std::result::Result<Session, StoreError> {
    match state.rider_id()? {
        Some(id) => Ok(Session::Authenticated(RiderProfile {
            id,
            display_name: state.rider_name()?.unwrap_or_default(),
            email: None,
            home_location: state.rider_coordinates()?,
        })),
        None => Ok(Session::Unauthenticated),
    }
}

/// Forget the persisted identity.
pub fn sign_out(state: &ClientState) -> std::result::Result<(), StoreError> {
    state.clear_rider_identity()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> SignUpForm {
        SignUpForm {
            full_name: "Jane Doe".to_string(),
            phone_number: "+255700000001".to_string(),
            password: "secret".to_string(),
            confirm_password: "secret".to_string(),
            position: Some(Coordinate::new(-6.77, 39.23)),
            ..SignUpForm::default()
        }
    }

    #[test]
    fn mismatched_passwords_are_rejected() {
        let mut bad = form();
        bad.confirm_password = "different".to_string();
        assert_eq!(
            bad.into_new_rider().unwrap_err(),
            SignUpError::PasswordMismatch
        );
    }

    #[test]
    fn missing_location_is_rejected() {
        let mut bad = form();
        bad.position = None;
        assert_eq!(
            bad.into_new_rider().unwrap_err(),
            SignUpError::MissingLocation
        );
    }

    #[test]
    fn valid_form_becomes_a_registration_payload() {
        let new_rider = form().into_new_rider().unwrap();
        assert_eq!(new_rider.full_name, "Jane Doe");
        assert_eq!(new_rider.college_id, 1);
        assert_eq!(new_rider.transport_type, TransportType::Foot);
        assert_eq!(new_rider.position, Coordinate::new(-6.77, 39.23));
    }
}
