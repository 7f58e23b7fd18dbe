use tracing::warn;

use courier_core::api::RiderBackend;
use courier_core::session::{self, SignUpForm};

use super::{FormOutcome, Navigation};

/// Submit the sign-up form. The client-side rules (matching passwords,
/// captured location) are enforced before anything goes over the wire.
pub async fn submit_sign_up(backend: &dyn RiderBackend, form: SignUpForm) -> FormOutcome {
    match session::sign_up(backend, form).await {
        Ok(()) => FormOutcome::Success {
            notice: "Registration successful!".to_string(),
            next: Navigation::SignIn,
        },
        Err(err) => {
            warn!("sign-up failed: {err}");
            FormOutcome::Failure(format!("Registration failed: {err}"))
        }
    }
}
