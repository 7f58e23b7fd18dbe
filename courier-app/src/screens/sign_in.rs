use tracing::warn;

use courier_core::api::RiderBackend;
use courier_core::session;
use courier_core::store::ClientState;

use super::{FormOutcome, Navigation};

/// Submit the sign-in form. Success persists the identity and routes
/// to the order list; any failure surfaces as a blocking message.
pub async fn submit_sign_in(
    backend: &dyn RiderBackend,
    state: &ClientState,
    full_name: &str,
    password: &str,
) -> FormOutcome {
    match session::sign_in(backend, state, full_name, password).await {
        Ok(_) => FormOutcome::Success {
            notice: "Login successful!".to_string(),
            next: Navigation::OrderList,
        },
        Err(err) => {
            warn!("sign-in failed: {err}");
            FormOutcome::Failure(format!("Login failed: {err}"))
        }
    }
}
