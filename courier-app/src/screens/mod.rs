//! Headless screen controllers.
//!
//! Each controller owns one screen's behavior and reports a navigation
//! signal; rendering and input belong to the embedding UI.

mod delivery;
mod orders;
mod sign_in;
mod sign_up;

pub use delivery::DeliveryScreen;
pub use orders::OrdersScreen;
pub use sign_in::submit_sign_in;
pub use sign_up::submit_sign_up;

/// Where the shell routes next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    SignIn,
    OrderList,
    DeliveryMap,
}

/// Outcome of a submitted form: move on, or surface a blocking message
/// and stay put.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    Success { notice: String, next: Navigation },
    Failure(String),
}
