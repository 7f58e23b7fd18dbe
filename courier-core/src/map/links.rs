//! Hand-off links to external applications. Fire-and-forget; nothing
//! comes back.

use courier_model::Coordinate;

/// `tel:` URI for the call-customer button.
pub fn call_link(phone_number: &str) -> String {
    format!("tel:{phone_number}")
}

/// Turn-by-turn navigation URL for the external maps application.
pub fn directions_link(origin: &Coordinate, destination: &Coordinate) -> String {
    format!(
        "https://www.google.com/maps/dir/{},{}/{},{}",
        origin.lat, origin.lng, destination.lat, destination.lng
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_formats() {
        assert_eq!(call_link("+255700000001"), "tel:+255700000001");
        assert_eq!(
            directions_link(
                &Coordinate::new(-6.77, 39.23),
                &Coordinate::new(-6.81, 39.28)
            ),
            "https://www.google.com/maps/dir/-6.77,39.23/-6.81,39.28"
        );
    }
}
