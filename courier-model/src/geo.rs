use serde::{Deserialize, Serialize};

/// Geographic position, encoded on the wire the way the backend sends
/// it: `x` is the latitude-like axis, `y` the longitude-like axis.
///
/// Both fields are plain floats with no range validation; a position is
/// either fully present or absent as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    #[serde(rename = "x")]
    pub lat: f64,
    #[serde(rename = "y")]
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Arithmetic per-axis average. Not geodesic.
    pub fn midpoint(&self, other: &Coordinate) -> Coordinate {
        Coordinate {
            lat: (self.lat + other.lat) / 2.0,
            lng: (self.lng + other.lng) / 2.0,
        }
    }

    /// Larger of the two absolute per-axis spans to `other`, in degrees.
    pub fn max_axis_span(&self, other: &Coordinate) -> f64 {
        let lat_span = (self.lat - other.lat).abs();
        let lng_span = (self.lng - other.lng).abs();
        lat_span.max(lng_span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoint_is_per_axis_average() {
        let a = Coordinate::new(-6.8, 39.2);
        let b = Coordinate::new(-6.6, 39.4);
        let mid = a.midpoint(&b);
        assert!((mid.lat - -6.7).abs() < 1e-12);
        assert!((mid.lng - 39.3).abs() < 1e-12);
    }

    #[test]
    fn span_takes_the_larger_axis() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.02, 0.15);
        assert_eq!(a.max_axis_span(&b), 0.15);
        assert_eq!(b.max_axis_span(&a), 0.15);
    }

    #[test]
    fn wire_encoding_uses_x_and_y() {
        let json = serde_json::to_value(Coordinate::new(-6.77, 39.23)).unwrap();
        assert_eq!(json["x"], -6.77);
        assert_eq!(json["y"], 39.23);
    }
}
