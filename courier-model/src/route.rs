use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// Result of one directions lookup.
///
/// A fresh value is produced on every successful fetch and replaces the
/// previous one wholesale; partial merges never happen. When the
/// endpoints become unavailable the route is simply dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteInfo {
    /// Driving distance in meters.
    pub distance_meters: f64,
    /// Estimated travel time in seconds.
    pub duration_seconds: f64,
    /// Route geometry, ordered from origin to destination.
    pub path: Vec<Coordinate>,
}

impl RouteInfo {
    /// Distance for display: `842m` below a kilometer, `3.1km` above.
    pub fn format_distance(&self) -> String {
        if self.distance_meters < 1000.0 {
            format!("{}m", self.distance_meters.round() as i64)
        } else {
            format!("{:.1}km", self.distance_meters / 1000.0)
        }
    }

    /// ETA for display: whole minutes under an hour, `1h 5min` above.
    pub fn format_duration(&self) -> String {
        let minutes = (self.duration_seconds / 60.0).round() as i64;
        if minutes < 60 {
            return format!("{minutes}min");
        }
        let hours = minutes / 60;
        let remaining = minutes % 60;
        format!("{hours}h {remaining}min")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(distance_meters: f64, duration_seconds: f64) -> RouteInfo {
        RouteInfo {
            distance_meters,
            duration_seconds,
            path: Vec::new(),
        }
    }

    #[test]
    fn short_distances_stay_in_meters() {
        assert_eq!(route(842.3, 0.0).format_distance(), "842m");
        assert_eq!(route(999.4, 0.0).format_distance(), "999m");
    }

    #[test]
    fn long_distances_use_kilometers() {
        assert_eq!(route(1000.0, 0.0).format_distance(), "1.0km");
        assert_eq!(route(3140.0, 0.0).format_distance(), "3.1km");
    }

    #[test]
    fn durations_round_to_minutes() {
        assert_eq!(route(0.0, 90.0).format_duration(), "2min");
        assert_eq!(route(0.0, 59.0 * 60.0).format_duration(), "59min");
        assert_eq!(route(0.0, 65.0 * 60.0).format_duration(), "1h 5min");
    }
}
