use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// Zoom used when the two points are close enough that no bucket
/// applies.
pub const DEFAULT_ZOOM: u8 = 13;

/// Map camera: center plus discrete zoom level. Derived from the points
/// being displayed, recomputed on every endpoint change, never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub center: Coordinate,
    pub zoom: u8,
}

impl ViewState {
    /// Camera that frames both points: centered on their arithmetic
    /// midpoint, zoom picked by thresholding the larger axis span.
    ///
    /// The breakpoints are hand-tuned degree spans rather than a proper
    /// bounding-box-to-zoom projection (no viewport aspect ratio, no
    /// Mercator correction). They are kept verbatim so the camera
    /// matches the production visual behavior; all comparisons are
    /// strict, so a span exactly on a breakpoint lands in the wider
    /// bucket.
    pub fn spanning(origin: &Coordinate, destination: &Coordinate) -> Self {
        let span = origin.max_axis_span(destination);

        let zoom = if span > 0.1 {
            10
        } else if span > 0.05 {
            11
        } else if span > 0.01 {
            12
        } else {
            DEFAULT_ZOOM
        };

        Self {
            center: origin.midpoint(destination),
            zoom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view_for_span(span: f64) -> ViewState {
        ViewState::spanning(
            &Coordinate::new(0.0, 0.0),
            &Coordinate::new(span, 0.0),
        )
    }

    #[test]
    fn center_is_the_midpoint() {
        let view = ViewState::spanning(
            &Coordinate::new(-6.8, 39.2),
            &Coordinate::new(-6.6, 39.4),
        );
        assert!((view.center.lat - -6.7).abs() < 1e-12);
        assert!((view.center.lng - 39.3).abs() < 1e-12);
    }

    #[test]
    fn zoom_buckets() {
        assert_eq!(view_for_span(0.2).zoom, 10);
        assert_eq!(view_for_span(0.07).zoom, 11);
        assert_eq!(view_for_span(0.03).zoom, 12);
        assert_eq!(view_for_span(0.001).zoom, 13);
    }

    #[test]
    fn breakpoints_are_exclusive() {
        // A span exactly on a threshold stays in the wider bucket.
        assert_eq!(view_for_span(0.1).zoom, 11);
        assert_eq!(view_for_span(0.05).zoom, 12);
        assert_eq!(view_for_span(0.01).zoom, 13);
    }

    #[test]
    fn zoom_never_increases_with_span() {
        let spans = [0.0, 0.005, 0.01, 0.02, 0.05, 0.08, 0.1, 0.3, 2.0];
        let zooms: Vec<u8> = spans.iter().map(|s| view_for_span(*s).zoom).collect();
        assert!(zooms.windows(2).all(|pair| pair[1] <= pair[0]));
    }

    #[test]
    fn span_uses_the_larger_axis() {
        let view = ViewState::spanning(
            &Coordinate::new(0.0, 0.0),
            &Coordinate::new(0.001, 0.2),
        );
        assert_eq!(view.zoom, 10);
    }
}
