//! Finished isochrone polygon

use geo::{Area, Polygon};
use serde::{Deserialize, Serialize};

use crate::Minutes;
use crate::algo::output::canonical_orientation;

/// Representation returned by [`crate::build_isochrone`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `GeoJSON` geometry object
    #[default]
    Interchange,
    /// In-memory [`Isochrone`]
    Native,
}

/// Area reachable from an origin within a travel-time budget.
///
/// The exterior ring is always counter-clockwise and closed, coordinates
/// are longitude / latitude.
///
/// When only one or two street nodes are reached, the convex hull is a
/// point or a segment: the ring then has two or three positions and no
/// area, which is not a valid `GeoJSON` linear ring. Such results are
/// still returned and can be detected with [`Isochrone::is_degenerate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Isochrone {
    polygon: Polygon<f64>,
    alpha: Option<f64>,
    reached_nodes: usize,
    time_budget: Minutes,
}

impl Isochrone {
    pub(crate) fn new(
        polygon: Polygon<f64>,
        alpha: Option<f64>,
        reached_nodes: usize,
        time_budget: Minutes,
    ) -> Self {
        Self {
            polygon: canonical_orientation(polygon),
            alpha,
            reached_nodes,
            time_budget,
        }
    }

    pub fn polygon(&self) -> &Polygon<f64> {
        &self.polygon
    }

    pub fn into_polygon(self) -> Polygon<f64> {
        self.polygon
    }

    /// Alpha of the accepted candidate, `None` for the convex hull fallback
    pub fn alpha(&self) -> Option<f64> {
        self.alpha
    }

    /// Number of street nodes reached within the budget
    pub fn reached_nodes(&self) -> usize {
        self.reached_nodes
    }

    pub fn time_budget(&self) -> Minutes {
        self.time_budget
    }

    /// True when the polygon encloses no area (fewer than three distinct
    /// reached positions, or all of them collinear)
    pub fn is_degenerate(&self) -> bool {
        self.polygon.exterior().0.len() < 4 || self.polygon.unsigned_area() == 0.0
    }
}

#[cfg(test)]
mod tests {
    use geo::{LineString, coord, polygon};

    use super::*;

    #[test]
    fn point_and_segment_hulls_are_degenerate() {
        let point = Polygon::new(LineString::from(vec![coord! { x: 1.0, y: 1.0 }; 2]), vec![]);
        assert!(Isochrone::new(point, None, 1, 5.0).is_degenerate());

        let segment = Polygon::new(
            LineString::from(vec![
                coord! { x: 0.0, y: 0.0 },
                coord! { x: 1.0, y: 1.0 },
                coord! { x: 0.0, y: 0.0 },
            ]),
            vec![],
        );
        let isochrone = Isochrone::new(segment, None, 2, 5.0);
        assert!(isochrone.is_degenerate());
        assert!(isochrone.polygon().exterior().0.len() < 4);
    }

    #[test]
    fn triangles_are_not_degenerate() {
        let triangle = polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 0.0, y: 1.0)];
        assert!(!Isochrone::new(triangle, None, 3, 5.0).is_degenerate());
    }
}
