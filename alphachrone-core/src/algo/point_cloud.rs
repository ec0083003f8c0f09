use geo::{ConvexHull, Coord, MultiPoint, Point, Polygon};

use crate::routing::EgoNetwork;

/// Fewest points from which a concave boundary is attempted
pub const MIN_CONCAVE_POINTS: usize = 4;

/// Longitude / latitude of every reached street node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    points: Vec<Coord<f64>>,
}

impl PointCloud {
    pub fn new(points: Vec<Coord<f64>>) -> Self {
        Self { points }
    }

    pub fn from_ego_network(ego: &EgoNetwork) -> Self {
        Self {
            points: ego.members.iter().map(|m| m.geometry.into()).collect(),
        }
    }

    pub fn points(&self) -> &[Coord<f64>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Too few points for triangulation and alpha filtering
    pub fn needs_hull_fallback(&self) -> bool {
        self.points.len() < MIN_CONCAVE_POINTS
    }

    pub fn convex_hull(&self) -> Polygon<f64> {
        let points: MultiPoint<f64> = self.points.iter().map(|c| Point::from(*c)).collect();
        points.convex_hull()
    }
}

#[cfg(test)]
mod tests {
    use geo::{Area, coord};

    use super::*;

    #[test]
    fn hull_of_triangle_is_the_triangle() {
        let cloud = PointCloud::new(vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 1.0, y: 0.0 },
            coord! { x: 0.0, y: 1.0 },
        ]);
        assert!(cloud.needs_hull_fallback());
        let hull = cloud.convex_hull();
        assert!((hull.unsigned_area() - 0.5).abs() < 1e-12);
        assert_eq!(hull.exterior().0.len(), 4);
    }

    #[test]
    fn hull_of_one_or_two_points_is_degenerate() {
        let single = PointCloud::new(vec![coord! { x: 2.0, y: 3.0 }]).convex_hull();
        assert_eq!(single.unsigned_area(), 0.0);
        assert!(single.exterior().0.iter().all(|c| *c == coord! { x: 2.0, y: 3.0 }));

        let pair = PointCloud::new(vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 1.0 }])
            .convex_hull();
        assert_eq!(pair.unsigned_area(), 0.0);
    }

    #[test]
    fn four_points_do_not_fall_back() {
        let cloud = PointCloud::new(vec![coord! { x: 0.0, y: 0.0 }; 4]);
        assert!(!cloud.needs_hull_fallback());
    }
}
