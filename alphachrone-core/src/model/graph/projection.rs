use geo::{Coord, Point};

/// Mean earth radius in metres
const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Equirectangular projection centred on a reference point.
///
/// Distortion grows with distance from the reference, which is acceptable
/// for the few kilometres an isochrone request covers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalProjection {
    reference: Point<f64>,
    cos_lat: f64,
}

impl LocalProjection {
    pub fn new(reference: Point<f64>) -> Self {
        Self {
            reference,
            cos_lat: reference.y().to_radians().cos(),
        }
    }

    pub fn project(&self, point: Point<f64>) -> Coord<f64> {
        Coord {
            x: EARTH_RADIUS_M * (point.x() - self.reference.x()).to_radians() * self.cos_lat,
            y: EARTH_RADIUS_M * (point.y() - self.reference.y()).to_radians(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_projects_to_origin() {
        let projection = LocalProjection::new(Point::new(-0.1, 51.5));
        let c = projection.project(Point::new(-0.1, 51.5));
        assert!(c.x.abs() < 1e-9 && c.y.abs() < 1e-9);
    }

    #[test]
    fn longitude_shrinks_with_latitude() {
        let equator = LocalProjection::new(Point::new(0.0, 0.0));
        let london = LocalProjection::new(Point::new(-0.1, 51.5));
        let at_equator = equator.project(Point::new(0.001, 0.0));
        let at_london = london.project(Point::new(-0.099, 51.5));
        assert!((at_london.x / at_equator.x - 51.5_f64.to_radians().cos()).abs() < 1e-9);
    }

    #[test]
    fn one_millidegree_of_latitude_is_about_111_metres() {
        let projection = LocalProjection::new(Point::new(0.0, 0.0));
        let c = projection.project(Point::new(0.0, 0.001));
        assert!((c.y - 111.19).abs() < 0.1);
    }
}
