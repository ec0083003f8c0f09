//! Delaunay triangulation of the point cloud, by index

use geo::Coord;
use spade::{DelaunayTriangulation, Point2, Triangulation as _};

use crate::Error;

/// Triangles as triples of point-cloud indices.
///
/// Coincident input points collapse onto the first index that occupied
/// the position, later duplicates never appear in a triangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Triangulation {
    triangles: Vec<[usize; 3]>,
}

impl Triangulation {
    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

impl From<Vec<[usize; 3]>> for Triangulation {
    fn from(triangles: Vec<[usize; 3]>) -> Self {
        Self { triangles }
    }
}

/// # Errors
///
/// `Triangulation` if a coordinate cannot be inserted (NaN, out of range)
/// or the points do not span a single triangle (fewer than three distinct
/// points, or all collinear).
pub fn triangulate(points: &[Coord<f64>]) -> Result<Triangulation, Error> {
    let mut delaunay: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();
    // spade vertex slot -> first point index inserted at that position
    let mut vertex_points: Vec<usize> = Vec::with_capacity(points.len());

    for (index, coord) in points.iter().enumerate() {
        let handle = delaunay
            .insert(Point2::new(coord.x, coord.y))
            .map_err(|e| Error::Triangulation(format!("cannot insert point {index}: {e:?}")))?;
        let slot = handle.index();
        if slot >= vertex_points.len() {
            vertex_points.resize(slot + 1, index);
        }
    }

    let triangles: Vec<[usize; 3]> = delaunay
        .inner_faces()
        .map(|face| face.vertices().map(|v| vertex_points[v.fix().index()]))
        .collect();

    if triangles.is_empty() {
        return Err(Error::Triangulation(format!(
            "{} points ({} distinct) do not span a triangle",
            points.len(),
            delaunay.num_vertices()
        )));
    }

    Ok(Triangulation { triangles })
}

#[cfg(test)]
mod tests {
    use geo::coord;

    use super::*;

    #[test]
    fn square_splits_into_two_triangles() {
        let points = [
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 1.0, y: 0.0 },
            coord! { x: 1.0, y: 1.1 },
            coord! { x: 0.0, y: 1.0 },
        ];
        let tri = triangulate(&points).unwrap();
        assert_eq!(tri.len(), 2);
        assert!(tri.triangles().iter().flatten().all(|&i| i < 4));
    }

    #[test]
    fn duplicates_map_to_first_occurrence() {
        let points = [
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 1.0, y: 0.0 },
            coord! { x: 1.0, y: 0.0 },
            coord! { x: 0.0, y: 1.0 },
        ];
        let tri = triangulate(&points).unwrap();
        assert_eq!(tri.len(), 1);
        let mut vertices = tri.triangles()[0];
        vertices.sort_unstable();
        assert_eq!(vertices, [0, 1, 3]);
    }

    #[test]
    fn collinear_points_fail() {
        let points: Vec<_> = (0..5).map(|i| coord! { x: i as f64, y: 2.0 * i as f64 }).collect();
        assert!(matches!(triangulate(&points), Err(Error::Triangulation(_))));
    }

    #[test]
    fn nan_coordinates_fail() {
        let points = [
            coord! { x: 0.0, y: 0.0 },
            coord! { x: f64::NAN, y: 0.0 },
            coord! { x: 0.0, y: 1.0 },
        ];
        assert!(matches!(triangulate(&points), Err(Error::Triangulation(_))));
    }
}
