//! Polygon assembly from boundary edges
//!
//! The edge set is treated as a planar straight-line graph (Delaunay edges
//! never cross). Every bounded face is traced with a half-edge walk, then
//! all faces are merged with a boolean union.

use fixedbitset::FixedBitSet;
use geo::{Coord, LineString, MultiPolygon, Polygon, unary_union};
use itertools::Itertools;
use thiserror::Error;

use super::alpha_shape::BoundaryEdgeSet;

/// Outcome of assembling one candidate boundary
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryResult {
    SinglePolygon(Polygon<f64>),
    MultiPolygon(MultiPolygon<f64>),
    Empty,
    /// Input the assembler cannot work with; never retried
    HardFailure(AssemblyFailure),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssemblyFailure {
    #[error("edge ({0}, {1}) references a point outside the cloud")]
    IndexOutOfRange(usize, usize),
    #[error("point {0} has non-finite coordinates")]
    NonFiniteCoordinate(usize),
    #[error("face walk did not close after {0} steps")]
    UnclosedFace(usize),
}

pub trait PolygonAssembler {
    /// Builds polygons from `edges` over `points` and unions them
    fn assemble_and_union(&self, edges: &BoundaryEdgeSet, points: &[Coord<f64>]) -> GeometryResult;
}

/// Face-tracing polygonizer
#[derive(Debug, Clone, Copy, Default)]
pub struct FacePolygonizer;

impl PolygonAssembler for FacePolygonizer {
    fn assemble_and_union(&self, edges: &BoundaryEdgeSet, points: &[Coord<f64>]) -> GeometryResult {
        if edges.is_empty() {
            return GeometryResult::Empty;
        }

        let graph = match HalfEdgeGraph::new(edges, points) {
            Ok(graph) => graph,
            Err(failure) => return GeometryResult::HardFailure(failure),
        };
        let faces = match graph.bounded_faces(points) {
            Ok(faces) => faces,
            Err(failure) => return GeometryResult::HardFailure(failure),
        };
        if faces.is_empty() {
            return GeometryResult::Empty;
        }

        classify(unary_union(&faces))
    }
}

fn classify(union: MultiPolygon<f64>) -> GeometryResult {
    let mut polygons = union.0;
    match polygons.len() {
        0 => GeometryResult::Empty,
        1 => GeometryResult::SinglePolygon(polygons.remove(0)),
        _ => GeometryResult::MultiPolygon(MultiPolygon::new(polygons)),
    }
}

/// Half-edges grouped by origin vertex, outgoing edges sorted
/// counter-clockwise by angle.
struct HalfEdgeGraph {
    /// Outgoing neighbours per point index
    neighbours: Vec<Vec<usize>>,
    /// Half-edge id of the first outgoing edge per point index
    offsets: Vec<usize>,
    half_edge_count: usize,
}

impl HalfEdgeGraph {
    fn new(edges: &BoundaryEdgeSet, points: &[Coord<f64>]) -> Result<Self, AssemblyFailure> {
        let mut neighbours: Vec<Vec<usize>> = vec![Vec::new(); points.len()];
        for (i, j) in edges.iter() {
            if i >= points.len() || j >= points.len() {
                return Err(AssemblyFailure::IndexOutOfRange(i, j));
            }
            for index in [i, j] {
                let c = points[index];
                if !(c.x.is_finite() && c.y.is_finite()) {
                    return Err(AssemblyFailure::NonFiniteCoordinate(index));
                }
            }
            if i != j {
                neighbours[i].push(j);
                neighbours[j].push(i);
            }
        }

        for (origin, outgoing) in neighbours.iter_mut().enumerate() {
            let o = points[origin];
            outgoing.sort_by(|&a, &b| {
                let angle_a = (points[a].y - o.y).atan2(points[a].x - o.x);
                let angle_b = (points[b].y - o.y).atan2(points[b].x - o.x);
                angle_a.total_cmp(&angle_b).then(a.cmp(&b))
            });
        }

        let mut offsets = Vec::with_capacity(points.len());
        let mut half_edge_count = 0;
        for outgoing in &neighbours {
            offsets.push(half_edge_count);
            half_edge_count += outgoing.len();
        }

        Ok(Self {
            neighbours,
            offsets,
            half_edge_count,
        })
    }

    fn position(&self, vertex: usize, neighbour: usize) -> usize {
        self.neighbours[vertex]
            .iter()
            .position(|&n| n == neighbour)
            .unwrap_or(0)
    }

    /// Next half-edge along the face to the left of `from -> to`: the
    /// outgoing edge of `to` that is clockwise-adjacent to `to -> from`.
    fn next(&self, from: usize, to: usize) -> (usize, usize) {
        let outgoing = &self.neighbours[to];
        let back = self.position(to, from);
        let k = (back + outgoing.len() - 1) % outgoing.len();
        (to, outgoing[k])
    }

    fn id(&self, from: usize, to: usize) -> usize {
        self.offsets[from] + self.position(from, to)
    }

    /// Counter-clockwise face rings with positive area
    fn bounded_faces(&self, points: &[Coord<f64>]) -> Result<Vec<Polygon<f64>>, AssemblyFailure> {
        let mut visited = FixedBitSet::with_capacity(self.half_edge_count);
        let mut faces = Vec::new();

        for (from, outgoing) in self.neighbours.iter().enumerate() {
            for &to in outgoing {
                if visited.contains(self.id(from, to)) {
                    continue;
                }

                let mut ring: Vec<Coord<f64>> = Vec::new();
                let mut current = (from, to);
                loop {
                    visited.insert(self.id(current.0, current.1));
                    ring.push(points[current.0]);
                    current = self.next(current.0, current.1);
                    if current == (from, to) {
                        break;
                    }
                    if ring.len() > self.half_edge_count {
                        return Err(AssemblyFailure::UnclosedFace(ring.len()));
                    }
                }

                if signed_area(&ring) > 0.0 {
                    faces.push(Polygon::new(LineString::from(ring), vec![]));
                }
            }
        }

        Ok(faces)
    }
}

/// Shoelace area, positive for counter-clockwise rings
fn signed_area(ring: &[Coord<f64>]) -> f64 {
    ring.iter()
        .circular_tuple_windows()
        .map(|(p, q)| p.x * q.y - q.x * p.y)
        .sum::<f64>()
        / 2.0
}

#[cfg(test)]
mod tests {
    use geo::{Area, coord};

    use super::*;

    fn grid() -> Vec<Coord<f64>> {
        // 0 1 2
        // 3 4 5
        vec![
            coord! { x: 0.0, y: 1.0 },
            coord! { x: 1.0, y: 1.0 },
            coord! { x: 2.0, y: 1.0 },
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 1.0, y: 0.0 },
            coord! { x: 2.0, y: 0.0 },
        ]
    }

    #[test]
    fn single_triangle() {
        let edges: BoundaryEdgeSet = [(0, 1), (1, 4), (4, 0)].into_iter().collect();
        match FacePolygonizer.assemble_and_union(&edges, &grid()) {
            GeometryResult::SinglePolygon(p) => assert!((p.unsigned_area() - 0.5).abs() < 1e-12),
            other => panic!("expected a polygon, got {other:?}"),
        }
    }

    #[test]
    fn adjacent_faces_merge() {
        // Two triangles and a square sharing edges
        let edges: BoundaryEdgeSet = [(0, 1), (1, 4), (4, 3), (3, 0), (0, 4), (1, 2), (2, 5), (5, 4), (1, 5)]
            .into_iter()
            .collect();
        match FacePolygonizer.assemble_and_union(&edges, &grid()) {
            GeometryResult::SinglePolygon(p) => assert!((p.unsigned_area() - 2.0).abs() < 1e-9),
            other => panic!("expected a polygon, got {other:?}"),
        }
    }

    #[test]
    fn enclosed_faces_are_filled() {
        // Ring of edges around an empty interior still yields the full area
        let edges: BoundaryEdgeSet = [(0, 2), (2, 5), (5, 3), (3, 0)].into_iter().collect();
        match FacePolygonizer.assemble_and_union(&edges, &grid()) {
            GeometryResult::SinglePolygon(p) => {
                assert!((p.unsigned_area() - 2.0).abs() < 1e-9);
                assert!(p.interiors().is_empty());
            }
            other => panic!("expected a polygon, got {other:?}"),
        }
    }

    #[test]
    fn disjoint_faces_are_multi() {
        let mut points = grid();
        points.extend([
            coord! { x: 10.0, y: 0.0 },
            coord! { x: 11.0, y: 0.0 },
            coord! { x: 10.0, y: 1.0 },
        ]);
        let edges: BoundaryEdgeSet = [(0, 1), (1, 4), (4, 0), (6, 7), (7, 8), (8, 6)]
            .into_iter()
            .collect();
        match FacePolygonizer.assemble_and_union(&edges, &points) {
            GeometryResult::MultiPolygon(mp) => assert_eq!(mp.0.len(), 2),
            other => panic!("expected a multipolygon, got {other:?}"),
        }
    }

    #[test]
    fn open_paths_are_empty() {
        let edges: BoundaryEdgeSet = [(0, 1), (1, 2)].into_iter().collect();
        assert_eq!(FacePolygonizer.assemble_and_union(&edges, &grid()), GeometryResult::Empty);
        assert_eq!(
            FacePolygonizer.assemble_and_union(&BoundaryEdgeSet::new(), &grid()),
            GeometryResult::Empty
        );
    }

    #[test]
    fn invalid_input_is_a_hard_failure() {
        let edges: BoundaryEdgeSet = [(0, 1), (1, 40)].into_iter().collect();
        assert_eq!(
            FacePolygonizer.assemble_and_union(&edges, &grid()),
            GeometryResult::HardFailure(AssemblyFailure::IndexOutOfRange(1, 40))
        );

        let mut points = grid();
        points[1].x = f64::NAN;
        let edges: BoundaryEdgeSet = [(0, 1), (1, 4), (4, 0)].into_iter().collect();
        assert_eq!(
            FacePolygonizer.assemble_and_union(&edges, &points),
            GeometryResult::HardFailure(AssemblyFailure::NonFiniteCoordinate(1))
        );
    }

    #[test]
    fn shoelace_sign_follows_winding() {
        let ccw = [
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 1.0, y: 0.0 },
            coord! { x: 0.0, y: 1.0 },
        ];
        assert!((signed_area(&ccw) - 0.5).abs() < 1e-12);
        let cw: Vec<_> = ccw.iter().rev().copied().collect();
        assert!((signed_area(&cw) + 0.5).abs() < 1e-12);
    }
}
