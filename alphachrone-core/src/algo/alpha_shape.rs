//! Alpha-shape edge filtering over a Delaunay triangulation
//!
//! A triangle is admitted when its circumradius is below `1 / alpha`; the
//! edges of all admitted triangles form the candidate boundary. Small
//! alphas admit nearly everything and approach the convex hull, large
//! alphas follow local point density and tend to fragment.

use std::collections::BTreeSet;

use geo::Coord;
use log::trace;

use super::triangulation::Triangulation;

/// Undirected index pairs, each stored once as `(min, max)`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundaryEdgeSet {
    edges: BTreeSet<(usize, usize)>,
}

impl BoundaryEdgeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the edge, in either direction, is already present
    pub fn insert(&mut self, i: usize, j: usize) -> bool {
        self.edges.insert(normalize(i, j))
    }

    pub fn contains(&self, i: usize, j: usize) -> bool {
        self.edges.contains(&normalize(i, j))
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edges.iter().copied()
    }
}

impl FromIterator<(usize, usize)> for BoundaryEdgeSet {
    fn from_iter<I: IntoIterator<Item = (usize, usize)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (i, j) in iter {
            set.insert(i, j);
        }
        set
    }
}

fn normalize(i: usize, j: usize) -> (usize, usize) {
    if i <= j { (i, j) } else { (j, i) }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlphaShapeBuilder {
    degenerate_area_epsilon: f64,
}

impl Default for AlphaShapeBuilder {
    fn default() -> Self {
        Self {
            degenerate_area_epsilon: 1e-4,
        }
    }
}

impl AlphaShapeBuilder {
    pub fn new(degenerate_area_epsilon: f64) -> Self {
        Self {
            degenerate_area_epsilon,
        }
    }

    /// Circumradius from side lengths and Heron's area.
    ///
    /// Near-collinear triangles, whose Heron radicand rounds to zero or
    /// below, get the epsilon area instead. This overestimates their
    /// circumradius by a bounded amount and keeps the result finite.
    pub fn circumradius(&self, a: Coord<f64>, b: Coord<f64>, c: Coord<f64>) -> f64 {
        let len_ab = distance(a, b);
        let len_bc = distance(b, c);
        let len_ca = distance(c, a);

        let s = (len_ab + len_bc + len_ca) / 2.0;
        let radicand = s * (s - len_ab) * (s - len_bc) * (s - len_ca);
        let mut area = if radicand > 0.0 { radicand.sqrt() } else { 0.0 };
        if area == 0.0 {
            trace!("Degenerate triangle {a:?} {b:?} {c:?}, clamping area");
            area = self.degenerate_area_epsilon;
        }

        len_ab * len_bc * len_ca / (4.0 * area)
    }

    /// Edges of every triangle with circumradius below `1 / alpha`
    pub fn boundary_edges(
        &self,
        points: &[Coord<f64>],
        triangulation: &Triangulation,
        alpha: f64,
    ) -> BoundaryEdgeSet {
        let threshold = 1.0 / alpha;
        let mut edges = BoundaryEdgeSet::new();

        for &[ia, ib, ic] in triangulation.triangles() {
            let radius = self.circumradius(points[ia], points[ib], points[ic]);
            if radius < threshold {
                edges.insert(ia, ib);
                edges.insert(ib, ic);
                edges.insert(ic, ia);
            }
        }

        edges
    }
}

fn distance(p: Coord<f64>, q: Coord<f64>) -> f64 {
    (p.x - q.x).hypot(p.y - q.y)
}
