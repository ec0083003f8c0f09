//! Alpha schedule walk: first candidate assembling into one polygon wins

use geo::{Coord, Polygon};
use log::debug;
use rayon::prelude::*;

use super::alpha_shape::AlphaShapeBuilder;
use super::polygonize::{GeometryResult, PolygonAssembler};
use super::triangulation::Triangulation;
use crate::Error;
use crate::deadline::Deadline;

#[derive(Debug, Clone, PartialEq)]
pub struct SelectedShape {
    pub polygon: Polygon<f64>,
    pub alpha: f64,
}

/// Evaluates alpha candidates against one point cloud and its
/// triangulation. Candidates are independent of each other.
pub struct ShapeSelector<'a, A: PolygonAssembler> {
    points: &'a [Coord<f64>],
    triangulation: &'a Triangulation,
    builder: AlphaShapeBuilder,
    assembler: &'a A,
}

impl<'a, A: PolygonAssembler> ShapeSelector<'a, A> {
    pub fn new(
        points: &'a [Coord<f64>],
        triangulation: &'a Triangulation,
        builder: AlphaShapeBuilder,
        assembler: &'a A,
    ) -> Self {
        Self {
            points,
            triangulation,
            builder,
            assembler,
        }
    }

    pub fn evaluate(&self, alpha: f64) -> GeometryResult {
        let edges = self
            .builder
            .boundary_edges(self.points, self.triangulation, alpha);
        self.assembler.assemble_and_union(&edges, self.points)
    }

    /// Walks `candidates` in order and accepts the first single polygon.
    ///
    /// # Errors
    ///
    /// `Assembly` as soon as a candidate fails hard, `ScheduleExhausted`
    /// when no candidate yields exactly one polygon, `DeadlineExceeded`
    /// if the deadline passes between candidates.
    pub fn select(&self, candidates: &[f64], deadline: &Deadline) -> Result<SelectedShape, Error> {
        for &alpha in candidates {
            deadline.check("alpha schedule")?;
            if let Some(outcome) = self.accept(alpha) {
                return outcome;
            }
        }
        Err(Error::ScheduleExhausted {
            candidates: candidates.len(),
        })
    }

    fn accept(&self, alpha: f64) -> Option<Result<SelectedShape, Error>> {
        match self.evaluate(alpha) {
            GeometryResult::SinglePolygon(polygon) => {
                debug!("Alpha {alpha} accepted");
                Some(Ok(SelectedShape { polygon, alpha }))
            }
            GeometryResult::MultiPolygon(parts) => {
                debug!("Alpha {alpha} rejected: {} disjoint polygons", parts.0.len());
                None
            }
            GeometryResult::Empty => {
                debug!("Alpha {alpha} rejected: empty boundary");
                None
            }
            GeometryResult::HardFailure(failure) => Some(Err(Error::Assembly(format!(
                "alpha {alpha}: {failure}"
            )))),
        }
    }
}

impl<A: PolygonAssembler + Sync> ShapeSelector<'_, A> {
    /// Same outcome as [`ShapeSelector::select`], with candidates evaluated
    /// on the rayon pool. The earliest candidate in schedule order that
    /// settles the walk (success or hard failure) decides the result.
    pub fn select_parallel(
        &self,
        candidates: &[f64],
        deadline: &Deadline,
    ) -> Result<SelectedShape, Error> {
        candidates
            .par_iter()
            .find_map_first(|&alpha| {
                if deadline.is_expired() {
                    return Some(Err(Error::DeadlineExceeded("alpha schedule")));
                }
                self.accept(alpha)
            })
            .unwrap_or(Err(Error::ScheduleExhausted {
                candidates: candidates.len(),
            }))
    }
}
