//! Tuning parameters of the isochrone pipeline

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Upper bound on the number of alpha candidates a schedule may produce
pub const MAX_ALPHA_CANDIDATES: usize = 10_000;

/// Descending sequence of alpha candidates `start, start - step, ...`
/// down to and including `stop` when it is hit exactly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlphaSchedule {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl Default for AlphaSchedule {
    fn default() -> Self {
        Self {
            start: 751.0,
            stop: 1.0,
            step: 50.0,
        }
    }
}

impl AlphaSchedule {
    pub fn new(start: f64, stop: f64, step: f64) -> Result<Self, Error> {
        let schedule = Self { start, stop, step };
        schedule.validate()?;
        Ok(schedule)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !(self.stop.is_finite() && self.stop > 0.0) {
            return Err(Error::InvalidData(format!(
                "alpha schedule stop must be positive, got {}",
                self.stop
            )));
        }
        if !(self.start.is_finite() && self.start >= self.stop) {
            return Err(Error::InvalidData(format!(
                "alpha schedule start ({}) must be >= stop ({})",
                self.start, self.stop
            )));
        }
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(Error::InvalidData(format!(
                "alpha schedule step must be positive, got {}",
                self.step
            )));
        }
        let count = self.candidate_count();
        if count > MAX_ALPHA_CANDIDATES {
            return Err(Error::InvalidData(format!(
                "alpha schedule yields {count} candidates, at most {MAX_ALPHA_CANDIDATES} allowed"
            )));
        }
        Ok(())
    }

    fn candidate_count(&self) -> usize {
        // Saturates for huge spans
        ((self.start - self.stop) / self.step + 1e-9).floor() as usize + 1
    }

    /// Candidates in evaluation order (largest alpha first)
    pub fn candidates(&self) -> Vec<f64> {
        // Computed from the index rather than by repeated subtraction so
        // that float error does not accumulate over long schedules.
        let count = self.candidate_count().min(MAX_ALPHA_CANDIDATES);
        (0..count)
            .map(|i| self.start - self.step * i as f64)
            .filter(|alpha| *alpha > 0.0)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IsochroneConfig {
    /// Fetch radius over the straight-line distance reachable within the budget
    pub fetch_radius_multiplier: f64,
    /// Area assigned to degenerate (near-collinear) triangles
    pub degenerate_area_epsilon: f64,
    pub alpha_schedule: AlphaSchedule,
    /// Evaluate alpha candidates on the rayon pool
    pub parallel_schedule: bool,
    /// Per-request deadline covering graph search and shape selection
    pub timeout_ms: Option<u64>,
}

impl Default for IsochroneConfig {
    fn default() -> Self {
        Self {
            fetch_radius_multiplier: 1.5,
            degenerate_area_epsilon: 1e-4,
            alpha_schedule: AlphaSchedule::default(),
            parallel_schedule: false,
            timeout_ms: None,
        }
    }
}

impl IsochroneConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.fetch_radius_multiplier.is_finite() && self.fetch_radius_multiplier >= 1.0) {
            return Err(Error::InvalidData(format!(
                "fetch radius multiplier must be >= 1, got {}",
                self.fetch_radius_multiplier
            )));
        }
        if !(self.degenerate_area_epsilon.is_finite() && self.degenerate_area_epsilon > 0.0) {
            return Err(Error::InvalidData(format!(
                "degenerate area epsilon must be positive, got {}",
                self.degenerate_area_epsilon
            )));
        }
        if self.timeout_ms == Some(0) {
            return Err(Error::InvalidData("timeout must be non-zero".to_string()));
        }
        self.alpha_schedule.validate()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}
