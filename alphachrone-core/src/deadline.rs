use std::time::{Duration, Instant};

use crate::Error;

/// Wall-clock limit for one isochrone request
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    expires_at: Option<Instant>,
}

impl Deadline {
    pub fn after(timeout: Option<Duration>) -> Self {
        Self {
            expires_at: timeout.map(|t| Instant::now() + t),
        }
    }

    pub fn unbounded() -> Self {
        Self { expires_at: None }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Instant::now() >= at)
    }

    pub fn check(&self, stage: &'static str) -> Result<(), Error> {
        if self.is_expired() {
            Err(Error::DeadlineExceeded(stage))
        } else {
            Ok(())
        }
    }
}
