pub mod algo;
pub mod config;
pub mod deadline;
pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;

pub use algo::isochrone::{IsochroneOutput, IsochroneRequest, build_isochrone, bulk_isochrones};
pub use config::{AlphaSchedule, IsochroneConfig};
pub use model::{Isochrone, OutputFormat, ProximityGraph, RouteMode};

/// Travel time in minutes
pub type Minutes = f64;
/// Length in metres
pub type Meters = f64;
/// Stable identifier of a street network node as supplied by the data source
pub type NodeId = i64;

/// Speed used when a request does not specify one, km/h
pub const DEFAULT_SPEED_KMH: f64 = 4.5;

/// Converts a speed in km/h into metres per minute
pub fn meters_per_minute(speed_kmh: f64) -> f64 {
    speed_kmh * 1000.0 / 60.0
}
