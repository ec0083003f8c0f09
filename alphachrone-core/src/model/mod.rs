//! Data model for isochrone construction
//!
//! Contains the proximity graph handed out by graph providers and the
//! finished isochrone returned to callers.

pub mod graph;
pub mod isochrone;
pub mod route_mode;

pub use graph::{GraphEdge, GraphNode, LocalProjection, NodeKind, ProximityGraph};
pub use isochrone::{Isochrone, OutputFormat};
pub use route_mode::RouteMode;
