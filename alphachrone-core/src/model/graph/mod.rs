//! Weighted proximity graph around a request origin

pub mod components;
pub mod network;
pub mod projection;

pub use components::{GraphEdge, GraphNode, NodeKind};
pub use network::ProximityGraph;
pub use projection::LocalProjection;
