//! Graph components - nodes and edges

use geo::{Coord, Point};

use crate::{Meters, Minutes, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Node supplied by the graph provider
    Street(NodeId),
    /// Synthetic node placed at the request origin
    VirtualOrigin,
}

/// Proximity graph node
#[derive(Debug, Clone)]
pub struct GraphNode {
    pub kind: NodeKind,
    /// Longitude / latitude
    pub geometry: Point<f64>,
    /// Projected coordinates in metres
    pub planar: Coord<f64>,
}

impl GraphNode {
    pub fn street_id(&self) -> Option<NodeId> {
        match self.kind {
            NodeKind::Street(id) => Some(id),
            NodeKind::VirtualOrigin => None,
        }
    }

    pub fn is_virtual(&self) -> bool {
        self.kind == NodeKind::VirtualOrigin
    }
}

/// Proximity graph edge
#[derive(Debug, Clone)]
pub struct GraphEdge {
    pub length_m: Meters,
    /// Traversal time at the request speed, zero until assigned
    pub time_min: Minutes,
}

impl GraphEdge {
    pub fn new(length_m: Meters) -> Self {
        Self {
            length_m,
            time_min: 0.0,
        }
    }

    pub fn travel_time(&self) -> Minutes {
        self.time_min
    }
}
