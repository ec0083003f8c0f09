// Re-export key components
pub use crate::algo::isochrone::{
    IsochroneOutput, IsochroneRequest, build_isochrone, bulk_isochrones, compute_isochrone,
    isochrone_from_point_cloud,
};
pub use crate::algo::{
    AlphaShapeBuilder, BoundaryEdgeSet, FacePolygonizer, GeometryResult, PointCloud,
    PolygonAssembler, ShapeSelector, Triangulation, triangulate,
};
pub use crate::config::{AlphaSchedule, IsochroneConfig};
pub use crate::deadline::Deadline;
pub use crate::loading::{GraphProvider, NetworkGraphProvider, StreetEdge, StreetNetwork, StreetNode};
pub use crate::model::{Isochrone, OutputFormat, ProximityGraph, RouteMode};
pub use crate::routing::{EgoNetwork, build_ego_network};

// Core types
pub use crate::Error;
pub use crate::Meters;
pub use crate::Minutes;
pub use crate::NodeId;
