//! Reachability-to-boundary pipeline: point cloud, triangulation,
//! alpha shape, polygon assembly and candidate selection.

pub mod alpha_shape;
pub mod isochrone;
pub mod output;
pub mod point_cloud;
pub mod polygonize;
pub mod shape_selector;
pub mod triangulation;

pub use alpha_shape::{AlphaShapeBuilder, BoundaryEdgeSet};
pub use point_cloud::PointCloud;
pub use polygonize::{AssemblyFailure, FacePolygonizer, GeometryResult, PolygonAssembler};
pub use shape_selector::{SelectedShape, ShapeSelector};
pub use triangulation::{Triangulation, triangulate};
