//! Proximity graph arena with a spatial index over street nodes

use geo::Point;
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use rstar::RTree;
use rstar::primitives::GeomWithData;

use super::components::{GraphEdge, GraphNode, NodeKind};
use super::projection::LocalProjection;
use crate::{Error, Meters, NodeId};

pub type IndexedPoint = GeomWithData<[f64; 2], NodeIndex>;

/// Undirected street graph owned by a single request.
///
/// Nodes and edges live in one arena addressed by [`NodeIndex`]; the
/// virtual origin, once inserted, is part of the same arena.
#[derive(Debug, Clone)]
pub struct ProximityGraph {
    pub(crate) graph: UnGraph<GraphNode, GraphEdge>,
    rtree: RTree<IndexedPoint>,
    projection: LocalProjection,
    virtual_origin: Option<NodeIndex>,
}

impl ProximityGraph {
    pub fn new(projection: LocalProjection) -> Self {
        Self {
            graph: UnGraph::default(),
            rtree: RTree::new(),
            projection,
            virtual_origin: None,
        }
    }

    /// Adds a street node, projecting its coordinates into the graph plane
    pub fn add_node(&mut self, id: NodeId, geometry: Point<f64>) -> NodeIndex {
        let planar = self.projection.project(geometry);
        let index = self.graph.add_node(GraphNode {
            kind: NodeKind::Street(id),
            geometry,
            planar,
        });
        self.rtree.insert(IndexedPoint::new([planar.x, planar.y], index));
        index
    }

    pub fn add_edge(
        &mut self,
        u: NodeIndex,
        v: NodeIndex,
        length_m: Meters,
    ) -> Result<EdgeIndex, Error> {
        if u.index() >= self.graph.node_count() || v.index() >= self.graph.node_count() {
            return Err(Error::InvalidData(format!(
                "edge ({}, {}) references a missing node",
                u.index(),
                v.index()
            )));
        }
        if !(length_m.is_finite() && length_m >= 0.0) {
            return Err(Error::InvalidData(format!(
                "edge ({}, {}) has invalid length {length_m}",
                u.index(),
                v.index()
            )));
        }
        Ok(self.graph.add_edge(u, v, GraphEdge::new(length_m)))
    }

    pub fn node(&self, index: NodeIndex) -> Option<&GraphNode> {
        self.graph.node_weight(index)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn virtual_origin(&self) -> Option<NodeIndex> {
        self.virtual_origin
    }

    /// Nearest street node to `point` under planar euclidean distance.
    /// Returns the node and its planar distance in metres.
    pub fn nearest_node(&self, point: &Point<f64>) -> Option<(NodeIndex, f64)> {
        let query = self.projection.project(*point);
        self.rtree
            .nearest_neighbor(&[query.x, query.y])
            .map(|nearest| {
                let [x, y] = *nearest.geom();
                (nearest.data, (x - query.x).hypot(y - query.y))
            })
    }

    /// Places the virtual origin in the arena and links it to `anchor`.
    /// A graph holds at most one virtual origin.
    pub fn insert_virtual_origin(
        &mut self,
        origin: Point<f64>,
        anchor: NodeIndex,
        link_length_m: Meters,
    ) -> Result<NodeIndex, Error> {
        if self.virtual_origin.is_some() {
            return Err(Error::InvalidData(
                "virtual origin already inserted".to_string(),
            ));
        }
        let planar = self.projection.project(origin);
        let index = self.graph.add_node(GraphNode {
            kind: NodeKind::VirtualOrigin,
            geometry: origin,
            planar,
        });
        self.add_edge(index, anchor, link_length_m)?;
        self.virtual_origin = Some(index);
        Ok(index)
    }

    /// Sets every edge's travel time from its length
    pub fn assign_travel_times(&mut self, meters_per_minute: f64) {
        for edge in self.graph.edge_weights_mut() {
            edge.time_min = edge.length_m / meters_per_minute;
        }
    }

    pub(crate) fn neighbours(
        &self,
        node: NodeIndex,
    ) -> impl Iterator<Item = (NodeIndex, &GraphEdge)> + '_ {
        self.graph
            .edges(node)
            .map(|edge| (edge.target(), edge.weight()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_graph() -> (ProximityGraph, Vec<NodeIndex>) {
        let mut graph = ProximityGraph::new(LocalProjection::new(Point::new(0.0, 0.0)));
        let nodes: Vec<_> = (0..3)
            .map(|i| graph.add_node(i, Point::new(0.001 * i as f64, 0.0)))
            .collect();
        graph.add_edge(nodes[0], nodes[1], 111.0).unwrap();
        graph.add_edge(nodes[1], nodes[2], 111.0).unwrap();
        (graph, nodes)
    }

    #[test]
    fn nearest_node_uses_planar_distance() {
        let (graph, nodes) = line_graph();
        let (nearest, distance) = graph.nearest_node(&Point::new(0.0011, 0.0)).unwrap();
        assert_eq!(nearest, nodes[1]);
        assert!(distance < 15.0);
    }

    #[test]
    fn empty_graph_has_no_nearest_node() {
        let graph = ProximityGraph::new(LocalProjection::new(Point::new(0.0, 0.0)));
        assert!(graph.is_empty());
        assert!(graph.nearest_node(&Point::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn rejects_edges_to_missing_nodes() {
        let (mut graph, nodes) = line_graph();
        assert!(graph.add_edge(nodes[0], NodeIndex::new(42), 1.0).is_err());
        assert!(graph.add_edge(nodes[0], nodes[2], f64::NAN).is_err());
    }

    #[test]
    fn virtual_origin_lives_in_the_arena() {
        let (mut graph, nodes) = line_graph();
        let origin = graph
            .insert_virtual_origin(Point::new(-0.0001, 0.0), nodes[0], 11.0)
            .unwrap();
        assert_eq!(graph.node_count(), 4);
        assert!(graph.node(origin).unwrap().is_virtual());
        assert_eq!(graph.neighbours(origin).count(), 1);

        assert_eq!(graph.virtual_origin(), Some(origin));

        assert!(
            graph
                .insert_virtual_origin(Point::new(0.0021, 0.0), nodes[2], 11.0)
                .is_err()
        );
        assert_eq!(graph.edge_count(), 3);
        // The spatial index never returns the virtual node
        let (nearest, _) = graph.nearest_node(&Point::new(-0.0001, 0.0)).unwrap();
        assert_eq!(nearest, nodes[0]);
    }

    #[test]
    fn travel_times_follow_length() {
        let (mut graph, _) = line_graph();
        graph.assign_travel_times(75.0);
        assert!(graph.graph.edge_weights().all(|e| (e.time_min - 111.0 / 75.0).abs() < 1e-12));
    }
}
