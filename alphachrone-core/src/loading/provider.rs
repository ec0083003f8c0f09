use fixedbitset::FixedBitSet;
use geo::{Distance, Geodesic, Haversine, Point};
use hashbrown::HashMap;
use log::{debug, warn};
use petgraph::graph::NodeIndex;

use super::network::{StreetEdge, StreetNetwork};
use crate::model::{LocalProjection, ProximityGraph};
use crate::{Error, Meters, NodeId, RouteMode};

/// Source of request graphs.
///
/// Implementations may cache internally; each call hands out a graph the
/// caller owns exclusively.
pub trait GraphProvider {
    /// Graph covering at least `max_distance_m` around `origin` for `mode`.
    ///
    /// # Errors
    ///
    /// `GraphUnavailable` when no data can be supplied for the request.
    fn fetch(
        &self,
        origin: Point<f64>,
        max_distance_m: Meters,
        mode: RouteMode,
    ) -> Result<ProximityGraph, Error>;
}

/// Cuts request graphs out of an in-memory street network
#[derive(Debug, Clone)]
pub struct NetworkGraphProvider {
    network: StreetNetwork,
    positions: HashMap<NodeId, usize>,
}

impl NetworkGraphProvider {
    pub fn new(network: StreetNetwork) -> Result<Self, Error> {
        network.validate()?;
        let positions = network.node_positions();
        Ok(Self { network, positions })
    }

    pub fn network(&self) -> &StreetNetwork {
        &self.network
    }
}

impl GraphProvider for NetworkGraphProvider {
    fn fetch(
        &self,
        origin: Point<f64>,
        max_distance_m: Meters,
        mode: RouteMode,
    ) -> Result<ProximityGraph, Error> {
        if self.network.is_empty() {
            return Err(Error::GraphUnavailable(
                "street network has no nodes".to_string(),
            ));
        }
        if !(origin.x().is_finite() && origin.y().is_finite()) {
            return Err(Error::GraphUnavailable(format!(
                "origin ({}, {}) is not a valid coordinate",
                origin.x(),
                origin.y()
            )));
        }

        let within: Vec<bool> = self
            .network
            .nodes
            .iter()
            .map(|node| {
                Haversine.distance(origin, Point::new(node.lon, node.lat)) <= max_distance_m
            })
            .collect();

        // Edges usable for `mode` with both ends inside the radius, as
        // network positions
        let mut usable: Vec<(usize, usize, &StreetEdge)> = Vec::new();
        for edge in self.network.edges.iter().filter(|e| e.allows(mode)) {
            let (Some(&pu), Some(&pv)) = (self.positions.get(&edge.u), self.positions.get(&edge.v))
            else {
                continue;
            };
            if within[pu] && within[pv] {
                usable.push((pu, pv, edge));
            }
        }

        // Nodes without a usable edge are not part of the mode's network
        // and must not become snap targets
        let mut on_network = FixedBitSet::with_capacity(self.network.nodes.len());
        for &(pu, pv, _) in &usable {
            on_network.insert(pu);
            on_network.insert(pv);
        }

        let mut graph = ProximityGraph::new(LocalProjection::new(origin));
        let mut kept: Vec<Option<NodeIndex>> = vec![None; self.network.nodes.len()];
        for position in on_network.ones() {
            let node = &self.network.nodes[position];
            kept[position] = Some(graph.add_node(node.id, Point::new(node.lon, node.lat)));
        }

        for (pu, pv, edge) in usable {
            let (Some(u), Some(v)) = (kept[pu], kept[pv]) else {
                continue;
            };
            let length = match edge.length_m {
                Some(length) => length,
                None => {
                    let a = &self.network.nodes[pu];
                    let b = &self.network.nodes[pv];
                    Geodesic.distance(Point::new(a.lon, a.lat), Point::new(b.lon, b.lat))
                }
            };
            graph.add_edge(u, v, length)?;
        }

        if graph.is_empty() {
            warn!(
                "No {mode} network within {max_distance_m:.0} m of ({}, {})",
                origin.x(),
                origin.y()
            );
        } else {
            debug!(
                "Fetched {} nodes and {} edges within {max_distance_m:.0} m for {mode}",
                graph.node_count(),
                graph.edge_count()
            );
        }

        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loading::{StreetEdge, StreetNode};

    fn network() -> StreetNetwork {
        StreetNetwork {
            nodes: vec![
                StreetNode { id: 1, lon: 0.0, lat: 0.0 },
                StreetNode { id: 2, lon: 0.001, lat: 0.0 },
                StreetNode { id: 3, lon: 0.002, lat: 0.0 },
                StreetNode { id: 4, lon: 0.1, lat: 0.0 },
            ],
            edges: vec![
                StreetEdge { u: 1, v: 2, length_m: None, modes: RouteMode::ALL.to_vec() },
                StreetEdge { u: 2, v: 3, length_m: Some(120.0), modes: vec![RouteMode::Drive] },
                StreetEdge { u: 3, v: 4, length_m: None, modes: RouteMode::ALL.to_vec() },
            ],
        }
    }

    #[test]
    fn keeps_nodes_within_radius() {
        let provider = NetworkGraphProvider::new(network()).unwrap();
        let graph = provider.fetch(Point::new(0.0, 0.0), 500.0, RouteMode::Drive).unwrap();
        assert_eq!(graph.node_count(), 3);
        // Edge to the far node is cut with it
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn filters_edges_by_mode() {
        let provider = NetworkGraphProvider::new(network()).unwrap();
        let graph = provider.fetch(Point::new(0.0, 0.0), 500.0, RouteMode::Walk).unwrap();
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn missing_lengths_use_geodesic_distance() {
        let provider = NetworkGraphProvider::new(network()).unwrap();
        let graph = provider.fetch(Point::new(0.0, 0.0), 500.0, RouteMode::Walk).unwrap();
        let edge = graph.graph.edge_weights().next().unwrap();
        assert!((edge.length_m - 111.32).abs() < 0.1);
    }

    #[test]
    fn nodes_off_the_mode_network_are_dropped() {
        let mut network = network();
        // Drive-only stub sitting exactly on the origin
        network.nodes.push(StreetNode { id: 5, lon: 0.0, lat: 0.0 });
        network.edges.push(StreetEdge { u: 5, v: 2, length_m: None, modes: vec![RouteMode::Drive] });
        let provider = NetworkGraphProvider::new(network).unwrap();

        let walk = provider.fetch(Point::new(0.0, 0.0), 500.0, RouteMode::Walk).unwrap();
        assert_eq!(walk.node_count(), 2);
        let (nearest, _) = walk.nearest_node(&Point::new(0.0, 0.0)).unwrap();
        assert_eq!(walk.node(nearest).unwrap().street_id(), Some(1));

        let drive = provider.fetch(Point::new(0.0, 0.0), 500.0, RouteMode::Drive).unwrap();
        assert_eq!(drive.node_count(), 4);
    }

    #[test]
    fn isolated_nodes_are_not_kept() {
        let mut network = network();
        network.nodes.push(StreetNode { id: 6, lon: 0.0005, lat: 0.0 });
        let provider = NetworkGraphProvider::new(network).unwrap();
        let graph = provider.fetch(Point::new(0.0, 0.0), 500.0, RouteMode::Drive).unwrap();
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn empty_network_is_unavailable() {
        let provider = NetworkGraphProvider::new(StreetNetwork::default()).unwrap();
        assert!(matches!(
            provider.fetch(Point::new(0.0, 0.0), 500.0, RouteMode::Walk),
            Err(Error::GraphUnavailable(_))
        ));
    }

    #[test]
    fn distant_origin_yields_empty_graph() {
        let provider = NetworkGraphProvider::new(network()).unwrap();
        let graph = provider.fetch(Point::new(10.0, 10.0), 500.0, RouteMode::Walk).unwrap();
        assert!(graph.is_empty());
    }
}
