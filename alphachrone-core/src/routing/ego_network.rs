//! Nodes reachable from the request origin within the time budget

use geo::{Distance, Geodesic, Point};
use log::debug;
use petgraph::graph::NodeIndex;

use super::dijkstra::dijkstra_time_weights;
use crate::deadline::Deadline;
use crate::model::ProximityGraph;
use crate::{Error, Minutes, NodeId, meters_per_minute};

/// Street node inside the time budget
#[derive(Debug, Clone, PartialEq)]
pub struct EgoMember {
    pub id: NodeId,
    pub geometry: Point<f64>,
    /// Shortest travel time from the origin
    pub time: Minutes,
}

/// Cutoff ball of the graph's travel-time metric around the origin.
/// Members are ordered by their position in the graph arena.
#[derive(Debug, Clone, Default)]
pub struct EgoNetwork {
    pub members: Vec<EgoMember>,
}

impl EgoNetwork {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.members.iter().any(|m| m.id == id)
    }
}

/// Runs the radius-limited expansion from a virtual origin node.
///
/// The graph is consumed: it gains the virtual origin and travel times,
/// and is dropped once the reachable set has been extracted.
///
/// # Errors
///
/// `GraphLookup` for an empty graph, `InvalidData` for a non-positive
/// budget or speed, `DeadlineExceeded` if the search runs past `deadline`.
pub fn build_ego_network(
    mut graph: ProximityGraph,
    origin: Point<f64>,
    time_budget: Minutes,
    speed_kmh: f64,
    deadline: &Deadline,
) -> Result<EgoNetwork, Error> {
    if !(time_budget.is_finite() && time_budget > 0.0) {
        return Err(Error::InvalidData(format!(
            "time budget must be positive, got {time_budget}"
        )));
    }
    if !(speed_kmh.is_finite() && speed_kmh > 0.0) {
        return Err(Error::InvalidData(format!(
            "speed must be positive, got {speed_kmh}"
        )));
    }

    let (nearest, planar_distance) = graph.nearest_node(&origin).ok_or_else(|| {
        Error::GraphLookup(format!(
            "no graph node near origin ({}, {})",
            origin.x(),
            origin.y()
        ))
    })?;
    let anchor = graph
        .node(nearest)
        .map(|node| node.geometry)
        .ok_or_else(|| Error::GraphLookup("nearest node missing from graph".to_string()))?;

    let link_length = Geodesic.distance(origin, anchor);
    debug!(
        "Origin snapped to node {} ({planar_distance:.1} m planar, {link_length:.1} m geodesic)",
        nearest.index()
    );

    let virtual_origin = graph.insert_virtual_origin(origin, nearest, link_length)?;
    graph.assign_travel_times(meters_per_minute(speed_kmh));

    let times = dijkstra_time_weights(&graph, virtual_origin, time_budget, deadline)?;

    let mut reached: Vec<(NodeIndex, Minutes)> = times.into_iter().collect();
    reached.sort_unstable_by_key(|(index, _)| *index);

    let members = reached
        .into_iter()
        .filter_map(|(index, time)| {
            let node = graph.node(index)?;
            node.street_id().map(|id| EgoMember {
                id,
                geometry: node.geometry,
                time,
            })
        })
        .collect();

    Ok(EgoNetwork { members })
}
