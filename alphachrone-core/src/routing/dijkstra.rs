use std::{cmp::Ordering, collections::BinaryHeap};

use hashbrown::HashMap;
use petgraph::graph::NodeIndex;

use crate::deadline::Deadline;
use crate::model::ProximityGraph;
use crate::{Error, Minutes};

/// Heap pops between deadline checks
const DEADLINE_CHECK_INTERVAL: usize = 1024;

#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: Minutes,
    node: NodeIndex,
}

impl Eq for State {}

// Implement Ord for State to use in BinaryHeap
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by cost (reversed from standard Rust BinaryHeap),
        // equal costs settle the lower node index first
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra's algorithm over edge travel times with an inclusive cutoff.
/// Returns every node whose shortest travel time from `start` is at most
/// `max_cost` minutes, mapped to that time.
pub fn dijkstra_time_weights(
    graph: &ProximityGraph,
    start: NodeIndex,
    max_cost: Minutes,
    deadline: &Deadline,
) -> Result<HashMap<NodeIndex, Minutes>, Error> {
    let mut distances: HashMap<NodeIndex, Minutes> = HashMap::new();
    let mut heap = BinaryHeap::new();

    // Start node has distance 0
    heap.push(State {
        cost: 0.0,
        node: start,
    });
    distances.insert(start, 0.0);

    let mut pops = 0usize;
    while let Some(State { cost, node }) = heap.pop() {
        pops += 1;
        if pops % DEADLINE_CHECK_INTERVAL == 0 {
            deadline.check("shortest-path expansion")?;
        }

        // Skip if we've found a better path
        if let Some(&best) = distances.get(&node)
            && cost > best
        {
            continue;
        }

        for (next, edge) in graph.neighbours(node) {
            let next_cost = cost + edge.travel_time();
            if next_cost > max_cost {
                continue;
            }

            match distances.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                    }
                }
            }
        }
    }

    Ok(distances)
}
