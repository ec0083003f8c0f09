//! Travel-time search over the proximity graph

pub mod dijkstra;
pub mod ego_network;

pub use dijkstra::dijkstra_time_weights;
pub use ego_network::{EgoMember, EgoNetwork, build_ego_network};
