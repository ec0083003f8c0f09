use std::fs;
use std::path::Path;

use hashbrown::{HashMap, HashSet};
use log::info;
use serde::{Deserialize, Serialize};

use crate::{Error, Meters, NodeId, RouteMode};

/// Street network node as stored on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreetNode {
    pub id: NodeId,
    pub lon: f64,
    pub lat: f64,
}

/// Street segment; traversable in both directions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreetEdge {
    pub u: NodeId,
    pub v: NodeId,
    /// Geodesic distance between the endpoints when absent
    #[serde(default)]
    pub length_m: Option<Meters>,
    #[serde(default = "all_modes")]
    pub modes: Vec<RouteMode>,
}

impl StreetEdge {
    pub fn allows(&self, mode: RouteMode) -> bool {
        self.modes.contains(&mode)
    }
}

pub(super) fn all_modes() -> Vec<RouteMode> {
    RouteMode::ALL.to_vec()
}

/// Complete street network a provider cuts request graphs from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreetNetwork {
    pub nodes: Vec<StreetNode>,
    pub edges: Vec<StreetEdge>,
}

impl StreetNetwork {
    /// Reads `{ "nodes": [...], "edges": [...] }`
    pub fn from_json_file(path: &Path) -> Result<Self, Error> {
        let text = read_file(path)?;
        let network = Self::from_json_str(&text)?;
        info!(
            "Loaded {} nodes and {} edges from {}",
            network.nodes.len(),
            network.edges.len(),
            path.display()
        );
        Ok(network)
    }

    pub fn from_json_str(text: &str) -> Result<Self, Error> {
        let network: StreetNetwork = serde_json::from_str(text)?;
        network.validate()?;
        Ok(network)
    }

    /// Reads a `GeoJSON` FeatureCollection of node points and edge lines
    pub fn from_geojson_file(path: &Path) -> Result<Self, Error> {
        let text = read_file(path)?;
        let network = Self::from_geojson_str(&text)?;
        info!(
            "Loaded {} nodes and {} edges from {}",
            network.nodes.len(),
            network.edges.len(),
            path.display()
        );
        Ok(network)
    }

    pub fn from_geojson_str(text: &str) -> Result<Self, Error> {
        let network = super::geojson_network::network_from_geojson(text)?;
        network.validate()?;
        Ok(network)
    }

    /// Picks the loader from the file extension (`.geojson` or JSON)
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("geojson") => Self::from_geojson_file(path),
            _ => Self::from_json_file(path),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Checks ids are unique, coordinates finite and edges reference
    /// known nodes.
    pub fn validate(&self) -> Result<(), Error> {
        let mut seen = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !seen.insert(node.id) {
                return Err(Error::InvalidData(format!("duplicate node id {}", node.id)));
            }
            if !(node.lon.is_finite() && node.lat.is_finite()) {
                return Err(Error::InvalidData(format!(
                    "node {} has non-finite coordinates",
                    node.id
                )));
            }
        }

        for edge in &self.edges {
            for end in [edge.u, edge.v] {
                if !seen.contains(&end) {
                    return Err(Error::InvalidData(format!(
                        "edge ({}, {}) references unknown node {end}",
                        edge.u, edge.v
                    )));
                }
            }
            if let Some(length) = edge.length_m
                && !(length.is_finite() && length >= 0.0)
            {
                return Err(Error::InvalidData(format!(
                    "edge ({}, {}) has invalid length {length}",
                    edge.u, edge.v
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn node_positions(&self) -> HashMap<NodeId, usize> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(position, node)| (node.id, position))
            .collect()
    }
}

fn read_file(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|e| {
        Error::IoError(std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const NETWORK: &str = r#"{
        "nodes": [
            { "id": 1, "lon": -0.1, "lat": 51.5 },
            { "id": 2, "lon": -0.099, "lat": 51.5 }
        ],
        "edges": [
            { "u": 1, "v": 2, "length_m": 69.4 },
            { "u": 2, "v": 1, "modes": ["drive"] }
        ]
    }"#;

    #[test]
    fn parses_json_with_defaults() {
        let network = StreetNetwork::from_json_str(NETWORK).unwrap();
        assert_eq!(network.nodes.len(), 2);
        assert_eq!(network.edges[0].modes, RouteMode::ALL.to_vec());
        assert!(network.edges[1].allows(RouteMode::Drive));
        assert!(!network.edges[1].allows(RouteMode::Walk));
        assert_eq!(network.edges[1].length_m, None);
    }

    #[test]
    fn rejects_dangling_edges_and_duplicate_ids() {
        let dangling = r#"{ "nodes": [{ "id": 1, "lon": 0, "lat": 0 }], "edges": [{ "u": 1, "v": 9 }] }"#;
        assert!(matches!(
            StreetNetwork::from_json_str(dangling),
            Err(Error::InvalidData(_))
        ));

        let duplicate = r#"{ "nodes": [{ "id": 1, "lon": 0, "lat": 0 }, { "id": 1, "lon": 1, "lat": 1 }], "edges": [] }"#;
        assert!(matches!(
            StreetNetwork::from_json_str(duplicate),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            StreetNetwork::from_json_str("{ nodes"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn reads_from_disk() {
        let path = std::env::temp_dir().join(format!("alphachrone-network-{}.json", std::process::id()));
        fs::write(&path, NETWORK).unwrap();
        let network = StreetNetwork::from_path(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(network.edges.len(), 2);

        let missing = StreetNetwork::from_path(Path::new("/nonexistent/network.json"));
        assert!(matches!(missing, Err(Error::IoError(_))));
    }
}
