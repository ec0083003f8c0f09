//! Graph acquisition: street network loading and the provider seam
//! the pipeline fetches request graphs through.

mod geojson_network;
mod network;
mod provider;

pub use network::{StreetEdge, StreetNetwork, StreetNode};
pub use provider::{GraphProvider, NetworkGraphProvider};
