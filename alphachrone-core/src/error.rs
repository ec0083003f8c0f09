use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Graph unavailable: {0}")]
    GraphUnavailable(String),
    #[error("Graph lookup failed: {0}")]
    GraphLookup(String),
    #[error("Triangulation error: {0}")]
    Triangulation(String),
    #[error("Polygon assembly failed: {0}")]
    Assembly(String),
    #[error("No isochrone found: all {candidates} alpha candidates fragmented or were empty")]
    ScheduleExhausted { candidates: usize },
    #[error("Deadline exceeded during {0}")]
    DeadlineExceeded(&'static str),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
}
