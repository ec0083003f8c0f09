//! Canonical orientation and `GeoJSON` serialization of isochrones

use geo::orient::{Direction, Orient};
use geo::Polygon;
use geojson::{Feature, Geometry, Value as GeoJsonValue};
use serde_json::json;

use crate::{Error, Isochrone};

/// Exterior ring counter-clockwise, interior rings clockwise, whatever
/// order the assembly stage produced.
pub fn canonical_orientation(polygon: Polygon<f64>) -> Polygon<f64> {
    polygon.orient(Direction::Default)
}

impl Isochrone {
    /// `GeoJSON` Polygon geometry with `[lon, lat]` positions
    pub fn to_geojson(&self) -> Geometry {
        Geometry::new(GeoJsonValue::from(self.polygon()))
    }

    /// `GeoJSON` Feature carrying construction metadata as properties
    pub fn to_feature(&self) -> Result<Feature, Error> {
        let value = json!({
            "type": "Feature",
            "geometry": self.to_geojson(),
            "properties": {
                "time_budget_min": self.time_budget(),
                "alpha": self.alpha(),
                "reached_nodes": self.reached_nodes(),
            }
        });

        serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
    }

    pub fn to_geojson_string(&self) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson()).map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}
