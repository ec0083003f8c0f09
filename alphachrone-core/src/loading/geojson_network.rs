//! Street network from a `GeoJSON` FeatureCollection
//!
//! `Point` features are nodes (property `id`), `LineString` features are
//! edges (properties `u`, `v`, optional `length_m` and `modes`). Edges
//! without `length_m` take the geodesic length of their line.

use geo::{Geodesic, Length};
use geojson::{Feature, GeoJson};
use serde_json::Value as JsonValue;

use super::network::{StreetEdge, StreetNetwork, StreetNode, all_modes};
use crate::{Error, NodeId, RouteMode};

pub(super) fn network_from_geojson(text: &str) -> Result<StreetNetwork, Error> {
    let geojson: GeoJson = text
        .parse()
        .map_err(|e: geojson::Error| Error::GeoJsonError(e.to_string()))?;

    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(Error::GeoJsonError(
            "street network must be a FeatureCollection".to_string(),
        ));
    };

    let mut network = StreetNetwork::default();
    for (position, feature) in collection.features.into_iter().enumerate() {
        let geometry = feature
            .geometry
            .clone()
            .ok_or_else(|| Error::GeoJsonError(format!("feature {position} has no geometry")))?;
        let geometry = geo::Geometry::<f64>::try_from(geometry)
            .map_err(|e| Error::GeoJsonError(format!("feature {position}: {e}")))?;

        match geometry {
            geo::Geometry::Point(point) => network.nodes.push(StreetNode {
                id: id_property(&feature, "id", position)?,
                lon: point.x(),
                lat: point.y(),
            }),
            geo::Geometry::LineString(line) => {
                let length_m = match feature.property("length_m") {
                    Some(value) => Some(value.as_f64().ok_or_else(|| {
                        Error::GeoJsonError(format!("feature {position}: length_m is not a number"))
                    })?),
                    None => Some(Geodesic.length(&line)),
                };
                network.edges.push(StreetEdge {
                    u: id_property(&feature, "u", position)?,
                    v: id_property(&feature, "v", position)?,
                    length_m,
                    modes: modes_property(&feature, position)?,
                });
            }
            // Areas and other geometry kinds carry no routing information
            _ => continue,
        }
    }

    Ok(network)
}

fn id_property(feature: &Feature, name: &str, position: usize) -> Result<NodeId, Error> {
    feature
        .property(name)
        .and_then(JsonValue::as_i64)
        .ok_or_else(|| {
            Error::GeoJsonError(format!(
                "feature {position}: missing integer property '{name}'"
            ))
        })
}

fn modes_property(feature: &Feature, position: usize) -> Result<Vec<RouteMode>, Error> {
    match feature.property("modes") {
        None => Ok(all_modes()),
        Some(value) => serde_json::from_value(value.clone())
            .map_err(|e| Error::GeoJsonError(format!("feature {position}: invalid modes: {e}"))),
    }
}
