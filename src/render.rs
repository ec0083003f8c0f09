use alphachrone_core::{Error, Isochrone};
use geojson::{Feature, FeatureCollection};
use serde_json::json;
use wkt::ToWkt;

use crate::cli::FormatArg;

pub fn render(isochrone: &Isochrone, format: FormatArg) -> Result<String, Error> {
    match format {
        FormatArg::Geojson => isochrone.to_geojson_string(),
        FormatArg::Feature => Ok(serde_json::to_string(&isochrone.to_feature()?)?),
        FormatArg::Wkt => Ok(isochrone.polygon().to_wkt().to_string()),
    }
}

/// One feature per request in input order; failed requests keep their
/// slot with a null geometry and an `error` property.
pub fn render_batch(results: &[Result<Isochrone, Error>]) -> Result<String, Error> {
    let features = results
        .iter()
        .map(|result| match result {
            Ok(isochrone) => isochrone.to_feature(),
            Err(e) => failed_feature(e),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let collection = FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    };
    Ok(serde_json::to_string(&collection)?)
}

fn failed_feature(error: &Error) -> Result<Feature, Error> {
    let value = json!({
        "type": "Feature",
        "geometry": null,
        "properties": { "error": error.to_string() }
    });
    serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}
