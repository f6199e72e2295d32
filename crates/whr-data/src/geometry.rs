//! Country boundary loading

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use geo_types::{Coord, LineString, MultiPolygon, Polygon};
use geojson::{Feature, GeoJson, JsonValue, Value};
use tracing::{debug, warn};

use crate::DataLoadError;

const CODE_KEYS: [&str; 4] = ["adm0_a3", "ADM0_A3", "iso_a3", "ISO_A3"];
const NAME_KEYS: [&str; 4] = ["name", "admin", "NAME", "ADMIN"];
const POPULATION_KEYS: [&str; 2] = ["pop_est", "POP_EST"];

/// Natural Earth marks unassigned codes with this value
const NO_CODE: &str = "-99";

/// One country shape with the properties the explorer uses
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryFeature {
    pub code: Option<String>,
    pub name: Option<String>,
    pub population: Option<f64>,
    pub geometry: MultiPolygon<f64>,
}

/// Read a GeoJSON feature collection from disk
pub fn read_features(path: &Path) -> Result<Vec<GeometryFeature>, DataLoadError> {
    let file = File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_features(BufReader::new(file), path)
}

/// Parse a GeoJSON feature collection
///
/// Features without polygon geometry are skipped.
pub fn parse_features<R: Read>(
    reader: R,
    origin: &Path,
) -> Result<Vec<GeometryFeature>, DataLoadError> {
    let geojson = GeoJson::from_reader(reader).map_err(|e| DataLoadError::Geometry {
        path: origin.to_path_buf(),
        message: e.to_string(),
    })?;

    let collection = match geojson {
        GeoJson::FeatureCollection(collection) => collection,
        _ => {
            return Err(DataLoadError::NotFeatureCollection {
                path: origin.to_path_buf(),
            })
        }
    };

    let total = collection.features.len();
    let features: Vec<GeometryFeature> = collection
        .features
        .iter()
        .filter_map(convert_feature)
        .collect();

    if features.len() < total {
        debug!("Skipped {} features without polygon geometry", total - features.len());
    }

    Ok(features)
}

fn convert_feature(feature: &Feature) -> Option<GeometryFeature> {
    let geometry = feature.geometry.as_ref()?;
    let shape = match &geometry.value {
        Value::Polygon(rings) => MultiPolygon(vec![to_polygon(rings)?]),
        Value::MultiPolygon(polygons) => {
            MultiPolygon(polygons.iter().filter_map(|rings| to_polygon(rings)).collect())
        }
        _ => return None,
    };

    let name = string_property(feature, &NAME_KEYS);
    if shape.0.is_empty() {
        warn!("Feature {:?} has no usable rings", name);
        return None;
    }

    Some(GeometryFeature {
        code: string_property(feature, &CODE_KEYS).filter(|code| code != NO_CODE),
        name,
        population: POPULATION_KEYS
            .iter()
            .find_map(|key| feature.property(key).and_then(number_value)),
        geometry: shape,
    })
}

fn to_polygon(rings: &[Vec<Vec<f64>>]) -> Option<Polygon<f64>> {
    let mut rings = rings.iter().map(|ring| to_ring(ring));
    let exterior = rings.next()??;
    let interiors = rings.flatten().collect();
    Some(Polygon::new(exterior, interiors))
}

fn to_ring(positions: &[Vec<f64>]) -> Option<LineString<f64>> {
    let coords: Vec<Coord<f64>> = positions
        .iter()
        .filter(|p| p.len() >= 2)
        .map(|p| Coord { x: p[0], y: p[1] })
        .collect();
    (coords.len() >= 3).then(|| LineString::new(coords))
}

fn string_property(feature: &Feature, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        feature
            .property(key)
            .and_then(JsonValue::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

fn number_value(value: &JsonValue) -> Option<f64> {
    let number = match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Vec<GeometryFeature>, DataLoadError> {
        parse_features(text.as_bytes(), Path::new("test.json"))
    }

    const SQUARE: &str = "[[[0,0],[10,0],[10,10],[0,10],[0,0]]]";

    #[test]
    fn test_parse_polygon_feature() {
        let text = format!(
            r#"{{"type":"FeatureCollection","features":[
                {{"type":"Feature","properties":{{"name":"Finland","adm0_a3":"FIN","pop_est":5520314}},
                  "geometry":{{"type":"Polygon","coordinates":{SQUARE}}}}}
            ]}}"#
        );
        let features = parse(&text).unwrap();

        assert_eq!(features.len(), 1);
        assert_eq!(features[0].code.as_deref(), Some("FIN"));
        assert_eq!(features[0].name.as_deref(), Some("Finland"));
        assert_eq!(features[0].population, Some(5_520_314.0));
        assert_eq!(features[0].geometry.0.len(), 1);
    }

    #[test]
    fn test_unassigned_code_and_string_population() {
        let text = format!(
            r#"{{"type":"FeatureCollection","features":[
                {{"type":"Feature","properties":{{"NAME":"Kosovo","ISO_A3":"-99","pop_est":"1794248"}},
                  "geometry":{{"type":"MultiPolygon","coordinates":[{SQUARE},{SQUARE}]}}}}
            ]}}"#
        );
        let features = parse(&text).unwrap();

        assert_eq!(features[0].code, None);
        assert_eq!(features[0].name.as_deref(), Some("Kosovo"));
        assert_eq!(features[0].population, Some(1_794_248.0));
        assert_eq!(features[0].geometry.0.len(), 2);
    }

    #[test]
    fn test_non_polygon_features_are_skipped() {
        let text = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"name":"Capital"},
             "geometry":{"type":"Point","coordinates":[1,2]}},
            {"type":"Feature","properties":{"name":"Nowhere"},"geometry":null}
        ]}"#;
        assert!(parse(text).unwrap().is_empty());
    }

    #[test]
    fn test_single_feature_is_not_a_collection() {
        let text = format!(
            r#"{{"type":"Feature","properties":{{}},"geometry":{{"type":"Polygon","coordinates":{SQUARE}}}}}"#
        );
        assert!(matches!(parse(&text), Err(DataLoadError::NotFeatureCollection { .. })));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(parse("Country name,Ladder score"), Err(DataLoadError::Geometry { .. })));
    }
}
