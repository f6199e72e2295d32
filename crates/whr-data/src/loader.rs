//! Loading and joining the input files

use std::path::Path;

use ahash::AHashMap;
use tracing::{debug, info, warn};
use whr_core::{CountryId, Field};

use crate::dataset::{CountryRecord, Dataset};
use crate::geometry::{read_features, GeometryFeature};
use crate::registry::{normalize_name, resolve_code};
use crate::table::{read_table, TableRow};
use crate::DataLoadError;

/// Load the report table and the boundary collection and join them
pub fn load(table_path: &Path, geometry_path: &Path) -> Result<Dataset, DataLoadError> {
    for path in [table_path, geometry_path] {
        if !path.is_file() {
            return Err(DataLoadError::MissingFile(path.to_path_buf()));
        }
    }

    info!("Loading report table from {}", table_path.display());
    let rows = read_table(table_path)?;

    info!("Loading country shapes from {}", geometry_path.display());
    let features = read_features(geometry_path)?;

    Ok(join(rows, features))
}

/// Lookup keys for the boundary features
struct FeatureIndex {
    by_code: AHashMap<String, usize>,
    by_name: AHashMap<String, usize>,
}

impl FeatureIndex {
    fn build(features: &[GeometryFeature]) -> Self {
        let mut by_code = AHashMap::new();
        let mut by_name = AHashMap::new();

        for (idx, feature) in features.iter().enumerate() {
            if let Some(code) = &feature.code {
                by_code.entry(code.to_uppercase()).or_insert(idx);
            }
            if let Some(name) = &feature.name {
                if let Some(code) = resolve_code(name) {
                    by_code.entry(code.to_string()).or_insert(idx);
                }
                let key = normalize_name(name);
                if !key.is_empty() {
                    by_name.entry(key).or_insert(idx);
                }
            }
        }

        Self { by_code, by_name }
    }

    /// Code first, then normalized name
    fn find(&self, code: Option<&str>, name_key: &str) -> Option<usize> {
        code.and_then(|code| self.by_code.get(code))
            .or_else(|| self.by_name.get(name_key))
            .copied()
    }
}

/// Join table rows to boundary features
///
/// Rows without a matching shape keep their values and get no geometry.
/// Shapes without a matching row become records with geometry and no report
/// values. The feature's population estimate is attached in both matched and
/// unmatched cases.
pub fn join(rows: Vec<TableRow>, features: Vec<GeometryFeature>) -> Dataset {
    let index = FeatureIndex::build(&features);
    let mut claimed = vec![false; features.len()];
    let mut records = Vec::with_capacity(rows.len() + features.len());
    let mut unmatched_rows = 0;

    for row in rows {
        let code = resolve_code(&row.name);
        let name_key = normalize_name(&row.name);
        let id = CountryId::new(code.unwrap_or(name_key.as_str()));

        let matched = index
            .find(code, &name_key)
            .filter(|&idx| !std::mem::replace(&mut claimed[idx], true));

        let mut values = row.values;
        let geometry = match matched {
            Some(idx) => {
                let feature = &features[idx];
                if let Some(population) = feature.population {
                    values.insert(Field::Population, population);
                }
                Some(feature.geometry.clone())
            }
            None => {
                debug!("No shape for '{}'", row.name);
                unmatched_rows += 1;
                None
            }
        };

        records.push(CountryRecord {
            id,
            name: row.name,
            geometry,
            values,
        });
    }

    let mut unmatched_features = 0;
    for (feature, _) in features
        .into_iter()
        .zip(claimed)
        .filter(|(_, claimed)| !claimed)
    {
        let Some(id) = feature_id(&feature) else {
            warn!("Skipping shape without name or code");
            continue;
        };
        debug!("No report row for shape {}", id);
        unmatched_features += 1;

        let values = feature
            .population
            .map(|population| (Field::Population, population))
            .into_iter()
            .collect();

        records.push(CountryRecord {
            name: feature.name.unwrap_or_else(|| id.to_string()),
            id,
            geometry: Some(feature.geometry),
            values,
        });
    }

    let dataset = Dataset::from_records(records);
    info!(
        "Loaded {} countries ({} on the map, {} rows without shape, {} shapes without data)",
        dataset.len(),
        dataset.mapped_count(),
        unmatched_rows,
        unmatched_features
    );
    dataset
}

fn feature_id(feature: &GeometryFeature) -> Option<CountryId> {
    let registry = feature
        .name
        .as_deref()
        .and_then(resolve_code)
        .or_else(|| feature.code.as_deref().and_then(resolve_code));
    if let Some(code) = registry {
        return Some(CountryId::new(code));
    }
    if let Some(code) = &feature.code {
        return Some(CountryId::new(code));
    }
    feature
        .name
        .as_deref()
        .map(normalize_name)
        .filter(|key| !key.is_empty())
        .map(CountryId::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{polygon, MultiPolygon};
    use std::collections::HashSet;

    fn square(offset: f64) -> MultiPolygon<f64> {
        MultiPolygon(vec![polygon![
            (x: offset, y: 0.0),
            (x: offset + 1.0, y: 0.0),
            (x: offset + 1.0, y: 1.0),
            (x: offset, y: 1.0),
        ]])
    }

    fn row(name: &str, score: f64) -> TableRow {
        TableRow {
            name: name.to_string(),
            values: [(Field::LadderScore, score)].into_iter().collect(),
        }
    }

    fn feature(name: &str, code: Option<&str>, population: f64) -> GeometryFeature {
        GeometryFeature {
            code: code.map(str::to_string),
            name: Some(name.to_string()),
            population: Some(population),
            geometry: square(0.0),
        }
    }

    #[test]
    fn test_join_counts_unmatched_rows_and_shapes() {
        let mut rows: Vec<TableRow> = (0..136).map(|i| row(&format!("Region {i}"), 5.0)).collect();
        rows.push(row("Nowhere North", 4.0));
        rows.push(row("Nowhere South", 3.0));

        let mut features: Vec<GeometryFeature> = (0..136)
            .map(|i| feature(&format!("Region {i}"), None, 1000.0))
            .collect();
        features.push(feature("Lonely Island", None, 50.0));

        let dataset = join(rows, features);

        assert_eq!(dataset.len(), 139);
        let without_shape: Vec<_> = dataset.records().iter().filter(|r| !r.has_geometry()).collect();
        assert_eq!(without_shape.len(), 2);
        assert!(without_shape.iter().all(|r| r.value(Field::LadderScore).is_some()));

        let without_values: Vec<_> = dataset.records().iter().filter(|r| !r.has_values()).collect();
        assert_eq!(without_values.len(), 1);
        assert_eq!(without_values[0].name, "Lonely Island");
        assert!(without_values[0].has_geometry());
        assert_eq!(without_values[0].value(Field::Population), Some(50.0));

        let ids: HashSet<_> = dataset.records().iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids.len(), dataset.len());
    }

    #[test]
    fn test_join_through_registry_aliases() {
        let rows = vec![row("Turkiye", 4.6), row("Congo (Kinshasa)", 3.2)];
        let features = vec![
            feature("Turkey", Some("TUR"), 83_429_615.0),
            feature("Dem. Rep. Congo", Some("COD"), 86_790_567.0),
        ];

        let dataset = join(rows, features);

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.mapped_count(), 2);
        let tur = dataset.get(&CountryId::new("TUR")).unwrap();
        assert_eq!(tur.name, "Turkiye");
        assert_eq!(tur.value(Field::Population), Some(83_429_615.0));
    }

    #[test]
    fn test_join_by_feature_code_when_names_differ() {
        let rows = vec![row("Czechia", 6.8)];
        let features = vec![GeometryFeature {
            code: Some("CZE".to_string()),
            name: None,
            population: None,
            geometry: square(2.0),
        }];

        let dataset = join(rows, features);
        assert_eq!(dataset.len(), 1);
        assert!(dataset.get(&CountryId::new("CZE")).unwrap().has_geometry());
    }

    #[test]
    fn test_feature_is_claimed_once() {
        let rows = vec![row("Finland", 7.8), row("finland", 1.0)];
        let features = vec![feature("Finland", Some("FIN"), 5_500_000.0)];

        let dataset = join(rows, features);

        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records()[0].value(Field::LadderScore), Some(7.8));
    }

    fn write(dir: &Path, name: &str, text: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_load_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let table = write(
            dir.path(),
            "WHR2023.csv",
            "Country name,Ladder score,Ladder score in Dystopia,Social support\n\
             Finland,7.804,1.778,0.969\n\
             Kosovo,6.368,1.778,N/A\n",
        );
        let geometry = write(
            dir.path(),
            "world_map.json",
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","properties":{"name":"Finland","adm0_a3":"FIN","pop_est":5520314},
                 "geometry":{"type":"Polygon","coordinates":[[[20,60],[30,60],[30,70],[20,70],[20,60]]]}},
                {"type":"Feature","properties":{"name":"Kosovo","adm0_a3":"KOS","pop_est":1794248},
                 "geometry":{"type":"Polygon","coordinates":[[[20,42],[21,42],[21,43],[20,43],[20,42]]]}}
            ]}"#,
        );

        let dataset = load(&table, &geometry).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.mapped_count(), 2);
        let kosovo = dataset.get(&CountryId::new("XKX")).unwrap();
        assert_eq!(kosovo.value(Field::SocialSupport), None);
        assert_eq!(kosovo.value(Field::Population), Some(1_794_248.0));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let table = write(dir.path(), "WHR2023.csv", "Country name\nFinland\n");
        let missing = dir.path().join("world_map.json");

        let err = load(&table, &missing).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingFile(path) if path == missing));
    }

    #[test]
    fn test_load_swapped_files_fails() {
        let dir = tempfile::tempdir().unwrap();
        let table = write(dir.path(), "WHR2023.csv", "Country name,Ladder score\nFinland,7.8\n");
        let geometry = write(dir.path(), "world_map.json", r#"{"type":"FeatureCollection","features":[]}"#);

        let err = load(&geometry, &table).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::MissingColumn { .. } | DataLoadError::Csv { .. }
        ));
    }
}
