//! The joined, immutable country table

use ahash::AHashMap;
use geo_types::MultiPolygon;
use itertools::{Itertools, MinMaxResult};
use tracing::warn;
use whr_core::{CountryId, Field};

/// One country with its shape and report values
#[derive(Debug, Clone, PartialEq)]
pub struct CountryRecord {
    pub id: CountryId,
    pub name: String,
    /// None when no boundary matched this country
    pub geometry: Option<MultiPolygon<f64>>,
    /// Report values; missing values are absent
    pub values: AHashMap<Field, f64>,
}

impl CountryRecord {
    pub fn value(&self, field: Field) -> Option<f64> {
        self.values.get(&field).copied()
    }

    pub fn has_geometry(&self) -> bool {
        self.geometry.is_some()
    }

    /// Whether any report value (not counting population) is present
    pub fn has_values(&self) -> bool {
        self.values.keys().any(|field| *field != Field::Population)
    }
}

/// Country table shared read-only by every view
#[derive(Debug, Default)]
pub struct Dataset {
    records: Vec<CountryRecord>,
    index: AHashMap<CountryId, usize>,
}

impl Dataset {
    /// Build a dataset, keeping the first record for each identifier
    pub fn from_records(records: impl IntoIterator<Item = CountryRecord>) -> Self {
        let mut dataset = Self::default();
        for record in records {
            if dataset.index.contains_key(&record.id) {
                warn!("Dropping duplicate country {} ({})", record.id, record.name);
                continue;
            }
            dataset.index.insert(record.id.clone(), dataset.records.len());
            dataset.records.push(record);
        }
        dataset
    }

    pub fn records(&self) -> &[CountryRecord] {
        &self.records
    }

    pub fn get(&self, id: &CountryId) -> Option<&CountryRecord> {
        self.index.get(id).map(|&idx| &self.records[idx])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Minimum and maximum over the non-missing values of a field
    pub fn value_range(&self, field: Field) -> Option<(f64, f64)> {
        match self.records.iter().filter_map(|r| r.value(field)).minmax() {
            MinMaxResult::NoElements => None,
            MinMaxResult::OneElement(v) => Some((v, v)),
            MinMaxResult::MinMax(min, max) => Some((min, max)),
        }
    }

    /// Number of records that can be drawn on the map
    pub fn mapped_count(&self) -> usize {
        self.records.iter().filter(|r| r.has_geometry()).count()
    }
}
