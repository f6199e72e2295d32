//! Report table parsing

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use ahash::AHashMap;
use csv::ReaderBuilder;
use tracing::{debug, warn};
use whr_core::Field;

use crate::nulls::NullConfig;
use crate::registry::normalize_name;
use crate::DataLoadError;

/// Column holding the country name
pub const NAME_COLUMN: &str = "Country name";

/// One parsed row of the report table
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub name: String,
    /// Parsed values; null cells are absent
    pub values: AHashMap<Field, f64>,
}

/// Read the report table from disk
pub fn read_table(path: &Path) -> Result<Vec<TableRow>, DataLoadError> {
    let file = File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_table(BufReader::new(file), path)
}

/// Parse a report table from any reader
///
/// Columns that are not part of the field schema are ignored. Cells that
/// cannot be parsed as numbers are treated as missing.
pub fn parse_table<R: Read>(reader: R, origin: &Path) -> Result<Vec<TableRow>, DataLoadError> {
    let nulls = NullConfig::default();
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| DataLoadError::csv(origin, e))?
        .clone();

    let name_idx = headers
        .iter()
        .position(|h| matches!(normalize_name(h).as_str(), "countryname" | "country"))
        .ok_or_else(|| DataLoadError::MissingColumn {
            path: origin.to_path_buf(),
            column: NAME_COLUMN,
        })?;

    let columns: Vec<(usize, Field)> = headers
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != name_idx)
        .filter_map(|(idx, header)| match Field::from_name(header) {
            Ok(field) => Some((idx, field)),
            Err(_) => {
                debug!("Ignoring column '{}'", header);
                None
            }
        })
        .collect();

    let mut rows = Vec::new();
    for (line, result) in csv_reader.records().enumerate() {
        let record = result.map_err(|e| DataLoadError::csv(origin, e))?;

        let name = record.get(name_idx).unwrap_or_default().trim();
        if name.is_empty() {
            warn!("Skipping row {} without a country name", line + 2);
            continue;
        }

        let mut values = AHashMap::with_capacity(columns.len());
        for &(idx, field) in &columns {
            let cell = record.get(idx).unwrap_or_default();
            match nulls.parse_number(cell) {
                Ok(Some(value)) => {
                    values.insert(field, value);
                }
                Ok(None) => {}
                Err(text) => debug!("Non-numeric {} value '{}' for {}", field.key(), text, name),
            }
        }

        rows.push(TableRow {
            name: name.to_string(),
            values,
        });
    }

    if rows.is_empty() {
        return Err(DataLoadError::EmptyTable {
            path: origin.to_path_buf(),
        });
    }

    debug!("Parsed {} table rows with {} known columns", rows.len(), columns.len());
    Ok(rows)
}
