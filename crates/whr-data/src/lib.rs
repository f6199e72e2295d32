//! Dataset loading for the happiness report explorer
//!
//! Reads the report table and the country boundary collection, joins them by
//! country and produces one immutable [`Dataset`] shared by every view.

pub mod dataset;
pub mod geometry;
pub mod loader;
pub mod nulls;
pub mod registry;
pub mod table;

use std::path::PathBuf;

use thiserror::Error;

// Re-exports
pub use dataset::{CountryRecord, Dataset};
pub use geometry::GeometryFeature;
pub use loader::{join, load};
pub use table::TableRow;

/// Errors that can occur while loading the input files
#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("Input file not found: {0}")]
    MissingFile(PathBuf),

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parsing error in {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("Table {path} has no '{column}' column")]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("Table {path} contains no rows")]
    EmptyTable { path: PathBuf },

    #[error("Invalid GeoJSON in {path}: {message}")]
    Geometry { path: PathBuf, message: String },

    #[error("{path} is not a GeoJSON FeatureCollection")]
    NotFeatureCollection { path: PathBuf },
}

impl DataLoadError {
    fn csv(path: &std::path::Path, error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => DataLoadError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(io_err.kind(), error.to_string()),
            },
            _ => DataLoadError::Csv {
                path: path.to_path_buf(),
                message: error.to_string(),
            },
        }
    }
}
