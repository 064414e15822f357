use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors while reading the source tables. Loading stops.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{table} table is not valid JSON: {source}")]
    Json {
        table: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{table} table has an unsupported layout: {reason}")]
    UnsupportedLayout { table: &'static str, reason: String },

    #[error("{table} table is missing required column '{column}'")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },

    #[error("{table} table has no rows")]
    EmptyTable { table: &'static str },

    #[error("every row of the {table} table was dropped, {dropped} malformed rows")]
    NoValidRows { table: &'static str, dropped: usize },
}

/// A single malformed row. The row is dropped and loading continues.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    #[error("row {row}: missing value for '{column}'")]
    MissingValue { row: usize, column: &'static str },

    #[error("row {row}: invalid value for '{column}': {value}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("row {row}: unparsable release_date '{value}'")]
    UnparsableDate { row: usize, value: String },
}

/// Non-fatal issue found while building the catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadProblem {
    DroppedAlbum(DataError),
    DroppedArtist(DataError),
    DuplicateArtist { artist_id: String },
    UnresolvedArtist { album_id: String, artist_id: String },
}
