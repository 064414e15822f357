//! Test library creation
//!
//! Writes the albums and artists tables as JSON into a temporary data
//! directory, the same way the real dataset is laid out on disk.

use super::constants::*;
use anyhow::Result;
use library_explorer::catalog::ClipSettings;
use library_explorer::{load_catalog, Catalog, LoadError};
use serde_json::{json, Map, Value};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Builds one album record with every required column.
pub fn album_record(
    uri: &str,
    artist_uri: &str,
    release_date: &str,
    popularity: f64,
    loudness: f64,
    valence: f64,
) -> Value {
    json!({
        "uri": uri,
        "name": format!("Album {}", uri),
        "artist_uri": artist_uri,
        "release_date": release_date,
        "image": format!("https://images.test/{}.jpg", uri),
        "popularity": popularity,
        "total_tracks": 11,
        "duration_ms": 2_700_000,
        "danceability": 0.55,
        "energy": 0.6,
        "key": 2,
        "loudness": loudness,
        "mode": 1,
        "speechiness": 0.04,
        "acousticness": 0.2,
        "instrumentalness": 0.01,
        "liveness": 0.12,
        "valence": valence,
        "tempo": 118.5,
        "time_signature": 4,
    })
}

pub fn artist_record(uri: &str, name: &str, genre: &str, x: f64, y: f64, popularity: f64) -> Value {
    json!({
        "uri": uri,
        "name": name,
        "genre_cluster": genre,
        "genre_specific": format!("{} (specific)", genre),
        "genre_x": x,
        "genre_y": y,
        "popularity": popularity,
    })
}

/// 5 albums over the 1990s, 2000s and 2010s.
pub fn default_albums() -> Vec<Value> {
    vec![
        album_record(ALBUM_1_ID, ARTIST_1_ID, "1994-03-08", 55.0, -6.0, 0.3),
        album_record(ALBUM_2_ID, ARTIST_2_ID, "2003-06-01", 35.0, -12.0, 0.7),
        album_record(ALBUM_3_ID, ARTIST_1_ID, "2008", 70.0, -4.0, 0.5),
        album_record(ALBUM_4_ID, ARTIST_3_ID, "2015-09-20", 15.0, -20.0, 0.1),
        album_record(ALBUM_5_ID, ARTIST_2_ID, "1999-12", 45.0, -9.0, 0.9),
    ]
}

/// 3 artists: 2 rock, 1 jazz.
pub fn default_artists() -> Vec<Value> {
    vec![
        artist_record(ARTIST_1_ID, ARTIST_1_NAME, GENRE_ROCK, 0.0, 0.0, 60.0),
        artist_record(ARTIST_2_ID, ARTIST_2_NAME, GENRE_JAZZ, 5.0, 5.0, 40.0),
        artist_record(ARTIST_3_ID, ARTIST_3_NAME, GENRE_ROCK, 1.0, -1.0, 20.0),
    ]
}

/// Converts records into the column-oriented layout
/// (`{"column": {"0": value, "1": value}}`).
pub fn to_column_layout(records: &[Value]) -> Value {
    let mut columns: Map<String, Value> = Map::new();
    for (index, record) in records.iter().enumerate() {
        if let Value::Object(fields) = record {
            for (column, value) in fields {
                let cells = columns
                    .entry(column.clone())
                    .or_insert_with(|| Value::Object(Map::new()));
                if let Value::Object(cells) = cells {
                    cells.insert(index.to_string(), value.clone());
                }
            }
        }
    }
    Value::Object(columns)
}

/// A data directory holding the two tables. Removed on drop.
pub struct TestLibrary {
    pub dir: TempDir,
}

impl TestLibrary {
    /// The default 5 albums / 3 artists library, in records layout.
    pub fn create() -> Result<Self> {
        Self::with_tables(
            &Value::Array(default_albums()),
            &Value::Array(default_artists()),
        )
    }

    pub fn with_tables(albums: &Value, artists: &Value) -> Result<Self> {
        let dir = TempDir::new()?;
        let library = TestLibrary { dir };
        library.write_albums(albums)?;
        library.write_artists(artists)?;
        Ok(library)
    }

    pub fn write_albums(&self, albums: &Value) -> Result<()> {
        fs::write(self.albums_path(), serde_json::to_vec(albums)?)?;
        Ok(())
    }

    pub fn write_artists(&self, artists: &Value) -> Result<()> {
        fs::write(self.artists_path(), serde_json::to_vec(artists)?)?;
        Ok(())
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    pub fn albums_path(&self) -> PathBuf {
        self.dir.path().join(ALBUMS_FILE)
    }

    pub fn artists_path(&self) -> PathBuf {
        self.dir.path().join(ARTISTS_FILE)
    }

    pub fn load(&self) -> Result<Catalog, LoadError> {
        load_catalog(
            &self.albums_path(),
            &self.artists_path(),
            &ClipSettings::default(),
        )
    }
}
