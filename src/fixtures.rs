//! Small in-memory dataset shared by the unit tests.
//!
//! 3 artists (2 rock, 1 jazz) and 5 albums over the 1990s, 2000s and 2010s.

use crate::catalog::{Catalog, ClipSettings, RawTable};
use serde_json::{json, Value};

#[allow(clippy::too_many_arguments)]
fn album(
    uri: &str,
    name: &str,
    artist_uri: &str,
    release_date: &str,
    popularity: f64,
    loudness: f64,
    valence: f64,
    energy: f64,
) -> Value {
    json!({
        "uri": uri,
        "name": name,
        "artist_uri": artist_uri,
        "release_date": release_date,
        "image": format!("https://images.test/{}.jpg", uri),
        "popularity": popularity,
        "total_tracks": 10,
        "duration_ms": 2_400_000,
        "danceability": 0.5,
        "energy": energy,
        "key": 5,
        "loudness": loudness,
        "mode": 1,
        "speechiness": 0.05,
        "acousticness": 0.3,
        "instrumentalness": 0.0,
        "liveness": 0.15,
        "valence": valence,
        "tempo": 120.0,
        "time_signature": 4,
    })
}

pub fn sample_albums() -> Vec<Value> {
    vec![
        album("album-1", "First Album", "artist-1", "1994-03-08", 55.0, -6.0, 0.3, 0.8),
        album("album-2", "Jazz Collection", "artist-2", "2003-06-01", 35.0, -12.0, 0.7, 0.4),
        album("album-3", "Second Album", "artist-1", "2008", 70.0, -4.0, 0.5, 0.9),
        album("album-4", "Garage Tapes", "artist-3", "2015-09-20", 15.0, -20.0, 0.1, 0.7),
        album("album-5", "Late Night", "artist-2", "1999-12", 45.0, -9.0, 0.9, 0.2),
    ]
}

pub fn sample_artists() -> Value {
    json!([
        {
            "uri": "artist-1", "name": "The Test Band", "genre_cluster": "rock",
            "genre_specific": "alternative rock", "genre_x": 0.0, "genre_y": 0.0,
            "popularity": 60, "image": "https://images.test/artist-1.jpg"
        },
        {
            "uri": "artist-2", "name": "Jazz Ensemble", "genre_cluster": "jazz",
            "genre_specific": "cool jazz", "genre_x": 5.0, "genre_y": 5.0,
            "popularity": 40
        },
        {
            "uri": "artist-3", "name": "Garage Kids", "genre_cluster": "rock",
            "genre_specific": "garage rock", "genre_x": 1.0, "genre_y": -1.0,
            "popularity": 20
        }
    ])
}

pub fn build_catalog() -> Catalog {
    let albums = RawTable::from_value("albums", Value::Array(sample_albums())).unwrap();
    let artists = RawTable::from_value("artists", sample_artists()).unwrap();
    let result = Catalog::build(&albums, &artists, &ClipSettings::default()).unwrap();
    assert!(result.problems.is_empty(), "{:?}", result.problems);
    result.catalog
}
