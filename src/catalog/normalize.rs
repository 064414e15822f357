//! Typing and normalization of the raw album and artist rows.
//!
//! Albums get three derived columns: `year` from the release date, the
//! `decade` bucket, and `loudness` clipped to corpus-wide quantile bounds.
//! The bounds are computed once, over every album record carrying a numeric
//! loudness, and are not recomputed when the view is filtered later on.

use super::table::{RawTable, Row};
use super::{Album, AlbumColumn, Artist, AudioFeatures, DataError, LoadError, LoadProblem};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use rayon::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

lazy_static! {
    static ref PARTIAL_DATE: Regex =
        Regex::new(r"^(\d{4})(?:-(\d{1,2})(?:-(\d{1,2}))?)?$").expect("valid date regex");
}

pub const ALBUM_ID_COLUMNS: [&str; 4] = ["uri", "name", "release_date", "artist_uri"];

pub const ARTIST_COLUMNS: [&str; 7] = [
    "uri",
    "name",
    "genre_cluster",
    "genre_specific",
    "genre_x",
    "genre_y",
    "popularity",
];

/// Every column the albums table must carry.
pub fn album_required_columns() -> Vec<&'static str> {
    let mut columns = ALBUM_ID_COLUMNS.to_vec();
    columns.extend(
        AlbumColumn::ALL
            .iter()
            .filter(|c| c.is_raw_feature())
            .map(|c| c.name()),
    );
    columns
}

/// Quantiles used to clip loudness outliers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipSettings {
    pub lower_quantile: f64,
    pub upper_quantile: f64,
}

impl Default for ClipSettings {
    fn default() -> Self {
        Self {
            lower_quantile: 0.05,
            upper_quantile: 0.95,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipBounds {
    pub lower: f64,
    pub upper: f64,
}

impl ClipBounds {
    /// `None` when there are no values to derive the bounds from.
    pub fn from_values(values: &[f64], settings: &ClipSettings) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let lower = quantile(&sorted, settings.lower_quantile)?;
        let upper = quantile(&sorted, settings.upper_quantile)?;
        Some(ClipBounds {
            lower: lower.min(upper),
            upper: lower.max(upper),
        })
    }

    /// Idempotent: clipping an already clipped value returns it unchanged.
    pub fn clip(&self, value: f64) -> f64 {
        value.max(self.lower).min(self.upper)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// Linear interpolation between the closest ranks of a sorted slice.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let q = q.clamp(0.0, 1.0);
    let position = q * (sorted.len() - 1) as f64;
    let below = position.floor() as usize;
    let above = position.ceil() as usize;
    let fraction = position - below as f64;
    Some(sorted[below] + (sorted[above] - sorted[below]) * fraction)
}

/// Parses the release date forms found in the dataset. Missing month and day
/// default to the first.
pub fn parse_release_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Some(captures) = PARTIAL_DATE.captures(raw) {
        let year: i32 = captures.get(1)?.as_str().parse().ok()?;
        let month: u32 = match captures.get(2) {
            Some(m) => m.as_str().parse().ok()?,
            None => 1,
        };
        let day: u32 = match captures.get(3) {
            Some(d) => d.as_str().parse().ok()?,
            None => 1,
        };
        return NaiveDate::from_ymd_opt(year, month, day);
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(datetime.date());
        }
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|datetime| datetime.date_naive())
}

/// Rounds the year down to the nearest multiple of ten.
pub fn decade_label(year: i32) -> String {
    (year.div_euclid(10) * 10).to_string()
}

fn parse_features(row: &Row) -> Result<AudioFeatures, DataError> {
    Ok(AudioFeatures {
        popularity: row.number("popularity")?,
        total_tracks: row.number("total_tracks")?,
        duration_ms: row.number("duration_ms")?,
        danceability: row.number("danceability")?,
        energy: row.number("energy")?,
        key: row.number("key")?,
        loudness: row.number("loudness")?,
        mode: row.number("mode")?,
        speechiness: row.number("speechiness")?,
        acousticness: row.number("acousticness")?,
        instrumentalness: row.number("instrumentalness")?,
        liveness: row.number("liveness")?,
        valence: row.number("valence")?,
        tempo: row.number("tempo")?,
        time_signature: row.number("time_signature")?,
    })
}

/// Types one album row. Loudness is left unclipped.
fn parse_album(row: &Row) -> Result<Album, DataError> {
    let raw_date = row.string("release_date")?;
    let release_date =
        parse_release_date(&raw_date).ok_or_else(|| DataError::UnparsableDate {
            row: row.index(),
            value: raw_date.clone(),
        })?;
    let year = chrono::Datelike::year(&release_date);

    Ok(Album {
        id: row.string("uri")?,
        name: row.text("name")?,
        artist_id: row.string("artist_uri")?,
        release_date,
        year,
        decade: decade_label(year),
        image: row.optional_string("image"),
        features: parse_features(row)?,
    })
}

fn parse_artist(row: &Row) -> Result<Artist, DataError> {
    Ok(Artist {
        id: row.string("uri")?,
        name: row.text("name")?,
        genre_cluster: row.text("genre_cluster")?,
        genre_specific: row.text("genre_specific")?,
        genre_x: row.number("genre_x")?,
        genre_y: row.number("genre_y")?,
        popularity: row.number("popularity")?,
        image: row.optional_string("image"),
    })
}

#[derive(Debug)]
pub struct NormalizedAlbums {
    pub albums: Vec<Album>,
    pub clip_bounds: ClipBounds,
    pub problems: Vec<LoadProblem>,
}

/// Types, derives and clips the albums table. Malformed rows are dropped and
/// reported, the rest keep their table order.
pub fn normalize_albums(
    table: &RawTable,
    settings: &ClipSettings,
) -> Result<NormalizedAlbums, LoadError> {
    table.require_columns(&album_required_columns())?;

    let loudness: Vec<f64> = table
        .rows()
        .iter()
        .filter_map(|row| row.number("loudness").ok())
        .collect();

    let parsed: Vec<Result<Album, DataError>> = table.rows().par_iter().map(parse_album).collect();

    let mut albums = Vec::with_capacity(parsed.len());
    let mut problems = Vec::new();
    for result in parsed {
        match result {
            Ok(album) => albums.push(album),
            Err(err) => problems.push(LoadProblem::DroppedAlbum(err)),
        }
    }

    let clip_bounds = match ClipBounds::from_values(&loudness, settings) {
        Some(bounds) if !albums.is_empty() => bounds,
        _ => {
            return Err(LoadError::NoValidRows {
                table: table.name,
                dropped: problems.len(),
            })
        }
    };

    for album in albums.iter_mut() {
        album.features.loudness = clip_bounds.clip(album.features.loudness);
    }

    Ok(NormalizedAlbums {
        albums,
        clip_bounds,
        problems,
    })
}

/// Types the artists table. The first row wins on duplicate ids.
pub fn normalize_artists(table: &RawTable) -> Result<(Vec<Artist>, Vec<LoadProblem>), LoadError> {
    table.require_columns(&ARTIST_COLUMNS)?;

    let parsed: Vec<Result<Artist, DataError>> =
        table.rows().par_iter().map(parse_artist).collect();

    let mut seen = HashSet::new();
    let mut artists = Vec::with_capacity(parsed.len());
    let mut problems = Vec::new();
    for result in parsed {
        match result {
            Ok(artist) => {
                if seen.insert(artist.id.clone()) {
                    artists.push(artist);
                } else {
                    problems.push(LoadProblem::DuplicateArtist {
                        artist_id: artist.id,
                    });
                }
            }
            Err(err) => problems.push(LoadProblem::DroppedArtist(err)),
        }
    }

    if artists.is_empty() {
        return Err(LoadError::NoValidRows {
            table: table.name,
            dropped: problems.len(),
        });
    }
    Ok((artists, problems))
}
