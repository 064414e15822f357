use super::AlbumColumn;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Value of one album column, as handed to a chart axis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Date(NaiveDate),
}

impl CellValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Date(_) => None,
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Number(n) if n.fract() == 0.0 => write!(f, "{}", n),
            CellValue::Number(n) => write!(f, "{:.3}", n),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatures {
    pub popularity: f64,
    pub total_tracks: f64,
    pub duration_ms: f64,
    pub danceability: f64,
    pub energy: f64,
    pub key: f64,
    /// Clipped to the corpus-wide quantile bounds at load time.
    pub loudness: f64,
    pub mode: f64,
    pub speechiness: f64,
    pub acousticness: f64,
    pub instrumentalness: f64,
    pub liveness: f64,
    pub valence: f64,
    pub tempo: f64,
    pub time_signature: f64,
}

impl AudioFeatures {
    /// Reads a raw numeric feature. `None` for the derived columns.
    pub fn get(&self, column: AlbumColumn) -> Option<f64> {
        let value = match column {
            AlbumColumn::Popularity => self.popularity,
            AlbumColumn::TotalTracks => self.total_tracks,
            AlbumColumn::DurationMs => self.duration_ms,
            AlbumColumn::Danceability => self.danceability,
            AlbumColumn::Energy => self.energy,
            AlbumColumn::Key => self.key,
            AlbumColumn::Loudness => self.loudness,
            AlbumColumn::Mode => self.mode,
            AlbumColumn::Speechiness => self.speechiness,
            AlbumColumn::Acousticness => self.acousticness,
            AlbumColumn::Instrumentalness => self.instrumentalness,
            AlbumColumn::Liveness => self.liveness,
            AlbumColumn::Valence => self.valence,
            AlbumColumn::Tempo => self.tempo,
            AlbumColumn::TimeSignature => self.time_signature,
            AlbumColumn::ReleaseDate | AlbumColumn::Year => return None,
        };
        Some(value)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub artist_id: String,
    pub release_date: NaiveDate,
    pub year: i32,
    pub decade: String,
    pub image: Option<String>,
    pub features: AudioFeatures,
}

impl Album {
    pub fn value(&self, column: AlbumColumn) -> CellValue {
        match column {
            AlbumColumn::ReleaseDate => CellValue::Date(self.release_date),
            AlbumColumn::Year => CellValue::Number(self.year as f64),
            other => CellValue::Number(self.features.get(other).unwrap_or(f64::NAN)),
        }
    }
}
