//! The fixed set of album columns that can be put on a chart axis.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Raised when a column name is not part of [`AlbumColumn::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown column '{name}', expected one of: {}", AlbumColumn::names().join(", "))]
pub struct ColumnError {
    pub name: String,
}

/// Plottable album column
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlbumColumn {
    Acousticness,
    Danceability,
    DurationMs,
    Energy,
    Instrumentalness,
    Key,
    Liveness,
    Loudness,
    Mode,
    Popularity,
    ReleaseDate,
    Speechiness,
    Tempo,
    TimeSignature,
    TotalTracks,
    Valence,
    Year,
}

impl AlbumColumn {
    /// Every column, in alphabetical order of its name.
    pub const ALL: [AlbumColumn; 17] = [
        AlbumColumn::Acousticness,
        AlbumColumn::Danceability,
        AlbumColumn::DurationMs,
        AlbumColumn::Energy,
        AlbumColumn::Instrumentalness,
        AlbumColumn::Key,
        AlbumColumn::Liveness,
        AlbumColumn::Loudness,
        AlbumColumn::Mode,
        AlbumColumn::Popularity,
        AlbumColumn::ReleaseDate,
        AlbumColumn::Speechiness,
        AlbumColumn::Tempo,
        AlbumColumn::TimeSignature,
        AlbumColumn::TotalTracks,
        AlbumColumn::Valence,
        AlbumColumn::Year,
    ];

    pub fn from_name(name: &str) -> Result<Self, ColumnError> {
        let column = match name {
            "acousticness" => AlbumColumn::Acousticness,
            "danceability" => AlbumColumn::Danceability,
            "duration_ms" => AlbumColumn::DurationMs,
            "energy" => AlbumColumn::Energy,
            "instrumentalness" => AlbumColumn::Instrumentalness,
            "key" => AlbumColumn::Key,
            "liveness" => AlbumColumn::Liveness,
            "loudness" => AlbumColumn::Loudness,
            "mode" => AlbumColumn::Mode,
            "popularity" => AlbumColumn::Popularity,
            "release_date" => AlbumColumn::ReleaseDate,
            "speechiness" => AlbumColumn::Speechiness,
            "tempo" => AlbumColumn::Tempo,
            "time_signature" => AlbumColumn::TimeSignature,
            "total_tracks" => AlbumColumn::TotalTracks,
            "valence" => AlbumColumn::Valence,
            "year" => AlbumColumn::Year,
            _ => {
                return Err(ColumnError {
                    name: name.to_owned(),
                })
            }
        };
        Ok(column)
    }

    pub fn name(&self) -> &'static str {
        match self {
            AlbumColumn::Acousticness => "acousticness",
            AlbumColumn::Danceability => "danceability",
            AlbumColumn::DurationMs => "duration_ms",
            AlbumColumn::Energy => "energy",
            AlbumColumn::Instrumentalness => "instrumentalness",
            AlbumColumn::Key => "key",
            AlbumColumn::Liveness => "liveness",
            AlbumColumn::Loudness => "loudness",
            AlbumColumn::Mode => "mode",
            AlbumColumn::Popularity => "popularity",
            AlbumColumn::ReleaseDate => "release_date",
            AlbumColumn::Speechiness => "speechiness",
            AlbumColumn::Tempo => "tempo",
            AlbumColumn::TimeSignature => "time_signature",
            AlbumColumn::TotalTracks => "total_tracks",
            AlbumColumn::Valence => "valence",
            AlbumColumn::Year => "year",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.name()).collect()
    }

    /// Numeric audio features read straight from the albums file.
    /// `release_date` and `year` are handled by the normalizer.
    pub fn is_raw_feature(&self) -> bool {
        !matches!(self, AlbumColumn::ReleaseDate | AlbumColumn::Year)
    }
}

impl fmt::Display for AlbumColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip_for_every_column() {
        for column in AlbumColumn::ALL {
            assert_eq!(AlbumColumn::from_name(column.name()), Ok(column));
        }
    }

    #[test]
    fn test_names_are_sorted() {
        let names = AlbumColumn::names();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_unknown_name_is_column_error() {
        let err = AlbumColumn::from_name("artist_name").unwrap_err();
        assert_eq!(err.name, "artist_name");
        assert!(err.to_string().contains("unknown column 'artist_name'"));
        assert!(err.to_string().contains("valence"));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert!(AlbumColumn::from_name("Valence").is_err());
    }

    #[test]
    fn test_raw_features_exclude_derived_columns() {
        let raw: Vec<_> = AlbumColumn::ALL
            .iter()
            .filter(|c| c.is_raw_feature())
            .collect();
        assert_eq!(raw.len(), 15);
        assert!(!AlbumColumn::Year.is_raw_feature());
        assert!(!AlbumColumn::ReleaseDate.is_raw_feature());
    }

    #[test]
    fn test_serde_uses_column_names() {
        let json = serde_json::to_string(&AlbumColumn::TimeSignature).unwrap();
        assert_eq!(json, "\"time_signature\"");
    }
}
