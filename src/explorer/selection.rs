//! User-controlled filter and axis choices.

use crate::catalog::{Album, AlbumColumn, Artist, ColumnError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const DEFAULT_X_COLUMN: AlbumColumn = AlbumColumn::Valence;
pub const DEFAULT_Y_COLUMN: AlbumColumn = AlbumColumn::Popularity;
pub const DEFAULT_COLOR_COLUMN: AlbumColumn = AlbumColumn::Loudness;

/// Everything that determines the album view. Empty sets mean "no
/// restriction". Column names are kept as given so that a state coming from
/// outside (e.g. deserialized) is still checked when a view is computed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    pub selected_artist_ids: BTreeSet<String>,
    pub selected_decades: BTreeSet<String>,
    #[serde(default)]
    pub selected_genres: BTreeSet<String>,
    pub x_column: String,
    pub y_column: String,
    pub color_column: String,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            selected_artist_ids: BTreeSet::new(),
            selected_decades: BTreeSet::new(),
            selected_genres: BTreeSet::new(),
            x_column: DEFAULT_X_COLUMN.name().to_owned(),
            y_column: DEFAULT_Y_COLUMN.name().to_owned(),
            color_column: DEFAULT_COLOR_COLUMN.name().to_owned(),
        }
    }
}

/// The three resolved chart columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Axes {
    pub x: AlbumColumn,
    pub y: AlbumColumn,
    pub color: AlbumColumn,
}

/// One discrete user interaction. Each event replaces one field of the
/// state, `SelectionCleared` resets the three filter sets at once.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SelectionEvent {
    ArtistsSelected { artist_ids: BTreeSet<String> },
    DecadesSelected { decades: BTreeSet<String> },
    GenresSelected { genres: BTreeSet<String> },
    XColumnChanged { column: String },
    YColumnChanged { column: String },
    ColorColumnChanged { column: String },
    SelectionCleared,
}

impl SelectionState {
    /// Default filters with the given axes, validated.
    pub fn with_axes(x: &str, y: &str, color: &str) -> Result<Self, ColumnError> {
        let state = SelectionState {
            x_column: AlbumColumn::from_name(x)?.name().to_owned(),
            y_column: AlbumColumn::from_name(y)?.name().to_owned(),
            color_column: AlbumColumn::from_name(color)?.name().to_owned(),
            ..Default::default()
        };
        Ok(state)
    }

    /// Returns the state after `event`. `self` is never touched, a rejected
    /// event leaves the caller with the previous state.
    pub fn apply(&self, event: &SelectionEvent) -> Result<SelectionState, ColumnError> {
        let mut next = self.clone();
        match event {
            SelectionEvent::ArtistsSelected { artist_ids } => {
                next.selected_artist_ids = artist_ids.clone();
            }
            SelectionEvent::DecadesSelected { decades } => {
                next.selected_decades = decades.clone();
            }
            SelectionEvent::GenresSelected { genres } => {
                next.selected_genres = genres.clone();
            }
            SelectionEvent::XColumnChanged { column } => {
                next.x_column = AlbumColumn::from_name(column)?.name().to_owned();
            }
            SelectionEvent::YColumnChanged { column } => {
                next.y_column = AlbumColumn::from_name(column)?.name().to_owned();
            }
            SelectionEvent::ColorColumnChanged { column } => {
                next.color_column = AlbumColumn::from_name(column)?.name().to_owned();
            }
            SelectionEvent::SelectionCleared => {
                next.selected_artist_ids.clear();
                next.selected_decades.clear();
                next.selected_genres.clear();
            }
        }
        Ok(next)
    }

    pub fn axes(&self) -> Result<Axes, ColumnError> {
        Ok(Axes {
            x: AlbumColumn::from_name(&self.x_column)?,
            y: AlbumColumn::from_name(&self.y_column)?,
            color: AlbumColumn::from_name(&self.color_column)?,
        })
    }

    pub fn is_unfiltered(&self) -> bool {
        self.selected_artist_ids.is_empty()
            && self.selected_decades.is_empty()
            && self.selected_genres.is_empty()
    }

    pub fn matches_artist(&self, artist: &Artist) -> bool {
        (self.selected_artist_ids.is_empty() || self.selected_artist_ids.contains(&artist.id))
            && (self.selected_genres.is_empty()
                || self.selected_genres.contains(&artist.genre_cluster))
    }

    pub fn matches(&self, album: &Album, artist: &Artist) -> bool {
        self.matches_artist(artist)
            && (self.selected_decades.is_empty() || self.selected_decades.contains(&album.decade))
    }
}

impl SelectionEvent {
    pub fn artists<I: IntoIterator<Item = S>, S: Into<String>>(ids: I) -> Self {
        SelectionEvent::ArtistsSelected {
            artist_ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn decades<I: IntoIterator<Item = S>, S: Into<String>>(decades: I) -> Self {
        SelectionEvent::DecadesSelected {
            decades: decades.into_iter().map(Into::into).collect(),
        }
    }

    pub fn genres<I: IntoIterator<Item = S>, S: Into<String>>(genres: I) -> Self {
        SelectionEvent::GenresSelected {
            genres: genres.into_iter().map(Into::into).collect(),
        }
    }
}
