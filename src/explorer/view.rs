//! The cross-filtered album view handed to a chart.

use super::selection::SelectionState;
use crate::catalog::{Album, AlbumColumn, Artist, Catalog, CellValue, ColumnError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One visible album: the three projected values plus tooltip metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewRow {
    pub album_id: String,
    pub name: String,
    pub artist_id: String,
    pub artist_name: String,
    pub year: i32,
    pub image: Option<String>,
    pub x: CellValue,
    pub y: CellValue,
    pub color: CellValue,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilteredView {
    pub x_column: AlbumColumn,
    pub y_column: AlbumColumn,
    pub color_column: AlbumColumn,
    pub rows: Vec<ViewRow>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    X,
    Y,
    Color,
    Year,
    Name,
}

/// Computes the albums visible under `state`, in catalog order.
///
/// Albums are kept when their artist is known and every non-empty filter
/// set (artists, genres, decades) accepts them. An empty result is a valid,
/// empty view. Column names are resolved before any row is touched.
pub fn compute_view(catalog: &Catalog, state: &SelectionState) -> Result<FilteredView, ColumnError> {
    let axes = state.axes()?;

    let rows = catalog
        .joined_albums()
        .filter(|(album, artist)| state.matches(album, artist))
        .map(|(album, artist)| ViewRow::project(album, artist, axes.x, axes.y, axes.color))
        .collect();

    Ok(FilteredView {
        x_column: axes.x,
        y_column: axes.y,
        color_column: axes.color,
        rows,
    })
}

impl ViewRow {
    fn project(
        album: &Album,
        artist: &Artist,
        x: AlbumColumn,
        y: AlbumColumn,
        color: AlbumColumn,
    ) -> Self {
        ViewRow {
            album_id: album.id.clone(),
            name: album.name.clone(),
            artist_id: artist.id.clone(),
            artist_name: artist.name.clone(),
            year: album.year,
            image: album.image.clone(),
            x: album.value(x),
            y: album.value(y),
            color: album.value(color),
        }
    }
}

fn compare_cells(a: &CellValue, b: &CellValue) -> Ordering {
    match (a, b) {
        (CellValue::Number(a), CellValue::Number(b)) => a.total_cmp(b),
        (CellValue::Date(a), CellValue::Date(b)) => a.cmp(b),
        (CellValue::Date(_), CellValue::Number(_)) => Ordering::Less,
        (CellValue::Number(_), CellValue::Date(_)) => Ordering::Greater,
    }
}

impl FilteredView {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn album_ids(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.album_id.as_str()).collect()
    }

    /// Stable sort on request. Ties keep catalog order in both directions.
    pub fn sorted_by(mut self, key: SortKey, descending: bool) -> Self {
        self.rows.sort_by(|a, b| {
            let ordering = match key {
                SortKey::X => compare_cells(&a.x, &b.x),
                SortKey::Y => compare_cells(&a.y, &b.y),
                SortKey::Color => compare_cells(&a.color, &b.color),
                SortKey::Year => a.year.cmp(&b.year),
                SortKey::Name => a.name.cmp(&b.name),
            };
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
        self
    }
}
