//! The artist scatter, laid out on the 2-D genre embedding. Selections made
//! on it feed back into the album view.

use super::selection::SelectionState;
use crate::catalog::Catalog;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Marker size is the artist popularity divided by this.
pub const MARKER_SIZE_DIVISOR: f64 = 5.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArtistPoint {
    pub artist_id: String,
    pub name: String,
    pub genre_cluster: String,
    pub genre_specific: String,
    pub x: f64,
    pub y: f64,
    pub popularity: f64,
    pub size: f64,
    pub image: Option<String>,
    /// Matches the current artist and genre selection.
    pub highlighted: bool,
}

/// Rectangle on the map, inclusive on every side. Corners can be given in
/// any order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl MapBounds {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        let (min_x, max_x) = (self.x0.min(self.x1), self.x0.max(self.x1));
        let (min_y, max_y) = (self.y0.min(self.y1), self.y0.max(self.y1));
        x >= min_x && x <= max_x && y >= min_y && y <= max_y
    }
}

pub fn artist_points(catalog: &Catalog, state: &SelectionState) -> Vec<ArtistPoint> {
    catalog
        .artists()
        .iter()
        .map(|artist| ArtistPoint {
            artist_id: artist.id.clone(),
            name: artist.name.clone(),
            genre_cluster: artist.genre_cluster.clone(),
            genre_specific: artist.genre_specific.clone(),
            x: artist.genre_x,
            y: artist.genre_y,
            popularity: artist.popularity,
            size: artist.popularity / MARKER_SIZE_DIVISOR,
            image: artist.image.clone(),
            highlighted: state.matches_artist(artist),
        })
        .collect()
}

/// Ids of the artists inside `bounds`.
pub fn artists_in_box(catalog: &Catalog, bounds: &MapBounds) -> BTreeSet<String> {
    catalog
        .artists()
        .iter()
        .filter(|artist| bounds.contains(artist.genre_x, artist.genre_y))
        .map(|artist| artist.id.clone())
        .collect()
}
