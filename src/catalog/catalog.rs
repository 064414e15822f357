use super::normalize::{normalize_albums, normalize_artists, ClipBounds, ClipSettings};
use super::table::RawTable;
use super::{Album, Artist, LoadError, LoadProblem};
use std::collections::HashMap;

/// The immutable base tables. Built once at startup and shared read-only
/// by every view.
#[derive(Debug)]
pub struct Catalog {
    albums: Vec<Album>,
    artists: Vec<Artist>,
    artist_index: HashMap<String, usize>,
    clip_bounds: ClipBounds,
}

pub struct CatalogBuildResult {
    pub catalog: Catalog,
    pub problems: Vec<LoadProblem>,
}

impl Catalog {
    pub fn build(
        albums: &RawTable,
        artists: &RawTable,
        clip_settings: &ClipSettings,
    ) -> Result<CatalogBuildResult, LoadError> {
        let normalized = normalize_albums(albums, clip_settings)?;
        let (artists, mut artist_problems) = normalize_artists(artists)?;

        let artist_index: HashMap<String, usize> = artists
            .iter()
            .enumerate()
            .map(|(i, artist)| (artist.id.clone(), i))
            .collect();

        let mut problems = normalized.problems;
        problems.append(&mut artist_problems);
        problems.extend(
            normalized
                .albums
                .iter()
                .filter(|album| !artist_index.contains_key(&album.artist_id))
                .map(|album| LoadProblem::UnresolvedArtist {
                    album_id: album.id.clone(),
                    artist_id: album.artist_id.clone(),
                }),
        );

        Ok(CatalogBuildResult {
            catalog: Catalog {
                albums: normalized.albums,
                artists,
                artist_index,
                clip_bounds: normalized.clip_bounds,
            },
            problems,
        })
    }

    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    pub fn get_artist(&self, id: &str) -> Option<&Artist> {
        self.artist_index.get(id).map(|&i| &self.artists[i])
    }

    pub fn clip_bounds(&self) -> ClipBounds {
        self.clip_bounds
    }

    pub fn get_albums_count(&self) -> usize {
        self.albums.len()
    }

    pub fn get_artists_count(&self) -> usize {
        self.artists.len()
    }

    /// Albums paired with their artist, in table order. Albums whose artist
    /// is unknown are left out.
    pub fn joined_albums(&self) -> impl Iterator<Item = (&Album, &Artist)> + '_ {
        self.albums
            .iter()
            .filter_map(|album| self.get_artist(&album.artist_id).map(|a| (album, a)))
    }

    /// Distinct decade labels, oldest first.
    pub fn decades(&self) -> Vec<String> {
        let mut decades: Vec<i32> = self
            .albums
            .iter()
            .filter_map(|album| album.decade.parse().ok())
            .collect();
        decades.sort_unstable();
        decades.dedup();
        decades.into_iter().map(|d| d.to_string()).collect()
    }

    /// Oldest and newest release year, `None` for an empty album table.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        let first = self.albums.iter().map(|album| album.year).min()?;
        let last = self.albums.iter().map(|album| album.year).max()?;
        Some((first, last))
    }

    /// Genre clusters with their artist count, most common first.
    pub fn genres_by_count(&self) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for artist in self.artists.iter() {
            *counts.entry(artist.genre_cluster.as_str()).or_default() += 1;
        }
        let mut genres: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(genre, count)| (genre.to_owned(), count))
            .collect();
        genres.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        genres
    }
}
