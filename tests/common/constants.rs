//! Shared constants for end-to-end tests
//!
//! When the test library changes (ids, names, release dates), update only
//! this file and `fixtures.rs`.

// ============================================================================
// File names
// ============================================================================

pub const ALBUMS_FILE: &str = "albums_features.json";
pub const ARTISTS_FILE: &str = "artists_features.json";

// ============================================================================
// Test Library IDs
// ============================================================================

/// "The Test Band", rock, at (0, 0) on the genre map
pub const ARTIST_1_ID: &str = "artist-1";
pub const ARTIST_1_NAME: &str = "The Test Band";

/// "Jazz Ensemble", jazz, at (5, 5) on the genre map
pub const ARTIST_2_ID: &str = "artist-2";
pub const ARTIST_2_NAME: &str = "Jazz Ensemble";

/// "Garage Kids", rock, at (1, -1) on the genre map
pub const ARTIST_3_ID: &str = "artist-3";
pub const ARTIST_3_NAME: &str = "Garage Kids";

/// 1994, The Test Band
pub const ALBUM_1_ID: &str = "album-1";

/// 2003, Jazz Ensemble
pub const ALBUM_2_ID: &str = "album-2";

/// 2008 (year-only date), The Test Band
pub const ALBUM_3_ID: &str = "album-3";

/// 2015, Garage Kids
pub const ALBUM_4_ID: &str = "album-4";

/// 1999-12 (year-month date), Jazz Ensemble
pub const ALBUM_5_ID: &str = "album-5";

/// Every album id, in table order
pub const ALL_ALBUM_IDS: [&str; 5] = [ALBUM_1_ID, ALBUM_2_ID, ALBUM_3_ID, ALBUM_4_ID, ALBUM_5_ID];

// ============================================================================
// Genres and decades
// ============================================================================

pub const GENRE_ROCK: &str = "rock";
pub const GENRE_JAZZ: &str = "jazz";

pub const DECADES: [&str; 3] = ["1990", "2000", "2010"];
