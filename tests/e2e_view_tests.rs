//! End-to-end tests for the cross-filtered album view
//!
//! Tests cover filtering, axis changes, rejected events and sorting,
//! going through the loader and an `ExplorerSession`.

mod common;

use common::*;
use library_explorer::explorer::{MapBounds, SortKey};
use library_explorer::{
    compute_view, AlbumColumn, ColumnError, SelectionEvent, SelectionState,
};
use serde_json::Value;
use std::collections::HashSet;

// ============================================================================
// Unfiltered view
// ============================================================================

#[test]
fn test_empty_selection_returns_every_album() {
    let library = TestLibrary::create().unwrap();
    let session = open_session(&library);

    assert_eq!(session.view().album_ids(), ALL_ALBUM_IDS.to_vec());
    assert_eq!(session.view().x_column, AlbumColumn::Valence);
    assert_eq!(session.view().y_column, AlbumColumn::Popularity);
    assert_eq!(session.view().color_column, AlbumColumn::Loudness);
}

#[test]
fn test_view_rows_carry_tooltip_metadata() {
    let library = TestLibrary::create().unwrap();
    let session = open_session(&library);

    let row = &session.view().rows[1];
    assert_eq!(row.album_id, ALBUM_2_ID);
    assert_eq!(row.artist_id, ARTIST_2_ID);
    assert_eq!(row.artist_name, ARTIST_2_NAME);
    assert_eq!(row.year, 2003);
    assert_eq!(
        row.image.as_deref(),
        Some("https://images.test/album-2.jpg")
    );
}

// ============================================================================
// Filters
// ============================================================================

#[test]
fn test_selecting_a_decade_keeps_only_that_decade() {
    let library = TestLibrary::create().unwrap();
    let mut session = open_session(&library);
    assert_eq!(session.catalog().decades(), DECADES.to_vec());

    let view = session.apply(SelectionEvent::decades(["2000"])).unwrap();
    let ids = view.album_ids();
    assert_eq!(ids, vec![ALBUM_2_ID, ALBUM_3_ID]);

    let expected = session
        .catalog()
        .albums()
        .iter()
        .filter(|album| album.decade == "2000")
        .count();
    assert_eq!(session.view().len(), expected);
    assert!(session.view().rows.iter().all(|r| (2000..2010).contains(&r.year)));
}

#[test]
fn test_filters_combine_as_intersection() {
    let library = TestLibrary::create().unwrap();
    let mut session = open_session(&library);

    session
        .apply(SelectionEvent::genres([GENRE_ROCK]))
        .unwrap();
    assert_eq!(
        session.view().album_ids(),
        vec![ALBUM_1_ID, ALBUM_3_ID, ALBUM_4_ID]
    );

    session
        .apply(SelectionEvent::decades(["1990", "2000"]))
        .unwrap();
    assert_eq!(session.view().album_ids(), vec![ALBUM_1_ID, ALBUM_3_ID]);

    session
        .apply(SelectionEvent::artists([ARTIST_3_ID]))
        .unwrap();
    assert!(session.view().is_empty());
}

#[test]
fn test_view_is_a_subset_of_the_album_table() {
    let library = TestLibrary::create().unwrap();
    let mut session = open_session(&library);
    let all_ids: HashSet<String> = session
        .catalog()
        .albums()
        .iter()
        .map(|a| a.id.clone())
        .collect();

    let events = vec![
        SelectionEvent::decades(["1990"]),
        SelectionEvent::genres([GENRE_JAZZ]),
        SelectionEvent::artists([ARTIST_1_ID, ARTIST_2_ID]),
        SelectionEvent::SelectionCleared,
        SelectionEvent::decades(["2010", "1970"]),
    ];
    for event in events {
        let view = session.apply(event).unwrap();
        assert!(view.len() <= all_ids.len());
        assert!(view.album_ids().iter().all(|id| all_ids.contains(*id)));
    }
}

#[test]
fn test_compute_view_is_idempotent() {
    let library = TestLibrary::create().unwrap();
    let catalog = library.load().unwrap();
    let state = SelectionState::with_axes("energy", "year", "release_date")
        .unwrap()
        .apply(&SelectionEvent::decades(["1990", "2010"]))
        .unwrap();

    let first = compute_view(&catalog, &state).unwrap();
    let second = compute_view(&catalog, &state).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_clear_resets_filters_but_keeps_axes() {
    let library = TestLibrary::create().unwrap();
    let mut session = open_session(&library);

    session
        .apply(SelectionEvent::XColumnChanged {
            column: "tempo".to_owned(),
        })
        .unwrap();
    session.apply(SelectionEvent::decades(["2010"])).unwrap();
    assert_eq!(session.view().len(), 1);

    let view = session.apply(SelectionEvent::SelectionCleared).unwrap();
    assert_eq!(view.len(), ALL_ALBUM_IDS.len());
    assert_eq!(view.x_column, AlbumColumn::Tempo);
}

// ============================================================================
// Decade range and box selection
// ============================================================================

#[test]
fn test_decade_range_selects_every_bucket_between_years() {
    let library = TestLibrary::create().unwrap();
    let mut session = open_session(&library);

    let view = session.select_decade_range(1990, 2009).unwrap();
    assert_eq!(
        view.album_ids(),
        vec![ALBUM_1_ID, ALBUM_2_ID, ALBUM_3_ID, ALBUM_5_ID]
    );
}

#[test]
fn test_decade_range_with_unbounded_years() {
    let library = TestLibrary::create().unwrap();
    let mut session = open_session(&library);

    let view = session.select_decade_range(i32::MIN, i32::MAX).unwrap();
    assert_eq!(view.album_ids(), ALL_ALBUM_IDS.to_vec());
    assert!(session.state().selected_decades.len() <= 5);

    let view = session.select_decade_range(-50_000, -40_000).unwrap();
    assert!(view.is_empty());
}

#[test]
fn test_box_selection_on_artist_map() {
    let library = TestLibrary::create().unwrap();
    let mut session = open_session(&library);

    // Covers artist-1 at (0, 0) and artist-3 at (1, -1), corners reversed.
    let view = session
        .select_artists_in_box(MapBounds::new(2.0, 0.5, -0.5, -2.0))
        .unwrap();
    assert_eq!(
        view.album_ids(),
        vec![ALBUM_1_ID, ALBUM_3_ID, ALBUM_4_ID]
    );

    let highlighted: Vec<String> = session
        .artist_points()
        .into_iter()
        .filter(|p| p.highlighted)
        .map(|p| p.artist_id)
        .collect();
    assert_eq!(highlighted, vec![ARTIST_1_ID, ARTIST_3_ID]);
}

// ============================================================================
// Axis changes
// ============================================================================

#[test]
fn test_axis_change_reprojects_rows() {
    let library = TestLibrary::create().unwrap();
    let mut session = open_session(&library);

    let view = session
        .apply(SelectionEvent::YColumnChanged {
            column: "year".to_owned(),
        })
        .unwrap();

    assert_eq!(view.y_column, AlbumColumn::Year);
    let years: Vec<f64> = view.rows.iter().filter_map(|r| r.y.as_number()).collect();
    assert_eq!(years, vec![1994.0, 2003.0, 2008.0, 2015.0, 1999.0]);
}

#[test]
fn test_unknown_column_leaves_view_unchanged() {
    let library = TestLibrary::create().unwrap();
    let mut session = open_session(&library);
    session.apply(SelectionEvent::decades(["1990"])).unwrap();
    let state_before = session.state().clone();
    let view_before = session.view().clone();
    let recomputes_before = session.recompute_count();

    let result = session.apply(SelectionEvent::ColorColumnChanged {
        column: "genre_cluster".to_owned(),
    });

    assert_eq!(
        result.unwrap_err(),
        ColumnError {
            name: "genre_cluster".to_owned()
        }
    );
    assert_eq!(session.state(), &state_before);
    assert_eq!(session.view(), &view_before);
    assert_eq!(session.recompute_count(), recomputes_before);
}

// ============================================================================
// Sorting and serialization
// ============================================================================

#[test]
fn test_sorting_by_popularity() {
    let library = TestLibrary::create().unwrap();
    let session = open_session(&library);

    let sorted = session.view().clone().sorted_by(SortKey::Y, true);
    assert_eq!(
        sorted.album_ids(),
        vec![ALBUM_3_ID, ALBUM_1_ID, ALBUM_5_ID, ALBUM_2_ID, ALBUM_4_ID]
    );
    // Sorting a copy does not reorder the session view.
    assert_eq!(session.view().album_ids(), ALL_ALBUM_IDS.to_vec());
}

#[test]
fn test_view_serializes_to_json() {
    let library = TestLibrary::create().unwrap();
    let mut session = open_session(&library);
    session
        .apply(SelectionEvent::XColumnChanged {
            column: "release_date".to_owned(),
        })
        .unwrap();
    session.apply(SelectionEvent::artists([ARTIST_3_ID])).unwrap();

    let json: Value = serde_json::to_value(session.view()).unwrap();
    assert_eq!(json["x_column"], "release_date");
    assert_eq!(json["y_column"], "popularity");
    assert_eq!(json["color_column"], "loudness");
    let rows = json["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["album_id"], ALBUM_4_ID);
    assert_eq!(rows[0]["x"], "2015-09-20");
    assert_eq!(rows[0]["y"], 15.0);
}
