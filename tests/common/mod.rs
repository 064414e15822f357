//! Common test infrastructure
//!
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{TestLibrary, ALBUM_1_ID};
//!
//! #[test]
//! fn test_load_library() {
//!     let library = TestLibrary::create().unwrap();
//!     let catalog = library.load().unwrap();
//!     assert_eq!(catalog.albums()[0].id, ALBUM_1_ID);
//! }
//! ```

mod constants;
mod fixtures;

pub use constants::*;
#[allow(unused_imports)]
pub use fixtures::{
    album_record, artist_record, default_albums, default_artists, to_column_layout, TestLibrary,
};

use library_explorer::{ExplorerSession, SelectionState};
use std::sync::Arc;

/// Loads the default library and opens a session on it with no filter.
#[allow(dead_code)]
pub fn open_session(library: &TestLibrary) -> ExplorerSession {
    let catalog = library.load().expect("test library should load");
    ExplorerSession::new(Arc::new(catalog), SelectionState::default())
        .expect("default axes are valid")
}
