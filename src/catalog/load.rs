//! Catalog loading functionality

use super::normalize::ClipSettings;
use super::table::RawTable;
use super::{Catalog, LoadError};
use std::path::Path;
use tracing::info;

pub const ALBUMS_TABLE: &str = "albums";
pub const ARTISTS_TABLE: &str = "artists";

/// Reads both tables and builds the catalog. Fatal problems abort the load,
/// dropped rows and dangling references are only logged.
pub fn load_catalog(
    albums_path: &Path,
    artists_path: &Path,
    clip_settings: &ClipSettings,
) -> Result<Catalog, LoadError> {
    info!("Reading albums from {}...", albums_path.display());
    let albums = RawTable::read(ALBUMS_TABLE, albums_path)?;
    info!("Reading artists from {}...", artists_path.display());
    let artists = RawTable::read(ARTISTS_TABLE, artists_path)?;

    let build_result = Catalog::build(&albums, &artists, clip_settings)?;
    let problems = build_result.problems;
    let catalog = build_result.catalog;

    if !problems.is_empty() {
        info!("Found {} problems:", problems.len());
        for problem in problems.iter() {
            info!("- {:?}", problem);
        }
        info!("");
    }
    if problems.is_empty() {
        info!("Catalog checked, no issues found.");
    } else {
        info!(
            "Catalog was built, but check the {} non-fatal issues above.",
            problems.len()
        );
    }

    let bounds = catalog.clip_bounds();
    info!(
        "Catalog has:\n{} artists\n{} albums\n{} decades\nloudness clipped to [{:.3}, {:.3}]",
        catalog.get_artists_count(),
        catalog.get_albums_count(),
        catalog.decades().len(),
        bounds.lower,
        bounds.upper
    );
    Ok(catalog)
}
