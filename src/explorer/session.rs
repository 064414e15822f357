use super::artist_map::{artist_points, artists_in_box, ArtistPoint, MapBounds};
use super::selection::{SelectionEvent, SelectionState};
use super::view::{compute_view, FilteredView};
use crate::catalog::normalize::decade_label;
use crate::catalog::{Catalog, ColumnError};
use std::sync::Arc;
use tracing::{debug, warn};

/// One user's interactive session: the selection state and the view it
/// currently produces. Every accepted event recomputes the view exactly
/// once; a rejected event changes nothing.
pub struct ExplorerSession {
    catalog: Arc<Catalog>,
    state: SelectionState,
    view: FilteredView,
    recompute_count: u64,
}

impl ExplorerSession {
    pub fn new(catalog: Arc<Catalog>, state: SelectionState) -> Result<Self, ColumnError> {
        let view = compute_view(&catalog, &state)?;
        Ok(ExplorerSession {
            catalog,
            state,
            view,
            recompute_count: 1,
        })
    }

    pub fn apply(&mut self, event: SelectionEvent) -> Result<&FilteredView, ColumnError> {
        let next_state = match self.state.apply(&event) {
            Ok(state) => state,
            Err(err) => {
                warn!("Rejected {:?}: {}", event, err);
                return Err(err);
            }
        };
        let next_view = compute_view(&self.catalog, &next_state)?;

        self.state = next_state;
        self.view = next_view;
        self.recompute_count += 1;
        debug!(
            "Applied {:?}, view has {} of {} albums",
            event,
            self.view.len(),
            self.catalog.get_albums_count()
        );
        Ok(&self.view)
    }

    /// Selects every decade bucket between `from` and `to`, both included.
    /// The bounds are rounded down to their decade.
    ///
    /// Bounds are clamped to one decade past either end of the catalog, so
    /// a range that misses the data still selects one empty bucket.
    pub fn select_decade_range(&mut self, from: i32, to: i32) -> Result<&FilteredView, ColumnError> {
        let (first, last) = self.catalog.year_span().unwrap_or((0, 0));
        let floor = first.div_euclid(10).saturating_sub(1).saturating_mul(10);
        let ceiling = last.div_euclid(10).saturating_add(1).saturating_mul(10);

        let low = from.min(to).clamp(floor, ceiling).div_euclid(10);
        let high = from.max(to).clamp(floor, ceiling).div_euclid(10);
        let decades: Vec<String> = (low..=high).map(|d| decade_label(d * 10)).collect();
        self.apply(SelectionEvent::decades(decades))
    }

    /// Selects the artists inside a rectangle of the artist map.
    pub fn select_artists_in_box(&mut self, bounds: MapBounds) -> Result<&FilteredView, ColumnError> {
        let artist_ids = artists_in_box(&self.catalog, &bounds);
        self.apply(SelectionEvent::ArtistsSelected { artist_ids })
    }

    pub fn artist_points(&self) -> Vec<ArtistPoint> {
        artist_points(&self.catalog, &self.state)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn view(&self) -> &FilteredView {
        &self.view
    }

    /// Number of times the view was computed, including the initial one.
    pub fn recompute_count(&self) -> u64 {
        self.recompute_count
    }
}
