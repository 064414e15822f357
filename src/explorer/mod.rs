mod artist_map;
mod selection;
mod session;
mod view;

pub use artist_map::{artist_points, artists_in_box, ArtistPoint, MapBounds, MARKER_SIZE_DIVISOR};
pub use selection::{
    Axes, SelectionEvent, SelectionState, DEFAULT_COLOR_COLUMN, DEFAULT_X_COLUMN,
    DEFAULT_Y_COLUMN,
};
pub use session::ExplorerSession;
pub use view::{compute_view, FilteredView, SortKey, ViewRow};
