mod album;
mod artist;
#[allow(clippy::module_inception)]
mod catalog;
mod column;
mod error;
mod load;
pub mod normalize;
mod table;

pub use album::{Album, AudioFeatures, CellValue};
pub use artist::Artist;
pub use catalog::{Catalog, CatalogBuildResult};
pub use column::{AlbumColumn, ColumnError};
pub use error::{DataError, LoadError, LoadProblem};
pub use load::{load_catalog, ALBUMS_TABLE, ARTISTS_TABLE};
pub use normalize::{ClipBounds, ClipSettings};
pub use table::{RawTable, Row};
