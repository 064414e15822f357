//! Library Explorer
//!
//! Loads a music library (albums and artists with audio features), derives
//! the display columns, and computes the cross-filtered album views that a
//! chart front end draws. The binaries are thin event adapters on top.

pub mod catalog;
pub mod cli_style;
pub mod config;
pub mod explorer;

#[cfg(test)]
pub(crate) mod fixtures;

pub use catalog::{load_catalog, AlbumColumn, Catalog, ColumnError, DataError, LoadError};
pub use explorer::{compute_view, ExplorerSession, FilteredView, SelectionEvent, SelectionState};

/// Installs the fmt subscriber used by the binaries, filtered by `LOG_LEVEL`.
pub fn init_tracing() {
    use tracing::level_filters::LevelFilter;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init();
}
