mod file_config;

pub use file_config::{AxesConfig, ClipConfig, FileConfig};

use crate::catalog::ClipSettings;
use crate::explorer::{
    Axes, SelectionState, DEFAULT_COLOR_COLUMN, DEFAULT_X_COLUMN, DEFAULT_Y_COLUMN,
};
use anyhow::{bail, Context, Result};
use std::path::PathBuf;

pub const DEFAULT_ALBUMS_FILE: &str = "albums_features.json";
pub const DEFAULT_ARTISTS_FILE: &str = "artists_features.json";

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub data_dir: Option<PathBuf>,
    pub albums_file: Option<String>,
    pub artists_file: Option<String>,
    pub lower_quantile: Option<f64>,
    pub upper_quantile: Option<f64>,
    pub x_column: Option<String>,
    pub y_column: Option<String>,
    pub color_column: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub albums_file: String,
    pub artists_file: String,
    pub clip: ClipSettings,
    pub axes: Axes,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let data_dir = file
            .data_dir
            .map(PathBuf::from)
            .or_else(|| cli.data_dir.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("data_dir must be specified as an argument or in config file")
            })?;

        if !data_dir.exists() {
            bail!("Data directory does not exist: {:?}", data_dir);
        }
        if !data_dir.is_dir() {
            bail!("data_dir is not a directory: {:?}", data_dir);
        }

        let albums_file = file
            .albums_file
            .or_else(|| cli.albums_file.clone())
            .unwrap_or_else(|| DEFAULT_ALBUMS_FILE.to_owned());
        let artists_file = file
            .artists_file
            .or_else(|| cli.artists_file.clone())
            .unwrap_or_else(|| DEFAULT_ARTISTS_FILE.to_owned());

        let clip_file = file.clip.unwrap_or_default();
        let defaults = ClipSettings::default();
        let clip = ClipSettings {
            lower_quantile: clip_file
                .lower_quantile
                .or(cli.lower_quantile)
                .unwrap_or(defaults.lower_quantile),
            upper_quantile: clip_file
                .upper_quantile
                .or(cli.upper_quantile)
                .unwrap_or(defaults.upper_quantile),
        };
        if !(0.0..=1.0).contains(&clip.lower_quantile)
            || !(0.0..=1.0).contains(&clip.upper_quantile)
        {
            bail!(
                "Clip quantiles must be within [0, 1], got {} and {}",
                clip.lower_quantile,
                clip.upper_quantile
            );
        }
        if clip.lower_quantile > clip.upper_quantile {
            bail!(
                "lower_quantile ({}) must not exceed upper_quantile ({})",
                clip.lower_quantile,
                clip.upper_quantile
            );
        }

        let axes_file = file.axes.unwrap_or_default();
        let x = axes_file
            .x
            .or_else(|| cli.x_column.clone())
            .unwrap_or_else(|| DEFAULT_X_COLUMN.name().to_owned());
        let y = axes_file
            .y
            .or_else(|| cli.y_column.clone())
            .unwrap_or_else(|| DEFAULT_Y_COLUMN.name().to_owned());
        let color = axes_file
            .color
            .or_else(|| cli.color_column.clone())
            .unwrap_or_else(|| DEFAULT_COLOR_COLUMN.name().to_owned());
        let axes = SelectionState::with_axes(&x, &y, &color)
            .and_then(|state| state.axes())
            .context("Invalid axes configuration")?;

        Ok(Self {
            data_dir,
            albums_file,
            artists_file,
            clip,
            axes,
        })
    }

    pub fn albums_path(&self) -> PathBuf {
        self.data_dir.join(&self.albums_file)
    }

    pub fn artists_path(&self) -> PathBuf {
        self.data_dir.join(&self.artists_file)
    }

    /// Selection state a new session starts from.
    pub fn initial_state(&self) -> SelectionState {
        SelectionState {
            x_column: self.axes.x.name().to_owned(),
            y_column: self.axes.y.name().to_owned(),
            color_column: self.axes.color.name().to_owned(),
            ..Default::default()
        }
    }
}
