use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use library_explorer::cli_style::{get_styles, print_catalog_summary, SortArg};
use library_explorer::config::{AppConfig, CliConfig, FileConfig};
use library_explorer::{init_tracing, load_catalog, ExplorerSession, SelectionEvent};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

/// Loads a music library and prints the album view for one selection.
#[derive(Parser, Debug)]
#[command(styles = get_styles(), version = env!("EXPLORER_VERSION"))]
struct CliArgs {
    /// Directory holding the albums and artists tables.
    #[clap(value_parser = parse_path)]
    pub data_dir: Option<PathBuf>,

    /// Path to a TOML config file. Its values override the arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Albums file name inside the data directory.
    #[clap(long)]
    pub albums_file: Option<String>,

    /// Artists file name inside the data directory.
    #[clap(long)]
    pub artists_file: Option<String>,

    /// Lower quantile used to clip loudness.
    #[clap(long)]
    pub lower_quantile: Option<f64>,

    /// Upper quantile used to clip loudness.
    #[clap(long)]
    pub upper_quantile: Option<f64>,

    /// Column on the x axis.
    #[clap(long)]
    pub x: Option<String>,

    /// Column on the y axis.
    #[clap(long)]
    pub y: Option<String>,

    /// Column mapped to the marker color.
    #[clap(long)]
    pub color: Option<String>,

    /// Only show albums by this artist id. Repeatable.
    #[clap(long = "artist")]
    pub artists: Vec<String>,

    /// Only show albums from this decade, e.g. 1990. Repeatable.
    #[clap(long = "decade", conflicts_with = "decade_range")]
    pub decades: Vec<String>,

    /// Only show albums released between two years, both included.
    #[clap(long, num_args = 2, value_names = ["FROM", "TO"], allow_negative_numbers = true)]
    pub decade_range: Option<Vec<i32>>,

    /// Only show albums whose artist belongs to this genre. Repeatable.
    #[clap(long = "genre")]
    pub genres: Vec<String>,

    /// Sort the rows. Without it rows keep the table order.
    #[clap(long, value_enum)]
    pub sort_by: Option<SortArg>,

    /// Sort in descending order.
    #[clap(long, requires = "sort_by")]
    pub descending: bool,

    /// Write the view to this file instead of stdout.
    #[clap(short, long, value_parser = parse_path)]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[clap(long)]
    pub pretty: bool,

    /// Load and validate the library, print a summary and exit.
    #[clap(long)]
    pub check_only: bool,
}

impl CliArgs {
    fn cli_config(&self) -> CliConfig {
        CliConfig {
            data_dir: self.data_dir.clone(),
            albums_file: self.albums_file.clone(),
            artists_file: self.artists_file.clone(),
            lower_quantile: self.lower_quantile,
            upper_quantile: self.upper_quantile,
            x_column: self.x.clone(),
            y_column: self.y.clone(),
            color_column: self.color.clone(),
        }
    }
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();
    init_tracing();

    let file_config = cli_args
        .config
        .as_deref()
        .map(FileConfig::load)
        .transpose()?;
    let config = AppConfig::resolve(&cli_args.cli_config(), file_config)?;

    let catalog = load_catalog(&config.albums_path(), &config.artists_path(), &config.clip)
        .with_context(|| format!("Failed to load library from {:?}", config.data_dir))?;

    if cli_args.check_only {
        print_catalog_summary(&catalog);
        return Ok(());
    }

    let mut session = ExplorerSession::new(Arc::new(catalog), config.initial_state())?;

    if !cli_args.artists.is_empty() {
        session.apply(SelectionEvent::artists(cli_args.artists.iter().cloned()))?;
    }
    if let Some([from, to]) = cli_args.decade_range.as_deref() {
        session.select_decade_range(*from, *to)?;
    } else if !cli_args.decades.is_empty() {
        session.apply(SelectionEvent::decades(cli_args.decades.iter().cloned()))?;
    }
    if !cli_args.genres.is_empty() {
        session.apply(SelectionEvent::genres(cli_args.genres.iter().cloned()))?;
    }

    let mut view = session.view().clone();
    if let Some(key) = cli_args.sort_by {
        view = view.sorted_by(key.into(), cli_args.descending);
    }
    info!(
        "View has {} of {} albums",
        view.len(),
        session.catalog().get_albums_count()
    );

    let json = if cli_args.pretty {
        serde_json::to_string_pretty(&view)?
    } else {
        serde_json::to_string(&view)?
    };

    match &cli_args.output {
        Some(path) => {
            std::fs::write(path, json + "\n")
                .with_context(|| format!("Failed to write view to {:?}", path))?;
            info!("View written to {:?}", path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", json).context("Failed to write view to stdout")?;
        }
    }
    Ok(())
}
