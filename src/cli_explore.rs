use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use library_explorer::catalog::AlbumColumn;
use library_explorer::cli_style::{
    self, get_prompt, get_styles, print_error, print_success, print_warning, CommandHelp,
    SortArg,
};
use library_explorer::config::{AppConfig, CliConfig, FileConfig};
use library_explorer::explorer::MapBounds;
use library_explorer::{init_tracing, load_catalog, ExplorerSession, SelectionEvent};

use rustyline::{
    completion::Completer, highlight::Highlighter, history::FileHistory, validate::Validator,
    CompletionType, Config, Editor, Helper,
};

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

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
}

#[derive(Parser)]
#[command(styles = get_styles(), name = "", disable_help_subcommand = true)]
struct InnerCli {
    #[command(subcommand)]
    command: InnerCommand,
}

#[derive(Subcommand)]
enum InnerCommand {
    /// Shows the artist map, selected artists are marked.
    Artists,

    /// Selects artists by id. No id selects everyone.
    SelectArtists { artist_ids: Vec<String> },

    /// Selects the artists inside a rectangle of the artist map.
    SelectBox {
        #[arg(allow_negative_numbers = true)]
        x0: f64,
        #[arg(allow_negative_numbers = true)]
        y0: f64,
        #[arg(allow_negative_numbers = true)]
        x1: f64,
        #[arg(allow_negative_numbers = true)]
        y1: f64,
    },

    /// Clears the artist selection.
    ClearArtists,

    /// Lists the decades in the library.
    Decades,

    /// Selects decades by label, e.g. 1990. No label selects all of them.
    SelectDecades { decades: Vec<String> },

    /// Selects every decade between two years, both included.
    DecadeRange {
        #[arg(allow_negative_numbers = true)]
        from: i32,
        #[arg(allow_negative_numbers = true)]
        to: i32,
    },

    /// Lists the genres with their artist count.
    Genres,

    /// Selects genres. No genre selects all of them.
    SelectGenres { genres: Vec<String> },

    /// Changes the column on the x axis.
    X { column: String },

    /// Changes the column on the y axis.
    Y { column: String },

    /// Changes the column mapped to the marker color.
    Color { column: String },

    /// Lists the columns that can go on an axis.
    Columns,

    /// Clears every filter, keeping the axes.
    Clear,

    /// Prints the current selection state as JSON.
    State,

    /// Shows the albums in the current view.
    Show {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Shows the current view sorted by a key.
    Sort {
        #[arg(value_enum)]
        key: SortArg,
        #[arg(long)]
        descending: bool,
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Shows a summary of the loaded library.
    Summary,

    /// Shows this help.
    Help,

    /// Close this program.
    Exit,
}

enum CommandExecutionResult {
    Ok,
    Exit,
    Error(String),
}

fn commands_help() -> Vec<CommandHelp> {
    InnerCli::command()
        .get_subcommands()
        .map(|sc| {
            let args: Vec<String> = sc
                .get_arguments()
                .filter(|a| a.get_id() != "help")
                .map(|a| match a.get_long() {
                    Some(long) => format!("[--{}]", long),
                    None => format!("<{}>", a.get_id()),
                })
                .collect();
            CommandHelp {
                name: sc.get_name().to_string(),
                args: args.join(" "),
                description: sc.get_about().map(|s| s.to_string()).unwrap_or_default(),
            }
        })
        .collect()
}

fn report_view(session: &ExplorerSession) {
    if session.view().is_empty() {
        print_warning("No album matches the current selection");
        return;
    }
    print_success(&format!(
        "View has {} of {} albums",
        session.view().len(),
        session.catalog().get_albums_count()
    ));
}

fn execute_command(line: String, session: &mut ExplorerSession) -> CommandExecutionResult {
    if line.trim().is_empty() {
        return CommandExecutionResult::Ok;
    }

    let args =
        shlex::split(&line).unwrap_or_else(|| line.split_whitespace().map(String::from).collect());

    let cli = InnerCli::try_parse_from(std::iter::once(" ").chain(args.iter().map(String::as_str)));

    let command = match cli {
        Ok(cli) => cli.command,
        Err(e) => {
            if e.print().is_err() {
                println!("{}", e);
            }
            return CommandExecutionResult::Ok;
        }
    };
    cli_style::print_command_echo(&line);

    let applied = match command {
        InnerCommand::Artists => {
            cli_style::print_artist_points(&session.artist_points());
            return CommandExecutionResult::Ok;
        }
        InnerCommand::SelectArtists { artist_ids } => {
            session.apply(SelectionEvent::artists(artist_ids)).map(|_| ())
        }
        InnerCommand::SelectBox { x0, y0, x1, y1 } => session
            .select_artists_in_box(MapBounds::new(x0, y0, x1, y1))
            .map(|_| ()),
        InnerCommand::ClearArtists => session
            .apply(SelectionEvent::artists(Vec::<String>::new()))
            .map(|_| ()),
        InnerCommand::Decades => {
            let selected = &session.state().selected_decades;
            for decade in session.catalog().decades() {
                cli_style::print_list_item_selected(&decade, selected.contains(&decade));
            }
            return CommandExecutionResult::Ok;
        }
        InnerCommand::SelectDecades { decades } => {
            session.apply(SelectionEvent::decades(decades)).map(|_| ())
        }
        InnerCommand::DecadeRange { from, to } => {
            session.select_decade_range(from, to).map(|_| ())
        }
        InnerCommand::Genres => {
            let selected = &session.state().selected_genres;
            for (genre, count) in session.catalog().genres_by_count() {
                cli_style::print_list_item_selected(
                    &format!("{} ({})", genre, count),
                    selected.contains(&genre),
                );
            }
            return CommandExecutionResult::Ok;
        }
        InnerCommand::SelectGenres { genres } => {
            session.apply(SelectionEvent::genres(genres)).map(|_| ())
        }
        InnerCommand::X { column } => session
            .apply(SelectionEvent::XColumnChanged { column })
            .map(|_| ()),
        InnerCommand::Y { column } => session
            .apply(SelectionEvent::YColumnChanged { column })
            .map(|_| ()),
        InnerCommand::Color { column } => session
            .apply(SelectionEvent::ColorColumnChanged { column })
            .map(|_| ()),
        InnerCommand::Columns => {
            let view = session.view();
            for column in AlbumColumn::ALL {
                let mut label = column.name().to_string();
                for (axis, current) in [
                    ("x", view.x_column),
                    ("y", view.y_column),
                    ("color", view.color_column),
                ] {
                    if current == column {
                        label.push_str(&format!(" [{}]", axis));
                    }
                }
                cli_style::print_list_item(&label, 1);
            }
            return CommandExecutionResult::Ok;
        }
        InnerCommand::Clear => session.apply(SelectionEvent::SelectionCleared).map(|_| ()),
        InnerCommand::State => {
            match serde_json::to_string_pretty(session.state()) {
                Ok(json) => println!("{}", json),
                Err(err) => return CommandExecutionResult::Error(format!("{}", err)),
            }
            return CommandExecutionResult::Ok;
        }
        InnerCommand::Show { limit } => {
            cli_style::print_view(session.view(), limit);
            return CommandExecutionResult::Ok;
        }
        InnerCommand::Sort {
            key,
            descending,
            limit,
        } => {
            let sorted = session.view().clone().sorted_by(key.into(), descending);
            cli_style::print_view(&sorted, limit);
            return CommandExecutionResult::Ok;
        }
        InnerCommand::Summary => {
            cli_style::print_catalog_summary(session.catalog());
            return CommandExecutionResult::Ok;
        }
        InnerCommand::Help => {
            cli_style::print_help(&commands_help());
            return CommandExecutionResult::Ok;
        }
        InnerCommand::Exit => return CommandExecutionResult::Exit,
    };

    match applied {
        Ok(()) => {
            report_view(session);
            CommandExecutionResult::Ok
        }
        Err(err) => CommandExecutionResult::Error(format!("{}", err)),
    }
}

#[derive(rustyline_derive::Hinter)]
struct MyHelper {
    commands_names: Vec<String>,
    column_names: Vec<String>,
}

impl MyHelper {
    pub fn new() -> Self {
        let commands_names: Vec<String> = InnerCli::command()
            .get_subcommands()
            .map(|sc| sc.get_name().to_string())
            .collect();
        let column_names = AlbumColumn::names().into_iter().map(String::from).collect();

        MyHelper {
            commands_names,
            column_names,
        }
    }
}

impl Completer for MyHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        let line = &line[..pos];
        match line.split_once(' ') {
            None => {
                let matches = self
                    .commands_names
                    .iter()
                    .filter(|c| c.starts_with(line))
                    .cloned()
                    .collect::<Vec<_>>();
                Ok((0, matches))
            }
            // Axis commands take a column name.
            Some((command, rest)) if matches!(command, "x" | "y" | "color") => {
                if rest.contains(' ') {
                    return Ok((pos, Vec::with_capacity(0)));
                }
                let matches = self
                    .column_names
                    .iter()
                    .filter(|c| c.starts_with(rest))
                    .cloned()
                    .collect::<Vec<_>>();
                Ok((command.len() + 1, matches))
            }
            Some(_) => Ok((pos, Vec::with_capacity(0))),
        }
    }
}

impl Highlighter for MyHelper {}
impl Validator for MyHelper {}
impl Helper for MyHelper {}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();
    init_tracing();

    let file_config = cli_args
        .config
        .as_deref()
        .map(FileConfig::load)
        .transpose()?;
    let cli_config = CliConfig {
        data_dir: cli_args.data_dir,
        albums_file: cli_args.albums_file,
        artists_file: cli_args.artists_file,
        ..Default::default()
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    let catalog = load_catalog(&config.albums_path(), &config.artists_path(), &config.clip)
        .with_context(|| format!("Failed to load library from {:?}", config.data_dir))?;
    let mut session = ExplorerSession::new(Arc::new(catalog), config.initial_state())?;

    cli_style::print_welcome(
        &config.data_dir.display().to_string(),
        session.catalog().get_albums_count(),
        session.catalog().get_artists_count(),
    );

    let rl_config = Config::builder()
        .completion_type(CompletionType::List)
        .build();

    let mut rl = Editor::<MyHelper, FileHistory>::with_config(rl_config)?;
    rl.set_helper(Some(MyHelper::new()));

    let prompt = get_prompt();
    loop {
        let readline = rl.readline(&prompt);

        match readline {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                match execute_command(line, &mut session) {
                    CommandExecutionResult::Ok => {}
                    CommandExecutionResult::Exit => {
                        break;
                    }
                    CommandExecutionResult::Error(err) => {
                        print_error(&err);
                        continue;
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("CTRL-D: exiting.");
                break;
            }
            Err(e) => {
                print_error(&format!("{:?}", e));
                break;
            }
        }
        cli_style::flush();
    }
    cli_style::print_goodbye();
    Ok(())
}
