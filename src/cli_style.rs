use crate::catalog::Catalog;
use crate::explorer::{ArtistPoint, FilteredView, SortKey};
use clap::builder::styling::{AnsiColor, Color, Style};
use clap::builder::Styles;
use crossterm::style::{Attribute, Color as CtColor, Stylize};
use std::io::{self, Write};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

// ═══════════════════════════════════════════════════════════════════════════════
// Clap Styles
// ═══════════════════════════════════════════════════════════════════════════════

pub fn get_styles() -> Styles {
    clap::builder::Styles::styled()
        .usage(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Cyan))),
        )
        .header(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Cyan))),
        )
        .literal(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .invalid(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
        .error(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
        .valid(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightBlack))))
}

/// Sort key as typed on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum SortArg {
    X,
    Y,
    Color,
    Year,
    Name,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::X => SortKey::X,
            SortArg::Y => SortKey::Y,
            SortArg::Color => SortKey::Color,
            SortArg::Year => SortKey::Year,
            SortArg::Name => SortKey::Name,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Color Palette
// ═══════════════════════════════════════════════════════════════════════════════

pub mod colors {
    use crossterm::style::Color;

    pub const CYAN: Color = Color::Rgb {
        r: 0,
        g: 255,
        b: 255,
    };
    pub const MAGENTA: Color = Color::Rgb {
        r: 255,
        g: 0,
        b: 255,
    };
    pub const PURPLE: Color = Color::Rgb {
        r: 180,
        g: 100,
        b: 255,
    };
    pub const PINK: Color = Color::Rgb {
        r: 255,
        g: 105,
        b: 180,
    };
    pub const GREEN: Color = Color::Rgb {
        r: 0,
        g: 255,
        b: 136,
    };
    pub const ORANGE: Color = Color::Rgb {
        r: 255,
        g: 165,
        b: 0,
    };
    pub const RED: Color = Color::Rgb {
        r: 255,
        g: 85,
        b: 85,
    };
    pub const BLUE: Color = Color::Rgb {
        r: 100,
        g: 149,
        b: 237,
    };
    pub const DIM: Color = Color::Rgb {
        r: 128,
        g: 128,
        b: 128,
    };
    pub const WHITE: Color = Color::Rgb {
        r: 255,
        g: 255,
        b: 255,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Box Drawing Characters
// ═══════════════════════════════════════════════════════════════════════════════

pub mod box_chars {
    pub const DOUBLE_TOP_LEFT: &str = "╔";
    pub const DOUBLE_TOP_RIGHT: &str = "╗";
    pub const DOUBLE_BOTTOM_LEFT: &str = "╚";
    pub const DOUBLE_BOTTOM_RIGHT: &str = "╝";
    pub const DOUBLE_HORIZONTAL: &str = "═";
    pub const DOUBLE_VERTICAL: &str = "║";

    pub const SINGLE_HORIZONTAL: &str = "─";
    pub const SINGLE_VERTICAL: &str = "│";

    pub const ROUND_TOP_LEFT: &str = "╭";
    pub const ROUND_TOP_RIGHT: &str = "╮";
    pub const ROUND_BOTTOM_LEFT: &str = "╰";
    pub const ROUND_BOTTOM_RIGHT: &str = "╯";

    pub const T_LEFT: &str = "├";
    pub const T_RIGHT: &str = "┤";
    pub const T_TOP: &str = "┬";
    pub const T_BOTTOM: &str = "┴";
    pub const CROSS: &str = "┼";

    pub const ARROW_RIGHT: &str = "▶";
    pub const BULLET: &str = "●";
    pub const BULLET_EMPTY: &str = "○";
    pub const DIAMOND: &str = "◆";
    pub const STAR: &str = "★";
    pub const CHECK: &str = "✓";
    pub const CROSS_MARK: &str = "✗";
    pub const ELLIPSIS: &str = "…";
}

// ═══════════════════════════════════════════════════════════════════════════════
// Banner
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_banner() {
    let banner = r#"
    ███████╗██╗  ██╗██████╗ ██╗      ██████╗ ██████╗ ███████╗██████╗
    ██╔════╝╚██╗██╔╝██╔══██╗██║     ██╔═══██╗██╔══██╗██╔════╝██╔══██╗
    █████╗   ╚███╔╝ ██████╔╝██║     ██║   ██║██████╔╝█████╗  ██████╔╝
    ██╔══╝   ██╔██╗ ██╔═══╝ ██║     ██║   ██║██╔══██╗██╔══╝  ██╔══██╗
    ███████╗██╔╝ ██╗██║     ███████╗╚██████╔╝██║  ██║███████╗██║  ██║
    ╚══════╝╚═╝  ╚═╝╚═╝     ╚══════╝ ╚═════╝ ╚═╝  ╚═╝╚══════╝╚═╝  ╚═╝
"#;

    let lines: Vec<&str> = banner.lines().collect();
    let gradient_colors = [
        colors::CYAN,
        colors::CYAN,
        colors::PURPLE,
        colors::PURPLE,
        colors::MAGENTA,
        colors::MAGENTA,
        colors::PINK,
        colors::PINK,
    ];

    for (i, line) in lines.iter().enumerate() {
        let color = gradient_colors.get(i).unwrap_or(&colors::CYAN);
        println!("{}", line.with(*color).bold());
    }

    let subtitle = "  ══════════════════════  LIBRARY EXPLORER  ══════════════════════";
    println!("{}", subtitle.with(colors::DIM));
    println!();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Status Indicators
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_success(message: &str) {
    println!(
        " {} {}",
        box_chars::CHECK.to_string().with(colors::GREEN).bold(),
        message.with(colors::GREEN)
    );
}

pub fn print_error(message: &str) {
    println!(
        " {} {}",
        box_chars::CROSS_MARK.to_string().with(colors::RED).bold(),
        message.with(colors::RED)
    );
}

pub fn print_warning(message: &str) {
    println!(
        " {} {}",
        "⚠".with(colors::ORANGE).bold(),
        message.with(colors::ORANGE)
    );
}

pub fn print_info(message: &str) {
    println!(
        " {} {}",
        "ℹ".with(colors::BLUE).bold(),
        message.with(colors::BLUE)
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Section Headers
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_section_header(title: &str) {
    let width: usize = 60;
    let title_len = title.width();
    let padding = width.saturating_sub(title_len + 4) / 2;

    println!();
    print!("{}", box_chars::ROUND_TOP_LEFT.with(colors::CYAN));
    print!(
        "{}",
        box_chars::SINGLE_HORIZONTAL
            .repeat(padding)
            .with(colors::CYAN)
    );
    print!(
        " {} ",
        title.with(colors::CYAN).bold().attribute(Attribute::Italic)
    );
    print!(
        "{}",
        box_chars::SINGLE_HORIZONTAL
            .repeat(width.saturating_sub(title_len + 4 + padding))
            .with(colors::CYAN)
    );
    println!("{}", box_chars::ROUND_TOP_RIGHT.with(colors::CYAN));
}

pub fn print_section_footer() {
    let width = 60;
    print!("{}", box_chars::ROUND_BOTTOM_LEFT.with(colors::CYAN));
    print!(
        "{}",
        box_chars::SINGLE_HORIZONTAL
            .repeat(width)
            .with(colors::CYAN)
    );
    println!("{}", box_chars::ROUND_BOTTOM_RIGHT.with(colors::CYAN));
    println!();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Key-Value Display
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_key_value(key: &str, value: &str) {
    println!(
        "  {} {} {}",
        box_chars::BULLET.with(colors::PURPLE),
        format!("{}:", key).with(colors::DIM),
        value.with(colors::WHITE)
    );
}

pub fn print_key_value_highlight(key: &str, value: &str) {
    println!(
        "  {} {} {}",
        box_chars::DIAMOND.with(colors::MAGENTA),
        format!("{}:", key).with(colors::CYAN).bold(),
        value.with(colors::GREEN).bold()
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// List Display
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_list_item(item: &str, indent: usize) {
    let indent_str = "  ".repeat(indent);
    println!(
        "{}{}  {}",
        indent_str,
        box_chars::ARROW_RIGHT.with(colors::CYAN),
        item.with(colors::WHITE)
    );
}

/// Selected items get a star in place of the arrow.
pub fn print_list_item_selected(item: &str, selected: bool) {
    if selected {
        println!(
            "  {}  {}",
            box_chars::STAR.with(colors::MAGENTA).bold(),
            item.with(colors::GREEN).bold()
        );
    } else {
        print_list_item(item, 1);
    }
}

pub fn print_empty_list(message: &str) {
    println!(
        "  {} {}",
        box_chars::BULLET_EMPTY.with(colors::DIM),
        message.with(colors::DIM).attribute(Attribute::Italic)
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Table Display
// ═══════════════════════════════════════════════════════════════════════════════

/// Cuts `text` to at most `max_width` terminal columns, marking the cut.
pub fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_owned();
    }
    let budget = max_width.saturating_sub(1);
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str(box_chars::ELLIPSIS);
    out
}

pub struct TableBuilder {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    col_widths: Vec<usize>,
}

impl TableBuilder {
    pub fn new(headers: Vec<&str>) -> Self {
        let col_widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
        TableBuilder {
            headers: headers.into_iter().map(String::from).collect(),
            rows: Vec::new(),
            col_widths,
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        for (i, cell) in row.iter().enumerate() {
            if i < self.col_widths.len() {
                self.col_widths[i] = self.col_widths[i].max(cell.width());
            }
        }
        self.rows.push(row);
    }

    fn print_border(&self, left: &str, junction: &str, right: &str) {
        print!("{}", left.with(colors::CYAN));
        for (i, width) in self.col_widths.iter().enumerate() {
            print!(
                "{}",
                box_chars::SINGLE_HORIZONTAL
                    .repeat(width + 2)
                    .with(colors::CYAN)
            );
            if i < self.col_widths.len() - 1 {
                print!("{}", junction.with(colors::CYAN));
            }
        }
        println!("{}", right.with(colors::CYAN));
    }

    pub fn print(&self) {
        if self.col_widths.is_empty() {
            return;
        }

        self.print_border(
            box_chars::ROUND_TOP_LEFT,
            box_chars::T_TOP,
            box_chars::ROUND_TOP_RIGHT,
        );

        print!("{}", box_chars::SINGLE_VERTICAL.with(colors::CYAN));
        for (i, header) in self.headers.iter().enumerate() {
            let padding = self.col_widths[i] - header.width();
            print!(
                " {}{} ",
                header.clone().with(colors::CYAN).bold(),
                " ".repeat(padding)
            );
            print!("{}", box_chars::SINGLE_VERTICAL.with(colors::CYAN));
        }
        println!();

        self.print_border(box_chars::T_LEFT, box_chars::CROSS, box_chars::T_RIGHT);

        for row in &self.rows {
            print!("{}", box_chars::SINGLE_VERTICAL.with(colors::CYAN));
            for (i, cell) in row.iter().enumerate() {
                let width = self.col_widths.get(i).unwrap_or(&0);
                let padding = width.saturating_sub(cell.width());
                print!(
                    " {}{} ",
                    cell.clone().with(colors::WHITE),
                    " ".repeat(padding)
                );
                print!("{}", box_chars::SINGLE_VERTICAL.with(colors::CYAN));
            }
            println!();
        }

        self.print_border(
            box_chars::ROUND_BOTTOM_LEFT,
            box_chars::T_BOTTOM,
            box_chars::ROUND_BOTTOM_RIGHT,
        );
    }
}

const NAME_COLUMN_WIDTH: usize = 32;

/// Prints up to `limit` rows of a view as a table, plus a count line.
pub fn print_view(view: &FilteredView, limit: usize) {
    if view.is_empty() {
        print_empty_list("No album matches the current selection");
        return;
    }

    let mut table = TableBuilder::new(vec![
        "album",
        "artist",
        "year",
        view.x_column.name(),
        view.y_column.name(),
        view.color_column.name(),
    ]);
    for row in view.rows.iter().take(limit) {
        table.add_row(vec![
            truncate(&row.name, NAME_COLUMN_WIDTH),
            truncate(&row.artist_name, NAME_COLUMN_WIDTH),
            row.year.to_string(),
            row.x.to_string(),
            row.y.to_string(),
            row.color.to_string(),
        ]);
    }
    table.print();

    if view.len() > limit {
        print_info(&format!("Showing {} of {} albums", limit, view.len()));
    } else {
        print_info(&format!("{} albums", view.len()));
    }
}

pub fn print_catalog_summary(catalog: &Catalog) {
    print_section_header("Library");
    print_key_value_highlight("Albums", &catalog.get_albums_count().to_string());
    print_key_value_highlight("Artists", &catalog.get_artists_count().to_string());
    print_key_value("Decades", &catalog.decades().join(", "));
    let genres: Vec<String> = catalog
        .genres_by_count()
        .into_iter()
        .map(|(genre, count)| format!("{} ({})", genre, count))
        .collect();
    print_key_value("Genres", &genres.join(", "));
    let bounds = catalog.clip_bounds();
    print_key_value(
        "Loudness clip",
        &format!("[{:.3}, {:.3}]", bounds.lower, bounds.upper),
    );
    print_section_footer();
}

pub fn print_artist_points(points: &[ArtistPoint]) {
    if points.is_empty() {
        print_empty_list("No artists loaded");
        return;
    }

    let mut table = TableBuilder::new(vec!["", "id", "artist", "genre", "x", "y", "size"]);
    for point in points {
        let marker = if point.highlighted {
            box_chars::BULLET
        } else {
            box_chars::BULLET_EMPTY
        };
        table.add_row(vec![
            marker.to_owned(),
            point.artist_id.clone(),
            truncate(&point.name, NAME_COLUMN_WIDTH),
            point.genre_cluster.clone(),
            format!("{:.2}", point.x),
            format!("{:.2}", point.y),
            format!("{:.1}", point.size),
        ]);
    }
    table.print();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Prompt Styling
// ═══════════════════════════════════════════════════════════════════════════════

pub fn get_prompt() -> String {
    format!(
        "{}{}{} ",
        "❯".with(colors::CYAN).bold(),
        "❯".with(colors::PURPLE).bold(),
        "❯".with(colors::MAGENTA).bold(),
    )
}

pub fn print_command_echo(command: &str) {
    println!(
        "{}{}{}  {}",
        "❯".with(colors::CYAN).bold(),
        "❯".with(colors::PURPLE).bold(),
        "❯".with(colors::MAGENTA).bold(),
        command.with(colors::GREEN).bold()
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Welcome Message
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_welcome(data_dir: &str, albums_count: usize, artists_count: usize) {
    print_banner();

    let box_width = 64;

    print!("  {}", box_chars::DOUBLE_TOP_LEFT.with(colors::PURPLE));
    print!(
        "{}",
        box_chars::DOUBLE_HORIZONTAL
            .repeat(box_width)
            .with(colors::PURPLE)
    );
    println!("{}", box_chars::DOUBLE_TOP_RIGHT.with(colors::PURPLE));

    let albums = albums_count.to_string();
    let artists = artists_count.to_string();
    let lines = [
        ("Data", data_dir),
        ("Albums", albums.as_str()),
        ("Artists", artists.as_str()),
        ("Version", env!("EXPLORER_VERSION")),
    ];

    print!("  {}", box_chars::DOUBLE_VERTICAL.with(colors::PURPLE));
    let loaded_msg = "Library loaded";
    print!("  {}  ", loaded_msg.with(colors::GREEN));
    print!("{}", " ".repeat(box_width - 4 - loaded_msg.width()));
    println!("{}", box_chars::DOUBLE_VERTICAL.with(colors::PURPLE));

    for (key, value) in lines {
        print!("  {}", box_chars::DOUBLE_VERTICAL.with(colors::PURPLE));
        let value = truncate(value, box_width - key.width() - 6);
        let content = format!("  {} {}", format!("{}:", key).with(colors::DIM), value);
        let visible_len = key.width() + 2 + value.width() + 2;
        print!("{}", content);
        print!("{}", " ".repeat(box_width.saturating_sub(visible_len)));
        println!("{}", box_chars::DOUBLE_VERTICAL.with(colors::PURPLE));
    }

    print!("  {}", box_chars::DOUBLE_VERTICAL.with(colors::PURPLE));
    let help_msg = "  Type 'help' for available commands";
    print!("{}", help_msg.with(colors::DIM));
    print!("{}", " ".repeat(box_width - help_msg.len()));
    println!("{}", box_chars::DOUBLE_VERTICAL.with(colors::PURPLE));

    print!("  {}", box_chars::DOUBLE_BOTTOM_LEFT.with(colors::PURPLE));
    print!(
        "{}",
        box_chars::DOUBLE_HORIZONTAL
            .repeat(box_width)
            .with(colors::PURPLE)
    );
    println!("{}", box_chars::DOUBLE_BOTTOM_RIGHT.with(colors::PURPLE));
    println!();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Help Display
// ═══════════════════════════════════════════════════════════════════════════════

pub struct CommandHelp {
    pub name: String,
    pub args: String,
    pub description: String,
}

pub fn print_help(commands: &[CommandHelp]) {
    println!();
    print_section_header("Available Commands");
    println!();

    fn group<'a>(commands: &'a [CommandHelp], names: &[&str]) -> Vec<&'a CommandHelp> {
        commands
            .iter()
            .filter(|c| names.contains(&c.name.as_str()))
            .collect()
    }

    let artist_commands = group(
        commands,
        &["artists", "select-artists", "select-box", "clear-artists"],
    );
    let filter_commands = group(
        commands,
        &[
            "decades",
            "select-decades",
            "decade-range",
            "genres",
            "select-genres",
            "clear",
        ],
    );
    let axis_commands = group(commands, &["x", "y", "color", "columns"]);
    let view_commands = group(
        commands,
        &["show", "sort", "state", "summary", "exit", "help"],
    );

    fn print_command_group(title: &str, commands: &[&CommandHelp], color: CtColor) {
        println!(
            "  {} {}",
            box_chars::DIAMOND.with(color),
            title.with(color).bold()
        );
        for cmd in commands {
            println!(
                "      {} {}  {}",
                cmd.name.as_str().with(colors::GREEN).bold(),
                cmd.args.as_str().with(colors::DIM),
                cmd.description.as_str().with(colors::WHITE)
            );
        }
        println!();
    }

    print_command_group("Artist Map", &artist_commands, colors::CYAN);
    print_command_group("Filters", &filter_commands, colors::MAGENTA);
    print_command_group("Axes", &axis_commands, colors::PURPLE);
    print_command_group("View", &view_commands, colors::ORANGE);

    print_section_footer();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Goodbye Message
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_goodbye() {
    println!();
    println!(
        "  {} {}",
        "👋".with(colors::CYAN),
        "Goodbye! Thanks for exploring".with(colors::PURPLE).bold()
    );
    println!();
}

pub fn flush() {
    let _ = io::stdout().flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;

    #[test]
    fn test_sort_arg_parses_lowercase_names() {
        assert_eq!(SortArg::from_str("color", false), Ok(SortArg::Color));
        assert_eq!(SortKey::from(SortArg::Year), SortKey::Year);
        assert!(SortArg::from_str("loudness", false).is_err());
    }

    #[test]
    fn test_truncate_keeps_short_text() {
        assert_eq!(truncate("Abbey Road", 20), "Abbey Road");
        assert_eq!(truncate("exactly", 7), "exactly");
    }

    #[test]
    fn test_truncate_cuts_by_display_width() {
        assert_eq!(truncate("The Dark Side of the Moon", 10), "The Dark …");
        // Wide glyphs take two columns each.
        let cut = truncate("東京事変の教育", 6);
        assert_eq!(cut, "東京…");
        assert!(cut.width() <= 6);
    }

    #[test]
    fn test_table_widths_follow_widest_cell() {
        let mut table = TableBuilder::new(vec!["a", "bb"]);
        table.add_row(vec!["long cell".to_owned(), "x".to_owned()]);
        assert_eq!(table.col_widths, vec![9, 2]);
    }
}
