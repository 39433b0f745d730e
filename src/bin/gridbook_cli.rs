//! CLI tool for gridbook - normalizes a table source and prints it as JSON
//!
//! Usage:
//!   gridbook_cli table.html                   # Output JSON to stdout
//!   gridbook_cli data.json --sort 2 --sort 2  # Sort column 2 descending
//!   gridbook_cli table.html --move 1:3        # Move column 1 after column 3
//!   gridbook_cli table.html --html -o out.html

use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use tracing::{debug, info};

use gridbook::{Grid, GridOptions, TableSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    /// Pick from the file extension (`.json` is structured, anything else markup)
    Auto,
    Html,
    Json,
}

/// Parse an HTML table or structured JSON and print the normalized table
#[derive(Parser, Debug)]
#[command(name = "gridbook_cli", version, about, long_about = None)]
struct Cli {
    /// Table source file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// How to read the input
    #[arg(long, value_enum, default_value = "auto")]
    format: InputFormat,

    /// Sort by a 1-based column; repeat to toggle direction
    #[arg(long, value_name = "COLUMN")]
    sort: Vec<usize>,

    /// Move column FROM to just after column AFTER (0 moves it to the front)
    #[arg(long = "move", value_name = "FROM:AFTER", value_parser = parse_move)]
    moves: Vec<(usize, usize)>,

    /// Print the rendered grid markup instead of JSON
    #[arg(long)]
    html: bool,

    /// Write output to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

fn parse_move(value: &str) -> Result<(usize, usize), String> {
    let (from, after) = value
        .split_once(':')
        .ok_or_else(|| format!("expected FROM:AFTER, got \"{value}\""))?;
    let from = from.trim().parse().map_err(|e| format!("bad column \"{from}\": {e}"))?;
    let after = after.trim().parse().map_err(|e| format!("bad column \"{after}\": {e}"))?;
    Ok((from, after))
}

fn read_source(path: &Path, format: InputFormat) -> Result<TableSource, Box<dyn Error>> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Error reading {}: {e}", path.display()))?;
    let json = match format {
        InputFormat::Json => true,
        InputFormat::Html => false,
        InputFormat::Auto => path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json")),
    };
    debug!(path = %path.display(), json, "reading source");
    if json {
        Ok(TableSource::structured_from_json(&text)?)
    } else {
        Ok(TableSource::Markup(text))
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let source = read_source(&cli.input, cli.format)?;
    let mut grid = Grid::from_source(&source, &GridOptions::default())?;
    info!(
        rows = grid.row_count(),
        columns = grid.column_count(),
        "table parsed"
    );

    for &(from, after) in &cli.moves {
        grid.move_column(from, after)?;
    }
    for &column in &cli.sort {
        let direction = grid.sort(column)?;
        debug!(column, %direction, "sorted");
    }

    let rendered = if cli.html {
        grid.view().to_html()
    } else {
        serde_json::to_string_pretty(grid.table())?
    };

    match cli.output {
        Some(path) => {
            fs::write(&path, &rendered)
                .map_err(|e| format!("Error writing {}: {e}", path.display()))?;
            eprintln!("Written: {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn move_argument_parses() {
        assert_eq!(parse_move("1:3").unwrap(), (1, 3));
        assert_eq!(parse_move(" 2 : 0 ").unwrap(), (2, 0));
        assert!(parse_move("2").is_err());
        assert!(parse_move("a:1").is_err());
    }

    #[test]
    fn cli_accepts_repeated_flags() {
        let cli = Cli::parse_from(["gridbook_cli", "t.html", "--sort", "2", "--sort", "2", "--move", "1:3"]);
        assert_eq!(cli.sort, vec![2, 2]);
        assert_eq!(cli.moves, vec![(1, 3)]);
        assert_eq!(cli.format, InputFormat::Auto);
    }
}
