//! source-window CLI - print the excerpt of a file around a byte offset

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use quarto_source_window::{
    ColumnScope, Pivot, ReadLines, RenderOptions, Renderer, ViewMode, first_line_number,
    read_lines,
};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "source-window")]
#[command(version)]
#[command(about = "Print the lines of a file around a byte offset", long_about = None)]
struct Cli {
    /// File to read
    file: PathBuf,

    /// Byte offset of the pivot
    #[arg(long, conflicts_with = "range", required_unless_present = "range")]
    offset: Option<usize>,

    /// Inclusive byte range to mark, given in any order
    #[arg(long, num_args = 2, value_names = ["A", "B"])]
    range: Option<Vec<usize>>,

    /// Line view mode (e.g. around:3, left:5, full)
    #[arg(long)]
    lines: Option<ViewMode>,

    /// Column view mode (e.g. full, around:40)
    #[arg(long)]
    columns: Option<ViewMode>,

    /// Compute the column window separately for every line
    #[arg(long)]
    per_line: bool,

    /// Number of the line holding the pivot (counted from the file otherwise)
    #[arg(long)]
    line_number: Option<usize>,

    /// TOML file with render options
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dump the collected lines as JSON instead of rendering them
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn pivot(&self) -> Result<Pivot> {
        match (self.offset, self.range.as_deref()) {
            (Some(offset), _) => Ok(Pivot::Index(offset)),
            (None, Some(&[a, b])) => Ok(Pivot::range(a, b)),
            _ => bail!("either --offset or --range is required"),
        }
    }

    /// Defaults, then the config file, then command-line flags.
    fn options(&self) -> Result<RenderOptions> {
        let mut options = match &self.config {
            Some(path) => {
                let source = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                RenderOptions::from_toml_str(&source)
                    .with_context(|| format!("Invalid config {}", path.display()))?
            }
            None => RenderOptions::default(),
        };
        if let Some(lines) = self.lines {
            options.lines = lines;
        }
        if let Some(columns) = self.columns {
            options.columns = columns;
        }
        if self.per_line {
            options.scope = ColumnScope::PerLine;
        }
        options.validate()?;
        Ok(options)
    }
}

#[derive(Serialize)]
struct JsonLine {
    number: usize,
    start: usize,
    end: usize,
    text: String,
}

#[derive(Serialize)]
struct JsonWindow {
    lines: Vec<JsonLine>,
    curr_line_pos: Option<usize>,
    index_pos: usize,
}

impl JsonWindow {
    fn new<const N: usize>(
        read: &ReadLines<'_, '_, N>,
        pivot: Pivot,
        line_number: Option<usize>,
    ) -> Self {
        let first_number = first_line_number(read, pivot, line_number);
        let lines = read
            .lines()
            .enumerate()
            .map(|(i, line)| JsonLine {
                number: first_number + i,
                start: line.range.start,
                end: line.range.end,
                text: String::from_utf8_lossy(line.text).into_owned(),
            })
            .collect();
        JsonWindow {
            lines,
            curr_line_pos: read.curr_line_pos,
            index_pos: read.index_pos,
        }
    }
}

fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    let pivot = cli.pivot()?;
    let options = cli.options()?;
    let input = std::fs::read(&cli.file)
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;
    info!(file = %cli.file.display(), bytes = input.len(), ?pivot, "loaded input");

    if cli.json {
        let read = read_lines(
            &input,
            pivot,
            options.lines,
            options.odd_side,
            options.max_lines,
        )
        .context("Failed to collect lines")?;
        let window = read.map(|read| JsonWindow::new(&read, pivot, cli.line_number));
        serde_json::to_writer_pretty(&mut *out, &window)?;
        writeln!(out)?;
        return Ok(());
    }

    Renderer::new(&options)
        .render(out, &input, pivot, cli.line_number)
        .context("Failed to render source window")?;
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quarto_source_window=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&cli, &mut out)
}
