use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use warpline_dtw::{Aligner, Argument, Sequence};

#[derive(Parser)]
#[command(name = "warpline")]
#[command(about = "Dynamic Time Warping alignment of two numeric sequences")]
#[command(version)]
struct Cli {
    /// First sequence as comma-separated numbers, e.g. "1,3,4,9"
    #[arg(long, allow_hyphen_values = true, requires = "second", conflicts_with = "input")]
    first: Option<String>,

    /// Second sequence as comma-separated numbers
    #[arg(long, allow_hyphen_values = true, requires = "first", conflicts_with = "input")]
    second: Option<String>,

    /// JSON file holding {"first": [...], "second": [...]}
    #[arg(long)]
    input: Option<PathBuf>,

    /// Pairwise cost: "absolute" (|a-b|), "squared" ((a-b)^2) or "euclidean" (sqrt((a-b)^2))
    #[arg(long, default_value = "absolute")]
    metric: String,

    /// Output format: "text" (distance, path, matrix) or "json" (summary)
    #[arg(long, default_value = "text")]
    format: String,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Metric {
    Absolute,
    Squared,
    Euclidean,
}

impl Metric {
    fn cost(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Absolute => (a - b).abs(),
            Self::Squared => (a - b).powi(2),
            Self::Euclidean => (a - b).powi(2).sqrt(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

// --- JSON stdout output struct ---

#[derive(Serialize)]
struct AlignOutput {
    distance: f64,
    path: Vec<(usize, usize)>,
    long_len: usize,
    short_len: usize,
    swapped: bool,
}

fn parse_metric(s: &str) -> Result<Metric> {
    match s {
        "absolute" => Ok(Metric::Absolute),
        "squared" => Ok(Metric::Squared),
        "euclidean" => Ok(Metric::Euclidean),
        other => anyhow::bail!(
            "unknown metric: {other} (expected absolute, squared, or euclidean)"
        ),
    }
}

fn parse_format(s: &str) -> Result<OutputFormat> {
    match s {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }
}

/// Parse a comma-separated list of numbers. Blank input yields an empty list,
/// which the aligner rejects with a named-argument error.
fn parse_series(raw: &str) -> Result<Vec<f64>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    raw.split(',')
        .enumerate()
        .map(|(index, token)| {
            token
                .trim()
                .parse::<f64>()
                .with_context(|| format!("value {index} (\"{}\") is not a number", token.trim()))
        })
        .collect()
}

fn read_pair(path: &Path) -> Result<(Vec<f64>, Vec<f64>)> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let mut doc: Value = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse JSON in {}", path.display()))?;

    let mut field = |name: &str| doc.get_mut(name).map(Value::take).unwrap_or(Value::Null);

    let first = Sequence::<f64>::from_json(field("first"), Argument::First)?;
    let second = Sequence::<f64>::from_json(field("second"), Argument::Second)?;
    info!(first = first.len(), second = second.len(), "sequences loaded");
    Ok((first.into_inner(), second.into_inner()))
}

fn load_series(cli: &Cli) -> Result<(Vec<f64>, Vec<f64>)> {
    match (&cli.input, &cli.first, &cli.second) {
        (Some(path), _, _) => read_pair(path),
        (None, Some(first), Some(second)) => Ok((
            parse_series(first).context("invalid --first sequence")?,
            parse_series(second).context("invalid --second sequence")?,
        )),
        _ => anyhow::bail!("provide either --input or both --first and --second"),
    }
}

/// Write the classic text report: distance, path, then the rendered matrix.
fn write_text<W: Write>(aligner: &Aligner<f64>, out: &mut W) -> Result<()> {
    let distance = aligner.distance().context("no alignment to report")?;
    let path = aligner.path()?;
    writeln!(out, "dtw distance: {distance}")?;
    writeln!(out, "path: {:?}", path.to_pairs())?;
    writeln!(out, "matrix:")?;
    aligner.render(out).context("writing matrix to output")?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let metric = parse_metric(&cli.metric)?;
    let format = parse_format(&cli.format)?;
    let (first, second) = load_series(&cli)?;

    let mut aligner: Aligner<f64> =
        Aligner::with_distance(move |a: &f64, b: &f64| metric.cost(*a, *b));
    let distance = aligner
        .compute(first, second)
        .context("alignment failed")?;
    let path = aligner.path()?;
    info!(distance = distance.value(), path_len = path.len(), "alignment complete");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => write_text(&aligner, &mut out)?,
        OutputFormat::Json => {
            let matrix = aligner.matrix().context("cost matrix missing after compute")?;
            let output = AlignOutput {
                distance: distance.value(),
                path: path.to_pairs(),
                long_len: matrix.rows(),
                short_len: matrix.cols(),
                swapped: aligner.is_swapped().unwrap_or(false),
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
        }
    }

    Ok(())
}
