use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use floortally::{App, FloorOrder, Selector, SourceFormat, process_and_render};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FloorOrderArg {
    /// Plain string order, so "10" sorts before "2"
    Lexicographic,
    /// Integers by value, anything unparsable after them
    Numeric,
}

impl From<FloorOrderArg> for FloorOrder {
    fn from(arg: FloorOrderArg) -> Self {
        match arg {
            FloorOrderArg::Lexicographic => FloorOrder::Lexicographic,
            FloorOrderArg::Numeric => FloorOrder::Numeric,
        }
    }
}

/// Finds duplicate address records and counts buildings per city and floor count.
#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    /// File to process once without prompting (.csv or .xml)
    #[arg(value_parser)]
    path: Option<PathBuf>,

    /// How floor counts are ordered within a city
    #[arg(long, value_enum, default_value_t = FloorOrderArg::Lexicographic)]
    floor_order: FloorOrderArg,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let floor_order = FloorOrder::from(cli.floor_order);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match cli.path {
        Some(path) => {
            if SourceFormat::from_path(&path).is_none() {
                bail!("unsupported file type: {}, use XML or CSV files", path.display());
            }
            let mut out = io::stdout().lock();
            process_and_render(&path, floor_order, &mut out)
                .with_context(|| format!("failed to process {}", path.display()))?;
        }
        None => {
            let selector = Selector::new(io::stdin().lock(), io::stdout().lock());
            App::new(selector, floor_order).run()?;
        }
    }

    Ok(())
}
