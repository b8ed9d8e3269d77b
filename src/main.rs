// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use todd_coxeter::options::CompactionMode;
use todd_coxeter::presentation::PresentationDescription;
use todd_coxeter::{enumerate, EnumerationOptions, Presentation};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Enumerate the cosets of a subgroup of a finitely presented group.
#[derive(Parser, Debug)]
#[command(name = "tcenum", version, about)]
struct Cli {
    /// JSON file with `generators`, `relators`, `subgroup` and
    /// `normal_subgroup`.
    presentation: PathBuf,

    /// Strategy name and/or phase descriptors, e.g. `hard` or `sims:1/a`.
    #[arg(short, long)]
    strategy: Option<String>,

    /// Most cosets the table may hold at once.
    #[arg(short, long)]
    max_cosets: Option<usize>,

    /// JSON file of enumeration options, applied before the other flags.
    #[arg(long)]
    options: Option<PathBuf>,

    /// discard, special_column, rebuild_by_row or rebuild_by_column.
    #[arg(long)]
    compaction_mode: Option<CompactionMode>,

    /// Print the coset table as JSON.
    #[arg(long)]
    table: bool,

    /// Print Schreier generators of the subgroup.
    #[arg(long)]
    schreier: bool,

    /// Print enumeration statistics.
    #[arg(long)]
    statistics: bool,

    /// Increase logging (-v info, -vv debug, -vvv trace). RUST_LOG wins.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();

    let text = std::fs::read_to_string(&cli.presentation)
        .with_context(|| format!("reading {}", cli.presentation.display()))?;
    let description: PresentationDescription = serde_json::from_str(&text)
        .with_context(|| format!("parsing {}", cli.presentation.display()))?;
    let presentation = Presentation::from_description(&description)?;

    let mut options = match &cli.options {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => EnumerationOptions::default(),
    };
    if let Some(strategy) = &cli.strategy {
        options.apply_strategy_str(strategy)?;
    }
    if let Some(max_cosets) = cli.max_cosets {
        options.max_cosets = Some(max_cosets);
    }
    if let Some(mode) = cli.compaction_mode {
        options.compaction = mode;
    }
    info!(?options, "options");

    let enumeration = enumerate(&presentation, options)?;
    let table = &enumeration.table;
    println!("index: {}", table.index());
    if cli.statistics {
        println!("statistics: {}", enumeration.statistics);
    }
    if cli.schreier {
        let alphabet = presentation.alphabet();
        for word in table.schreier_generators() {
            println!("{}", alphabet.format(&word));
        }
    }
    if cli.table {
        println!("{}", serde_json::to_string_pretty(table)?);
    }
    Ok(())
}
