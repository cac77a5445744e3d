//! Pipeline Binary
//!
//! Reads a raw open-data CSV export, enriches the records and writes the
//! distributable outputs: flat CSV, JSON, deadline calendar and the
//! region × sector slices.

use anyhow::{bail, Context, Result};
use bandi_radar::{enrich, export, ics, ingest, slices};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

/// Below this many records the upstream open-data export is assumed to be
/// broken or truncated, and the run aborts before overwriting outputs.
const MIN_EXPECTED_RECORDS: usize = 2000;

#[derive(Parser, Debug)]
#[command(name = "bandi_radar", about = "Build the BandiRadar dataset from a raw open-data export")]
struct Cli {
    /// Raw open-data CSV export to ingest.
    #[arg(long, default_value = "opendata-export.csv")]
    src: PathBuf,

    /// Flat CSV output.
    #[arg(long, default_value = "bandi.csv")]
    csv: PathBuf,

    /// JSON output.
    #[arg(long, default_value = "bandi.json")]
    json: PathBuf,

    /// Deadline calendar output.
    #[arg(long, default_value = "bandi.ics")]
    ics: PathBuf,

    /// Directory for the per-partition CSV slices.
    #[arg(long, default_value = "slices")]
    slices: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let text = fs::read_to_string(&cli.src)
        .with_context(|| format!("Failed to read open-data export from {:?}", cli.src))?;
    let mut records = ingest::parse_open_data(&text)?;
    println!("Records extracted: {}", records.len());

    if records.len() < MIN_EXPECTED_RECORDS {
        bail!(
            "{} records extracted, open-data source may be down",
            records.len()
        );
    }

    enrich::enrich(&mut records);

    export::save_csv(&records, &cli.csv)?;
    println!("CSV saved: {:?} ({} records)", cli.csv, records.len());

    export::save_json(&records, &cli.json)?;
    println!("JSON saved: {:?}", cli.json);

    let events = ics::save_ics(&records, &cli.ics)?;
    println!("Calendar saved: {:?} ({} events)", cli.ics, events);

    let n = slices::slice_dataset(&records, &cli.slices)?;
    println!("Slices written: {} (directory {:?})", n, cli.slices);

    Ok(())
}
