//! Slicing Binary
//!
//! Reads the flat enriched CSV and emits one CSV per region × sector
//! partition under `out/<region-slug>/<sector-slug>.csv`.

use anyhow::Result;
use bandi_radar::{export, slices};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "slice", about = "Slice the flat dataset into region × sector CSV files")]
struct Cli {
    /// Flat enriched CSV to slice.
    #[arg(long, default_value = "bandi.csv")]
    src: PathBuf,

    /// Output directory for the slices.
    #[arg(long, default_value = "slices")]
    out: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let records = export::load_csv(&cli.src)?;
    let n = slices::slice_dataset(&records, &cli.out)?;
    println!("Slices written: {} (directory {:?})", n, cli.out);

    Ok(())
}
