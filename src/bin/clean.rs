//! One-shot cleaning pass over the raw Census tax table

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tax_atlas::cleaner;
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Filter rows with missing or zero state entries from the raw tax table")]
struct Args {
    /// Raw tab-separated tax table
    #[arg(long, default_value = "data/taxData2021.txt")]
    input: PathBuf,

    /// Destination for the cleaned comma-separated table
    #[arg(long, default_value = "data/filteredTaxData2021.csv")]
    output: PathBuf,

    /// Token marking a missing value in the raw table
    #[arg(long, default_value = cleaner::DEFAULT_SENTINEL)]
    sentinel: String,

    /// Verbose logging
    #[arg(long, default_value_t = false)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(if args.debug { "debug" } else { "info" })
        .init();

    info!("Reading raw tax table from {:?}", args.input);
    let summary = cleaner::clean_file(&args.input, &args.output, &args.sentinel)?;
    info!(
        "Cleaning complete: kept {}/{} rows -> {:?}",
        summary.rows_kept, summary.rows_in, args.output
    );

    Ok(())
}
