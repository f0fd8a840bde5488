//! Offline cleaning pass over the raw tax table
//!
//! Reads the tab-separated Census tax table, drops every row that has a
//! missing or zero-valued state entry, and writes the survivors to the
//! CSV consumed by the map service.

use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use std::path::Path;
use tracing::info;

/// Token marking a missing value in the raw table
pub const DEFAULT_SENTINEL: &str = "X";

/// Columns appended by the cleaning pass. The reshape step excludes these
/// by name so they are never mistaken for states.
pub const COUNT_COLUMNS: [&str; 2] = ["number_of_NaNs", "number_of_zeroes"];

#[derive(Debug)]
pub struct CleanSummary {
    pub rows_in: usize,
    pub rows_kept: usize,
}

/// Filter the raw tax table at `input` and write surviving rows to `output`.
///
/// A row survives iff none of its state cells equals `sentinel` and none
/// parses to numeric zero. Surviving rows keep their input order and all
/// original columns, followed by the two count columns. A cell that is
/// neither the sentinel nor a number aborts the run.
pub fn clean_file(input: &Path, output: &Path, sentinel: &str) -> Result<CleanSummary> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_path(input)
        .with_context(|| format!("opening raw tax table {}", input.display()))?;

    let headers = reader.headers()?.clone();

    let mut writer = WriterBuilder::new()
        .from_path(output)
        .with_context(|| format!("creating cleaned tax table {}", output.display()))?;

    let mut out_headers = headers.clone();
    for col in COUNT_COLUMNS {
        out_headers.push_field(col);
    }
    writer.write_record(&out_headers)?;

    let mut rows_in = 0;
    let mut rows_kept = 0;

    for record in reader.records() {
        let record = record?;
        rows_in += 1;

        let item = record.get(0).unwrap_or_default().to_string();
        let mut missing = 0;
        let mut zeroes = 0;

        for (idx, cell) in record.iter().enumerate().skip(1) {
            if cell == sentinel {
                missing += 1;
                continue;
            }
            let value: f64 = cell.trim().parse().with_context(|| {
                format!(
                    "row {}: column {} has non-numeric value {:?}",
                    item,
                    headers.get(idx).unwrap_or("?"),
                    cell
                )
            })?;
            if value == 0.0 {
                zeroes += 1;
            }
        }

        if missing == 0 && zeroes == 0 {
            let mut out = record.clone();
            out.push_field("0");
            out.push_field("0");
            writer.write_record(&out)?;
            rows_kept += 1;
        }
    }

    writer.flush()?;
    info!("Kept {}/{} rows", rows_kept, rows_in);

    Ok(CleanSummary { rows_in, rows_kept })
}
