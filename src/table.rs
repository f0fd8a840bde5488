//! Load-and-merge stage for the map service
//!
//! Melts the cleaned tax table and the census population table from wide
//! to long form, joins them on state, and derives the per-capita metric.
//! The merged table is built once at startup and never mutated.

use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

use crate::cleaner::COUNT_COLUMNS;
use crate::models::{MergedRow, Observation};

/// Item label of the population row in the census file
pub const POPULATION_ITEM: &str = "population";

/// Immutable merged view served for the lifetime of the process
#[derive(Debug)]
pub struct MergedTable {
    rows: Vec<MergedRow>,
}

impl MergedTable {
    /// Load both input files and build the merged table.
    pub fn load(tax_path: &Path, population_path: &Path) -> Result<Self> {
        let observations = load_observations(tax_path)?;
        let populations = load_populations(population_path)?;
        info!(
            "Loaded {} observations, {} state populations",
            observations.len(),
            populations.len()
        );
        Ok(Self::merge(observations, &populations))
    }

    /// Left-join observations with populations on state and derive
    /// `value_per_capita`. Unmatched states keep null population and a
    /// null per-capita value.
    pub fn merge(observations: Vec<Observation>, populations: &HashMap<String, f64>) -> Self {
        let rows = observations
            .into_iter()
            .map(|obs| {
                let population = populations.get(&obs.state).copied();
                let value_per_capita = population.map(|p| obs.value / p);
                MergedRow {
                    item: obs.item,
                    state: obs.state,
                    value: obs.value,
                    population,
                    value_per_capita,
                }
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[MergedRow] {
        &self.rows
    }

    /// Rows belonging to one tax item
    pub fn item_rows(&self, item: &str) -> Vec<&MergedRow> {
        self.rows.iter().filter(|r| r.item == item).collect()
    }
}

/// Melt the cleaned tax table: one observation per (item, state) pair.
/// The count columns appended by the cleaning pass are excluded by name.
pub fn load_observations(path: &Path) -> Result<Vec<Observation>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening cleaned tax table {}", path.display()))?;

    let headers = reader.headers()?.clone();
    let mut observations = Vec::new();

    for record in reader.records() {
        let record = record?;
        let item = record
            .get(0)
            .context("cleaned tax table row is missing the item column")?
            .to_string();

        for (idx, cell) in record.iter().enumerate().skip(1) {
            let state = headers
                .get(idx)
                .with_context(|| format!("row {}: cell without a header column", item))?;
            if COUNT_COLUMNS.contains(&state) {
                continue;
            }
            let value: f64 = cell.trim().parse().with_context(|| {
                format!("item {}: state {} has non-numeric value {:?}", item, state, cell)
            })?;
            observations.push(Observation {
                item: item.clone(),
                state: state.to_string(),
                value,
            });
        }
    }

    if observations.is_empty() {
        bail!("cleaned tax table {} holds no observations", path.display());
    }
    Ok(observations)
}

/// Population per state from the wide census file, keeping only the
/// single row labeled with the population item.
pub fn load_populations(path: &Path) -> Result<HashMap<String, f64>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening population table {}", path.display()))?;

    let headers = reader.headers()?.clone();
    let mut populations = HashMap::new();

    for record in reader.records() {
        let record = record?;
        if record.get(0) != Some(POPULATION_ITEM) {
            continue;
        }
        for (idx, cell) in record.iter().enumerate().skip(1) {
            let state = headers
                .get(idx)
                .context("population row: cell without a header column")?;
            let count: f64 = cell.trim().parse().with_context(|| {
                format!("state {} has non-numeric population {:?}", state, cell)
            })?;
            populations.insert(state.to_string(), count);
        }
    }

    if populations.is_empty() {
        bail!(
            "population table {} has no {:?} row",
            path.display(),
            POPULATION_ITEM
        );
    }
    Ok(populations)
}
