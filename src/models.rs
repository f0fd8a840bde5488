use serde::Serialize;

/// One (item, state) pair from the melted tax table
#[derive(Debug, Clone, Serialize)]
pub struct Observation {
    pub item: String,
    pub state: String,
    pub value: f64,
}

/// Observation joined against state population
///
/// States absent from the population table (the `US` aggregate,
/// territories) keep a null population and a null per-capita value.
#[derive(Debug, Clone, Serialize)]
pub struct MergedRow {
    pub item: String,
    pub state: String,
    pub value: f64,
    pub population: Option<f64>,
    pub value_per_capita: Option<f64>,
}

/// Payload returned by a panel render
#[derive(Debug, Clone, Serialize)]
pub struct RenderedMap {
    pub item: String,
    pub title: String,
    pub figure: serde_json::Value,
}
