//! Choropleth figure construction
//!
//! One renderer per map panel, parameterized by the panel's selectable
//! item codes and its default selection. A render is a pure function of
//! the merged table and the selected item.

use anyhow::{bail, Result};
use serde_json::json;

use crate::catalog;
use crate::models::RenderedMap;
use crate::table::MergedTable;

/// Aggregate pseudo-state excluded from color-scale computation
const US_AGGREGATE: &str = "US";

/// Headroom above the largest per-state value on the color scale
const SCALE_HEADROOM: f64 = 1.2;

/// CARTO Darkmint stops for the continuous color scale
const DARKMINT: [&str; 7] = [
    "rgb(210,230,221)",
    "rgb(167,205,193)",
    "rgb(127,179,168)",
    "rgb(91,153,147)",
    "rgb(58,127,127)",
    "rgb(35,100,108)",
    "rgb(18,74,88)",
];

#[derive(Debug, Clone)]
pub struct MapRenderer {
    pub panel_id: u8,
    pub items: Vec<&'static str>,
    pub default_item: &'static str,
}

impl MapRenderer {
    pub fn new(panel_id: u8, items: Vec<&'static str>, default_item: &'static str) -> Self {
        Self {
            panel_id,
            items,
            default_item,
        }
    }

    /// Whether `item` is selectable on this panel
    pub fn contains(&self, item: &str) -> bool {
        self.items.iter().any(|i| *i == item)
    }

    /// Render this panel for `selected`, falling back to the default item
    /// when no selection has been made yet.
    ///
    /// The color scale runs from 0 to 1.2x the largest per-state
    /// per-capita value; the `US` aggregate row is left out of that
    /// maximum so it cannot compress the per-state range. An item with no
    /// per-state values is an error.
    pub fn render(&self, table: &MergedTable, selected: Option<&str>) -> Result<RenderedMap> {
        let item = selected.unwrap_or(self.default_item);
        let rows = table.item_rows(item);

        let max_per_capita = rows
            .iter()
            .filter(|r| r.state != US_AGGREGATE)
            .filter_map(|r| r.value_per_capita)
            .fold(f64::NAN, f64::max);
        if !max_per_capita.is_finite() {
            bail!("no per-state per-capita values for item {}", item);
        }
        let scale_max = max_per_capita * SCALE_HEADROOM;

        let locations: Vec<&str> = rows.iter().map(|r| r.state.as_str()).collect();
        let values: Vec<Option<f64>> = rows.iter().map(|r| r.value_per_capita).collect();

        let title = catalog::item_title(item);
        let figure = json!({
            "data": [{
                "type": "choropleth",
                "locations": locations,
                "z": values,
                "locationmode": "USA-states",
                "colorscale": colorscale(),
                "zmin": 0.0,
                "zmax": scale_max,
                "colorbar": { "title": format!("<b>{}</b>", item) },
                "hovertemplate": "%{location}: %{z:.2f} USD per capita<extra></extra>",
            }],
            "layout": {
                "geo": { "scope": "usa" },
                "margin": { "r": 0, "t": 0, "l": 0, "b": 0 },
            },
        });

        Ok(RenderedMap {
            item: item.to_string(),
            title,
            figure,
        })
    }
}

fn colorscale() -> serde_json::Value {
    let last = (DARKMINT.len() - 1) as f64;
    let stops: Vec<serde_json::Value> = DARKMINT
        .iter()
        .enumerate()
        .map(|(i, color)| json!([i as f64 / last, color]))
        .collect();
    json!(stops)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Observation;
    use std::collections::HashMap;

    fn sample_table() -> MergedTable {
        let observations = vec![
            obs("T10", "CA", 100.0),
            obs("T10", "NY", 300.0),
            obs("T10", "US", 400.0),
            obs("T19", "CA", 50.0),
            obs("T19", "NY", 20.0),
            obs("T19", "US", 70.0),
        ];
        // CA per capita: T10 10.0, T19 5.0; NY: T10 15.0, T19 1.0
        let populations = HashMap::from([("CA".to_string(), 10.0), ("NY".to_string(), 20.0)]);
        MergedTable::merge(observations, &populations)
    }

    fn obs(item: &str, state: &str, value: f64) -> Observation {
        Observation {
            item: item.to_string(),
            state: state.to_string(),
            value,
        }
    }

    fn panel1() -> MapRenderer {
        MapRenderer::new(1, vec!["T10", "T12", "T13", "T16"], "T10")
    }

    fn panel2() -> MapRenderer {
        MapRenderer::new(2, vec!["T19", "T23", "T24", "T28"], "T19")
    }

    #[test]
    fn default_selection_per_panel() {
        let table = sample_table();

        let map1 = panel1().render(&table, None).unwrap();
        assert_eq!(map1.item, "T10");
        assert_eq!(map1.title, "Alcoholic Beverages Sales Tax (T10)");

        let map2 = panel2().render(&table, None).unwrap();
        assert_eq!(map2.item, "T19");
        assert_eq!(
            map2.title,
            "Other Selective Sales and Gross Receipts Taxes (T19)"
        );
    }

    #[test]
    fn scale_max_excludes_us_aggregate() {
        let table = sample_table();
        let map = panel1().render(&table, Some("T10")).unwrap();

        // Largest per-state value is NY at 15.0; the US row (no
        // population match) must not contribute.
        let zmax = map.figure["data"][0]["zmax"].as_f64().unwrap();
        assert!((zmax - 18.0).abs() < 1e-9);

        let z = map.figure["data"][0]["z"].as_array().unwrap();
        for (value, location) in z.iter().zip(
            map.figure["data"][0]["locations"]
                .as_array()
                .unwrap()
                .iter(),
        ) {
            if location == "US" {
                continue;
            }
            assert!(value.as_f64().unwrap() <= zmax);
        }
    }

    #[test]
    fn unmatched_state_renders_as_null() {
        let table = sample_table();
        let map = panel1().render(&table, Some("T10")).unwrap();

        let locations = map.figure["data"][0]["locations"].as_array().unwrap();
        let z = map.figure["data"][0]["z"].as_array().unwrap();
        let us_idx = locations.iter().position(|l| l == "US").unwrap();
        assert!(z[us_idx].is_null());
    }

    #[test]
    fn unknown_item_code_falls_back() {
        let observations = vec![obs("T99", "CA", 10.0)];
        let populations = HashMap::from([("CA".to_string(), 5.0)]);
        let table = MergedTable::merge(observations, &populations);

        let renderer = MapRenderer::new(1, vec!["T99"], "T99");
        let map = renderer.render(&table, None).unwrap();
        assert_eq!(map.title, "Unknown Tax Item");
    }

    #[test]
    fn item_with_only_aggregate_data_is_fatal() {
        let observations = vec![obs("T10", "US", 400.0)];
        let populations = HashMap::new();
        let table = MergedTable::merge(observations, &populations);

        assert!(panel1().render(&table, Some("T10")).is_err());
    }

    #[test]
    fn contains_checks_panel_item_set() {
        let panel = panel1();
        assert!(panel.contains("T12"));
        assert!(!panel.contains("T19"));
    }
}
