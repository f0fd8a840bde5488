//! Shared state for the map service
//!
//! Holds the merged table and both panel renderers. Built once in main
//! and shared read-only behind an Arc; renders never mutate it.

use crate::render::MapRenderer;
use crate::table::MergedTable;

pub struct MapService {
    table: MergedTable,
    panels: Vec<MapRenderer>,
}

impl MapService {
    pub fn new(table: MergedTable) -> Self {
        Self {
            table,
            panels: vec![
                MapRenderer::new(1, vec!["T10", "T12", "T13", "T16"], "T10"),
                MapRenderer::new(2, vec!["T19", "T23", "T24", "T28"], "T19"),
            ],
        }
    }

    pub fn table(&self) -> &MergedTable {
        &self.table
    }

    pub fn panels(&self) -> &[MapRenderer] {
        &self.panels
    }

    pub fn panel(&self, id: u8) -> Option<&MapRenderer> {
        self.panels.iter().find(|p| p.panel_id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Observation;
    use std::collections::HashMap;

    fn service() -> MapService {
        let mut observations = Vec::new();
        for (item, ca, ny) in [("T10", 100.0, 300.0), ("T19", 50.0, 20.0), ("T23", 8.0, 4.0)] {
            observations.push(Observation {
                item: item.to_string(),
                state: "CA".to_string(),
                value: ca,
            });
            observations.push(Observation {
                item: item.to_string(),
                state: "NY".to_string(),
                value: ny,
            });
        }
        let populations = HashMap::from([("CA".to_string(), 10.0), ("NY".to_string(), 20.0)]);
        MapService::new(MergedTable::merge(observations, &populations))
    }

    #[test]
    fn panel_lookup() {
        let service = service();
        assert_eq!(service.panel(1).unwrap().default_item, "T10");
        assert_eq!(service.panel(2).unwrap().default_item, "T19");
        assert!(service.panel(3).is_none());
    }

    #[test]
    fn panels_render_independently() {
        let service = service();
        let panel1 = service.panel(1).unwrap();
        let panel2 = service.panel(2).unwrap();

        let before = panel1.render(service.table(), None).unwrap();
        let other = panel2.render(service.table(), Some("T23")).unwrap();
        let after = panel1.render(service.table(), None).unwrap();

        assert_eq!(other.item, "T23");
        assert_eq!(before.title, after.title);
        assert_eq!(before.figure, after.figure);
    }
}
