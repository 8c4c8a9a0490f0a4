//! Container grid generation from a cell layout

use serde_json::{json, Map, Value};

use crate::catalog::{FilterSet, GridDef, SlotProps};
use crate::services::IdGenerator;
use crate::spec::GridLayout;

/// Build one grid per column of `layout`, each with `filter` installed
///
/// Mismatched column lists collapse to a single 1x1 grid.
pub fn build_grids(
    ids: &mut dyn IdGenerator,
    parent: &str,
    layout: &GridLayout,
    filter: &FilterSet,
) -> Vec<GridDef> {
    let (cells_h, cells_v) = if layout.cells_h.len() != layout.cells_v.len() {
        tracing::warn!(
            "{}: grid layout has {} horizontal and {} vertical entries; using one 1x1 cell",
            parent,
            layout.cells_h.len(),
            layout.cells_v.len()
        );
        (vec![1], vec![1])
    } else {
        (layout.cells_h.clone(), layout.cells_v.clone())
    };

    cells_h
        .iter()
        .zip(cells_v.iter())
        .enumerate()
        .map(|(i, (&h, &v))| column(ids.generate(), parent, i, h, v, filter))
        .collect()
}

fn column(id: String, parent: &str, index: usize, cells_h: u32, cells_v: u32, filter: &FilterSet) -> GridDef {
    let mut extra = Map::new();
    extra.insert("cellsH".into(), json!(cells_h));
    extra.insert("cellsV".into(), json!(cells_v));
    extra.insert("minCount".into(), json!(0));
    extra.insert("maxCount".into(), json!(0));
    extra.insert("maxWeight".into(), json!(0));
    extra.insert("isSortingTable".into(), Value::Bool(false));

    GridDef {
        name: format!("column{}", index),
        id,
        parent: parent.to_string(),
        props: SlotProps {
            filters: vec![filter.clone()],
            extra,
        },
        extra: Map::new(),
    }
}
