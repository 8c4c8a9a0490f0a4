//! Preset construction: author-supplied trees and auto-assembled ones

use serde_json::Map;

use crate::catalog::{Catalog, ItemInstance, Preset};
use crate::catalog::globals::preset_type;
use crate::core::error::{GenerationError, Result};
use crate::services::{IdGenerator, RandomPicker};
use crate::spec::PresetSpec;

/// Copy the host-required fields of each author preset and insert it
///
/// Tree well-formedness is not checked. A preset whose id is already
/// present replaces the stored one.
pub fn add_explicit_presets(catalog: &mut Catalog, presets: &[PresetSpec]) -> usize {
    for spec in presets {
        let items = spec
            .items
            .iter()
            .map(|item| ItemInstance {
                id: item.id.clone(),
                tpl: item.tpl.clone(),
                parent_id: item.parent_id.clone(),
                slot_id: item.slot_id.clone(),
                upd: None,
                extra: Map::new(),
            })
            .collect();

        let replaced = catalog.insert_preset(Preset {
            change_weapon_name: spec.change_weapon_name,
            encyclopedia: spec.encyclopedia.clone(),
            id: spec.id.clone(),
            items,
            name: spec.name.clone(),
            parent: spec.parent.clone(),
            preset_type: preset_type(),
            extra: Map::new(),
        });
        if replaced.is_some() {
            tracing::warn!("preset {} replaced an existing preset", spec.id);
        }
    }
    presets.len()
}

/// Assemble and insert a preset rooted at `item_id`
///
/// Every slot except `excluded_slot` receives one child drawn from its
/// filter, in slot declaration order. Slots with an empty filter are left
/// empty. Returns the new preset's id.
pub fn build_generated_preset(
    catalog: &mut Catalog,
    ids: &mut dyn IdGenerator,
    picker: &mut dyn RandomPicker,
    item_id: &str,
    name: &str,
    excluded_slot: &str,
) -> Result<String> {
    let item = catalog
        .item(item_id)
        .ok_or_else(|| GenerationError::UnknownTemplate(item_id.to_string()))?;

    let root_id = ids.generate();
    let mut items = vec![ItemInstance::new(root_id.clone(), item_id)];

    for slot in item.props.slots().iter().filter(|s| s.name != excluded_slot) {
        let candidates = slot.primary_filter().map(Vec::as_slice).unwrap_or_default();
        match picker.pick(candidates, 1, false).into_iter().next() {
            Some(tpl) => items.push(ItemInstance::child(ids.generate(), tpl, root_id.clone(), slot.name.clone())),
            None => tracing::debug!("{}: slot {} has no candidates", item_id, slot.name),
        }
    }

    let preset = Preset {
        change_weapon_name: false,
        encyclopedia: Some(item_id.to_string()),
        id: ids.generate(),
        items,
        name: format!("{} Preset", name),
        parent: root_id,
        preset_type: preset_type(),
        extra: Map::new(),
    };
    let preset_id = preset.id.clone();
    if catalog.insert_preset(preset).is_some() {
        tracing::warn!("preset {} replaced an existing preset", preset_id);
    }
    Ok(preset_id)
}
