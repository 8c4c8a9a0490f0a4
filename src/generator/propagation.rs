//! Propagation directives
//!
//! Each directive scans one catalog substructure and inserts the new id
//! wherever the template id is already referenced. Directives are additive
//! (existing references are never removed) and every insertion is
//! deduplicated, so applying a directive twice changes nothing the second
//! time. A directive whose target is absent returns
//! `PropagationTargetMissing`; the caller decides whether to continue.

use serde_json::{Map, Number};

use crate::catalog::{Catalog, FilterSet, LootEntry, Mastering};
use crate::core::error::{GenerationError, Result};
use crate::core::types::push_unique;
use crate::services::PricingBlacklist;
use crate::spec::SlotRef;

use super::resolver::AliasTable;

/// Add `new_id` to every conflict, slot, cartridge and chamber list that
/// references `template_id`
pub fn clone_to_filters(catalog: &mut Catalog, template_id: &str, new_id: &str) -> usize {
    let mut inserted = 0;
    for item in catalog.items_mut() {
        if let Some(conflicts) = item.props.conflicting_items.as_mut() {
            if conflicts.iter().any(|c| c == template_id) && push_unique(conflicts, new_id) {
                inserted += 1;
            }
        }

        for filter in item.props.filter_lists_mut() {
            if filter.iter().any(|f| f == template_id) && push_unique(filter, new_id) {
                inserted += 1;
            }
        }
    }
    inserted
}

/// Copy the template's bot loot/equipment weights and mod tables to `new_id`
pub fn add_to_bots(catalog: &mut Catalog, template_id: &str, new_id: &str) -> Result<usize> {
    if catalog.bots.types.is_empty() {
        return Err(GenerationError::target_missing("bot_loot", "bots.types"));
    }

    let mut inserted = 0;
    for bot in catalog.bots.types.values_mut() {
        let inventory = &mut bot.inventory;

        for weights in inventory
            .items
            .values_mut()
            .chain(inventory.equipment.values_mut())
        {
            if let Some(weight) = weights.get(template_id).cloned() {
                if !weights.contains_key(new_id) {
                    weights.insert(new_id.to_string(), weight);
                    inserted += 1;
                }
            }
        }

        for slots in inventory.mods.values_mut() {
            for allowed in slots.values_mut() {
                if allowed.iter().any(|a| a == template_id) && push_unique(allowed, new_id) {
                    inserted += 1;
                }
            }
        }

        // Deep copy so archetypes never share one mod table
        if let Some(own_mods) = inventory.mods.get(template_id).cloned() {
            if !inventory.mods.contains_key(new_id) {
                inventory.mods.insert(new_id.to_string(), own_mods);
                inserted += 1;
            }
        }
    }
    Ok(inserted)
}

/// Add `new_id` with `probability` to `container` on every map that has it
pub fn add_to_static_loot(
    catalog: &mut Catalog,
    container: &str,
    new_id: &str,
    probability: u32,
) -> Result<usize> {
    let mut found = false;
    let mut inserted = 0;
    for location in catalog.locations.values_mut() {
        let Some(static_loot) = location.static_loot.as_mut() else {
            continue;
        };
        let Some(loot) = static_loot.get_mut(container) else {
            continue;
        };
        found = true;
        if loot.item_distribution.iter().all(|entry| entry.tpl != new_id) {
            loot.item_distribution.push(LootEntry {
                tpl: new_id.to_string(),
                relative_probability: Number::from(probability),
                extra: Map::new(),
            });
            inserted += 1;
        }
    }

    if !found {
        return Err(GenerationError::target_missing("static_loot", container));
    }
    Ok(inserted)
}

/// Allow `new_id` in the first grid of `case_id`
///
/// A grid with no filter list, or an empty one, first receives `default_filter`.
pub fn add_to_case(
    catalog: &mut Catalog,
    case_id: &str,
    new_id: &str,
    default_filter: &FilterSet,
) -> Result<usize> {
    let grid = catalog
        .item_mut(case_id)
        .and_then(|case| case.props.grids.as_mut())
        .and_then(|grids| grids.first_mut())
        .ok_or_else(|| GenerationError::target_missing("case_filter", case_id))?;

    if grid.primary_filter().map_or(true, |filter| filter.is_empty()) {
        tracing::debug!("{}: installing default grid filter", case_id);
        grid.props.filters = vec![default_filter.clone()];
    }

    match grid.primary_filter_mut() {
        Some(filter) => Ok(usize::from(push_unique(filter, new_id))),
        None => Err(GenerationError::target_missing("case_filter", case_id)),
    }
}

/// Allow `new_id` in one slot of the root inventory record
pub fn push_to_slot(
    catalog: &mut Catalog,
    aliases: &AliasTable,
    inventory_id: &str,
    slot: &SlotRef,
    new_id: &str,
) -> Result<usize> {
    let missing = || GenerationError::target_missing("default_slot", format!("{}/{}", inventory_id, slot));

    let inventory = catalog.item_mut(inventory_id).ok_or_else(missing)?;
    let slots = inventory.props.slots.as_mut().ok_or_else(missing)?;
    let index = match slot {
        SlotRef::Index(i) => Some(*i),
        SlotRef::Name(name) => aliases
            .slot(name)
            .or_else(|| slots.iter().position(|s| &s.name == name)),
    };

    let filter = index
        .and_then(|i| slots.get_mut(i))
        .and_then(|s| s.primary_filter_mut())
        .ok_or_else(missing)?;
    Ok(usize::from(push_unique(filter, new_id)))
}

/// Exclude `new_id` from dynamic market pricing
pub fn push_to_blacklist(blacklist: &mut dyn PricingBlacklist, new_id: &str) -> usize {
    usize::from(blacklist.push(new_id))
}

/// Add `new_target` to every finish condition of `condition_type` that
/// already targets `legacy_target`
pub fn add_to_quests(
    catalog: &mut Catalog,
    condition_type: &str,
    legacy_target: &str,
    new_target: &str,
) -> Result<usize> {
    let mut matched = false;
    let mut inserted = 0;
    for quest in catalog.templates.quests.values_mut() {
        for condition in quest.conditions.available_for_finish.iter_mut() {
            if condition.condition_type != condition_type {
                continue;
            }
            let Some(target) = condition.target.as_mut() else {
                continue;
            };
            if target.contains(legacy_target) {
                matched = true;
                if target.add(new_target) {
                    inserted += 1;
                }
            }
        }
    }

    if !matched {
        return Err(GenerationError::target_missing(
            "quest_target",
            format!("{}:{}", condition_type, legacy_target),
        ));
    }
    Ok(inserted)
}

/// Register `new_id` as its own mastery discipline
///
/// Thresholds come from the discipline that already lists the template, or
/// the given defaults when there is none.
pub fn push_mastery(
    catalog: &mut Catalog,
    template_id: &str,
    new_id: &str,
    name: &str,
    default_levels: (u32, u32),
) -> usize {
    let mastering = catalog.mastering_mut();
    if mastering.iter().any(|m| m.templates.iter().any(|t| t == new_id)) {
        return 0;
    }

    let (level2, level3) = mastering
        .iter()
        .find(|m| m.templates.iter().any(|t| t == template_id))
        .map_or(default_levels, |m| (m.level2, m.level3));

    mastering.push(Mastering {
        name: name.to_string(),
        templates: vec![new_id.to_string()],
        level2,
        level3,
        extra: Default::default(),
    });
    1
}
