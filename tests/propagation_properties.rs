//! Property tests: propagation only ever adds the new id, and only where
//! the template was already referenced

use item_forge::catalog::{Catalog, ItemTemplate, Quest, QuestTarget};
use item_forge::generator::propagation::{add_to_quests, clone_to_filters};
use proptest::prelude::*;
use serde_json::json;

const POOL: [&str; 6] = ["tpl", "a", "b", "c", "d", "e"];

fn ids(indices: &[usize]) -> Vec<String> {
    indices.iter().map(|&i| POOL[i].to_string()).collect()
}

fn lists() -> impl Strategy<Value = Vec<(Vec<usize>, Vec<usize>)>> {
    prop::collection::vec(
        (
            prop::collection::vec(0usize..POOL.len(), 0..6),
            prop::collection::vec(0usize..POOL.len(), 0..6),
        ),
        1..8,
    )
}

fn build_catalog(lists: &[(Vec<usize>, Vec<usize>)]) -> Catalog {
    let mut catalog = Catalog::new();
    for (index, (conflicts, slot_filter)) in lists.iter().enumerate() {
        let id = format!("item_{}", index);
        let item: ItemTemplate = serde_json::from_value(json!({
            "_id": id,
            "_parent": "parent",
            "_props": {
                "ConflictingItems": ids(conflicts),
                "Slots": [ { "_name": "mod_a", "_props": { "filters": [ { "Filter": ids(slot_filter) } ] } } ]
            }
        }))
        .unwrap();
        catalog.insert_item(item);
    }
    catalog
}

/// The list a correct propagation should produce from `before`
fn expected(before: &[String]) -> Vec<String> {
    let mut after = before.to_vec();
    if before.iter().any(|id| id == "tpl") && !before.iter().any(|id| id == "new") {
        after.push("new".to_string());
    }
    after
}

proptest! {
    #[test]
    fn property_clone_to_filters_is_additive(lists in lists()) {
        let original = build_catalog(&lists);
        let mut catalog = original.clone();

        clone_to_filters(&mut catalog, "tpl", "new");

        for (id, before) in &original.templates.items {
            let after = catalog.item(id).unwrap();
            let expected_conflicts = expected(before.props.conflicting_items());
            prop_assert_eq!(after.props.conflicting_items(), expected_conflicts.as_slice());
            prop_assert_eq!(
                after.props.slots()[0].primary_filter().unwrap(),
                &expected(before.props.slots()[0].primary_filter().unwrap())
            );
        }
    }

    #[test]
    fn property_clone_to_filters_is_idempotent(lists in lists()) {
        let mut catalog = build_catalog(&lists);
        clone_to_filters(&mut catalog, "tpl", "new");
        let once = catalog.clone();

        prop_assert_eq!(clone_to_filters(&mut catalog, "tpl", "new"), 0);
        prop_assert_eq!(catalog, once);
    }

    #[test]
    fn property_quest_targets_only_grow_for_matching_type(
        targets in prop::collection::vec((prop::bool::ANY, prop::collection::vec(0usize..POOL.len(), 1..5)), 1..6)
    ) {
        let conditions: Vec<_> = targets
            .iter()
            .map(|(handover, target)| json!({
                "conditionType": if *handover { "HandoverItem" } else { "FindItem" },
                "target": ids(target),
            }))
            .collect();
        let quest: Quest = serde_json::from_value(json!({
            "conditions": { "AvailableForFinish": conditions }
        }))
        .unwrap();

        let mut catalog = Catalog::new();
        catalog.templates.quests.insert("quest".into(), quest);
        let original = catalog.clone();

        let _ = add_to_quests(&mut catalog, "HandoverItem", "tpl", "new");

        let before = &original.templates.quests["quest"].conditions.available_for_finish;
        let after = &catalog.templates.quests["quest"].conditions.available_for_finish;
        for ((handover, _), (old, new)) in targets.iter().zip(before.iter().zip(after)) {
            let (Some(QuestTarget::Many(old)), Some(QuestTarget::Many(new))) = (&old.target, &new.target) else {
                panic!("list targets stay lists");
            };
            if *handover {
                prop_assert_eq!(new, &expected(old));
            } else {
                prop_assert_eq!(new, old);
            }
        }
    }
}
