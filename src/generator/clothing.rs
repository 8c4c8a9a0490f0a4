//! Outfit generation: cloned clothing records, suites and trader suits

use serde_json::{json, Map, Number, Value};

use crate::catalog::{Catalog, CustomizationRecord, Suit, SuitItemRequirement, SuitRequirements};
use crate::core::config::OutfitBases;
use crate::core::error::{GenerationError, Result};
use crate::spec::{OutfitBottomSpec, OutfitTopSpec, SuitScheme};

use super::resolver::AliasTable;

fn clone_record(catalog: &Catalog, id: &str) -> Result<CustomizationRecord> {
    catalog
        .templates
        .customization
        .get(id)
        .cloned()
        .ok_or_else(|| GenerationError::UnknownTemplate(id.to_string()))
}

/// Insert a record keyed by its own id; an existing record is replaced in place
fn insert_record(catalog: &mut Catalog, record: CustomizationRecord) {
    let id = record.id.clone();
    if catalog.templates.customization.insert(id.clone(), record).is_some() {
        tracing::warn!("customization {} replaced an existing record", id);
    }
}

fn sides(bases: &OutfitBases) -> Value {
    json!(bases.sides)
}

/// Clone a body, its hands and a suite binding both
pub fn create_clothing_top(
    catalog: &mut Catalog,
    bases: &OutfitBases,
    aliases: &AliasTable,
    spec: &OutfitTopSpec,
) -> Result<()> {
    let mut top = clone_record(catalog, &bases.top)?;
    let mut hands = clone_record(catalog, &spec.hands_to_clone)?;
    let mut suite = clone_record(catalog, &bases.top_suite)?;

    top.id = spec.outfit_id.clone();
    top.name = spec.locale_name.clone();
    top.set_prefab_path(&spec.bundle_path);

    hands.id = spec.hands_id.clone();
    hands.name = format!("{} Hands", spec.locale_name);
    hands.set_prefab_path(&spec.hands_bundle_path);

    suite.id = spec.set_id.clone();
    suite.name = format!("{} Set", spec.locale_name);
    suite.set_prop("Body", json!(spec.outfit_id));
    suite.set_prop("Hands", json!(spec.hands_id));
    suite.set_prop("Side", sides(bases));

    insert_record(catalog, top);
    insert_record(catalog, hands);
    insert_record(catalog, suite);

    catalog.set_locale_everywhere(&format!("{} Name", spec.set_id), &spec.locale_name);
    tracing::info!("Created outfit top {} ({})", spec.outfit_id, spec.locale_name);

    match &spec.trader_scheme {
        Some(scheme) => add_suit(catalog, aliases, scheme, &spec.outfit_id, &spec.set_id),
        None => Ok(()),
    }
}

/// Clone a pair of bottoms and a suite binding them
pub fn create_clothing_bottom(
    catalog: &mut Catalog,
    bases: &OutfitBases,
    aliases: &AliasTable,
    spec: &OutfitBottomSpec,
) -> Result<()> {
    let mut bottom = clone_record(catalog, &bases.bottom)?;
    let mut suite = clone_record(catalog, &bases.bottom_suite)?;

    bottom.id = spec.bottoms_id.clone();
    bottom.name = spec.locale_name.clone();
    bottom.set_prefab_path(&spec.bundle_path);

    suite.id = spec.set_id.clone();
    suite.name = format!("{} Set", spec.bottoms_id);
    suite.set_prop("Feet", json!(spec.bottoms_id));
    suite.set_prop("Side", sides(bases));

    insert_record(catalog, bottom);
    insert_record(catalog, suite);

    catalog.set_locale_everywhere(&format!("{} Name", spec.bottoms_id), &spec.locale_name);
    catalog.set_locale_everywhere(&format!("{} Name", spec.set_id), &spec.locale_name);
    tracing::info!("Created outfit bottom {} ({})", spec.bottoms_id, spec.locale_name);

    match &spec.trader_scheme {
        Some(scheme) => add_suit(catalog, aliases, scheme, &spec.bottoms_id, &spec.set_id),
        None => Ok(()),
    }
}

/// List a suite for sale; the trader becomes a customization seller
fn add_suit(
    catalog: &mut Catalog,
    aliases: &AliasTable,
    scheme: &SuitScheme,
    offer_id: &str,
    suite_id: &str,
) -> Result<()> {
    let trader = catalog
        .trader_mut(&scheme.trader)
        .ok_or_else(|| GenerationError::target_missing("trader_suit", scheme.trader.clone()))?;

    trader.base.customization_seller = true;
    let suits = trader.suits.get_or_insert_with(Vec::new);
    if suits.iter().any(|s| s.id == offer_id) {
        return Ok(());
    }

    suits.push(Suit {
        id: offer_id.to_string(),
        tid: scheme.trader.clone(),
        suite_id: suite_id.to_string(),
        is_active: true,
        requirements: SuitRequirements {
            loyalty_level: scheme.loyalty_level,
            profile_level: scheme.profile_level,
            standing: Number::from_f64(scheme.standing).unwrap_or_else(|| Number::from(0)),
            item_requirements: vec![SuitItemRequirement {
                count: Number::from(scheme.cost),
                tpl: aliases.item(&scheme.currency).to_string(),
                only_functional: false,
                extra: Map::new(),
            }],
            ..SuitRequirements::default()
        },
        external_obtain: Some(false),
        internal_obtain: Some(false),
        is_hidden_in_pve: Some(false),
        extra: Map::new(),
    });
    Ok(())
}
