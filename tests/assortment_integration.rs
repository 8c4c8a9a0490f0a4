//! Trader offer tests against the catalog fixture

use item_forge::assort::{AssortmentBuilder, CommitOutcome, OfferState};
use item_forge::catalog::Catalog;
use item_forge::core::config::GeneratorConfig;
use item_forge::core::error::GenerationError;
use item_forge::core::types::Currency;
use item_forge::generator::ItemGenerator;
use item_forge::services::SequentialIds;
use item_forge::spec::OfferFile;
use serde_json::json;
use tempfile::tempdir;

const CATALOG: &str = include_str!("fixtures/catalog.json");

fn catalog() -> Catalog {
    Catalog::from_json_str(CATALOG).unwrap()
}

#[test]
fn test_ammo_offer_scenario() {
    let mut catalog = catalog();
    let mut generator =
        ItemGenerator::new(GeneratorConfig::default()).with_ids(SequentialIds::new("offer_"));

    let mut builder = generator.begin_assortment("ammo_9mm");
    assert_eq!(builder.state(), OfferState::Started);
    builder
        .stack_count(50)
        .loyalty_level(1)
        .money_cost(Currency::Roubles, 500);

    let outcome = builder.commit_to_trader(&mut catalog, "trader_1", true).unwrap();
    assert_eq!(
        outcome,
        CommitOutcome::Committed {
            instance_id: "offer_0".into()
        }
    );

    let assort = catalog.traders["trader_1"].assort.as_ref().unwrap();
    assert_eq!(assort.items.len(), 1);
    let offer = &assort.items[0];
    assert_eq!(offer.tpl, "ammo_9mm");
    assert_eq!(offer.upd.as_ref().unwrap().stack_objects_count, Some(50));
    assert_eq!(assort.loyal_level_items["offer_0"], 1);
    let scheme = &assort.barter_scheme["offer_0"];
    assert_eq!(scheme.len(), 1);
    assert_eq!(scheme[0][0].tpl, Currency::Roubles.tpl());
    assert_eq!(scheme[0][0].count.as_u64(), Some(500));

    // Same template again with duplicate blocking is a no-op
    let snapshot = catalog.clone();
    let mut again = generator.begin_assortment("ammo_9mm");
    again.money_cost(Currency::Roubles, 400);
    let outcome = again.commit_to_trader(&mut catalog, "trader_1", true).unwrap();
    assert!(matches!(outcome, CommitOutcome::Duplicate { ref tpl, .. } if tpl == "ammo_9mm"));
    assert_eq!(catalog, snapshot);
}

#[test]
fn test_trader_without_assort_gets_one() {
    let mut catalog = catalog();
    let mut builder = AssortmentBuilder::new();
    builder
        .start("vest_tpl", "rig_offer")
        .barter_cost("ammo_9mm", 30)
        .buy_restriction(1)
        .loyalty_level(3);

    builder.commit_to_trader(&mut catalog, "trader_2", true).unwrap();

    let assort = catalog.traders["trader_2"].assort.as_ref().unwrap();
    assert!(assort.has_instance("rig_offer"));
    assert_eq!(assort.loyal_level_items["rig_offer"], 3);
    let upd = assort.items[0].upd.as_ref().unwrap();
    assert_eq!(upd.buy_restriction_max, Some(1));
    assert_eq!(upd.buy_restriction_current, Some(0));
}

#[test]
fn test_unknown_trader_keeps_catalog() {
    let mut catalog = catalog();
    let snapshot = catalog.clone();
    let mut builder = AssortmentBuilder::new();
    builder.start("vest_tpl", "rig_offer").money_cost(Currency::Dollars, 90);

    let result = builder.commit_to_trader(&mut catalog, "nobody", true);
    assert!(matches!(
        result,
        Err(GenerationError::PropagationTargetMissing { .. })
    ));
    assert_eq!(catalog, snapshot);
    assert_eq!(builder.state(), OfferState::Priced);
}

#[test]
fn test_unpriced_offer_is_rejected() {
    let mut catalog = catalog();
    let mut builder = AssortmentBuilder::new();
    builder.start("vest_tpl", "rig_offer").stack_count(2);

    let result = builder.commit_to_trader(&mut catalog, "trader_1", false);
    assert!(matches!(result, Err(GenerationError::MissingPrice(_))));
    assert!(catalog.traders["trader_1"].assort.as_ref().unwrap().items.is_empty());
}

#[test]
fn test_offer_file_reports_each_outcome() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("offers.json");
    let offers = json!({ "Offers": [
        { "TraderToUse": "trader_1", "ItemToSell": "ammo_9mm", "StackCount": 50,
          "Money": { "Currency": "RUB", "Amount": 500 } },
        { "TraderToUse": "trader_1", "ItemToSell": "ammo_9mm",
          "Money": { "Currency": "USD", "Amount": 4 } },
        { "TraderToUse": "trader_2", "ItemToSell": "vest_tpl", "LoyaltyLevel": 2 },
        { "TraderToUse": "trader_2", "ItemToSell": "vest_tpl", "Unlimited": true, "BuyRestriction": 2,
          "Barters": [ { "Item": "ammo_9mm", "Count": 20 }, { "Item": "ammo_9mm", "Count": 10 } ] },
        { "TraderToUse": "trader_2", "ItemToSell": "helmet_tpl",
          "Money": { "Currency": "BTC", "Amount": 1 } }
    ] });
    std::fs::write(&path, offers.to_string()).unwrap();

    let mut catalog = catalog();
    let mut generator =
        ItemGenerator::new(GeneratorConfig::default()).with_ids(SequentialIds::new("offer_"));
    let file = OfferFile::load(&path).unwrap();
    let reports = generator.create_offers(&mut catalog, &file.offers);

    assert_eq!(reports.len(), 5);
    assert!(reports[0].committed());
    assert!(reports[1].duplicate());
    assert!(matches!(reports[2].outcome, Err(GenerationError::MissingPrice(_))));
    assert!(reports[3].committed());
    assert!(matches!(reports[4].outcome, Err(GenerationError::InvalidOffer(_))));

    let ragman = catalog.traders["trader_1"].assort.as_ref().unwrap();
    assert_eq!(ragman.items.len(), 1);
    assert_eq!(ragman.barter_scheme["offer_0"][0][0].count.as_u64(), Some(500));

    let jaeger = catalog.traders["trader_2"].assort.as_ref().unwrap();
    assert_eq!(jaeger.items.len(), 1);
    let CommitOutcome::Committed { instance_id } = reports[3].outcome.as_ref().unwrap() else {
        panic!("expected a committed offer");
    };
    let upd = jaeger.items[0].upd.as_ref().unwrap();
    assert_eq!(upd.unlimited_count, Some(true));
    assert_eq!(upd.buy_restriction_max, Some(2));
    let scheme = &jaeger.barter_scheme[instance_id.as_str()][0];
    assert_eq!(scheme.len(), 1);
    assert_eq!(scheme[0].tpl, "ammo_9mm");
    assert_eq!(scheme[0].count.as_u64(), Some(30));
}
