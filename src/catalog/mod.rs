//! In-memory catalog
//!
//! `Catalog` is the single store every generator component borrows
//! mutably for the duration of a pass. Tables are keyed by string id and
//! keep their source order so a patched dump serializes deterministically.

pub mod bots;
pub mod customization;
pub mod globals;
pub mod handbook;
pub mod instance;
pub mod item;
pub mod locations;
pub mod quests;
pub mod traders;

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

pub use bots::{BotInventory, BotType, Bots, ModSlots, WeightTable};
pub use customization::CustomizationRecord;
pub use globals::{Globals, GlobalsConfig, Mastering, Preset};
pub use handbook::{Handbook, HandbookEntry};
pub use instance::{ItemInstance, ItemUpd};
pub use item::{FilterSet, GridDef, ItemProps, ItemTemplate, SlotDef, SlotProps};
pub use locations::{Location, LootEntry, StaticLootContainer};
pub use quests::{Quest, QuestCondition, QuestConditions, QuestTarget};
pub use traders::{
    BarterCost, Suit, SuitItemRequirement, SuitRequirements, Trader, TraderAssort, TraderBase,
};

use crate::core::error::Result;
use crate::core::types::ItemId;

/// Language code → localization key → text
pub type LocaleTable = IndexMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub templates: Templates,
    #[serde(default)]
    pub bots: Bots,
    #[serde(default)]
    pub locations: IndexMap<String, Location>,
    #[serde(default)]
    pub traders: IndexMap<String, Trader>,
    #[serde(default)]
    pub globals: Globals,
    #[serde(default)]
    pub locales: Locales,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Templates {
    #[serde(default)]
    pub items: IndexMap<ItemId, ItemTemplate>,
    #[serde(default)]
    pub handbook: Handbook,
    /// Flea market base prices
    #[serde(default)]
    pub prices: IndexMap<ItemId, Number>,
    #[serde(default)]
    pub quests: IndexMap<String, Quest>,
    #[serde(default)]
    pub customization: IndexMap<String, CustomizationRecord>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Locales {
    #[serde(default)]
    pub global: IndexMap<String, LocaleTable>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    // === ITEMS ===

    pub fn item(&self, id: &str) -> Option<&ItemTemplate> {
        self.templates.items.get(id)
    }

    pub fn item_mut(&mut self, id: &str) -> Option<&mut ItemTemplate> {
        self.templates.items.get_mut(id)
    }

    pub fn contains_item(&self, id: &str) -> bool {
        self.templates.items.contains_key(id)
    }

    /// Insert or replace a record, keyed by its own id
    pub fn insert_item(&mut self, item: ItemTemplate) {
        self.templates.items.insert(item.id.clone(), item);
    }

    pub fn items_mut(&mut self) -> impl Iterator<Item = &mut ItemTemplate> {
        self.templates.items.values_mut()
    }

    // === HANDBOOK / PRICES ===

    pub fn handbook_entry(&self, id: &str) -> Option<&HandbookEntry> {
        self.templates.handbook.entry(id)
    }

    pub fn push_handbook(&mut self, entry: HandbookEntry) {
        self.templates.handbook.items.push(entry);
    }

    pub fn set_price(&mut self, id: &str, price: Number) {
        self.templates.prices.insert(id.to_string(), price);
    }

    // === LOCALES ===

    pub fn locale_languages(&self) -> impl Iterator<Item = &String> {
        self.locales.global.keys()
    }

    pub fn locale_mut(&mut self, language: &str) -> Option<&mut LocaleTable> {
        self.locales.global.get_mut(language)
    }

    /// Write `key` into every language table
    pub fn set_locale_everywhere(&mut self, key: &str, text: &str) {
        for table in self.locales.global.values_mut() {
            table.insert(key.to_string(), text.to_string());
        }
    }

    // === TRADERS / PRESETS / MASTERING ===

    pub fn trader_mut(&mut self, id: &str) -> Option<&mut Trader> {
        self.traders.get_mut(id)
    }

    pub fn preset(&self, id: &str) -> Option<&Preset> {
        self.globals.item_presets.get(id)
    }

    /// Insert a preset keyed by its own id, returning the one it replaced
    pub fn insert_preset(&mut self, preset: Preset) -> Option<Preset> {
        self.globals.item_presets.insert(preset.id.clone(), preset)
    }

    pub fn mastering(&self) -> &[Mastering] {
        &self.globals.config.mastering
    }

    pub fn mastering_mut(&mut self) -> &mut Vec<Mastering> {
        &mut self.globals.config.mastering
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_minimal_dump() {
        let dump = json!({
            "templates": {
                "items": {
                    "a": { "_id": "a", "_name": "a", "_parent": "p", "_type": "Item", "_props": {} }
                },
                "handbook": { "Categories": [], "Items": [ { "Id": "a", "ParentId": "hb", "Price": 100 } ] }
            },
            "locales": { "global": { "en": {}, "ru": {} } },
            "settings": { "kept": true }
        });
        let mut catalog = Catalog::from_json_str(&dump.to_string()).unwrap();

        assert!(catalog.contains_item("a"));
        assert_eq!(catalog.handbook_entry("a").unwrap().price.as_u64(), Some(100));
        assert_eq!(catalog.extra["settings"], json!({ "kept": true }));

        catalog.set_locale_everywhere("a Name", "Thing");
        assert_eq!(catalog.locale_mut("ru").unwrap()["a Name"], "Thing");
    }

    #[test]
    fn test_nested_records_round_trip_unchanged() {
        let dump = json!({
            "templates": {
                "handbook": {
                    "Categories": [],
                    "Items": [ { "Id": "a", "ParentId": "hb", "Price": 12.5, "Note": "x" } ],
                    "Version": 3
                },
                "prices": { "a": 118.79, "b": 40000 }
            },
            "locations": {
                "customs": { "staticLoot": { "jacket": {
                    "itemcountDistribution": [],
                    "itemDistribution": [ { "tpl": "keys", "relativeProbability": 2.5, "weight": 1 } ]
                } } }
            },
            "traders": {
                "t1": {
                    "base": { "customization_seller": true },
                    "assort": {
                        "items": [ { "_id": "o1", "_tpl": "a", "parentId": "hideout", "slotId": "hideout", "extraFlag": true } ],
                        "barter_scheme": { "o1": [ [
                            { "_tpl": "dogtag_usec", "count": 2, "level": 15, "side": "Usec" },
                            { "_tpl": "bolts", "count": 118.79 }
                        ] ] },
                        "loyal_level_items": { "o1": 1 }
                    },
                    "suits": [ {
                        "_id": "suit1", "tid": "t1", "suiteId": "top1", "isActive": true,
                        "requirements": {
                            "loyaltyLevel": 1, "profileLevel": 1, "standing": 0,
                            "skillRequirements": [], "questRequirements": [],
                            "itemRequirements": [ { "count": 3, "_tpl": "roubles", "onlyFunctional": false, "isEncoded": false } ],
                            "achievementRequirements": [], "requiredTid": "t1"
                        }
                    } ]
                }
            },
            "globals": { "ItemPresets": { "p1": {
                "_changeWeaponName": false, "_id": "p1", "_items": [ { "_id": "r", "_tpl": "a" } ],
                "_name": "p", "_parent": "r", "_type": "Preset", "_encyclopediaNote": 1
            } } }
        });

        let catalog: Catalog = serde_json::from_value(dump.clone()).unwrap();
        let suit = &catalog.traders["t1"].suits.as_ref().unwrap()[0];
        assert_eq!(suit.external_obtain, None);
        assert_eq!(catalog.templates.prices["a"].as_f64(), Some(118.79));

        let back = serde_json::to_value(&catalog).unwrap();
        assert_eq!(back["templates"]["handbook"], dump["templates"]["handbook"]);
        assert_eq!(back["templates"]["prices"], dump["templates"]["prices"]);
        assert_eq!(back["locations"], dump["locations"]);
        assert_eq!(back["traders"], dump["traders"]);
        assert_eq!(back["globals"]["ItemPresets"], dump["globals"]["ItemPresets"]);
    }
}
