//! Map static loot tables

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::core::types::ItemId;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Container template id → loot distribution
    #[serde(rename = "staticLoot", default, skip_serializing_if = "Option::is_none")]
    pub static_loot: Option<IndexMap<ItemId, StaticLootContainer>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticLootContainer {
    #[serde(rename = "itemcountDistribution", default)]
    pub itemcount_distribution: Vec<Value>,
    #[serde(rename = "itemDistribution", default)]
    pub item_distribution: Vec<LootEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootEntry {
    pub tpl: ItemId,
    #[serde(rename = "relativeProbability")]
    pub relative_probability: Number,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
