//! Bot archetype inventory tables

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::core::types::ItemId;

/// Template id → sampling weight
pub type WeightTable = IndexMap<ItemId, Number>;

/// Mod slot name → allowed template ids
pub type ModSlots = IndexMap<String, Vec<ItemId>>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bots {
    #[serde(default)]
    pub types: IndexMap<String, BotType>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BotType {
    #[serde(default)]
    pub inventory: BotInventory,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BotInventory {
    /// Loot category → weights
    #[serde(default)]
    pub items: IndexMap<String, WeightTable>,
    /// Equipment slot → weights
    #[serde(default)]
    pub equipment: IndexMap<String, WeightTable>,
    /// Parent template → its mod slots
    #[serde(default)]
    pub mods: IndexMap<ItemId, ModSlots>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
