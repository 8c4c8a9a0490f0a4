//! Global tables: mastering disciplines and item presets

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::instance::ItemInstance;
use crate::core::types::ItemId;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Globals {
    #[serde(default)]
    pub config: GlobalsConfig,
    #[serde(rename = "ItemPresets", default)]
    pub item_presets: IndexMap<String, Preset>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalsConfig {
    #[serde(rename = "Mastering", default)]
    pub mastering: Vec<Mastering>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A weapon/equipment discipline and its XP thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mastering {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Templates", default)]
    pub templates: Vec<ItemId>,
    #[serde(rename = "Level2")]
    pub level2: u32,
    #[serde(rename = "Level3")]
    pub level3: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A pre-assembled attachment tree rooted at one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    #[serde(rename = "_changeWeaponName", default)]
    pub change_weapon_name: bool,
    #[serde(rename = "_encyclopedia", default, skip_serializing_if = "Option::is_none")]
    pub encyclopedia: Option<ItemId>,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_items")]
    pub items: Vec<ItemInstance>,
    #[serde(rename = "_name")]
    pub name: String,
    /// Instance id of the root item in `items`
    #[serde(rename = "_parent")]
    pub parent: String,
    #[serde(rename = "_type", default = "preset_type")]
    pub preset_type: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub fn preset_type() -> String {
    "Preset".to_string()
}

impl Preset {
    /// The root instance, whose `_id` equals `parent`
    pub fn root(&self) -> Option<&ItemInstance> {
        self.items.iter().find(|i| i.id == self.parent)
    }
}
