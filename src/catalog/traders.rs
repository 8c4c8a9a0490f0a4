//! Trader records: offer tables and clothing suits

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use super::instance::ItemInstance;
use crate::core::types::ItemId;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trader {
    #[serde(default)]
    pub base: TraderBase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assort: Option<TraderAssort>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suits: Option<Vec<Suit>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraderBase {
    #[serde(default)]
    pub customization_seller: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A vendor's offer table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraderAssort {
    #[serde(default)]
    pub items: Vec<ItemInstance>,
    /// Offer instance id → alternative payment schemes
    #[serde(default)]
    pub barter_scheme: IndexMap<String, Vec<Vec<BarterCost>>>,
    /// Offer instance id → loyalty level gate
    #[serde(default)]
    pub loyal_level_items: IndexMap<String, u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One payment line; dogtag barters carry extra keys such as `level` and `side`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarterCost {
    #[serde(rename = "_tpl")]
    pub tpl: ItemId,
    /// Kept as a JSON number; host dumps carry fractional counts
    pub count: Number,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BarterCost {
    pub fn new(tpl: impl Into<ItemId>, count: impl Into<Number>) -> Self {
        Self {
            tpl: tpl.into(),
            count: count.into(),
            extra: Map::new(),
        }
    }
}

impl TraderAssort {
    pub fn offers_template(&self, tpl: &str) -> bool {
        self.items.iter().any(|i| i.tpl == tpl)
    }

    pub fn has_instance(&self, id: &str) -> bool {
        self.items.iter().any(|i| i.id == id)
    }
}

/// A clothing suite offered by a trader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suit {
    #[serde(rename = "_id")]
    pub id: String,
    pub tid: String,
    pub suite_id: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub requirements: SuitRequirements,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_obtain: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_obtain: Option<bool>,
    #[serde(rename = "isHiddenInPVE", default, skip_serializing_if = "Option::is_none")]
    pub is_hidden_in_pve: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuitRequirements {
    pub loyalty_level: u32,
    pub profile_level: u32,
    pub standing: Number,
    pub skill_requirements: Vec<Value>,
    pub quest_requirements: Vec<Value>,
    pub item_requirements: Vec<SuitItemRequirement>,
    pub achievement_requirements: Vec<Value>,
    pub required_tid: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for SuitRequirements {
    fn default() -> Self {
        Self {
            loyalty_level: 0,
            profile_level: 0,
            standing: Number::from(0),
            skill_requirements: Vec::new(),
            quest_requirements: Vec::new(),
            item_requirements: Vec::new(),
            achievement_requirements: Vec::new(),
            required_tid: String::new(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuitItemRequirement {
    pub count: Number,
    #[serde(rename = "_tpl")]
    pub tpl: ItemId,
    #[serde(default)]
    pub only_functional: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
