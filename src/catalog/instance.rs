//! Concrete item instances as they appear in assortments and presets

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::types::ItemId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemInstance {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_tpl")]
    pub tpl: ItemId,
    #[serde(rename = "parentId", default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(rename = "slotId", default, skip_serializing_if = "Option::is_none")]
    pub slot_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upd: Option<ItemUpd>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Mutable per-instance state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemUpd {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_objects_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlimited_count: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buy_restriction_max: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buy_restriction_current: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ItemInstance {
    pub fn new(id: impl Into<String>, tpl: impl Into<ItemId>) -> Self {
        Self {
            id: id.into(),
            tpl: tpl.into(),
            parent_id: None,
            slot_id: None,
            upd: None,
            extra: Map::new(),
        }
    }

    /// Child instance mounted in `slot` of `parent`
    pub fn child(
        id: impl Into<String>,
        tpl: impl Into<ItemId>,
        parent: impl Into<String>,
        slot: impl Into<String>,
    ) -> Self {
        Self {
            parent_id: Some(parent.into()),
            slot_id: Some(slot.into()),
            ..Self::new(id, tpl)
        }
    }
}
