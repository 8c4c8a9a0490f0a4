//! Handbook (price book) entries

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::core::types::ItemId;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Handbook {
    #[serde(rename = "Categories", default)]
    pub categories: Vec<Value>,
    #[serde(rename = "Items", default)]
    pub items: Vec<HandbookEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One visible/sellable record and its base price in roubles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandbookEntry {
    #[serde(rename = "Id")]
    pub id: ItemId,
    #[serde(rename = "ParentId")]
    pub parent_id: ItemId,
    #[serde(rename = "Price")]
    pub price: Number,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Handbook {
    pub fn entry(&self, id: &str) -> Option<&HandbookEntry> {
        self.items.iter().find(|e| e.id == id)
    }
}
