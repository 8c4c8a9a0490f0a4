//! Quest records, reduced to the finish conditions the generator touches

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::types::{push_unique, ItemId};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    #[serde(default)]
    pub conditions: QuestConditions,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestConditions {
    #[serde(rename = "AvailableForFinish", default)]
    pub available_for_finish: Vec<QuestCondition>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestCondition {
    #[serde(rename = "conditionType")]
    pub condition_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<QuestTarget>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Condition targets come either as a single id or as a list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestTarget {
    Many(Vec<ItemId>),
    One(ItemId),
}

impl QuestTarget {
    pub fn contains(&self, id: &str) -> bool {
        match self {
            QuestTarget::Many(ids) => ids.iter().any(|t| t == id),
            QuestTarget::One(t) => t == id,
        }
    }

    /// Add `id`, promoting a single target to a list. Returns whether it was added.
    pub fn add(&mut self, id: &str) -> bool {
        match self {
            QuestTarget::Many(ids) => push_unique(ids, id),
            QuestTarget::One(existing) => {
                if existing == id {
                    return false;
                }
                *self = QuestTarget::Many(vec![existing.clone(), id.to_string()]);
                true
            }
        }
    }
}
