//! Item template records and their nested filter structures

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::error::Result;
use crate::core::types::ItemId;

/// A catalog record describing one item template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemTemplate {
    #[serde(rename = "_id")]
    pub id: ItemId,
    #[serde(rename = "_name", default)]
    pub name: String,
    #[serde(rename = "_parent", default)]
    pub parent: ItemId,
    #[serde(rename = "_type", default = "default_item_type")]
    pub item_type: String,
    #[serde(rename = "_props", default)]
    pub props: ItemProps,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_item_type() -> String {
    "Item".to_string()
}

/// Property bag of an item template
///
/// The reference-carrying lists are typed; everything else stays an open
/// JSON map so unknown properties survive a round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemProps {
    // Absent and empty lists are distinct on the wire, hence `Option`
    #[serde(rename = "Slots", default, skip_serializing_if = "Option::is_none")]
    pub slots: Option<Vec<SlotDef>>,
    #[serde(rename = "Grids", default, skip_serializing_if = "Option::is_none")]
    pub grids: Option<Vec<GridDef>>,
    #[serde(rename = "Cartridges", default, skip_serializing_if = "Option::is_none")]
    pub cartridges: Option<Vec<SlotDef>>,
    #[serde(rename = "Chambers", default, skip_serializing_if = "Option::is_none")]
    pub chambers: Option<Vec<SlotDef>>,
    #[serde(rename = "ConflictingItems", default, skip_serializing_if = "Option::is_none")]
    pub conflicting_items: Option<Vec<ItemId>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A named sub-record carrying filter lists: slots, cartridges, chambers and grids
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotDef {
    #[serde(rename = "_name")]
    pub name: String,
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "_parent", default)]
    pub parent: String,
    #[serde(rename = "_props", default)]
    pub props: SlotProps,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Grids share the slot shape; their `_props` also carry cell sizes
pub type GridDef = SlotDef;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotProps {
    #[serde(default)]
    pub filters: Vec<FilterSet>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One allow/deny filter pair
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    #[serde(rename = "Filter", default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Vec<ItemId>>,
    #[serde(rename = "ExcludedFilter", default, skip_serializing_if = "Option::is_none")]
    pub excluded_filter: Option<Vec<ItemId>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FilterSet {
    pub fn new(filter: Vec<ItemId>, excluded: Vec<ItemId>) -> Self {
        Self {
            filter: Some(filter),
            excluded_filter: Some(excluded),
            extra: Map::new(),
        }
    }
}

impl SlotDef {
    /// The reference list the host consults: `_props.filters[0].Filter`
    pub fn primary_filter(&self) -> Option<&Vec<ItemId>> {
        self.props.filters.first().and_then(|f| f.filter.as_ref())
    }

    pub fn primary_filter_mut(&mut self) -> Option<&mut Vec<ItemId>> {
        self.props.filters.first_mut().and_then(|f| f.filter.as_mut())
    }

    pub fn references(&self, id: &str) -> bool {
        self.primary_filter()
            .map_or(false, |filter| filter.iter().any(|f| f == id))
    }
}

impl ItemProps {
    /// Shallow-merge `overrides` into this bag; override wins on key collision
    ///
    /// Typed lists are replaced wholesale when their key is overridden.
    pub fn apply_overrides(&mut self, overrides: &Map<String, Value>) -> Result<()> {
        if overrides.is_empty() {
            return Ok(());
        }
        let mut bag = match serde_json::to_value(&*self)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        for (key, value) in overrides {
            bag.insert(key.clone(), value.clone());
        }
        *self = serde_json::from_value(Value::Object(bag))?;
        Ok(())
    }

    pub fn slots(&self) -> &[SlotDef] {
        self.slots.as_deref().unwrap_or_default()
    }

    pub fn grids(&self) -> &[GridDef] {
        self.grids.as_deref().unwrap_or_default()
    }

    pub fn cartridges(&self) -> &[SlotDef] {
        self.cartridges.as_deref().unwrap_or_default()
    }

    pub fn chambers(&self) -> &[SlotDef] {
        self.chambers.as_deref().unwrap_or_default()
    }

    pub fn conflicting_items(&self) -> &[ItemId] {
        self.conflicting_items.as_deref().unwrap_or_default()
    }

    /// Slot, cartridge and chamber primary filters, in that order
    ///
    /// Absent lists yield nothing and stay absent.
    pub fn filter_lists_mut(&mut self) -> impl Iterator<Item = &mut Vec<ItemId>> {
        self.slots
            .iter_mut()
            .flatten()
            .chain(self.cartridges.iter_mut().flatten())
            .chain(self.chambers.iter_mut().flatten())
            .filter_map(SlotDef::primary_filter_mut)
    }
}

impl ItemTemplate {
    pub fn new(id: impl Into<ItemId>, parent: impl Into<ItemId>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            parent: parent.into(),
            item_type: default_item_type(),
            props: ItemProps::default(),
            extra: Map::new(),
        }
    }

    pub fn slot(&self, name: &str) -> Option<&SlotDef> {
        self.props.slots().iter().find(|s| s.name == name)
    }
}
