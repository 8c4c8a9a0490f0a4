//! Alias tables and clone-source resolution
//!
//! A template reference is either a well-known alias name or a literal
//! catalog id. Resolution consults the alias table first and falls back to
//! reading the reference as a literal id.

use std::collections::HashMap;

use crate::catalog::{Catalog, ItemTemplate};
use crate::core::config::AliasConfig;
use crate::core::error::{GenerationError, Result};
use crate::core::types::{Currency, DEFAULT_INVENTORY_ID, ITEM_BASE_ID};

/// Built-in item aliases
const ITEM_ALIASES: &[(&str, &str)] = &[
    ("Item", ITEM_BASE_ID),
    ("DefaultInventory", DEFAULT_INVENTORY_ID),
    ("SecureContainerAlpha", "544a11ac4bdc2d470e8b456a"),
    ("SecureContainerBeta", "5857a8b324597729ab0a0e7d"),
    ("SecureContainerEpsilon", "59db794186f77448bc595262"),
    ("SecureContainerGamma", "5857a8bc2459772bad15db29"),
    ("KappaSC", "5c093ca986f7740a1867ab12"),
    ("ItemCase", "59fb042886f7746c5005a7b2"),
    ("ThiccItemCase", "5c0a840b86f7742ffa4f2482"),
];

/// Built-in handbook category aliases
const HANDBOOK_ALIASES: &[(&str, &str)] = &[("SecureContainers", "5b5f6fd286f774093f2ecf0d")];

/// Closed alias → id mappings for items, handbook categories and slots
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    items: HashMap<String, String>,
    handbook: HashMap<String, String>,
    slots: HashMap<String, usize>,
}

impl AliasTable {
    /// Built-in aliases only
    pub fn builtin() -> Self {
        let mut items: HashMap<String, String> = ITEM_ALIASES
            .iter()
            .map(|(name, id)| (name.to_string(), id.to_string()))
            .collect();
        for currency in [Currency::Roubles, Currency::Dollars, Currency::Euros] {
            items.insert(format!("{:?}", currency), currency.tpl().to_string());
        }

        Self {
            items,
            handbook: HANDBOOK_ALIASES
                .iter()
                .map(|(name, id)| (name.to_string(), id.to_string()))
                .collect(),
            slots: HashMap::new(),
        }
    }

    /// Built-in aliases with configured entries layered on top
    pub fn with_config(config: &AliasConfig) -> Self {
        let mut table = Self::builtin();
        table.items.extend(config.items.clone());
        table.handbook.extend(config.handbook.clone());
        table.slots.extend(config.slots.clone());
        table
    }

    pub fn insert_item(&mut self, name: impl Into<String>, id: impl Into<String>) {
        self.items.insert(name.into(), id.into());
    }

    /// Item id for `reference`: the alias target, or the reference itself
    pub fn item<'a>(&'a self, reference: &'a str) -> &'a str {
        self.items.get(reference).map_or(reference, String::as_str)
    }

    /// Handbook category id for `reference`
    pub fn handbook_parent<'a>(&'a self, reference: &'a str) -> &'a str {
        self.handbook.get(reference).map_or(reference, String::as_str)
    }

    pub fn slot(&self, name: &str) -> Option<usize> {
        self.slots.get(name).copied()
    }

    /// Two-step resolution: alias first, literal id second
    pub fn resolve_template<'c>(
        &self,
        catalog: &'c Catalog,
        reference: &str,
    ) -> Result<&'c ItemTemplate> {
        if let Some(aliased) = self.items.get(reference) {
            if let Some(template) = catalog.item(aliased) {
                return Ok(template);
            }
        }
        catalog
            .item(reference)
            .ok_or_else(|| GenerationError::UnknownTemplate(reference.to_string()))
    }
}
