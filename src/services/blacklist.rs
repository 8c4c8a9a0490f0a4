use serde::{Deserialize, Serialize};

use crate::core::types::{push_unique, ItemId};

/// Append-only list of ids excluded from dynamic market pricing
pub trait PricingBlacklist {
    /// Add `id`; returns false if it was already listed
    fn push(&mut self, id: &str) -> bool;

    fn contains(&self, id: &str) -> bool;
}

/// The `dynamic.blacklist.custom` list of the market configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RagfairBlacklist {
    pub custom: Vec<ItemId>,
}

impl PricingBlacklist for RagfairBlacklist {
    fn push(&mut self, id: &str) -> bool {
        push_unique(&mut self.custom, id)
    }

    fn contains(&self, id: &str) -> bool {
        self.custom.iter().any(|c| c == id)
    }
}
