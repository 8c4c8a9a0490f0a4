//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Catalog ids are plain strings (24-hex ids in base data, free-form in mods)
pub type ItemId = String;

/// Base "Item" node; any item id passes a filter that lists it
pub const ITEM_BASE_ID: &str = "54009119af1c881c07000029";

/// Base "Money" node, excluded from the default container filter
pub const MONEY_BASE_ID: &str = "5447e1d04bdc2dff2f8b4567";

/// Root inventory record holding the equipment slots
pub const DEFAULT_INVENTORY_ID: &str = "55d7217a4bdc2d86028b456d";

/// Parent/slot value every top-level assortment item must carry
pub const ASSORT_ROOT: &str = "hideout";

/// Currencies accepted in money prices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    Roubles,
    Dollars,
    Euros,
}

impl Currency {
    /// Template id of the currency item
    pub fn tpl(&self) -> &'static str {
        match self {
            Currency::Roubles => "5449016a4bdc2d6f028b456f",
            Currency::Dollars => "5696686a4bdc2da3298b456a",
            Currency::Euros => "569668774bdc2da2298b4568",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "RUB" | "ROUBLES" => Some(Currency::Roubles),
            "USD" | "DOLLARS" => Some(Currency::Dollars),
            "EUR" | "EUROS" => Some(Currency::Euros),
            _ => None,
        }
    }
}

/// Append `id` unless the list already holds it. Returns whether it was added.
pub fn push_unique(list: &mut Vec<ItemId>, id: &str) -> bool {
    if list.iter().any(|existing| existing == id) {
        return false;
    }
    list.push(id.to_string());
    true
}

/// Sum two JSON counts, staying integral while both sides are
///
/// A non-finite float sum leaves `left` unchanged.
pub fn add_numbers(left: &Number, right: &Number) -> Number {
    if let (Some(a), Some(b)) = (left.as_u64(), right.as_u64()) {
        if let Some(sum) = a.checked_add(b) {
            return Number::from(sum);
        }
    }
    let sum = left.as_f64().unwrap_or_default() + right.as_f64().unwrap_or_default();
    Number::from_f64(sum).unwrap_or_else(|| left.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_unique() {
        let mut list = vec!["a".to_string()];
        assert!(push_unique(&mut list, "b"));
        assert!(!push_unique(&mut list, "a"));
        assert_eq!(list, vec!["a", "b"]);
    }

    #[test]
    fn test_add_numbers() {
        assert_eq!(add_numbers(&Number::from(2), &Number::from(3)), Number::from(5));
        let mixed = add_numbers(&Number::from_f64(0.5).unwrap(), &Number::from(2));
        assert_eq!(mixed.as_f64(), Some(2.5));
        assert_eq!(add_numbers(&Number::from(u64::MAX), &Number::from(1)).as_f64(), Some(u64::MAX as f64 + 1.0));
    }

    #[test]
    fn test_currency_codes() {
        assert_eq!(Currency::from_code("rub"), Some(Currency::Roubles));
        assert_eq!(Currency::from_code("EUR").unwrap().tpl(), "569668774bdc2da2298b4568");
        assert_eq!(Currency::from_code("BTC"), None);
    }
}
