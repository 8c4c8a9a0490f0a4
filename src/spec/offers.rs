//! Declarative trader offers
//!
//! An offer file lists offers to append to trader tables after the
//! generation pass. Each entry drives one `AssortmentBuilder` from start
//! to commit.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{GenerationError, Result};

/// One offer on one trader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferSpec {
    #[serde(rename = "TraderToUse")]
    pub trader: String,
    /// Literal template id or item alias
    #[serde(rename = "ItemToSell")]
    pub item: String,
    #[serde(rename = "StackCount", default, skip_serializing_if = "Option::is_none")]
    pub stack_count: Option<u32>,
    /// Flag the stack as unlimited; wins over `StackCount`
    #[serde(rename = "Unlimited", default)]
    pub unlimited: bool,
    #[serde(rename = "BuyRestriction", default, skip_serializing_if = "Option::is_none")]
    pub buy_restriction: Option<u32>,
    #[serde(rename = "LoyaltyLevel", default, skip_serializing_if = "Option::is_none")]
    pub loyalty_level: Option<u32>,
    #[serde(rename = "Money", default, skip_serializing_if = "Option::is_none")]
    pub money: Option<MoneyCost>,
    #[serde(rename = "Barters", default, skip_serializing_if = "Vec::is_empty")]
    pub barters: Vec<BarterSpec>,
    #[serde(rename = "BlockDuplicates", default = "default_block_duplicates")]
    pub block_duplicates: bool,
}

fn default_block_duplicates() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoneyCost {
    /// `RUB`, `USD` or `EUR`
    #[serde(rename = "Currency")]
    pub currency: String,
    #[serde(rename = "Amount")]
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarterSpec {
    /// Literal template id or item alias
    #[serde(rename = "Item")]
    pub item: String,
    #[serde(rename = "Count")]
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OfferFile {
    #[serde(rename = "Offers", default)]
    pub offers: Vec<OfferSpec>,
}

impl OfferFile {
    /// Parse an offer file by extension (`.json` or `.toml`)
    pub fn load(path: &Path) -> Result<Self> {
        let malformed = |message: String| GenerationError::MalformedSpec {
            path: path.to_path_buf(),
            message,
        };

        let content = std::fs::read_to_string(path).map_err(|e| malformed(e.to_string()))?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&content).map_err(|e| malformed(e.to_string())),
            Some("toml") => toml::from_str(&content).map_err(|e| malformed(e.to_string())),
            _ => Err(malformed("unsupported offer file extension".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const OFFERS_TOML: &str = r#"
[[Offers]]
TraderToUse = "trader_1"
ItemToSell = "ammo_9mm"
StackCount = 50
Money = { Currency = "RUB", Amount = 500 }

[[Offers]]
TraderToUse = "trader_2"
ItemToSell = "vest_tpl"
BlockDuplicates = false
Barters = [ { Item = "ammo_9mm", Count = 30 } ]
"#;

    #[test]
    fn test_load_toml_offers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("offers.toml");
        fs::write(&path, OFFERS_TOML).unwrap();

        let file = OfferFile::load(&path).unwrap();
        assert_eq!(file.offers.len(), 2);
        assert_eq!(file.offers[0].stack_count, Some(50));
        assert!(file.offers[0].block_duplicates);
        assert_eq!(file.offers[0].money.as_ref().unwrap().amount, 500);
        assert!(!file.offers[1].block_duplicates);
        assert_eq!(file.offers[1].barters[0].count, 30);
    }

    #[test]
    fn test_unsupported_extension_is_malformed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("offers.yaml");
        fs::write(&path, "Offers: []").unwrap();

        assert!(matches!(
            OfferFile::load(&path),
            Err(GenerationError::MalformedSpec { .. })
        ));
    }
}
