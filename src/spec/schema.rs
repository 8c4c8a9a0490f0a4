//! Author-facing schema of new-entity specs
//!
//! Field names follow the fragment format authors already write
//! (`ItemToClone`, `OverrideProperties`, `LocalePush`, …).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::types::ItemId;

/// One new catalog entity, cloned from a template and wired into the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEntitySpec {
    /// Literal template id or alias name
    #[serde(rename = "ItemToClone")]
    pub item_to_clone: String,
    #[serde(rename = "OverrideProperties", default)]
    pub override_properties: Map<String, Value>,
    /// Language code → strings
    #[serde(rename = "LocalePush", default)]
    pub locale_push: IndexMap<String, LocaleStrings>,
    #[serde(rename = "Handbook", default, skip_serializing_if = "Option::is_none")]
    pub handbook: Option<HandbookOverride>,
    #[serde(rename = "GridLayout", default, skip_serializing_if = "Option::is_none")]
    pub grid_layout: Option<GridLayout>,

    #[serde(rename = "CloneToFilters", default)]
    pub clone_to_filters: bool,
    #[serde(rename = "PushMastery", default)]
    pub push_mastery: bool,
    #[serde(rename = "BotPush", default, skip_serializing_if = "Option::is_none")]
    pub bot_push: Option<BotPush>,
    #[serde(rename = "LootPush", default, skip_serializing_if = "Option::is_none")]
    pub loot_push: Option<LootPush>,
    #[serde(rename = "CasePush", default, skip_serializing_if = "Option::is_none")]
    pub case_push: Option<CasePush>,
    #[serde(rename = "PushToFleaBlacklist", default)]
    pub push_to_flea_blacklist: bool,
    #[serde(rename = "SlotPush", default, skip_serializing_if = "Option::is_none")]
    pub slot_push: Option<SlotPush>,
    #[serde(rename = "QuestPush", default, skip_serializing_if = "Option::is_none")]
    pub quest_push: Option<QuestPush>,
    #[serde(rename = "PresetPush", default, skip_serializing_if = "Option::is_none")]
    pub preset_push: Option<PresetPush>,
    /// Opt out of the auto-assembled preset for weapon-like clones
    #[serde(rename = "AutoPreset", default, skip_serializing_if = "Option::is_none")]
    pub auto_preset: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleStrings {
    pub name: String,
    #[serde(rename = "shortName", default)]
    pub short_name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandbookOverride {
    /// Handbook category id or alias
    #[serde(rename = "HandbookParent")]
    pub parent: String,
    #[serde(rename = "HandbookPrice")]
    pub price: u64,
}

/// Container cell layout: one grid per column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLayout {
    #[serde(rename = "CellsH")]
    pub cells_h: Vec<u32>,
    #[serde(rename = "CellsV")]
    pub cells_v: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotPush {
    #[serde(rename = "AddToBots", default)]
    pub add_to_bots: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootPush {
    /// Static container ids or aliases
    #[serde(rename = "LootContainersToAdd")]
    pub containers: Vec<String>,
    #[serde(rename = "StaticLootProbability")]
    pub probability: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CasePush {
    #[serde(rename = "CaseFiltersToAdd")]
    pub cases: OneOrMany,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn to_vec(&self) -> Vec<&str> {
        match self {
            OneOrMany::One(id) => vec![id.as_str()],
            OneOrMany::Many(ids) => ids.iter().map(String::as_str).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotPush {
    #[serde(rename = "Slot")]
    pub slot: SlotRef,
}

/// A default-inventory slot by position or by name/alias
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlotRef {
    Index(usize),
    Name(String),
}

impl std::fmt::Display for SlotRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotRef::Index(i) => write!(f, "#{}", i),
            SlotRef::Name(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestPush {
    #[serde(rename = "QuestConditionType")]
    pub condition_type: String,
    /// Existing target whose conditions should also accept the new id
    #[serde(rename = "QuestTargetConditionToClone")]
    pub legacy_target: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetPush {
    #[serde(rename = "PresetToAdd")]
    pub presets: Vec<PresetSpec>,
}

/// Author-supplied preset; unknown fields are accepted and dropped on insert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetSpec {
    #[serde(rename = "_changeWeaponName", default)]
    pub change_weapon_name: bool,
    #[serde(rename = "_encyclopedia", default)]
    pub encyclopedia: Option<ItemId>,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_items")]
    pub items: Vec<PresetItemSpec>,
    #[serde(rename = "_name")]
    pub name: String,
    #[serde(rename = "_parent")]
    pub parent: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetItemSpec {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_tpl")]
    pub tpl: ItemId,
    #[serde(rename = "parentId", default)]
    pub parent_id: Option<String>,
    #[serde(rename = "slotId", default)]
    pub slot_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The propagation and preset steps a spec can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    CloneToFilters,
    Mastery,
    BotLoot,
    StaticLoot,
    CaseFilter,
    MarketBlacklist,
    DefaultSlot,
    ExplicitPresets,
    QuestTarget,
    GeneratedPreset,
}

impl DirectiveKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DirectiveKind::CloneToFilters => "clone_to_filters",
            DirectiveKind::Mastery => "mastery",
            DirectiveKind::BotLoot => "bot_loot",
            DirectiveKind::StaticLoot => "static_loot",
            DirectiveKind::CaseFilter => "case_filter",
            DirectiveKind::MarketBlacklist => "market_blacklist",
            DirectiveKind::DefaultSlot => "default_slot",
            DirectiveKind::ExplicitPresets => "explicit_presets",
            DirectiveKind::QuestTarget => "quest_target",
            DirectiveKind::GeneratedPreset => "generated_preset",
        }
    }
}

impl std::fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl NewEntitySpec {
    /// Minimal spec: clone `template` with an English name
    pub fn new(template: impl Into<String>, name: impl Into<String>) -> Self {
        let mut locale_push = IndexMap::new();
        locale_push.insert(
            "en".to_string(),
            LocaleStrings {
                name: name.into(),
                ..LocaleStrings::default()
            },
        );
        Self {
            item_to_clone: template.into(),
            override_properties: Map::new(),
            locale_push,
            handbook: None,
            grid_layout: None,
            clone_to_filters: false,
            push_mastery: false,
            bot_push: None,
            loot_push: None,
            case_push: None,
            push_to_flea_blacklist: false,
            slot_push: None,
            quest_push: None,
            preset_push: None,
            auto_preset: None,
        }
    }

    /// Strings for `language`, falling back to `fallback`, then to any entry
    pub fn locale_for(&self, language: &str, fallback: &str) -> Option<&LocaleStrings> {
        self.locale_push
            .get(language)
            .or_else(|| self.locale_push.get(fallback))
            .or_else(|| self.locale_push.values().next())
    }

    pub fn display_name<'a>(&'a self, fallback: &str, id: &'a str) -> &'a str {
        self.locale_for(fallback, fallback)
            .map(|l| l.name.as_str())
            .unwrap_or(id)
    }

    /// Propagation directives switched on, in application order
    ///
    /// The generated preset is not listed: it depends on the clone's category.
    pub fn enabled_directives(&self) -> Vec<DirectiveKind> {
        let mut kinds = Vec::new();
        if self.clone_to_filters {
            kinds.push(DirectiveKind::CloneToFilters);
        }
        if self.push_mastery {
            kinds.push(DirectiveKind::Mastery);
        }
        if self.bot_push.map_or(false, |b| b.add_to_bots) {
            kinds.push(DirectiveKind::BotLoot);
        }
        if self.loot_push.is_some() {
            kinds.push(DirectiveKind::StaticLoot);
        }
        if self.case_push.is_some() {
            kinds.push(DirectiveKind::CaseFilter);
        }
        if self.push_to_flea_blacklist {
            kinds.push(DirectiveKind::MarketBlacklist);
        }
        if self.slot_push.is_some() {
            kinds.push(DirectiveKind::DefaultSlot);
        }
        if self.preset_push.is_some() {
            kinds.push(DirectiveKind::ExplicitPresets);
        }
        if self.quest_push.is_some() {
            kinds.push(DirectiveKind::QuestTarget);
        }
        kinds
    }
}

/// A cloned clothing top (body + hands + suite)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutfitTopSpec {
    #[serde(rename = "NewOutfitID")]
    pub outfit_id: String,
    #[serde(rename = "NewHandsID")]
    pub hands_id: String,
    #[serde(rename = "NewSetID")]
    pub set_id: String,
    #[serde(rename = "HandsToClone")]
    pub hands_to_clone: String,
    #[serde(rename = "LocaleName")]
    pub locale_name: String,
    #[serde(rename = "BundlePath")]
    pub bundle_path: String,
    #[serde(rename = "HandsBundlePath")]
    pub hands_bundle_path: String,
    #[serde(rename = "TraderScheme", default)]
    pub trader_scheme: Option<SuitScheme>,
}

/// A cloned clothing bottom (feet + suite)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutfitBottomSpec {
    #[serde(rename = "NewBottomsID")]
    pub bottoms_id: String,
    #[serde(rename = "NewSetID")]
    pub set_id: String,
    #[serde(rename = "LocaleName")]
    pub locale_name: String,
    #[serde(rename = "BundlePath")]
    pub bundle_path: String,
    #[serde(rename = "TraderScheme", default)]
    pub trader_scheme: Option<SuitScheme>,
}

/// How a trader sells a generated suite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuitScheme {
    #[serde(rename = "TraderToUse")]
    pub trader: String,
    #[serde(rename = "LoyaltyLevel", default)]
    pub loyalty_level: u32,
    #[serde(rename = "ProfileLevelRequirement", default)]
    pub profile_level: u32,
    #[serde(rename = "TraderStandingRequirement", default)]
    pub standing: f64,
    #[serde(rename = "Cost")]
    pub cost: u64,
    /// Currency item id (or item alias)
    #[serde(rename = "CurrencyToUse")]
    pub currency: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_full_spec() {
        let spec: NewEntitySpec = serde_json::from_value(json!({
            "ItemToClone": "KappaSC",
            "OverrideProperties": { "Weight": 0.1 },
            "LocalePush": { "en": { "name": "Onyx", "shortName": "ONX", "description": "Rare." } },
            "Handbook": { "HandbookParent": "SecureContainers", "HandbookPrice": 12999999 },
            "CasePush": { "CaseFiltersToAdd": "ThiccItemCase" },
            "LootPush": { "LootContainersToAdd": ["Jacket"], "StaticLootProbability": 5 },
            "SlotPush": { "Slot": 7 },
            "PushToFleaBlacklist": true
        }))
        .unwrap();

        assert_eq!(spec.case_push.as_ref().unwrap().cases.to_vec(), vec!["ThiccItemCase"]);
        assert_eq!(spec.slot_push.as_ref().unwrap().slot, SlotRef::Index(7));
        assert_eq!(
            spec.enabled_directives(),
            vec![
                DirectiveKind::StaticLoot,
                DirectiveKind::CaseFilter,
                DirectiveKind::MarketBlacklist,
                DirectiveKind::DefaultSlot,
            ]
        );
    }

    #[test]
    fn test_locale_fallback() {
        let spec = NewEntitySpec::new("tpl", "Thing");
        assert_eq!(spec.locale_for("de", "en").unwrap().name, "Thing");
        assert_eq!(spec.display_name("en", "id"), "Thing");
    }

    #[test]
    fn test_bot_push_false_is_not_enabled() {
        let mut spec = NewEntitySpec::new("tpl", "Thing");
        spec.bot_push = Some(BotPush { add_to_bots: false });
        assert!(spec.enabled_directives().is_empty());
    }
}
