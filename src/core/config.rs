//! Generator configuration with documented constants
//!
//! Every well-known id and threshold the generator relies on lives here so a
//! host can retarget it at a different data set through a TOML file.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{GenerationError, Result};
use super::types::{DEFAULT_INVENTORY_ID, ITEM_BASE_ID, MONEY_BASE_ID};

/// What to do when two spec fragments declare the same new id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail the load with `DuplicateEntityId`
    #[default]
    Reject,
    /// Later fragment (in sorted path order) replaces the earlier one
    LastWriteWins,
}

/// Configuration for a generation pass
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    // === PROPAGATION TARGETS ===
    /// Root inventory record whose slots `SlotPush` writes into
    pub default_inventory_id: String,

    /// Filter installed into a container grid that has none
    pub case_default_filter: Vec<String>,

    /// Excluded filter installed alongside `case_default_filter`
    pub case_default_excluded: Vec<String>,

    // === MASTERY ===
    /// XP needed for mastery level 2 when the template has no mastery entry
    pub mastery_level2: u32,

    /// XP needed for mastery level 3 when the template has no mastery entry
    pub mastery_level3: u32,

    // === PRESETS ===
    /// Parent categories whose clones get an auto-assembled preset
    ///
    /// Defaults are headwear, vests and armored equipment: the clones that
    /// carry plate/attachment slots.
    pub preset_categories: Vec<String>,

    /// Slot name never filled by auto-assembled presets
    pub preset_excluded_slot: String,

    // === SPEC LOADING ===
    pub duplicate_policy: DuplicatePolicy,

    /// Language whose strings are used for languages a spec does not cover
    pub fallback_locale: String,

    // === ASSORTMENT ===
    /// Stack size of a freshly started offer
    pub default_stack_count: u32,

    /// Stack size written for "unlimited" offers
    pub unlimited_stack_count: u32,

    // === OUTFITS ===
    pub outfits: OutfitBases,

    // === ALIASES ===
    pub aliases: AliasConfig,
}

/// Customization records cloned by the outfit generator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutfitBases {
    pub top: String,
    pub top_suite: String,
    pub bottom: String,
    pub bottom_suite: String,
    /// Sides a generated suite is available to
    pub sides: Vec<String>,
}

impl Default for OutfitBases {
    fn default() -> Self {
        Self {
            top: "5d28adcb86f77429242fc893".into(),
            top_suite: "5d1f623e86f7744bce0ef705".into(),
            bottom: "5d5e7f4986f7746956659f8a".into(),
            bottom_suite: "5cd946231388ce000d572fe3".into(),
            sides: vec!["Usec".into(), "Bear".into(), "Savage".into()],
        }
    }
}

/// Extra alias entries merged over the built-in tables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AliasConfig {
    pub items: HashMap<String, String>,
    pub handbook: HashMap<String, String>,
    pub slots: HashMap<String, usize>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            default_inventory_id: DEFAULT_INVENTORY_ID.into(),
            case_default_filter: vec![ITEM_BASE_ID.into()],
            case_default_excluded: vec![MONEY_BASE_ID.into()],

            mastery_level2: 450,
            mastery_level3: 900,

            preset_categories: vec![
                "5a341c4086f77401f2541505".into(),
                "5448e5284bdc2dcb718b4567".into(),
                "5448e54d4bdc2dcc718b4568".into(),
            ],
            preset_excluded_slot: "mod_nvg".into(),

            duplicate_policy: DuplicatePolicy::Reject,
            fallback_locale: "en".into(),

            default_stack_count: 100,
            unlimited_stack_count: 999_999,

            outfits: OutfitBases::default(),
            aliases: AliasConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) TOML config; missing keys keep defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GeneratorConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.mastery_level2 >= self.mastery_level3 {
            return Err(GenerationError::Config(format!(
                "mastery_level2 ({}) should be < mastery_level3 ({})",
                self.mastery_level2, self.mastery_level3
            )));
        }

        if self.case_default_filter.is_empty() {
            return Err(GenerationError::Config(
                "case_default_filter must not be empty".into(),
            ));
        }

        if self.default_stack_count == 0 || self.unlimited_stack_count < self.default_stack_count {
            return Err(GenerationError::Config(format!(
                "stack counts out of order: default {} / unlimited {}",
                self.default_stack_count, self.unlimited_stack_count
            )));
        }

        if self.fallback_locale.is_empty() {
            return Err(GenerationError::Config("fallback_locale must be set".into()));
        }

        Ok(())
    }
}
