//! Clone-and-propagate generation pass
//!
//! `ItemGenerator` drives one pass over a borrowed catalog: every spec is
//! resolved against its template, materialized, propagated directive by
//! directive and, for preset categories, given an auto-assembled preset.
//! Directives are best-effort; a missing target is logged and recorded in
//! the report while the spec's other directives still run. Nothing is
//! rolled back when a later step of the same spec fails.

pub mod clothing;
pub mod grids;
pub mod materializer;
pub mod presets;
pub mod propagation;
pub mod report;
pub mod resolver;

use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub use materializer::{materialize, MaterializedEntity};
pub use report::{DirectiveReport, GenerationReport, OfferReport, SpecReport};
pub use resolver::AliasTable;

use crate::assort::{AssortmentBuilder, CommitOutcome};
use crate::catalog::{Catalog, FilterSet};
use crate::core::config::GeneratorConfig;
use crate::core::error::{GenerationError, Result};
use crate::core::types::Currency;
use crate::services::{IdGenerator, PricingBlacklist, RandomPicker, RngPicker, UuidIds};
use crate::spec::{
    DirectiveKind, NewEntitySpec, OfferSpec, OutfitBottomSpec, OutfitTopSpec, SpecLoader, SpecSet,
};

pub struct ItemGenerator {
    config: GeneratorConfig,
    aliases: AliasTable,
    ids: Box<dyn IdGenerator>,
    picker: Box<dyn RandomPicker>,
}

impl ItemGenerator {
    /// Generator with uuid-backed ids and an entropy-seeded picker
    pub fn new(config: GeneratorConfig) -> Self {
        let aliases = AliasTable::with_config(&config.aliases);
        Self {
            config,
            aliases,
            ids: Box::new(UuidIds),
            picker: Box::new(RngPicker::new(StdRng::from_entropy())),
        }
    }

    pub fn with_ids(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn with_picker(mut self, picker: impl RandomPicker + 'static) -> Self {
        self.picker = Box::new(picker);
        self
    }

    /// Deterministic preset assembly
    pub fn with_seed(self, seed: u64) -> Self {
        self.with_picker(RngPicker::new(ChaCha8Rng::seed_from_u64(seed)))
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn aliases_mut(&mut self) -> &mut AliasTable {
        &mut self.aliases
    }

    /// Load every spec fragment under `spec_dir` and apply them in order
    pub fn generate_entities(
        &mut self,
        catalog: &mut Catalog,
        blacklist: &mut dyn PricingBlacklist,
        spec_dir: &Path,
    ) -> Result<GenerationReport> {
        let set = SpecLoader::new(self.config.duplicate_policy).load_directory(spec_dir)?;
        Ok(self.generate_from_specs(catalog, blacklist, set))
    }

    /// Apply already-loaded specs in declaration order
    pub fn generate_from_specs(
        &mut self,
        catalog: &mut Catalog,
        blacklist: &mut dyn PricingBlacklist,
        set: SpecSet,
    ) -> GenerationReport {
        let mut report = GenerationReport::default();
        for (id, spec) in &set.specs {
            report.specs.push(self.apply_spec(catalog, blacklist, id, spec));
        }
        report.rejected_fragments = set.rejected;

        tracing::info!(
            "Generated {}/{} entities ({} directives skipped, {} fragments rejected)",
            report.generated(),
            report.specs.len(),
            report.skipped_directives(),
            report.rejected_fragments.len()
        );
        report
    }

    /// Apply one spec. Failures are recorded in the returned report.
    pub fn apply_spec(
        &mut self,
        catalog: &mut Catalog,
        blacklist: &mut dyn PricingBlacklist,
        new_id: &str,
        spec: &NewEntitySpec,
    ) -> SpecReport {
        let mut report = SpecReport::new(new_id);
        if let Err(e) = self.run_spec(catalog, blacklist, new_id, spec, &mut report) {
            tracing::error!("Failed to generate {}: {}", new_id, e);
            report.error = Some(e);
        }
        report
    }

    fn run_spec(
        &mut self,
        catalog: &mut Catalog,
        blacklist: &mut dyn PricingBlacklist,
        new_id: &str,
        spec: &NewEntitySpec,
        report: &mut SpecReport,
    ) -> Result<()> {
        let template = self
            .aliases
            .resolve_template(catalog, &spec.item_to_clone)?
            .clone();
        report.template = Some(template.id.clone());

        let default_filter = self.default_case_filter();
        let grids = spec
            .grid_layout
            .as_ref()
            .map(|layout| grids::build_grids(self.ids.as_mut(), new_id, layout, &default_filter));

        let entity = materialize(
            catalog,
            &self.aliases,
            &self.config.fallback_locale,
            new_id,
            spec,
            &template,
            grids,
        )?;
        let name = spec.display_name(&self.config.fallback_locale, new_id).to_string();

        for kind in spec.enabled_directives() {
            for directive in self.run_directive(kind, catalog, blacklist, new_id, &template.id, &name, spec) {
                let target = directive.target.as_deref().unwrap_or("-");
                match &directive.outcome {
                    Ok(inserted) => {
                        tracing::debug!("{} {} [{}]: {} insertions", new_id, kind, target, inserted)
                    }
                    Err(e) => tracing::warn!("{} {} skipped: {}", new_id, kind, e),
                }
                report.directives.push(directive);
            }
        }

        let wants_preset = spec.auto_preset.unwrap_or_else(|| {
            self.config
                .preset_categories
                .iter()
                .any(|category| *category == entity.item.parent)
        });
        if wants_preset {
            let preset_id = presets::build_generated_preset(
                catalog,
                self.ids.as_mut(),
                self.picker.as_mut(),
                new_id,
                &name,
                &self.config.preset_excluded_slot,
            )?;
            report.directives.push(DirectiveReport::new(
                DirectiveKind::GeneratedPreset,
                Some(preset_id.clone()),
                Ok(1),
            ));
            report.generated_preset = Some(preset_id);
        }

        tracing::info!(
            "Generated {} ({}) from {}",
            new_id,
            name,
            template.id
        );
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn run_directive(
        &self,
        kind: DirectiveKind,
        catalog: &mut Catalog,
        blacklist: &mut dyn PricingBlacklist,
        new_id: &str,
        template_id: &str,
        name: &str,
        spec: &NewEntitySpec,
    ) -> Vec<DirectiveReport> {
        let single = |target: Option<String>, outcome: Result<usize>| {
            vec![DirectiveReport::new(kind, target, outcome)]
        };

        match kind {
            DirectiveKind::CloneToFilters => {
                single(None, Ok(propagation::clone_to_filters(catalog, template_id, new_id)))
            }
            DirectiveKind::Mastery => {
                let levels = (self.config.mastery_level2, self.config.mastery_level3);
                single(
                    None,
                    Ok(propagation::push_mastery(catalog, template_id, new_id, name, levels)),
                )
            }
            DirectiveKind::BotLoot => single(None, propagation::add_to_bots(catalog, template_id, new_id)),
            DirectiveKind::StaticLoot => match &spec.loot_push {
                Some(loot) => loot
                    .containers
                    .iter()
                    .map(|reference| {
                        let container = self.aliases.item(reference);
                        DirectiveReport::new(
                            kind,
                            Some(container.to_string()),
                            propagation::add_to_static_loot(catalog, container, new_id, loot.probability),
                        )
                    })
                    .collect(),
                None => Vec::new(),
            },
            DirectiveKind::CaseFilter => match &spec.case_push {
                Some(cases) => {
                    let default_filter = self.default_case_filter();
                    cases
                        .cases
                        .to_vec()
                        .into_iter()
                        .map(|reference| {
                            let case_id = self.aliases.item(reference);
                            DirectiveReport::new(
                                kind,
                                Some(case_id.to_string()),
                                propagation::add_to_case(catalog, case_id, new_id, &default_filter),
                            )
                        })
                        .collect()
                }
                None => Vec::new(),
            },
            DirectiveKind::MarketBlacklist => {
                single(None, Ok(propagation::push_to_blacklist(blacklist, new_id)))
            }
            DirectiveKind::DefaultSlot => match &spec.slot_push {
                Some(push) => single(
                    Some(push.slot.to_string()),
                    propagation::push_to_slot(
                        catalog,
                        &self.aliases,
                        &self.config.default_inventory_id,
                        &push.slot,
                        new_id,
                    ),
                ),
                None => Vec::new(),
            },
            DirectiveKind::ExplicitPresets => match &spec.preset_push {
                Some(push) => single(None, Ok(presets::add_explicit_presets(catalog, &push.presets))),
                None => Vec::new(),
            },
            DirectiveKind::QuestTarget => match &spec.quest_push {
                Some(quest) => {
                    let legacy = self.aliases.item(&quest.legacy_target);
                    single(
                        Some(format!("{}:{}", quest.condition_type, legacy)),
                        propagation::add_to_quests(catalog, &quest.condition_type, legacy, new_id),
                    )
                }
                None => Vec::new(),
            },
            // Decided by category after the directives, never listed as enabled
            DirectiveKind::GeneratedPreset => Vec::new(),
        }
    }

    fn default_case_filter(&self) -> FilterSet {
        FilterSet::new(
            self.config.case_default_filter.clone(),
            self.config.case_default_excluded.clone(),
        )
    }

    /// Start an offer for `tpl` with a freshly generated instance id
    pub fn begin_assortment(&mut self, tpl: &str) -> AssortmentBuilder {
        let mut builder = AssortmentBuilder::with_stack_defaults(
            self.config.default_stack_count,
            self.config.unlimited_stack_count,
        );
        builder.start(tpl, self.ids.generate());
        builder
    }

    /// Build one declared offer and commit it to its trader
    ///
    /// An offer with neither money nor barters fails with `MissingPrice`.
    pub fn create_offer(&mut self, catalog: &mut Catalog, spec: &OfferSpec) -> Result<CommitOutcome> {
        let tpl = self.aliases.item(&spec.item).to_string();
        if !catalog.contains_item(&tpl) {
            return Err(GenerationError::UnknownTemplate(tpl));
        }
        let currency = match &spec.money {
            Some(money) => Some((
                Currency::from_code(&money.currency).ok_or_else(|| {
                    GenerationError::InvalidOffer(format!("unknown currency {}", money.currency))
                })?,
                money.amount,
            )),
            None => None,
        };

        let mut builder = self.begin_assortment(&tpl);
        if spec.unlimited {
            builder.unlimited_stack_count();
        } else if let Some(count) = spec.stack_count {
            builder.stack_count(count);
        }
        if let Some(max) = spec.buy_restriction {
            builder.buy_restriction(max);
        }
        if let Some(level) = spec.loyalty_level {
            builder.loyalty_level(level);
        }
        if let Some((currency, amount)) = currency {
            builder.money_cost(currency, amount);
        }
        for barter in &spec.barters {
            builder.barter_cost(self.aliases.item(&barter.item), barter.count);
        }

        builder.commit_to_trader(catalog, &spec.trader, spec.block_duplicates)
    }

    /// Apply every declared offer in order; one failure never stops the rest
    pub fn create_offers(&mut self, catalog: &mut Catalog, specs: &[OfferSpec]) -> Vec<OfferReport> {
        specs
            .iter()
            .map(|spec| {
                let outcome = self.create_offer(catalog, spec);
                if let Err(e) = &outcome {
                    tracing::warn!("Offer of {} on {} not committed: {}", spec.item, spec.trader, e);
                }
                OfferReport {
                    trader: spec.trader.clone(),
                    item: spec.item.clone(),
                    outcome,
                }
            })
            .collect()
    }

    pub fn create_clothing_top(&self, catalog: &mut Catalog, spec: &OutfitTopSpec) -> Result<()> {
        clothing::create_clothing_top(catalog, &self.config.outfits, &self.aliases, spec)
    }

    pub fn create_clothing_bottom(&self, catalog: &mut Catalog, spec: &OutfitBottomSpec) -> Result<()> {
        clothing::create_clothing_bottom(catalog, &self.config.outfits, &self.aliases, spec)
    }
}
