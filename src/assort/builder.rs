//! Stateful builder for a single trader offer
//!
//! `Idle → Started → Priced → (commit) → Idle`. Setters only touch the
//! pending offer; a setter called while idle is logged and ignored.

use crate::catalog::{BarterCost, Catalog, ItemInstance, ItemUpd, TraderAssort};
use crate::core::error::{GenerationError, Result};
use serde_json::Number;

use crate::core::types::{add_numbers, Currency, ItemId, ASSORT_ROOT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferState {
    Idle,
    Started,
    Priced,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed { instance_id: String },
    /// The trader already lists this instance id or template; nothing was written
    Duplicate { instance_id: String, tpl: ItemId },
}

#[derive(Debug, Clone, PartialEq)]
struct PendingOffer {
    /// Root first, then any attached children. Never empty.
    items: Vec<ItemInstance>,
    scheme: Vec<BarterCost>,
    loyalty_level: u32,
}

impl PendingOffer {
    fn root(&self) -> &ItemInstance {
        &self.items[0]
    }

    fn root_upd(&mut self) -> &mut ItemUpd {
        self.items[0].upd.get_or_insert_with(ItemUpd::default)
    }
}

#[derive(Debug, Clone)]
pub struct AssortmentBuilder {
    pending: Option<PendingOffer>,
    default_stack_count: u32,
    unlimited_stack_count: u32,
}

impl Default for AssortmentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AssortmentBuilder {
    pub fn new() -> Self {
        Self::with_stack_defaults(100, 999_999)
    }

    pub fn with_stack_defaults(default_stack_count: u32, unlimited_stack_count: u32) -> Self {
        Self {
            pending: None,
            default_stack_count,
            unlimited_stack_count,
        }
    }

    pub fn state(&self) -> OfferState {
        match &self.pending {
            None => OfferState::Idle,
            Some(offer) if offer.scheme.is_empty() => OfferState::Started,
            Some(_) => OfferState::Priced,
        }
    }

    /// Instance id of the pending offer's root item
    pub fn instance_id(&self) -> Option<&str> {
        self.pending.as_ref().map(|offer| offer.root().id.as_str())
    }

    /// Begin an offer for a single item. Any pending offer is discarded.
    pub fn start(&mut self, tpl: &str, instance_id: impl Into<String>) -> &mut Self {
        let mut root = ItemInstance::child(instance_id, tpl, ASSORT_ROOT, ASSORT_ROOT);
        root.upd = Some(self.default_upd());
        self.replace_pending(vec![root]);
        self
    }

    /// Begin an offer for a pre-assembled item tree whose first element is the root
    pub fn start_complex(&mut self, mut items: Vec<ItemInstance>) -> Result<&mut Self> {
        let Some(root) = items.first_mut() else {
            return Err(GenerationError::InvalidOffer("item tree is empty".into()));
        };
        root.parent_id = Some(ASSORT_ROOT.to_string());
        root.slot_id = Some(ASSORT_ROOT.to_string());
        let upd = root.upd.get_or_insert_with(ItemUpd::default);
        upd.unlimited_count = Some(false);
        upd.stack_objects_count = Some(self.default_stack_count);

        self.replace_pending(items);
        Ok(self)
    }

    pub fn stack_count(&mut self, count: u32) -> &mut Self {
        self.with_pending("stack_count", |offer| {
            offer.root_upd().stack_objects_count = Some(count);
        })
    }

    /// Large stack flagged as unlimited
    pub fn unlimited_stack_count(&mut self) -> &mut Self {
        let count = self.unlimited_stack_count;
        self.with_pending("unlimited_stack_count", |offer| {
            let upd = offer.root_upd();
            upd.stack_objects_count = Some(count);
            upd.unlimited_count = Some(true);
        })
    }

    /// Large stack without the unlimited flag
    pub fn make_stack_count_unlimited(&mut self) -> &mut Self {
        let count = self.unlimited_stack_count;
        self.with_pending("make_stack_count_unlimited", |offer| {
            offer.root_upd().stack_objects_count = Some(count);
        })
    }

    pub fn buy_restriction(&mut self, max: u32) -> &mut Self {
        self.with_pending("buy_restriction", |offer| {
            let upd = offer.root_upd();
            upd.buy_restriction_max = Some(max);
            upd.buy_restriction_current = Some(0);
        })
    }

    pub fn loyalty_level(&mut self, level: u32) -> &mut Self {
        self.with_pending("loyalty_level", |offer| offer.loyalty_level = level)
    }

    /// Replace the payment scheme with a single currency cost
    pub fn money_cost(&mut self, currency: Currency, amount: u64) -> &mut Self {
        self.with_pending("money_cost", |offer| {
            offer.scheme = vec![BarterCost::new(currency.tpl(), amount)];
        })
    }

    /// Add a barter requirement, merging counts for the same template
    pub fn barter_cost(&mut self, tpl: &str, count: u64) -> &mut Self {
        self.with_pending("barter_cost", |offer| {
            match offer.scheme.iter_mut().find(|cost| cost.tpl == tpl) {
                Some(existing) => existing.count = add_numbers(&existing.count, &Number::from(count)),
                None => offer.scheme.push(BarterCost::new(tpl, count)),
            }
        })
    }

    /// Append the pending offer to `assort`
    ///
    /// An unpriced offer stays pending. Every other outcome resets the
    /// builder to idle.
    pub fn commit(&mut self, assort: &mut TraderAssort, block_duplicates: bool) -> Result<CommitOutcome> {
        match &self.pending {
            None => return Err(GenerationError::NoPendingOffer),
            Some(offer) if offer.scheme.is_empty() => {
                return Err(GenerationError::MissingPrice(offer.root().id.clone()))
            }
            Some(_) => {}
        }
        let Some(offer) = self.pending.take() else {
            return Err(GenerationError::NoPendingOffer);
        };

        let instance_id = offer.root().id.clone();
        let tpl = offer.root().tpl.clone();
        if block_duplicates && (assort.has_instance(&instance_id) || assort.offers_template(&tpl)) {
            tracing::warn!("Trader already offers {} ({}), skipping", tpl, instance_id);
            return Ok(CommitOutcome::Duplicate { instance_id, tpl });
        }

        assort.items.extend(offer.items);
        assort.barter_scheme.insert(instance_id.clone(), vec![offer.scheme]);
        assort.loyal_level_items.insert(instance_id.clone(), offer.loyalty_level);
        tracing::debug!("Committed offer {} for {}", instance_id, tpl);

        Ok(CommitOutcome::Committed { instance_id })
    }

    /// Commit into a trader's offer table, creating the table if the trader has none
    pub fn commit_to_trader(
        &mut self,
        catalog: &mut Catalog,
        trader_id: &str,
        block_duplicates: bool,
    ) -> Result<CommitOutcome> {
        let trader = catalog
            .trader_mut(trader_id)
            .ok_or_else(|| GenerationError::target_missing("assortment", trader_id))?;
        let assort = trader.assort.get_or_insert_with(TraderAssort::default);
        self.commit(assort, block_duplicates)
    }

    fn default_upd(&self) -> ItemUpd {
        ItemUpd {
            stack_objects_count: Some(self.default_stack_count),
            unlimited_count: Some(false),
            ..ItemUpd::default()
        }
    }

    fn replace_pending(&mut self, items: Vec<ItemInstance>) {
        if let Some(previous) = self.pending.take() {
            tracing::warn!("Discarding uncommitted offer {}", previous.root().id);
        }
        self.pending = Some(PendingOffer {
            items,
            scheme: Vec::new(),
            loyalty_level: 1,
        });
    }

    fn with_pending(&mut self, setter: &str, apply: impl FnOnce(&mut PendingOffer)) -> &mut Self {
        match self.pending.as_mut() {
            Some(offer) => apply(offer),
            None => tracing::warn!("{} called with no pending offer", setter),
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn priced(builder: &mut AssortmentBuilder, tpl: &str, id: &str) {
        builder.start(tpl, id).money_cost(Currency::Roubles, 1000);
    }

    #[test]
    fn test_state_transitions() {
        let mut builder = AssortmentBuilder::new();
        assert_eq!(builder.state(), OfferState::Idle);

        builder.start("ammo_9mm", "offer1");
        assert_eq!(builder.state(), OfferState::Started);

        builder.money_cost(Currency::Dollars, 12);
        assert_eq!(builder.state(), OfferState::Priced);

        let mut assort = TraderAssort::default();
        builder.commit(&mut assort, true).unwrap();
        assert_eq!(builder.state(), OfferState::Idle);
    }

    #[test]
    fn test_start_defaults() {
        let mut builder = AssortmentBuilder::new();
        builder.start("ammo_9mm", "offer1");
        let offer = builder.pending.as_ref().unwrap();
        let root = offer.root();

        assert_eq!(root.parent_id.as_deref(), Some("hideout"));
        assert_eq!(root.slot_id.as_deref(), Some("hideout"));
        let upd = root.upd.as_ref().unwrap();
        assert_eq!(upd.stack_objects_count, Some(100));
        assert_eq!(upd.unlimited_count, Some(false));
        assert_eq!(offer.loyalty_level, 1);
    }

    #[test]
    fn test_commit_without_price_keeps_offer() {
        let mut builder = AssortmentBuilder::new();
        builder.start("ammo_9mm", "offer1");

        let mut assort = TraderAssort::default();
        let err = builder.commit(&mut assort, true).unwrap_err();
        assert!(matches!(err, GenerationError::MissingPrice(id) if id == "offer1"));
        assert_eq!(builder.state(), OfferState::Started);
        assert!(assort.items.is_empty());
    }

    #[test]
    fn test_commit_while_idle() {
        let mut builder = AssortmentBuilder::new();
        let mut assort = TraderAssort::default();
        assert!(matches!(
            builder.commit(&mut assort, false),
            Err(GenerationError::NoPendingOffer)
        ));
    }

    #[test]
    fn test_setters_ignored_while_idle() {
        let mut builder = AssortmentBuilder::new();
        builder.stack_count(5).loyalty_level(3).money_cost(Currency::Euros, 1);
        assert_eq!(builder.state(), OfferState::Idle);
    }

    #[test]
    fn test_barter_cost_merges_same_template() {
        let mut builder = AssortmentBuilder::new();
        builder
            .start("vodka", "offer1")
            .barter_cost("bolts", 2)
            .barter_cost("nuts", 1)
            .barter_cost("bolts", 3);

        let scheme = &builder.pending.as_ref().unwrap().scheme;
        assert_eq!(scheme.len(), 2);
        assert_eq!(scheme[0].tpl, "bolts");
        assert_eq!(scheme[0].count.as_u64(), Some(5));
    }

    #[test]
    fn test_money_cost_replaces_scheme() {
        let mut builder = AssortmentBuilder::new();
        builder
            .start("vodka", "offer1")
            .barter_cost("bolts", 2)
            .money_cost(Currency::Roubles, 300);

        let scheme = &builder.pending.as_ref().unwrap().scheme;
        assert_eq!(scheme.len(), 1);
        assert_eq!(scheme[0].tpl, Currency::Roubles.tpl());
        assert_eq!(scheme[0].count.as_u64(), Some(300));
    }

    #[test]
    fn test_unlimited_stacks() {
        let mut builder = AssortmentBuilder::with_stack_defaults(10, 5000);
        builder.start("salt", "a").unlimited_stack_count();
        let upd = builder.pending.as_ref().unwrap().root().upd.clone().unwrap();
        assert_eq!(upd.stack_objects_count, Some(5000));
        assert_eq!(upd.unlimited_count, Some(true));

        builder.start("pepper", "b").make_stack_count_unlimited();
        let upd = builder.pending.as_ref().unwrap().root().upd.clone().unwrap();
        assert_eq!(upd.stack_objects_count, Some(5000));
        assert_eq!(upd.unlimited_count, Some(false));
    }

    #[test]
    fn test_buy_restriction() {
        let mut builder = AssortmentBuilder::new();
        builder.start("ledx", "a").buy_restriction(2);
        let upd = builder.pending.as_ref().unwrap().root().upd.clone().unwrap();
        assert_eq!(upd.buy_restriction_max, Some(2));
        assert_eq!(upd.buy_restriction_current, Some(0));
    }

    #[test]
    fn test_start_complex() {
        let items = vec![
            ItemInstance::new("root", "rifle"),
            ItemInstance::child("mag", "magazine", "root", "mod_magazine"),
        ];
        let mut builder = AssortmentBuilder::new();
        builder.start_complex(items).unwrap().money_cost(Currency::Roubles, 90_000);

        let mut assort = TraderAssort::default();
        let outcome = builder.commit(&mut assort, true).unwrap();
        assert_eq!(
            outcome,
            CommitOutcome::Committed {
                instance_id: "root".into()
            }
        );
        assert_eq!(assort.items.len(), 2);
        assert_eq!(assort.items[0].parent_id.as_deref(), Some("hideout"));
        assert_eq!(assort.items[1].parent_id.as_deref(), Some("root"));
        assert_eq!(assort.barter_scheme["root"][0][0].count.as_u64(), Some(90_000));
    }

    #[test]
    fn test_start_complex_rejects_empty_tree() {
        let mut builder = AssortmentBuilder::new();
        assert!(matches!(
            builder.start_complex(Vec::new()),
            Err(GenerationError::InvalidOffer(_))
        ));
    }

    #[test]
    fn test_duplicate_blocking() {
        let mut assort = TraderAssort::default();
        let mut builder = AssortmentBuilder::new();

        priced(&mut builder, "ammo_9mm", "a");
        builder.commit(&mut assort, true).unwrap();

        priced(&mut builder, "ammo_9mm", "b");
        let outcome = builder.commit(&mut assort, true).unwrap();
        assert!(matches!(outcome, CommitOutcome::Duplicate { .. }));
        assert_eq!(builder.state(), OfferState::Idle);
        assert_eq!(assort.items.len(), 1);

        priced(&mut builder, "ammo_9mm", "c");
        builder.commit(&mut assort, false).unwrap();
        assert_eq!(assort.items.len(), 2);
    }
}
