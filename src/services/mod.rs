//! Capability interfaces the generator calls out to
//!
//! Id generation, random picking and the market blacklist belong to the
//! host. Each comes with a default implementation usable outside a host.

pub mod blacklist;
pub mod ids;
pub mod picker;

pub use blacklist::{PricingBlacklist, RagfairBlacklist};
pub use ids::{IdGenerator, SequentialIds, UuidIds};
pub use picker::{RandomPicker, RngPicker};
