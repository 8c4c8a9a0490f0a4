//! Item Forge - clone-and-propagate catalog generation
//!
//! New entities are declared as small spec fragments. Each one is cloned
//! from an existing template and wired into every table that referenced
//! the template: compatibility filters, bot loadouts, static loot, cases,
//! quests, mastery and presets. Trader offers are assembled separately with
//! [`assort::AssortmentBuilder`].

pub mod assort;
pub mod catalog;
pub mod core;
pub mod generator;
pub mod services;
pub mod spec;
