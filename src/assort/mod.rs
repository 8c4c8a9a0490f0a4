//! Trader offer construction
//!
//! An offer is built up one setter at a time and then committed to a
//! trader's offer table in a single step.

pub mod builder;

pub use builder::{AssortmentBuilder, CommitOutcome, OfferState};
