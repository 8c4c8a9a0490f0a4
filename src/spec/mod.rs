//! New-entity specs, offer files and fragment loading

pub mod loader;
pub mod offers;
pub mod schema;

pub use loader::{Fragment, SpecLoader, SpecSet};
pub use offers::{BarterSpec, MoneyCost, OfferFile, OfferSpec};
pub use schema::*;
