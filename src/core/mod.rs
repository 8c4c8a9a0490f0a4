pub mod config;
pub mod error;
pub mod types;

pub use config::{DuplicatePolicy, GeneratorConfig};
pub use error::{GenerationError, Result};
