use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Malformed spec fragment {path}: {message}")]
    MalformedSpec { path: PathBuf, message: String },

    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("Duplicate entity id {id} (declared again in {path})")]
    DuplicateEntityId { id: String, path: PathBuf },

    #[error("Entity id already present in catalog: {0}")]
    IdCollision(String),

    #[error("No handbook entry for template {0} and no handbook override given")]
    MissingHandbookEntry(String),

    #[error("Propagation target missing for {directive}: {target}")]
    PropagationTargetMissing {
        directive: &'static str,
        target: String,
    },

    #[error("Offer {0} committed without a price")]
    MissingPrice(String),

    #[error("No pending offer to commit")]
    NoPendingOffer,

    #[error("Invalid offer: {0}")]
    InvalidOffer(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl GenerationError {
    /// True for errors that only skip one directive rather than the whole spec
    pub fn is_skippable(&self) -> bool {
        matches!(self, GenerationError::PropagationTargetMissing { .. })
    }

    pub(crate) fn target_missing(directive: &'static str, target: impl Into<String>) -> Self {
        GenerationError::PropagationTargetMissing {
            directive,
            target: target.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GenerationError>;
