//! Per-spec and per-directive outcomes of a generation pass

use crate::assort::CommitOutcome;
use crate::core::error::{GenerationError, Result};
use crate::spec::DirectiveKind;

/// Result of one directive against one target
#[derive(Debug)]
pub struct DirectiveReport {
    pub kind: DirectiveKind,
    /// Container, case, slot or quest key the directive aimed at, if any
    pub target: Option<String>,
    /// Number of insertions, or why the directive was skipped
    pub outcome: Result<usize>,
}

impl DirectiveReport {
    pub fn new(kind: DirectiveKind, target: Option<String>, outcome: Result<usize>) -> Self {
        Self { kind, target, outcome }
    }

    pub fn applied(&self) -> bool {
        self.outcome.is_ok()
    }
}

#[derive(Debug)]
pub struct SpecReport {
    pub id: String,
    /// Resolved template id, when resolution succeeded
    pub template: Option<String>,
    pub directives: Vec<DirectiveReport>,
    /// Generated preset id, if one was built
    pub generated_preset: Option<String>,
    /// Error that stopped this spec
    pub error: Option<GenerationError>,
}

impl SpecReport {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            template: None,
            directives: Vec::new(),
            generated_preset: None,
            error: None,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }

    pub fn skipped(&self) -> impl Iterator<Item = &DirectiveReport> {
        self.directives.iter().filter(|d| !d.applied())
    }

    pub fn directive(&self, kind: DirectiveKind) -> Option<&DirectiveReport> {
        self.directives.iter().find(|d| d.kind == kind)
    }
}

#[derive(Debug, Default)]
pub struct GenerationReport {
    pub specs: Vec<SpecReport>,
    /// Fragments the loader could not use
    pub rejected_fragments: Vec<GenerationError>,
}

impl GenerationReport {
    pub fn generated(&self) -> usize {
        self.specs.iter().filter(|s| s.succeeded()).count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &SpecReport> {
        self.specs.iter().filter(|s| !s.succeeded())
    }

    pub fn skipped_directives(&self) -> usize {
        self.specs.iter().map(|s| s.skipped().count()).sum()
    }

    pub fn spec(&self, id: &str) -> Option<&SpecReport> {
        self.specs.iter().find(|s| s.id == id)
    }
}

/// Outcome of one declared offer
#[derive(Debug)]
pub struct OfferReport {
    pub trader: String,
    pub item: String,
    pub outcome: Result<CommitOutcome>,
}

impl OfferReport {
    pub fn committed(&self) -> bool {
        matches!(self.outcome, Ok(CommitOutcome::Committed { .. }))
    }

    pub fn duplicate(&self) -> bool {
        matches!(self.outcome, Ok(CommitOutcome::Duplicate { .. }))
    }
}
