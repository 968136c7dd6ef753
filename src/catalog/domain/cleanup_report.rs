use super::deletion_outcome::DeletionOutcome;

/// Aggregate of one cleanup run over all images of a product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupReport {
    outcomes: Vec<DeletionOutcome>,
}

impl CleanupReport {
    pub fn new(outcomes: Vec<DeletionOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[DeletionOutcome] {
        &self.outcomes
    }

    /// Number of assets that are gone from remote storage
    pub fn cleaned(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn failures(&self) -> impl Iterator<Item = &DeletionOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn is_complete(&self) -> bool {
        self.cleaned() == self.total()
    }

    /// "<cleaned>/<total> images deleted"
    pub fn summary(&self) -> String {
        format!("{}/{} images deleted", self.cleaned(), self.total())
    }
}
