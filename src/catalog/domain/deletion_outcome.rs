use super::asset::{AssetReference, RemoteIdentifier, ResolutionFailure};
use crate::shared::retry::AttemptError;
use thiserror::Error;

/// Status reported by the storage provider for a destroy request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestroyStatus {
    /// The object existed and was removed ("ok")
    Deleted,
    /// The object was already absent ("not found")
    NotFound,
    /// Any other provider answer
    Other(String),
}

impl DestroyStatus {
    /// Maps the provider's `result` field onto a status
    pub fn from_provider(result: &str) -> Self {
        match result.trim() {
            "ok" => DestroyStatus::Deleted,
            "not found" => DestroyStatus::NotFound,
            other => DestroyStatus::Other(other.to_string()),
        }
    }

    /// Whether the asset needs no further cleanup.
    ///
    /// An asset that is already gone counts the same as one we just deleted.
    pub fn is_settled(&self) -> bool {
        matches!(self, DestroyStatus::Deleted | DestroyStatus::NotFound)
    }
}

impl std::fmt::Display for DestroyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DestroyStatus::Deleted => write!(f, "ok"),
            DestroyStatus::NotFound => write!(f, "not found"),
            DestroyStatus::Other(result) => write!(f, "{}", result),
        }
    }
}

/// Why the cleanup of one asset did not succeed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CleanupError {
    #[error(transparent)]
    Unresolvable(#[from] ResolutionFailure),

    #[error("remote delete failed after {attempts} attempt(s): {last}")]
    Exhausted { attempts: u32, last: AttemptError },
}

/// Per-asset result of one cleanup run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionOutcome {
    pub asset: AssetReference,
    pub identifier: Option<RemoteIdentifier>,
    pub attempts: u32,
    pub result: Result<DestroyStatus, CleanupError>,
}

impl DeletionOutcome {
    /// Outcome for an asset whose URL could not be resolved; no delete was attempted
    pub fn unresolved(asset: AssetReference, failure: ResolutionFailure) -> Self {
        Self {
            asset,
            identifier: None,
            attempts: 0,
            result: Err(CleanupError::Unresolvable(failure)),
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn error(&self) -> Option<&CleanupError> {
        self.result.as_ref().err()
    }
}
