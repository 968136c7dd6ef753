use crate::catalog::domain::{
    AssetReference, CleanupError, DeletionOutcome, DestroyStatus, RemoteIdentifier,
};
use crate::ports::outbound::AssetStorage;
use crate::shared::retry::{retry, RetryPolicy};

/// Deletes one remote asset with bounded, sequential attempts.
///
/// "ok" and "not found" both end the loop successfully; errors, timeouts and
/// any other provider status are retried until the policy runs out. The
/// outcome is returned, never raised.
pub struct RetryingDeleter<'a, S: AssetStorage> {
    storage: &'a S,
    policy: RetryPolicy,
}

impl<'a, S: AssetStorage> RetryingDeleter<'a, S> {
    pub fn new(storage: &'a S, policy: RetryPolicy) -> Self {
        Self { storage, policy }
    }

    pub async fn delete(
        &self,
        asset: AssetReference,
        identifier: RemoteIdentifier,
    ) -> DeletionOutcome {
        let outcome = retry(
            &self.policy,
            |_attempt| self.storage.destroy(&identifier),
            DestroyStatus::is_settled,
        )
        .await;

        let result = outcome.result.map_err(|last| CleanupError::Exhausted {
            attempts: outcome.attempts,
            last,
        });

        DeletionOutcome {
            asset,
            identifier: Some(identifier),
            attempts: outcome.attempts,
            result,
        }
    }
}
