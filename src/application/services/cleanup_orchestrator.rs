use super::RetryingDeleter;
use crate::catalog::domain::{AssetReference, CleanupReport, DeletionOutcome};
use crate::catalog::services::IdentifierResolver;
use crate::ports::outbound::AssetStorage;
use crate::shared::retry::RetryPolicy;
use futures::future::join_all;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Fans out remote cleanup over every asset of a product.
///
/// Each asset is resolved and deleted independently and concurrently; the
/// orchestrator waits until all of them have settled, so one hung or failing
/// asset never decides another's outcome. Exactly one outcome per input asset
/// is returned, in input order.
pub struct AssetCleanupOrchestrator<'a, S: AssetStorage> {
    resolver: &'a IdentifierResolver,
    deleter: RetryingDeleter<'a, S>,
}

impl<'a, S: AssetStorage> AssetCleanupOrchestrator<'a, S> {
    pub fn new(storage: &'a S, resolver: &'a IdentifierResolver, policy: RetryPolicy) -> Self {
        Self {
            resolver,
            deleter: RetryingDeleter::new(storage, policy),
        }
    }

    pub async fn cleanup(&self, assets: &[AssetReference]) -> CleanupReport {
        self.cleanup_with_progress(assets, |_, _| {}).await
    }

    /// Same as [`cleanup`](Self::cleanup), calling `progress(settled, total)`
    /// each time an asset settles
    pub async fn cleanup_with_progress<F>(
        &self,
        assets: &[AssetReference],
        progress: F,
    ) -> CleanupReport
    where
        F: Fn(usize, usize),
    {
        let total = assets.len();
        let settled = AtomicUsize::new(0);

        let outcomes = join_all(assets.iter().map(|asset| {
            let settled = &settled;
            let progress = &progress;
            async move {
                let outcome = self.cleanup_one(asset.clone()).await;
                let done = settled.fetch_add(1, Ordering::SeqCst) + 1;
                progress(done, total);
                outcome
            }
        }))
        .await;

        CleanupReport::new(outcomes)
    }

    async fn cleanup_one(&self, asset: AssetReference) -> DeletionOutcome {
        match self.resolver.resolve(asset.as_str()) {
            Ok(identifier) => self.deleter.delete(asset, identifier).await,
            Err(failure) => DeletionOutcome::unresolved(asset, failure),
        }
    }
}
