use crate::application::dto::RemoveProductResponse;
use crate::application::services::AssetCleanupOrchestrator;
use crate::catalog::domain::{CleanupReport, Product, ProductId};
use crate::catalog::services::IdentifierResolver;
use crate::ports::outbound::{AssetStorage, ProductRepository, ProgressReporter};
use crate::shared::error::CatalogError;
use crate::shared::retry::RetryPolicy;
use crate::shared::Result;

/// Stages of a product removal, in execution order
///
/// `Lookup` may end the workflow early (unknown product). Once the product is
/// found, `DeleteRecord` always runs, whatever `CleanupAssets` achieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionStage {
    Lookup,
    CleanupAssets,
    DeleteRecord,
    Report,
}

impl std::fmt::Display for DeletionStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeletionStage::Lookup => write!(f, "lookup"),
            DeletionStage::CleanupAssets => write!(f, "asset cleanup"),
            DeletionStage::DeleteRecord => write!(f, "record deletion"),
            DeletionStage::Report => write!(f, "report"),
        }
    }
}

/// RemoveProductUseCase - removes a product and cleans up its remote images
///
/// Remote storage is a best-effort mirror of the catalog: image cleanup is
/// attempted first, but the record is deleted regardless of how many images
/// could be removed. Only record-store failures abort the workflow.
///
/// # Type Parameters
/// * `REPO` - ProductRepository implementation
/// * `STORE` - AssetStorage implementation
/// * `PR` - ProgressReporter implementation
pub struct RemoveProductUseCase<REPO, STORE, PR> {
    product_repository: REPO,
    asset_storage: STORE,
    progress_reporter: PR,
    resolver: IdentifierResolver,
    cleanup_policy: RetryPolicy,
}

impl<REPO, STORE, PR> RemoveProductUseCase<REPO, STORE, PR>
where
    REPO: ProductRepository,
    STORE: AssetStorage,
    PR: ProgressReporter,
{
    /// Creates the use case with the Cloudinary resolver chain and the default retry policy
    pub fn new(product_repository: REPO, asset_storage: STORE, progress_reporter: PR) -> Self {
        Self {
            product_repository,
            asset_storage,
            progress_reporter,
            resolver: IdentifierResolver::cloudinary(),
            cleanup_policy: RetryPolicy::default(),
        }
    }

    pub fn with_cleanup_policy(mut self, policy: RetryPolicy) -> Self {
        self.cleanup_policy = policy;
        self
    }

    pub fn with_resolver(mut self, resolver: IdentifierResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Executes the removal workflow
    ///
    /// # Errors
    /// - [`CatalogError::ProductNotFound`] if no record exists (remote storage untouched)
    /// - [`CatalogError::RecordStore`] if the lookup or the record deletion fails
    pub async fn execute(&self, id: &ProductId) -> Result<RemoveProductResponse> {
        // Step 1: Locate the record
        let product = self.lookup(id).await?;

        // Step 2: Best-effort remote cleanup, advisory only
        let cleanup = self.cleanup_assets(&product).await;

        // Step 3: Delete the record, regardless of the cleanup result
        self.delete_record(id).await?;

        // Step 4: Report
        Ok(self.report(id, cleanup))
    }

    async fn lookup(&self, id: &ProductId) -> Result<Product> {
        self.progress_reporter
            .report(&format!("🔎 Looking up product {}", id));

        let product = self
            .product_repository
            .find_by_id(id)
            .await
            .map_err(|e| {
                CatalogError::record_store(DeletionStage::Lookup.to_string(), format!("{:#}", e))
            })?;

        product.ok_or_else(|| CatalogError::ProductNotFound { id: id.to_string() }.into())
    }

    async fn cleanup_assets(&self, product: &Product) -> CleanupReport {
        let images = product.images();
        self.progress_reporter.report(&format!(
            "🗑️  Deleting {} image(s) from Cloudinary...",
            images.len()
        ));

        let orchestrator =
            AssetCleanupOrchestrator::new(&self.asset_storage, &self.resolver, self.cleanup_policy);
        let report = orchestrator
            .cleanup_with_progress(images, |settled, total| {
                self.progress_reporter
                    .report_progress(settled, total, Some("Deleting images"))
            })
            .await;

        for failure in report.failures() {
            if let Some(error) = failure.error() {
                self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: Could not delete {} ({}): {}",
                    failure.asset, DeletionStage::CleanupAssets, error
                ));
            }
        }

        report
    }

    async fn delete_record(&self, id: &ProductId) -> Result<()> {
        self.progress_reporter
            .report(&format!("🗄️  Removing product record {}", id));

        self.product_repository
            .delete_by_id(id)
            .await
            .map_err(|e| {
                CatalogError::record_store(
                    DeletionStage::DeleteRecord.to_string(),
                    format!("{:#}", e),
                )
                .into()
            })
    }

    fn report(&self, id: &ProductId, cleanup: CleanupReport) -> RemoveProductResponse {
        let response = RemoveProductResponse::new(id.clone(), cleanup);
        let marker = if response.cleanup.is_complete() {
            "✅"
        } else {
            "⚠️ "
        };
        self.progress_reporter.report_completion(&format!(
            "{} {} ({} complete)",
            marker,
            response.message,
            DeletionStage::Report
        ));
        response
    }
}

#[cfg(test)]
mod tests;
