use super::RetryingDeleter;
use crate::catalog::domain::{CleanupReport, ImageSlots, UploadedAsset};
use crate::ports::outbound::AssetStorage;
use crate::shared::error::CatalogError;
use crate::shared::retry::RetryPolicy;
use crate::shared::Result;
use futures::future::join_all;
use std::time::Duration;

/// Uploads the filled image slots of a new product, all-or-nothing.
///
/// Every upload runs concurrently and is bounded by `upload_timeout`. The
/// batch only succeeds when every upload did; otherwise the images that did
/// land are removed again (best-effort) and the whole call fails, so a product
/// is never created with a partial image list.
pub struct UploadCoordinator<'a, S: AssetStorage> {
    storage: &'a S,
    folder: &'a str,
    upload_timeout: Duration,
    rollback_policy: RetryPolicy,
}

impl<'a, S: AssetStorage> UploadCoordinator<'a, S> {
    pub fn new(
        storage: &'a S,
        folder: &'a str,
        upload_timeout: Duration,
        rollback_policy: RetryPolicy,
    ) -> Self {
        Self {
            storage,
            folder,
            upload_timeout,
            rollback_policy,
        }
    }

    /// Uploads the present payloads and returns them in slot order
    ///
    /// # Errors
    /// Returns [`CatalogError::UploadFailed`] if any single upload fails or times out
    pub async fn upload_all(&self, slots: ImageSlots) -> Result<Vec<UploadedAsset>> {
        let payloads: Vec<_> = slots.into_iter().flatten().collect();
        let total = payloads.len();

        let results = join_all(payloads.iter().map(|payload| async move {
            let upload = self.storage.upload(payload, self.folder);
            match tokio::time::timeout(self.upload_timeout, upload).await {
                Ok(Ok(uploaded)) => Ok(uploaded),
                Ok(Err(e)) => Err(format!("{}: {:#}", payload.file_name(), e)),
                Err(_) => Err(format!(
                    "{}: upload timed out after {}s",
                    payload.file_name(),
                    self.upload_timeout.as_secs()
                )),
            }
        }))
        .await;

        let (uploaded, failures): (Vec<_>, Vec<_>) = results.into_iter().partition(|r| r.is_ok());
        let uploaded: Vec<UploadedAsset> = uploaded.into_iter().flatten().collect();
        let failures: Vec<String> = failures.into_iter().filter_map(|r| r.err()).collect();

        if failures.is_empty() {
            return Ok(uploaded);
        }

        let rollback = self.rollback(&uploaded).await;
        let mut details = failures.join("; ");
        if rollback.total() > 0 {
            details.push_str(&format!(
                "; rolled back uploaded images: {}",
                rollback.summary()
            ));
        }

        Err(CatalogError::UploadFailed {
            failed: failures.len(),
            total,
            details,
        }
        .into())
    }

    /// Best-effort removal of images that were uploaded but will not be referenced
    pub async fn rollback(&self, uploaded: &[UploadedAsset]) -> CleanupReport {
        let deleter = RetryingDeleter::new(self.storage, self.rollback_policy);
        let outcomes = join_all(
            uploaded
                .iter()
                .map(|asset| deleter.delete(asset.url.clone(), asset.identifier.clone())),
        )
        .await;
        CleanupReport::new(outcomes)
    }
}
