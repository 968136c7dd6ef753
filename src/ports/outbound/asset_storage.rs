use crate::catalog::domain::{DestroyStatus, ImagePayload, RemoteIdentifier, UploadedAsset};
use crate::shared::Result;
use async_trait::async_trait;

/// AssetStorage port for the remote object storage holding product images
///
/// Neither call carries an SLA; callers bound every attempt with their own
/// timeout.
#[async_trait]
pub trait AssetStorage: Send + Sync {
    /// Uploads one image under the given folder namespace
    ///
    /// # Returns
    /// The provider identifier and the public HTTPS URL of the stored image
    async fn upload(&self, payload: &ImagePayload, folder: &str) -> Result<UploadedAsset>;

    /// Destroys the object addressed by `identifier`
    ///
    /// # Returns
    /// The provider's status; "not found" is a status, not an error
    async fn destroy(&self, identifier: &RemoteIdentifier) -> Result<DestroyStatus>;
}
