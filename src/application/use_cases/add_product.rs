use crate::application::dto::{AddProductRequest, AddProductResponse};
use crate::application::services::UploadCoordinator;
use crate::catalog::domain::{AssetReference, ImageSlots, Product, ProductId, UploadedAsset};
use crate::ports::outbound::{
    AssetStorage, ImagePayloadReader, ProductRepository, ProgressReporter,
};
use crate::shared::error::CatalogError;
use crate::shared::retry::RetryPolicy;
use crate::shared::Result;
use chrono::Utc;
use std::time::Duration;

/// Default folder namespace for uploaded product images
pub const DEFAULT_FOLDER: &str = "c2store";

/// Default per-upload timeout
pub const DEFAULT_UPLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// AddProductUseCase - creates a product from up to four local image files
///
/// All images are uploaded concurrently before the record is written. A
/// failed upload (or a failed insert) leaves no record behind and triggers a
/// best-effort removal of the images that did land.
///
/// # Type Parameters
/// * `REPO` - ProductRepository implementation
/// * `STORE` - AssetStorage implementation
/// * `READER` - ImagePayloadReader implementation
/// * `PR` - ProgressReporter implementation
pub struct AddProductUseCase<REPO, STORE, READER, PR> {
    product_repository: REPO,
    asset_storage: STORE,
    payload_reader: READER,
    progress_reporter: PR,
    folder: String,
    upload_timeout: Duration,
    rollback_policy: RetryPolicy,
}

impl<REPO, STORE, READER, PR> AddProductUseCase<REPO, STORE, READER, PR>
where
    REPO: ProductRepository,
    STORE: AssetStorage,
    READER: ImagePayloadReader,
    PR: ProgressReporter,
{
    pub fn new(
        product_repository: REPO,
        asset_storage: STORE,
        payload_reader: READER,
        progress_reporter: PR,
    ) -> Self {
        Self {
            product_repository,
            asset_storage,
            payload_reader,
            progress_reporter,
            folder: DEFAULT_FOLDER.to_string(),
            upload_timeout: DEFAULT_UPLOAD_TIMEOUT,
            rollback_policy: RetryPolicy::default(),
        }
    }

    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = folder.into();
        self
    }

    pub fn with_upload_timeout(mut self, timeout: Duration) -> Self {
        self.upload_timeout = timeout;
        self
    }

    pub fn with_rollback_policy(mut self, policy: RetryPolicy) -> Self {
        self.rollback_policy = policy;
        self
    }

    /// Executes the creation workflow
    ///
    /// # Errors
    /// - [`CatalogError::Validation`] if no image slot is filled or the details are invalid
    /// - [`CatalogError::PayloadRead`] if an image file cannot be read
    /// - [`CatalogError::UploadFailed`] if any upload fails or times out
    /// - [`CatalogError::RecordStore`] if the record cannot be inserted
    pub async fn execute(&self, request: AddProductRequest) -> Result<AddProductResponse> {
        let image_count = request.image_count();
        if image_count == 0 {
            return Err(CatalogError::Validation {
                message: "at least one image is required".to_string(),
            }
            .into());
        }
        request
            .details
            .validate()
            .map_err(|e| CatalogError::Validation {
                message: e.to_string(),
            })?;

        // Step 1: Read every image before touching remote storage
        self.progress_reporter
            .report(&format!("📂 Reading {} image file(s)...", image_count));
        let slots = self.read_payloads(&request)?;

        // Step 2: Upload all images, all-or-nothing
        self.progress_reporter.report(&format!(
            "☁️  Uploading {} image(s) to folder '{}'...",
            image_count, self.folder
        ));
        let coordinator = UploadCoordinator::new(
            &self.asset_storage,
            &self.folder,
            self.upload_timeout,
            self.rollback_policy,
        );
        let uploaded = coordinator.upload_all(slots).await?;
        self.progress_reporter
            .report_progress(uploaded.len(), image_count, Some("Images uploaded"));

        // Step 3: Write the record
        let images: Vec<AssetReference> = uploaded.iter().map(|u| u.url.clone()).collect();
        let product =
            match Product::new(ProductId::generate(), request.details, images, Utc::now()) {
                Ok(product) => product,
                Err(e) => {
                    self.roll_back(&coordinator, &uploaded).await;
                    return Err(CatalogError::Validation {
                        message: e.to_string(),
                    }
                    .into());
                }
            };

        let stored = match self.product_repository.insert(product).await {
            Ok(stored) => stored,
            Err(e) => {
                self.roll_back(&coordinator, &uploaded).await;
                return Err(CatalogError::record_store("insert", format!("{:#}", e)).into());
            }
        };

        self.progress_reporter
            .report_completion(&format!("✅ Product Added ({})", stored.id()));

        Ok(AddProductResponse::new(stored))
    }

    async fn roll_back(
        &self,
        coordinator: &UploadCoordinator<'_, STORE>,
        uploaded: &[UploadedAsset],
    ) {
        let rollback = coordinator.rollback(uploaded).await;
        self.progress_reporter.report_error(&format!(
            "⚠️  Warning: Product record was not saved; rolled back uploaded images: {}",
            rollback.summary()
        ));
    }

    fn read_payloads(&self, request: &AddProductRequest) -> Result<ImageSlots> {
        let mut slots: ImageSlots = Default::default();
        for (slot, path) in request.image_paths.iter().enumerate() {
            if let Some(path) = path {
                let payload = self.payload_reader.read_payload(path).map_err(|e| {
                    CatalogError::PayloadRead {
                        path: path.clone(),
                        details: format!("{:#}", e),
                    }
                })?;
                slots[slot] = Some(payload);
            }
        }
        Ok(slots)
    }
}
