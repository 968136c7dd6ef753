use crate::catalog::domain::{CleanupReport, ProductId};

/// RemoveProductResponse - result of a completed product removal
///
/// A response only exists once the record is gone, so `success` is always
/// true; the asset counts are informational.
#[derive(Debug, Clone)]
pub struct RemoveProductResponse {
    pub product_id: ProductId,
    pub success: bool,
    pub message: String,
    pub assets_cleaned: usize,
    pub assets_total: usize,
    pub cleanup: CleanupReport,
}

impl RemoveProductResponse {
    pub fn new(product_id: ProductId, cleanup: CleanupReport) -> Self {
        Self {
            product_id,
            success: true,
            message: format!(
                "Product removed successfully. {} from Cloudinary.",
                cleanup.summary()
            ),
            assets_cleaned: cleanup.cleaned(),
            assets_total: cleanup.total(),
            cleanup,
        }
    }
}
