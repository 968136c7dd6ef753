pub mod asset;
pub mod cleanup_report;
pub mod deletion_outcome;
pub mod image_payload;
pub mod product;

pub use asset::{AssetReference, RemoteIdentifier, ResolutionFailure, UploadedAsset};
pub use cleanup_report::CleanupReport;
pub use deletion_outcome::{CleanupError, DeletionOutcome, DestroyStatus};
pub use image_payload::{ImagePayload, ImageSlots};
pub use product::{Product, ProductDetails, ProductId, MAX_IMAGES};
