/// Mock implementations for testing
mod mock_asset_storage;
mod mock_image_reader;
mod mock_product_repository;
mod mock_progress_reporter;

pub use mock_asset_storage::{MockAssetStorage, MockDestroy};
pub use mock_image_reader::MockImageReader;
pub use mock_product_repository::MockProductRepository;
pub use mock_progress_reporter::MockProgressReporter;
