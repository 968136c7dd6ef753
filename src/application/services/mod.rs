/// Building blocks shared by the use cases: per-asset deletion with retries,
/// fan-out cleanup, and all-or-nothing uploads.
mod cleanup_orchestrator;
mod retrying_deleter;
mod upload_coordinator;

pub use cleanup_orchestrator::AssetCleanupOrchestrator;
pub use retrying_deleter::RetryingDeleter;
pub use upload_coordinator::UploadCoordinator;
