/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (record store, remote storage,
/// file system, console).
pub mod asset_storage;
pub mod image_payload_reader;
pub mod output_presenter;
pub mod product_repository;
pub mod progress_reporter;
pub mod report_formatter;

pub use asset_storage::AssetStorage;
pub use image_payload_reader::ImagePayloadReader;
pub use output_presenter::OutputPresenter;
pub use product_repository::ProductRepository;
pub use progress_reporter::ProgressReporter;
pub use report_formatter::ReportFormatter;
