/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod add_product_request;
mod add_product_response;
mod output_format;
mod remove_product_response;

pub use add_product_request::{AddProductRequest, AddProductRequestBuilder};
pub use add_product_response::AddProductResponse;
pub use output_format::OutputFormat;
pub use remove_product_response::RemoveProductResponse;
