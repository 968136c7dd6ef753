use crate::application::dto::{AddProductResponse, RemoveProductResponse};
use crate::catalog::domain::Product;
use crate::shared::Result;

/// ReportFormatter port for rendering command results
///
/// Implementations choose the representation (plain text, JSON); the
/// presenter decides where it goes.
pub trait ReportFormatter {
    fn format_added(&self, response: &AddProductResponse) -> Result<String>;

    fn format_removed(&self, response: &RemoveProductResponse) -> Result<String>;

    /// Formats a failed command (e.g. an unknown product id) as `{success: false, message}`
    fn format_failure(&self, message: &str) -> Result<String>;

    fn format_products(&self, products: &[Product]) -> Result<String>;

    fn format_product(&self, product: &Product) -> Result<String>;
}
