use crate::application::dto::{AddProductResponse, RemoveProductResponse};
use crate::catalog::domain::{DeletionOutcome, Product};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct AddedDocument<'a> {
    success: bool,
    message: &'a str,
    product: &'a Product,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RemovedDocument<'a> {
    success: bool,
    message: &'a str,
    product_id: &'a str,
    assets_cleaned: usize,
    assets_total: usize,
    assets: Vec<AssetDocument<'a>>,
}

#[derive(Debug, Serialize)]
struct AssetDocument<'a> {
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    identifier: Option<&'a str>,
    attempts: u32,
    deleted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> From<&'a DeletionOutcome> for AssetDocument<'a> {
    fn from(outcome: &'a DeletionOutcome) -> Self {
        Self {
            url: outcome.asset.as_str(),
            identifier: outcome.identifier.as_ref().map(|i| i.as_str()),
            attempts: outcome.attempts,
            deleted: outcome.is_success(),
            error: outcome.error().map(|e| e.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
struct FailureDocument<'a> {
    success: bool,
    message: &'a str,
}

#[derive(Debug, Serialize)]
struct ProductsDocument<'a> {
    success: bool,
    products: &'a [Product],
}

#[derive(Debug, Serialize)]
struct ProductDocument<'a> {
    success: bool,
    product: &'a Product,
}

/// JsonFormatter adapter rendering command results as `{success, message, ...}` documents
///
/// This is the shape the storefront admin panel consumes.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format_added(&self, response: &AddProductResponse) -> Result<String> {
        Ok(serde_json::to_string_pretty(&AddedDocument {
            success: true,
            message: &response.message,
            product: &response.product,
        })?)
    }

    fn format_removed(&self, response: &RemoveProductResponse) -> Result<String> {
        Ok(serde_json::to_string_pretty(&RemovedDocument {
            success: response.success,
            message: &response.message,
            product_id: response.product_id.as_str(),
            assets_cleaned: response.assets_cleaned,
            assets_total: response.assets_total,
            assets: response
                .cleanup
                .outcomes()
                .iter()
                .map(AssetDocument::from)
                .collect(),
        })?)
    }

    fn format_failure(&self, message: &str) -> Result<String> {
        Ok(serde_json::to_string_pretty(&FailureDocument {
            success: false,
            message,
        })?)
    }

    fn format_products(&self, products: &[Product]) -> Result<String> {
        Ok(serde_json::to_string_pretty(&ProductsDocument {
            success: true,
            products,
        })?)
    }

    fn format_product(&self, product: &Product) -> Result<String> {
        Ok(serde_json::to_string_pretty(&ProductDocument {
            success: true,
            product,
        })?)
    }
}
