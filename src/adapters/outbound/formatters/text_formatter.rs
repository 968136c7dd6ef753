use crate::application::dto::{AddProductResponse, RemoveProductResponse};
use crate::catalog::domain::Product;
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use std::fmt::Write;

/// TextFormatter adapter producing human-readable terminal output
pub struct TextFormatter;

impl TextFormatter {
    pub fn new() -> Self {
        Self
    }

    fn write_product(out: &mut String, product: &Product) -> std::fmt::Result {
        let details = product.details();
        writeln!(out, "{} ({})", details.name, product.id())?;
        writeln!(out, "  Price:       {:.2}", details.price)?;
        if details.sub_category.is_empty() {
            writeln!(out, "  Category:    {}", details.category)?;
        } else {
            writeln!(
                out,
                "  Category:    {} / {}",
                details.category, details.sub_category
            )?;
        }
        writeln!(out, "  Sizes:       {}", details.sizes.join(", "))?;
        writeln!(
            out,
            "  Bestseller:  {}",
            if details.bestseller { "yes" } else { "no" }
        )?;
        writeln!(out, "  Added:       {}", product.date().to_rfc3339())?;
        if !details.description.is_empty() {
            writeln!(out, "  Description: {}", details.description)?;
        }
        writeln!(out, "  Images:")?;
        for image in product.images() {
            writeln!(out, "    - {}", image)?;
        }
        Ok(())
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for TextFormatter {
    fn format_added(&self, response: &AddProductResponse) -> Result<String> {
        let mut out = String::new();
        writeln!(out, "{}", response.message)?;
        writeln!(out)?;
        Self::write_product(&mut out, &response.product)?;
        Ok(out)
    }

    fn format_removed(&self, response: &RemoveProductResponse) -> Result<String> {
        let mut out = String::new();
        writeln!(out, "{}", response.message)?;

        let failures: Vec<_> = response.cleanup.failures().collect();
        if !failures.is_empty() {
            writeln!(out)?;
            writeln!(out, "Images left in storage:")?;
            for failure in failures {
                match failure.error() {
                    Some(error) => writeln!(out, "  - {}: {}", failure.asset, error)?,
                    None => writeln!(out, "  - {}", failure.asset)?,
                }
            }
        }
        Ok(out)
    }

    fn format_failure(&self, message: &str) -> Result<String> {
        Ok(format!("{}\n", message))
    }

    fn format_products(&self, products: &[Product]) -> Result<String> {
        if products.is_empty() {
            return Ok("No products found.\n".to_string());
        }

        let mut out = String::new();
        writeln!(out, "{} product(s)", products.len())?;
        for product in products {
            writeln!(out)?;
            Self::write_product(&mut out, product)?;
        }
        Ok(out)
    }

    fn format_product(&self, product: &Product) -> Result<String> {
        let mut out = String::new();
        Self::write_product(&mut out, product)?;
        Ok(out)
    }
}
