use crate::catalog::domain::{ProductDetails, MAX_IMAGES};
use crate::shared::error::CatalogError;
use crate::shared::Result;
use std::path::PathBuf;

/// AddProductRequest - Internal request DTO for the product creation use case
///
/// Image paths are kept per slot (`image1`..`image4` on the admin form);
/// empty slots are skipped at upload time.
#[derive(Debug, Clone)]
pub struct AddProductRequest {
    pub details: ProductDetails,
    pub image_paths: [Option<PathBuf>; MAX_IMAGES],
}

impl AddProductRequest {
    pub fn builder() -> AddProductRequestBuilder {
        AddProductRequestBuilder::default()
    }

    /// Number of filled image slots
    pub fn image_count(&self) -> usize {
        self.image_paths.iter().flatten().count()
    }
}

/// Builder for [`AddProductRequest`]
#[derive(Debug, Default)]
pub struct AddProductRequestBuilder {
    name: Option<String>,
    description: String,
    price: Option<f64>,
    category: Option<String>,
    sub_category: String,
    bestseller: bool,
    sizes: Vec<String>,
    image_paths: [Option<PathBuf>; MAX_IMAGES],
    invalid_slot: Option<usize>,
}

impl AddProductRequestBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn sub_category(mut self, sub_category: impl Into<String>) -> Self {
        self.sub_category = sub_category.into();
        self
    }

    pub fn bestseller(mut self, bestseller: bool) -> Self {
        self.bestseller = bestseller;
        self
    }

    pub fn sizes<I, S>(mut self, sizes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sizes = sizes.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the image for a 1-based form slot; out-of-range slots fail in `build`
    pub fn image(mut self, slot: usize, path: impl Into<PathBuf>) -> Self {
        if (1..=MAX_IMAGES).contains(&slot) {
            self.image_paths[slot - 1] = Some(path.into());
        } else {
            self.invalid_slot = Some(slot);
        }
        self
    }

    /// Builds the request
    ///
    /// # Errors
    /// Returns a validation error if a required field is missing or invalid
    pub fn build(self) -> Result<AddProductRequest> {
        if let Some(slot) = self.invalid_slot {
            return Err(validation(&format!(
                "invalid image slot {} (expected 1 to {})",
                slot, MAX_IMAGES
            )));
        }

        let details = ProductDetails {
            name: self.name.ok_or_else(|| validation("name is required"))?,
            description: self.description,
            price: self.price.ok_or_else(|| validation("price is required"))?,
            category: self
                .category
                .ok_or_else(|| validation("category is required"))?,
            sub_category: self.sub_category,
            bestseller: self.bestseller,
            sizes: self.sizes,
        };

        details
            .validate()
            .map_err(|e| validation(&e.to_string()))?;

        Ok(AddProductRequest {
            details,
            image_paths: self.image_paths,
        })
    }
}

fn validation(message: &str) -> anyhow::Error {
    CatalogError::Validation {
        message: message.to_string(),
    }
    .into()
}
