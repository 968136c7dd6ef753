use super::asset::AssetReference;
use crate::shared::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of images attached to one product
pub const MAX_IMAGES: usize = 4;

/// Maximum length for product ids (security limit)
const MAX_PRODUCT_ID_LENGTH: usize = 64;

/// Maximum length for the product name
const MAX_NAME_LENGTH: usize = 200;

/// NewType wrapper for the opaque product id
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();

        if id.is_empty() {
            anyhow::bail!("Product id cannot be empty");
        }

        if id.len() > MAX_PRODUCT_ID_LENGTH {
            anyhow::bail!(
                "Product id is too long ({} bytes). Maximum allowed: {} bytes",
                id.len(),
                MAX_PRODUCT_ID_LENGTH
            );
        }

        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            anyhow::bail!(
                "Product id contains invalid characters. Only ASCII alphanumerics, hyphens and underscores are allowed."
            );
        }

        Ok(Self(id))
    }

    /// Generates a fresh random id for a new product
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ProductId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

/// Descriptive fields of a product, as submitted by the admin form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetails {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(rename = "subCategory", default)]
    pub sub_category: String,
    pub bestseller: bool,
    pub sizes: Vec<String>,
}

impl ProductDetails {
    /// Checks the field invariants a product record must satisfy
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            anyhow::bail!("Product name cannot be empty");
        }

        if self.name.len() > MAX_NAME_LENGTH {
            anyhow::bail!(
                "Product name is too long ({} bytes). Maximum allowed: {} bytes",
                self.name.len(),
                MAX_NAME_LENGTH
            );
        }

        if !self.price.is_finite() || self.price < 0.0 {
            anyhow::bail!("Product price must be a non-negative number, got {}", self.price);
        }

        if self.category.trim().is_empty() {
            anyhow::bail!("Product category cannot be empty");
        }

        if self.sizes.is_empty() {
            anyhow::bail!("A product needs at least one size");
        }

        if self.sizes.iter().any(|size| size.trim().is_empty()) {
            anyhow::bail!("Size labels cannot be empty");
        }

        Ok(())
    }
}

/// Product aggregate as persisted in the record store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    #[serde(flatten)]
    details: ProductDetails,
    images: Vec<AssetReference>,
    date: DateTime<Utc>,
}

impl Product {
    /// Builds a product from already uploaded images
    ///
    /// # Errors
    /// Returns an error if the details are invalid or the image count is not 1..=4
    pub fn new(
        id: ProductId,
        details: ProductDetails,
        images: Vec<AssetReference>,
        date: DateTime<Utc>,
    ) -> Result<Self> {
        details.validate()?;

        if images.is_empty() || images.len() > MAX_IMAGES {
            anyhow::bail!(
                "A product needs between 1 and {} images, got {}",
                MAX_IMAGES,
                images.len()
            );
        }

        Ok(Self {
            id,
            details,
            images,
            date,
        })
    }

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn details(&self) -> &ProductDetails {
        &self.details
    }

    pub fn name(&self) -> &str {
        &self.details.name
    }

    pub fn price(&self) -> f64 {
        self.details.price
    }

    pub fn is_bestseller(&self) -> bool {
        self.details.bestseller
    }

    pub fn images(&self) -> &[AssetReference] {
        &self.images
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> ProductDetails {
        ProductDetails {
            name: "Linen Shirt".to_string(),
            description: "Breathable summer shirt".to_string(),
            price: 49.5,
            category: "Men".to_string(),
            sub_category: "Topwear".to_string(),
            bestseller: true,
            sizes: vec!["M".to_string(), "L".to_string()],
        }
    }

    fn image(n: usize) -> AssetReference {
        AssetReference::new(format!(
            "https://res.cloudinary.com/demo/image/upload/v1700000000/c2store/img{}.jpg",
            n
        ))
        .unwrap()
    }

    #[test]
    fn test_product_id_new_valid() {
        let id = ProductId::new("65f1c0ffee").unwrap();
        assert_eq!(id.as_str(), "65f1c0ffee");
        assert_eq!(id.to_string(), "65f1c0ffee");
    }

    #[test]
    fn test_product_id_rejects_invalid() {
        assert!(ProductId::new("").is_err());
        assert!(ProductId::new("../etc/passwd").is_err());
        assert!(ProductId::new("a".repeat(MAX_PRODUCT_ID_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_product_id_generate_is_valid() {
        let id = ProductId::generate();
        assert!(ProductId::new(id.as_str()).is_ok());
        assert_ne!(id, ProductId::generate());
    }

    #[test]
    fn test_details_validation() {
        assert!(details().validate().is_ok());

        let mut negative = details();
        negative.price = -1.0;
        assert!(negative.validate().is_err());

        let mut nan = details();
        nan.price = f64::NAN;
        assert!(nan.validate().is_err());

        let mut no_sizes = details();
        no_sizes.sizes.clear();
        assert!(no_sizes
            .validate()
            .unwrap_err()
            .to_string()
            .contains("at least one size"));

        let mut blank_name = details();
        blank_name.name = "  ".to_string();
        assert!(blank_name.validate().is_err());
    }

    #[test]
    fn test_product_image_count_bounds() {
        let now = Utc::now();
        assert!(Product::new(ProductId::generate(), details(), vec![], now).is_err());
        assert!(Product::new(ProductId::generate(), details(), vec![image(1)], now).is_ok());

        let four: Vec<_> = (1..=4).map(image).collect();
        assert!(Product::new(ProductId::generate(), details(), four, now).is_ok());

        let five: Vec<_> = (1..=5).map(image).collect();
        assert!(Product::new(ProductId::generate(), details(), five, now).is_err());
    }

    #[test]
    fn test_product_json_shape() {
        let id = ProductId::new("p1").unwrap();
        let product = Product::new(id, details(), vec![image(1)], Utc::now()).unwrap();
        let value = serde_json::to_value(&product).unwrap();

        assert_eq!(value["id"], "p1");
        assert_eq!(value["name"], "Linen Shirt");
        assert_eq!(value["subCategory"], "Topwear");
        assert_eq!(value["images"].as_array().unwrap().len(), 1);

        let restored: Product = serde_json::from_value(value).unwrap();
        assert_eq!(restored, product);
    }
}
