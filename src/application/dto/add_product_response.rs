use crate::catalog::domain::Product;

/// AddProductResponse - result of a successful product creation
#[derive(Debug, Clone)]
pub struct AddProductResponse {
    pub product: Product,
    pub message: String,
}

impl AddProductResponse {
    pub fn new(product: Product) -> Self {
        Self {
            product,
            message: "Product Added".to_string(),
        }
    }
}
