use crate::catalog::domain::{Product, ProductId};
use crate::ports::outbound::ProductRepository;
use crate::shared::error::CatalogError;
use crate::shared::Result;

/// ListProductsUseCase - read-only queries over the record store
pub struct ListProductsUseCase<REPO> {
    product_repository: REPO,
}

impl<REPO: ProductRepository> ListProductsUseCase<REPO> {
    pub fn new(product_repository: REPO) -> Self {
        Self { product_repository }
    }

    /// All products, newest first
    pub async fn list(&self) -> Result<Vec<Product>> {
        self.product_repository
            .list()
            .await
            .map_err(|e| CatalogError::record_store("list", format!("{:#}", e)).into())
    }

    /// A single product
    ///
    /// # Errors
    /// Returns [`CatalogError::ProductNotFound`] if the id is unknown
    pub async fn find(&self, id: &ProductId) -> Result<Product> {
        let product = self
            .product_repository
            .find_by_id(id)
            .await
            .map_err(|e| CatalogError::record_store("lookup", format!("{:#}", e)))?;

        product.ok_or_else(|| CatalogError::ProductNotFound { id: id.to_string() }.into())
    }
}
