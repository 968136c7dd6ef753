use crate::catalog::domain::{Product, ProductId};
use crate::shared::Result;
use async_trait::async_trait;

/// ProductRepository port for the authoritative product record store
///
/// Every failure returned from here is treated as fatal by the workflows.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Fetches a product by id, `None` if no such record exists
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>>;

    /// Removes a product record.
    ///
    /// Implementations must be idempotent: deleting an id that is already
    /// gone succeeds, so two racing removals of the same product are harmless.
    async fn delete_by_id(&self, id: &ProductId) -> Result<()>;

    /// Persists a new product and returns the stored record
    async fn insert(&self, product: Product) -> Result<Product>;

    /// Lists all products, newest first
    async fn list(&self) -> Result<Vec<Product>>;
}
