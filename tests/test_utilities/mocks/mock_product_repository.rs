use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use storefront_assets::prelude::*;

/// Mock ProductRepository wrapping the in-memory store, with an injectable
/// delete failure and call counters
#[derive(Default, Clone)]
pub struct MockProductRepository {
    inner: InMemoryProductRepository,
    fail_delete: Arc<AtomicBool>,
    delete_calls: Arc<AtomicUsize>,
}

impl MockProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            inner: InMemoryProductRepository::from_products(products),
            ..Self::default()
        }
    }

    pub fn failing_delete(self) -> Self {
        self.fail_delete.store(true, Ordering::SeqCst);
        self
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

#[async_trait]
impl ProductRepository for MockProductRepository {
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>> {
        self.inner.find_by_id(id).await
    }

    async fn delete_by_id(&self, id: &ProductId) -> Result<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_delete.load(Ordering::SeqCst) {
            anyhow::bail!("record store unavailable");
        }
        self.inner.delete_by_id(id).await
    }

    async fn insert(&self, product: Product) -> Result<Product> {
        self.inner.insert(product).await
    }

    async fn list(&self) -> Result<Vec<Product>> {
        self.inner.list().await
    }
}
