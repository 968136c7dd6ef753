use crate::catalog::domain::{Product, ProductId};
use crate::ports::outbound::ProductRepository;
use crate::shared::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// InMemoryProductRepository keeps the catalog in a concurrent map.
///
/// Clones share the same map, so one instance can be handed to several use
/// cases. It also backs [`JsonFileProductRepository`](super::JsonFileProductRepository),
/// which adds persistence on top.
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<DashMap<ProductId, Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store; later duplicates replace earlier ones
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> Self {
        let repository = Self::new();
        for product in products {
            repository.products.insert(product.id().clone(), product);
        }
        repository
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// All products, newest first (ties broken by id for a stable order)
    pub fn snapshot(&self) -> Vec<Product> {
        let mut products: Vec<Product> = self
            .products
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        products.sort_by(|a, b| b.date().cmp(&a.date()).then_with(|| a.id().cmp(b.id())));
        products
    }

    /// Removes a product, returning it if it was present
    pub(crate) fn remove(&self, id: &ProductId) -> Option<Product> {
        self.products.remove(id).map(|(_, product)| product)
    }

    /// Puts back a product taken out by [`Self::remove`]
    pub(crate) fn restore(&self, product: Product) {
        self.products.insert(product.id().clone(), product);
    }

    /// Adds a product unless its id is already taken
    pub(crate) fn try_insert(&self, product: Product) -> Result<Product> {
        use dashmap::mapref::entry::Entry;

        match self.products.entry(product.id().clone()) {
            Entry::Occupied(_) => anyhow::bail!("product {} already exists", product.id()),
            Entry::Vacant(slot) => {
                slot.insert(product.clone());
                Ok(product)
            }
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>> {
        Ok(self.products.get(id).map(|entry| entry.value().clone()))
    }

    async fn delete_by_id(&self, id: &ProductId) -> Result<()> {
        self.remove(id);
        Ok(())
    }

    async fn insert(&self, product: Product) -> Result<Product> {
        self.try_insert(product)
    }

    async fn list(&self) -> Result<Vec<Product>> {
        Ok(self.snapshot())
    }
}
