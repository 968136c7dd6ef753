use super::InMemoryProductRepository;
use crate::catalog::domain::{Product, ProductId};
use crate::ports::outbound::ProductRepository;
use crate::shared::error::CatalogError;
use crate::shared::security::validate_regular_file;
use crate::shared::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Maximum size of the store file (security limit)
const MAX_STORE_SIZE: u64 = 50 * 1024 * 1024;

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    products: Vec<Product>,
}

/// JsonFileProductRepository persists the catalog as a single JSON document.
///
/// Reads are served from an in-memory copy loaded at open time. Every
/// mutation rewrites the whole file through a temporary file in the same
/// directory followed by a rename, so readers never observe a half-written
/// store.
pub struct JsonFileProductRepository {
    path: PathBuf,
    inner: InMemoryProductRepository,
    write_lock: Mutex<()>,
}

impl JsonFileProductRepository {
    /// Opens the store at `path`; a missing file is an empty catalog
    ///
    /// # Errors
    /// Returns [`CatalogError::StoreFile`] if the file exists but cannot be
    /// read or does not contain a valid store document
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let products = if path.exists() {
            Self::load(&path)?
        } else {
            Vec::new()
        };

        Ok(Self {
            path,
            inner: InMemoryProductRepository::from_products(products),
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn store_error(&self, details: impl Into<String>) -> anyhow::Error {
        CatalogError::StoreFile {
            path: self.path.clone(),
            details: details.into(),
        }
        .into()
    }

    fn load(path: &Path) -> Result<Vec<Product>> {
        let store_error = |details: String| -> anyhow::Error {
            CatalogError::StoreFile {
                path: path.to_path_buf(),
                details,
            }
            .into()
        };

        validate_regular_file(path, "product store").map_err(|e| store_error(e.to_string()))?;

        let metadata = fs::metadata(path).map_err(|e| store_error(e.to_string()))?;
        if metadata.len() > MAX_STORE_SIZE {
            return Err(store_error(format!(
                "store file is too large ({} bytes). Maximum allowed size is {} bytes.",
                metadata.len(),
                MAX_STORE_SIZE
            )));
        }

        let content = fs::read_to_string(path).map_err(|e| store_error(e.to_string()))?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let document: StoreDocument =
            serde_json::from_str(&content).map_err(|e| store_error(e.to_string()))?;
        Ok(document.products)
    }

    fn persist(&self) -> Result<()> {
        let document = StoreDocument {
            products: self.inner.snapshot(),
        };
        let json = serde_json::to_string_pretty(&document)?;

        let directory = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !directory.exists() {
            fs::create_dir_all(&directory).map_err(|e| self.store_error(e.to_string()))?;
        }

        let mut temp = tempfile::NamedTempFile::new_in(&directory)
            .map_err(|e| self.store_error(e.to_string()))?;
        temp.write_all(json.as_bytes())
            .and_then(|_| temp.flush())
            .map_err(|e| self.store_error(e.to_string()))?;
        temp.persist(&self.path)
            .map_err(|e| self.store_error(e.error.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for JsonFileProductRepository {
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>> {
        self.inner.find_by_id(id).await
    }

    async fn delete_by_id(&self, id: &ProductId) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let Some(removed) = self.inner.remove(id) else {
            return Ok(());
        };
        if let Err(e) = self.persist() {
            self.inner.restore(removed);
            return Err(e);
        }
        Ok(())
    }

    async fn insert(&self, product: Product) -> Result<Product> {
        let _guard = self.write_lock.lock().await;
        let stored = self.inner.try_insert(product)?;
        if let Err(e) = self.persist() {
            self.inner.remove(stored.id());
            return Err(e);
        }
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<Product>> {
        self.inner.list().await
    }
}
