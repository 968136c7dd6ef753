//! In-crate test doubles for the outbound ports used by the use case tests.

use crate::catalog::domain::{
    AssetReference, DestroyStatus, ImagePayload, Product, ProductDetails, ProductId,
    RemoteIdentifier, UploadedAsset,
};
use crate::ports::outbound::{
    AssetStorage, ImagePayloadReader, ProductRepository, ProgressReporter,
};
use crate::shared::Result;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Scripted answer for one remote call
#[derive(Debug, Clone)]
pub enum Step {
    Status(DestroyStatus),
    Fail(String),
    Hang,
}

#[derive(Default)]
struct StorageState {
    destroy_scripts: HashMap<String, VecDeque<Step>>,
    failing_uploads: HashMap<String, Step>,
    destroy_calls: Vec<String>,
    upload_calls: Vec<String>,
    upload_folders: Vec<String>,
}

/// AssetStorage double: destroys succeed and uploads return provider-shaped
/// URLs unless a script says otherwise.
#[derive(Clone, Default)]
pub struct ScriptedStorage {
    state: Arc<Mutex<StorageState>>,
}

impl ScriptedStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues answers for successive destroy calls of `identifier`
    pub fn script_destroy(self, identifier: &str, steps: Vec<Step>) -> Self {
        self.state
            .lock()
            .unwrap()
            .destroy_scripts
            .insert(identifier.to_string(), steps.into());
        self
    }

    /// Makes the upload of `file_name` fail (`Step::Fail`) or hang (`Step::Hang`)
    pub fn script_upload(self, file_name: &str, step: Step) -> Self {
        self.state
            .lock()
            .unwrap()
            .failing_uploads
            .insert(file_name.to_string(), step);
        self
    }

    pub fn destroy_calls(&self) -> Vec<String> {
        self.state.lock().unwrap().destroy_calls.clone()
    }

    pub fn upload_calls(&self) -> Vec<String> {
        self.state.lock().unwrap().upload_calls.clone()
    }

    pub fn upload_folders(&self) -> Vec<String> {
        self.state.lock().unwrap().upload_folders.clone()
    }

    pub fn url_for(file_name: &str) -> String {
        format!(
            "https://res.cloudinary.com/demo/image/upload/v1700000000/c2store/{}",
            file_name
        )
    }

    fn identifier_for(file_name: &str) -> String {
        let stem = file_name.rsplit_once('.').map_or(file_name, |(stem, _)| stem);
        format!("c2store/{}", stem)
    }
}

#[async_trait]
impl AssetStorage for ScriptedStorage {
    async fn upload(&self, payload: &ImagePayload, folder: &str) -> Result<UploadedAsset> {
        let step = {
            let mut state = self.state.lock().unwrap();
            state.upload_calls.push(payload.file_name().to_string());
            state.upload_folders.push(folder.to_string());
            state.failing_uploads.get(payload.file_name()).cloned()
        };

        match step {
            Some(Step::Fail(message)) => anyhow::bail!(message),
            Some(Step::Hang) => futures::future::pending().await,
            _ => Ok(UploadedAsset::new(
                RemoteIdentifier::new(Self::identifier_for(payload.file_name()))?,
                AssetReference::new(Self::url_for(payload.file_name()))?,
            )),
        }
    }

    async fn destroy(&self, identifier: &RemoteIdentifier) -> Result<DestroyStatus> {
        let step = {
            let mut state = self.state.lock().unwrap();
            state.destroy_calls.push(identifier.to_string());
            state
                .destroy_scripts
                .get_mut(identifier.as_str())
                .and_then(VecDeque::pop_front)
        };

        match step {
            None => Ok(DestroyStatus::Deleted),
            Some(Step::Status(status)) => Ok(status),
            Some(Step::Fail(message)) => anyhow::bail!(message),
            Some(Step::Hang) => futures::future::pending().await,
        }
    }
}

/// ProgressReporter double that records every message
#[derive(Clone, Default)]
pub struct RecordingReporter {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingReporter {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|m| m.starts_with("Error: "))
            .collect()
    }
}

impl ProgressReporter for RecordingReporter {
    fn report(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }

    fn report_progress(&self, current: usize, total: usize, _message: Option<&str>) {
        self.messages
            .lock()
            .unwrap()
            .push(format!("Progress: {}/{}", current, total));
    }

    fn report_error(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(format!("Error: {}", message));
    }

    fn report_completion(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(format!("Completed: {}", message));
    }
}

/// Record store double keyed by product id, with switchable failures
#[derive(Clone, Default)]
pub struct MemoryRepository {
    products: Arc<Mutex<HashMap<ProductId, Product>>>,
    fail_lookup: Arc<Mutex<bool>>,
    fail_delete: Arc<Mutex<bool>>,
    fail_insert: Arc<Mutex<bool>>,
}

impl MemoryRepository {
    pub fn with_product(self, product: Product) -> Self {
        self.products
            .lock()
            .unwrap()
            .insert(product.id().clone(), product);
        self
    }

    pub fn failing_lookup(self) -> Self {
        *self.fail_lookup.lock().unwrap() = true;
        self
    }

    pub fn failing_delete(self) -> Self {
        *self.fail_delete.lock().unwrap() = true;
        self
    }

    pub fn failing_insert(self) -> Self {
        *self.fail_insert.lock().unwrap() = true;
        self
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.products.lock().unwrap().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.products.lock().unwrap().len()
    }
}

#[async_trait]
impl ProductRepository for MemoryRepository {
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>> {
        if *self.fail_lookup.lock().unwrap() {
            anyhow::bail!("connection reset by peer");
        }
        Ok(self.products.lock().unwrap().get(id).cloned())
    }

    async fn delete_by_id(&self, id: &ProductId) -> Result<()> {
        if *self.fail_delete.lock().unwrap() {
            anyhow::bail!("write concern timeout");
        }
        self.products.lock().unwrap().remove(id);
        Ok(())
    }

    async fn insert(&self, product: Product) -> Result<Product> {
        if *self.fail_insert.lock().unwrap() {
            anyhow::bail!("duplicate key");
        }
        self.products
            .lock()
            .unwrap()
            .insert(product.id().clone(), product.clone());
        Ok(product)
    }

    async fn list(&self) -> Result<Vec<Product>> {
        let mut products: Vec<_> = self.products.lock().unwrap().values().cloned().collect();
        products.sort_by(|a, b| b.date().cmp(&a.date()));
        Ok(products)
    }
}

/// ImagePayloadReader double that serves a few fake bytes for any path
/// except the ones marked missing
#[derive(Clone, Default)]
pub struct StubReader {
    missing: Vec<String>,
}

impl StubReader {
    pub fn missing(mut self, path: &str) -> Self {
        self.missing.push(path.to_string());
        self
    }
}

impl ImagePayloadReader for StubReader {
    fn read_payload(&self, path: &Path) -> Result<ImagePayload> {
        let display = path.display().to_string();
        if self.missing.contains(&display) {
            anyhow::bail!("No such file or directory");
        }
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or(display);
        Ok(ImagePayload::new(file_name, vec![0xFF, 0xD8, 0xFF]))
    }
}

pub fn sample_details(name: &str) -> ProductDetails {
    ProductDetails {
        name: name.to_string(),
        description: "Soft cotton".to_string(),
        price: 25.0,
        category: "Women".to_string(),
        sub_category: "Topwear".to_string(),
        bestseller: false,
        sizes: vec!["S".to_string(), "M".to_string()],
    }
}

/// A stored product whose images are the given URLs
pub fn sample_product(id: &str, images: &[String]) -> Product {
    let images = images
        .iter()
        .map(|url| AssetReference::new(url.clone()).unwrap())
        .collect();
    Product::new(
        ProductId::new(id).unwrap(),
        sample_details("Cotton Tee"),
        images,
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    )
    .unwrap()
}
