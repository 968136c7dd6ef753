use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use storefront_assets::prelude::*;

/// Scripted answer for one destroy call
#[derive(Debug, Clone)]
pub enum MockDestroy {
    Status(&'static str),
    Fail(&'static str),
    Hang,
}

#[derive(Default)]
struct State {
    destroy_scripts: HashMap<String, VecDeque<MockDestroy>>,
    failing_uploads: HashSet<String>,
    destroyed: Vec<String>,
    uploaded: Vec<(String, String)>,
}

/// Mock AssetStorage behaving like a Cloudinary account under demo/
///
/// Uploads succeed with `https://res.cloudinary.com/demo/image/upload/v1/{folder}/{stem}.{ext}`
/// and destroys answer "ok" unless scripted otherwise.
#[derive(Default, Clone)]
pub struct MockAssetStorage {
    state: Arc<Mutex<State>>,
}

impl MockAssetStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_destroy(self, public_id: &str, steps: Vec<MockDestroy>) -> Self {
        self.state
            .lock()
            .unwrap()
            .destroy_scripts
            .insert(public_id.to_string(), steps.into());
        self
    }

    pub fn with_failing_upload(self, file_name: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .failing_uploads
            .insert(file_name.to_string());
        self
    }

    pub fn destroyed(&self) -> Vec<String> {
        self.state.lock().unwrap().destroyed.clone()
    }

    pub fn uploaded(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().uploaded.clone()
    }

    pub fn url_for(folder: &str, file_name: &str) -> String {
        format!(
            "https://res.cloudinary.com/demo/image/upload/v1/{}/{}",
            folder, file_name
        )
    }
}

#[async_trait]
impl AssetStorage for MockAssetStorage {
    async fn upload(&self, payload: &ImagePayload, folder: &str) -> Result<UploadedAsset> {
        let fails = {
            let mut state = self.state.lock().unwrap();
            state
                .uploaded
                .push((folder.to_string(), payload.file_name().to_string()));
            state.failing_uploads.contains(payload.file_name())
        };
        if fails {
            anyhow::bail!("upload of {} rejected", payload.file_name());
        }

        let stem = payload
            .file_name()
            .rsplit_once('.')
            .map_or(payload.file_name(), |(stem, _)| stem);
        Ok(UploadedAsset::new(
            RemoteIdentifier::new(format!("{}/{}", folder, stem))?,
            AssetReference::new(Self::url_for(folder, payload.file_name()))?,
        ))
    }

    async fn destroy(&self, identifier: &RemoteIdentifier) -> Result<DestroyStatus> {
        let step = {
            let mut state = self.state.lock().unwrap();
            state.destroyed.push(identifier.to_string());
            state
                .destroy_scripts
                .get_mut(identifier.as_str())
                .and_then(VecDeque::pop_front)
        };

        match step {
            None => Ok(DestroyStatus::Deleted),
            Some(MockDestroy::Status(result)) => Ok(DestroyStatus::from_provider(result)),
            Some(MockDestroy::Fail(message)) => anyhow::bail!(message),
            Some(MockDestroy::Hang) => futures::future::pending().await,
        }
    }
}
