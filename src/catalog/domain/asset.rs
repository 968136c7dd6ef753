use crate::shared::Result;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum length of a stored asset URL
const MAX_ASSET_URL_LENGTH: usize = 2048;

/// NewType wrapper for the URL of an externally hosted product image
///
/// The URL is what the product record stores. The provider handle needed to
/// delete the image is derived from it on demand and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetReference(String);

impl AssetReference {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        let trimmed = url.trim();

        if trimmed.is_empty() {
            anyhow::bail!("Asset URL cannot be empty");
        }

        if trimmed.len() > MAX_ASSET_URL_LENGTH {
            anyhow::bail!(
                "Asset URL is too long ({} bytes). Maximum allowed: {} bytes",
                trimmed.len(),
                MAX_ASSET_URL_LENGTH
            );
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle the storage provider uses to address a stored object (its public id)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemoteIdentifier(String);

impl RemoteIdentifier {
    pub fn new(identifier: impl Into<String>) -> Result<Self> {
        let identifier = identifier.into();
        if identifier.trim().is_empty() {
            anyhow::bail!("Remote identifier cannot be empty");
        }
        Ok(Self(identifier))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RemoteIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored asset URL that no resolve strategy could turn into an identifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not resolve a remote identifier from '{url}' (tried: {})", .strategies.join(", "))]
pub struct ResolutionFailure {
    pub url: String,
    pub strategies: Vec<&'static str>,
}

/// Result of a successful upload: the provider handle plus the public URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedAsset {
    pub identifier: RemoteIdentifier,
    pub url: AssetReference,
}

impl UploadedAsset {
    pub fn new(identifier: RemoteIdentifier, url: AssetReference) -> Self {
        Self { identifier, url }
    }
}
